// ABOUTME: Closed catalogue of lifecycle actions and their command templates.
// ABOUTME: Each action carries a display label and a shell command with placeholder tokens.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::template::{bash_invocation, resolve};

/// Placeholder tokens a template may contain.
const PLACEHOLDERS: [&str; 4] = ["CU_USER", "CU_PASSWORD", "MEMORY_VALUE", "JVM_OPTIONS"];

/// A named hook or operational action run inside a server container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    AddUser,
    ChangeCuRights,
    CheckRunning,
    Deploy,
    ChangeServerConfig,
    ChangeJavaVersion,
    ModulePreCreation,
    ModulePostCreation,
    ApplicationPreFirstDeploy,
    ApplicationPostFirstDeploy,
    ApplicationPreStart,
    ApplicationPostStart,
    ApplicationPreStop,
    ApplicationPostStop,
    SnapshotPreAction,
    SnapshotPostAction,
    ClonePreAction,
    ClonePostAction,
    GatherEnvironment,
}

#[derive(Debug, Error)]
#[error("unknown lifecycle action: {0}")]
pub struct UnknownAction(pub String);

impl LifecycleAction {
    pub const ALL: [LifecycleAction; 19] = [
        LifecycleAction::AddUser,
        LifecycleAction::ChangeCuRights,
        LifecycleAction::CheckRunning,
        LifecycleAction::Deploy,
        LifecycleAction::ChangeServerConfig,
        LifecycleAction::ChangeJavaVersion,
        LifecycleAction::ModulePreCreation,
        LifecycleAction::ModulePostCreation,
        LifecycleAction::ApplicationPreFirstDeploy,
        LifecycleAction::ApplicationPostFirstDeploy,
        LifecycleAction::ApplicationPreStart,
        LifecycleAction::ApplicationPostStart,
        LifecycleAction::ApplicationPreStop,
        LifecycleAction::ApplicationPostStop,
        LifecycleAction::SnapshotPreAction,
        LifecycleAction::SnapshotPostAction,
        LifecycleAction::ClonePreAction,
        LifecycleAction::ClonePostAction,
        LifecycleAction::GatherEnvironment,
    ];

    /// Human-readable label. Not used when executing.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleAction::AddUser => "Add user for admin console",
            LifecycleAction::ChangeCuRights => "Change rights for user CloudUnit",
            LifecycleAction::CheckRunning => "Check running",
            LifecycleAction::Deploy => "Deploy application",
            LifecycleAction::ChangeServerConfig => "Change Server Configuration",
            LifecycleAction::ChangeJavaVersion => "Change Server Configuration",
            LifecycleAction::ModulePreCreation => "Module pre creation",
            LifecycleAction::ModulePostCreation => "Module pre creation",
            LifecycleAction::ApplicationPreFirstDeploy => "Application pre first deploy",
            LifecycleAction::ApplicationPostFirstDeploy => "Application post first deploy",
            LifecycleAction::ApplicationPreStart => "Application pre start",
            LifecycleAction::ApplicationPostStart => "Application post start",
            LifecycleAction::ApplicationPreStop => "Application pre stop",
            LifecycleAction::ApplicationPostStop => "Application post stop",
            LifecycleAction::SnapshotPreAction => "Before Snapshot",
            LifecycleAction::SnapshotPostAction => "After Snapshot",
            LifecycleAction::ClonePreAction => "Before restoring an application",
            LifecycleAction::ClonePostAction => "After restoring an application",
            LifecycleAction::GatherEnvironment => "Gather CU env variables",
        }
    }

    /// The raw template, placeholders unresolved.
    pub fn command_template(&self) -> &'static str {
        match self {
            LifecycleAction::AddUser => "/opt/cloudunit/scripts/add-user.sh CU_USER CU_PASSWORD",
            LifecycleAction::ChangeCuRights => "chown -R cloudunit:cloudunit /opt/cloudunit",
            LifecycleAction::CheckRunning => "/opt/cloudunit/scripts/check-running.sh",
            LifecycleAction::Deploy => "/opt/cloudunit/scripts/deploy.sh CU_USER CU_PASSWORD",
            LifecycleAction::ChangeServerConfig => {
                "/opt/cloudunit/scripts/change-server-config.sh MEMORY_VALUE JVM_OPTIONS"
            }
            LifecycleAction::ChangeJavaVersion => {
                "/opt/cloudunit/scripts/change-java-version.sh MEMORY_VALUE JVM_OPTIONS"
            }
            LifecycleAction::ModulePreCreation => "/opt/cloudunit/hooks/module-pre-creation.sh",
            LifecycleAction::ModulePostCreation => "/opt/cloudunit/hooks/module-post-creation.sh",
            LifecycleAction::ApplicationPreFirstDeploy => {
                "/opt/cloudunit/hooks/application-pre-first-deploy.sh"
            }
            LifecycleAction::ApplicationPostFirstDeploy => {
                "/opt/cloudunit/hooks/application-post-first-deploy.sh"
            }
            LifecycleAction::ApplicationPreStart => "/opt/cloudunit/application-pre-start.sh",
            LifecycleAction::ApplicationPostStart => {
                "/opt/cloudunit/hooks/application-post-start.sh"
            }
            LifecycleAction::ApplicationPreStop => "/opt/cloudunit/hooks/application-pre-stop.sh",
            LifecycleAction::ApplicationPostStop => {
                "/opt/cloudunit/hooks/application-post-stop.sh"
            }
            LifecycleAction::SnapshotPreAction => "/opt/cloudunit/hooks/snapshot-pre-action.sh",
            LifecycleAction::SnapshotPostAction => "/opt/cloudunit/hooks/snapshot-post-action.sh",
            LifecycleAction::ClonePreAction => "/opt/cloudunit/hooks/clone-pre-action.sh",
            LifecycleAction::ClonePostAction => "/opt/cloudunit/hooks/clone-post-action.sh",
            LifecycleAction::GatherEnvironment => "/opt/cloudunit/scripts/env.sh",
        }
    }

    /// Kebab-case name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleAction::AddUser => "add-user",
            LifecycleAction::ChangeCuRights => "change-cu-rights",
            LifecycleAction::CheckRunning => "check-running",
            LifecycleAction::Deploy => "deploy",
            LifecycleAction::ChangeServerConfig => "change-server-config",
            LifecycleAction::ChangeJavaVersion => "change-java-version",
            LifecycleAction::ModulePreCreation => "module-pre-creation",
            LifecycleAction::ModulePostCreation => "module-post-creation",
            LifecycleAction::ApplicationPreFirstDeploy => "application-pre-first-deploy",
            LifecycleAction::ApplicationPostFirstDeploy => "application-post-first-deploy",
            LifecycleAction::ApplicationPreStart => "application-pre-start",
            LifecycleAction::ApplicationPostStart => "application-post-start",
            LifecycleAction::ApplicationPreStop => "application-pre-stop",
            LifecycleAction::ApplicationPostStop => "application-post-stop",
            LifecycleAction::SnapshotPreAction => "snapshot-pre-action",
            LifecycleAction::SnapshotPostAction => "snapshot-post-action",
            LifecycleAction::ClonePreAction => "clone-pre-action",
            LifecycleAction::ClonePostAction => "clone-post-action",
            LifecycleAction::GatherEnvironment => "gather-environment",
        }
    }

    /// Placeholder tokens present in this action's template, in template order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let template = self.command_template();
        let mut found: Vec<(usize, &'static str)> = PLACEHOLDERS
            .iter()
            .filter_map(|token| template.find(token).map(|pos| (pos, *token)))
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        found.into_iter().map(|(_, token)| token).collect()
    }

    /// Resolve the template against `bindings`. The catalogue itself is never modified.
    pub fn command<K, V>(&self, bindings: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        resolve(self.command_template(), bindings)
    }

    /// `["bash", <resolved command>]` for handing to a process spawner.
    pub fn bash_invocation<K, V>(&self, bindings: &[(K, V)]) -> [String; 2]
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        bash_invocation(self.command(bindings))
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifecycleAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        LifecycleAction::ALL
            .into_iter()
            .find(|action| action.name() == wanted)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
