// ABOUTME: Building blocks of the privilege-escalation exec protocol.
// ABOUTME: Shell wrapping, privilege selection, and permission failure classification.

use crate::runtime::{ExecConfig, ExecResult};

/// Rights a single exec attempt runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// The image's default user.
    Unprivileged,
    /// The configured administrative user.
    Privileged,
}

/// `bash -c "<command>"`; commands are never split into argv.
pub fn shell_command(command: &str) -> Vec<String> {
    vec!["bash".to_string(), "-c".to_string(), command.to_string()]
}

pub(crate) fn exec_config(command: &str, privilege: Privilege, privileged_user: &str) -> ExecConfig {
    ExecConfig {
        cmd: shell_command(command),
        user: match privilege {
            Privilege::Unprivileged => None,
            Privilege::Privileged => Some(privileged_user.to_string()),
        },
        attach_stdout: true,
        attach_stderr: true,
        ..Default::default()
    }
}

/// Whether an unprivileged attempt failed for lack of permissions.
///
/// Matches `marker` against the captured output; the exit code is ignored.
pub fn is_permission_denied(result: &ExecResult, marker: &str) -> bool {
    !marker.is_empty() && result.output_text().contains(marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(text: &str, exit_code: i64) -> ExecResult {
        ExecResult {
            exit_code: Some(exit_code),
            output: text.as_bytes().to_vec(),
        }
    }

    #[test]
    fn command_is_wrapped_not_split() {
        assert_eq!(
            shell_command("echo 'a b' > /tmp/x"),
            vec!["bash", "-c", "echo 'a b' > /tmp/x"]
        );
    }

    #[test]
    fn privileged_attempt_sets_user() {
        let config = exec_config("ls", Privilege::Privileged, "root");
        assert_eq!(config.user.as_deref(), Some("root"));

        let config = exec_config("ls", Privilege::Unprivileged, "root");
        assert!(config.user.is_none());
    }

    #[test]
    fn classifier_reads_output_not_exit_code() {
        let marker = "Permission denied";
        assert!(is_permission_denied(
            &output("chown: /opt/cloudunit: Permission denied\n", 0),
            marker
        ));
        assert!(!is_permission_denied(&output("No such file or directory", 1), marker));
        assert!(!is_permission_denied(&output("permission denied", 1), marker));
    }

    #[test]
    fn empty_marker_never_matches() {
        assert!(!is_permission_denied(&output("anything", 0), ""));
    }
}
