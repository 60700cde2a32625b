// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: One subcommand per controller operation plus config and catalogue helpers.

use clap::{Parser, Subcommand};
use dockhand::hooks::LifecycleAction;
use dockhand::types::{ContainerName, ImageRef};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dockhand")]
#[command(about = "Lifecycle controller and hook runner for application server containers")]
#[command(version)]
pub struct Cli {
    /// Config file (default: dockhand.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new dockhand.yml configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// List the lifecycle actions and their command templates
    Actions,

    /// Create a server container
    Create {
        name: ContainerName,

        #[arg(short, long)]
        image: ImageRef,

        /// Login of the owning user
        #[arg(short, long, default_value = "admin")]
        user: String,

        /// JVM options; -Dcloudunit.shared.dir=<dir> mounts a shared directory
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        jvm_options: String,
    },

    /// Start a container and print its observed state
    Start { name: ContainerName },

    /// Stop a container gracefully
    Stop { name: ContainerName },

    /// Kill a container
    Kill { name: ContainerName },

    /// Remove a container
    Rm { name: ContainerName },

    /// Run a shell command inside a container
    Exec {
        container: String,

        /// Run once as the privileged user instead of retrying on permission failures
        #[arg(long)]
        privileged: bool,

        /// Shell command, passed verbatim to `bash -c`; quote it as one argument
        #[arg(allow_hyphen_values = true)]
        command: String,
    },

    /// Run a lifecycle hook inside a container
    Hook {
        container: String,

        action: LifecycleAction,

        /// Placeholder binding, applied in order
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_binding)]
        bindings: Vec<(String, String)>,
    },

    /// Print whether a container is running
    Running { name: ContainerName },

    /// Print whether a container has exited
    Stopped { name: ContainerName },

    /// Print an environment variable of a container
    Env { container: String, variable: String },

    /// Copy a file out of a container
    Cp {
        container: String,

        path: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the ids of all containers
    Ls,
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_splits_on_first_equals() {
        assert_eq!(
            parse_binding("JVM_OPTIONS=-Dx=y").unwrap(),
            ("JVM_OPTIONS".to_string(), "-Dx=y".to_string())
        );
        assert!(parse_binding("NOVALUE").is_err());
        assert!(parse_binding("=x").is_err());
    }

    #[test]
    fn exec_takes_command_verbatim() {
        let cli = Cli::try_parse_from(["dockhand", "exec", "web", "echo 'a  b' > /tmp/x"]).unwrap();
        match cli.command {
            Commands::Exec { command, .. } => assert_eq!(command, "echo 'a  b' > /tmp/x"),
            _ => panic!("expected the exec subcommand"),
        }

        assert!(Cli::try_parse_from(["dockhand", "exec", "web", "echo", "a"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
