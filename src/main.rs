// ABOUTME: Entry point for the dockhand CLI application.
// ABOUTME: Parses arguments, connects to the local daemon, and dispatches to the controller.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use dockhand::config::{self, Config};
use dockhand::controller::{ControllerError, Privilege, ServerController};
use dockhand::diagnostics::Diagnostics;
use dockhand::error::{Error, Result};
use dockhand::hooks::LifecycleAction;
use dockhand::model::{ServerRecord, UserRecord};
use dockhand::output::{Output, OutputMode};
use dockhand::runtime::{BollardRuntime, ConnectError, detect_runtime};
use dockhand::types::{ContainerHandle, ContainerId};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let output = Output::new(if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Normal
    });

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let path = config::init_config(&env::current_dir()?, force)?;
            output.progress(&format!("Created {}", path.display()));
            Ok(())
        }
        Commands::Actions => {
            for action in LifecycleAction::ALL {
                match output.mode() {
                    OutputMode::Normal => println!(
                        "{:<32} {:<34} {}",
                        action.name(),
                        action.label(),
                        action.command_template()
                    ),
                    OutputMode::Json => output.value(action.name(), action.command_template()),
                }
            }
            Ok(())
        }
        command => {
            let config = load_config(cli.config.as_deref())?;
            let controller = connect(config).await?;
            let mut diag = Diagnostics::default();
            let result = dispatch(&controller, command, output, &mut diag).await;

            for warning in diag.take() {
                output.warning(&warning);
            }
            result
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound(path.to_path_buf())),
        Some(path) => Config::load(path),
        None => Config::discover_or_default(&env::current_dir()?),
    }
}

async fn connect(config: Config) -> Result<ServerController<BollardRuntime>> {
    let info = detect_runtime(&config.daemon).map_err(ConnectError::from)?;
    tracing::debug!(runtime = %info.runtime_type, socket = %info.socket_path, "connecting");

    let runtime = BollardRuntime::connect(&info).await?;
    Ok(ServerController::new(runtime, config.controller))
}

async fn dispatch(
    controller: &ServerController<BollardRuntime>,
    command: Commands,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<()> {
    match command {
        Commands::Create {
            name,
            image,
            user,
            jvm_options,
        } => {
            let server = ServerRecord::with_jvm_options(jvm_options);
            let mut handle = controller
                .create(&name, &image, &server, &UserRecord::new(user))
                .await?;
            controller.resolve_handle(&mut handle).await?;
            output.value("id", handle.target());
        }
        Commands::Start { name } => {
            let mut server = ServerRecord::default();
            controller.start(&name, &mut server).await?;
            match output.mode() {
                OutputMode::Normal => {
                    if let Some(id) = &server.container_id {
                        println!("id:      {}", id.short());
                    }
                    println!(
                        "ip:      {}",
                        server.ip_address.as_deref().unwrap_or("-")
                    );
                    println!("running: {}", server.running);
                }
                OutputMode::Json => println!("{}", serde_json::to_string(&server)?),
            }
        }
        Commands::Stop { name } => {
            controller.stop(&name).await?;
            output.progress(&format!("Stopped {name}"));
        }
        Commands::Kill { name } => {
            controller.kill(&name).await?;
            output.progress(&format!("Killed {name}"));
        }
        Commands::Rm { name } => {
            controller.remove(&name).await?;
            output.progress(&format!("Removed {name}"));
        }
        Commands::Exec {
            container,
            privileged,
            command,
        } => {
            let text = if privileged {
                controller
                    .execute_as(&container, &command, Privilege::Privileged)
                    .await
                    .map_err(|source| ControllerError::Exec {
                        container: container.clone(),
                        command: command.clone(),
                        source,
                    })?
                    .output_text()
            } else {
                controller.execute(&container, &command, diag).await?
            };
            output.text("output", &text);
        }
        Commands::Hook {
            container,
            action,
            bindings,
        } => {
            let text = controller
                .run_hook(&container, action, &bindings, diag)
                .await?;
            output.text("output", &text);
        }
        Commands::Running { name } => {
            let running = controller.is_running(&ContainerHandle::new(name)).await?;
            output.value("running", running);
        }
        Commands::Stopped { name } => {
            let exited = controller
                .is_stopped_gracefully(&ContainerHandle::new(name), diag)
                .await?;
            output.value("exited", exited);
        }
        Commands::Env {
            container,
            variable,
        } => {
            let value = controller
                .env_variable(&ContainerId::new(container), &variable)
                .await?;
            output.value(&variable, value);
        }
        Commands::Cp {
            container,
            path,
            output: target,
        } => {
            let id = ContainerId::new(container);
            let written = match target {
                Some(target) => {
                    let mut sink = BufWriter::new(File::create(&target)?);
                    controller.extract_file(&id, &path, &mut sink).await?
                }
                None => {
                    let mut sink = io::stdout().lock();
                    controller.extract_file(&id, &path, &mut sink).await?
                }
            };
            tracing::debug!(bytes = written, "copied");
        }
        Commands::Ls => {
            for id in controller.list_container_ids(diag).await {
                output.value("id", id.as_str());
            }
        }
        Commands::Init { .. } | Commands::Actions => {
            return Err(Error::InvalidArgument(
                "command does not need a daemon".to_string(),
            ));
        }
    }
    Ok(())
}
