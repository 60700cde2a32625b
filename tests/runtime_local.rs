// ABOUTME: Integration tests against a local Docker/Podman daemon.
// ABOUTME: Skipped when no runtime socket is found or the test image is not present.

mod support;

use dockhand::config::ControllerConfig;
use dockhand::controller::{ControllerError, ControllerErrorKind, ServerController};
use dockhand::diagnostics::Diagnostics;
use dockhand::model::{ServerRecord, UserRecord};
use dockhand::runtime::{BollardRuntime, ContainerError, detect_local};
use dockhand::types::{ContainerHandle, ContainerName, ImageRef};
use std::time::Duration;

const TEST_IMAGE: &str = "debian:bookworm-slim";

/// Get a controller on the local runtime, if there is one.
async fn local_controller() -> Option<ServerController<BollardRuntime>> {
    let info = detect_local().ok()?;
    let runtime = BollardRuntime::connect(&info).await.ok()?;
    let settings = ControllerConfig {
        base_volume: None,
        stop_timeout: Duration::from_secs(2),
        ..Default::default()
    };
    Some(ServerController::new(runtime, settings))
}

/// Skip test if no local runtime available.
macro_rules! require_controller {
    () => {
        match local_controller().await {
            Some(controller) => controller,
            None => {
                eprintln!("Skipping test: no local container runtime found");
                return;
            }
        }
    };
}

fn unique_name(prefix: &str) -> ContainerName {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    ContainerName::new(&format!("{}-{}-{}", prefix, std::process::id(), nanos)).unwrap()
}

#[tokio::test]
async fn listing_does_not_fail() {
    support::init_tracing();
    let controller = require_controller!();

    let mut diag = Diagnostics::default();
    let _ = controller.list_container_ids(&mut diag).await;
    assert!(diag.warnings().is_empty());
}

#[tokio::test]
async fn missing_container_is_not_found() {
    support::init_tracing();
    let controller = require_controller!();

    let handle = ContainerHandle::new(unique_name("dockhand-ghost"));
    let err = controller.is_running(&handle).await.unwrap_err();

    assert_eq!(err.kind(), ControllerErrorKind::RuntimeCall);
    assert!(matches!(
        err,
        ControllerError::Container {
            source: ContainerError::NotFound(_),
            ..
        }
    ));
}

/// The image's default command exits at once, which is enough to walk
/// create, start, exit, inspect, extract, and remove.
#[tokio::test]
async fn short_lived_container_lifecycle() {
    support::init_tracing();
    let controller = require_controller!();

    let name = unique_name("dockhand-it");
    let image = ImageRef::parse(TEST_IMAGE).unwrap();
    let created = controller
        .create(
            &name,
            &image,
            &ServerRecord::default(),
            &UserRecord::new("tester"),
        )
        .await;
    let mut handle = match created {
        Ok(handle) => handle,
        Err(ControllerError::Container {
            source: ContainerError::ImageNotFound(_),
            ..
        }) => {
            eprintln!("Skipping test: {TEST_IMAGE} not present locally");
            return;
        }
        Err(e) => panic!("create failed: {e}"),
    };

    controller.resolve_handle(&mut handle).await.unwrap();
    let id = handle.id.clone().unwrap();

    let mut server = ServerRecord::default();
    controller.start(&name, &mut server).await.unwrap();
    assert_eq!(server.container_id.as_ref(), Some(&id));

    let mut exited = false;
    for _ in 0..50 {
        if !controller.is_running(&handle).await.unwrap() {
            exited = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
    assert!(exited, "container should exit on its own");
    let mut diag = Diagnostics::default();
    assert!(
        controller
            .is_stopped_gracefully(&handle, &mut diag)
            .await
            .unwrap()
    );

    let path = controller.env_variable(&id, "PATH").await.unwrap();
    assert!(path.contains("/usr/bin"));

    let mut sink = Vec::new();
    let written = controller
        .extract_file(&id, "/etc/debian_version", &mut sink)
        .await
        .unwrap();
    assert!(written > 0);
    assert!(!String::from_utf8_lossy(&sink).trim().is_empty());

    assert!(controller.list_container_ids(&mut diag).await.contains(&id));
    assert_eq!(controller.container_name(&id).await.unwrap(), name.as_str());

    controller.remove(&name).await.unwrap();
    assert!(controller.is_running(&handle).await.is_err());
}
