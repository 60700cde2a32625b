// ABOUTME: Library root for dockhand, a container lifecycle controller and hook runner.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod hooks;
pub mod model;
pub mod output;
pub mod runtime;
pub mod types;
