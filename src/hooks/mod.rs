// ABOUTME: Lifecycle hooks run inside server containers.
// ABOUTME: Catalogue of named actions and the resolver that turns templates into commands.

mod action;
mod template;

pub use action::{LifecycleAction, UnknownAction};
pub use template::{bash_invocation, resolve};
