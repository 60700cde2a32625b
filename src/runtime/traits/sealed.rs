// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Only adapters defined in this crate can implement the capability traits.

/// Sealed trait to prevent external implementations.
///
/// New methods can be added to the capability traits without a breaking
/// change because nothing outside the crate implements them.
pub trait Sealed {}
