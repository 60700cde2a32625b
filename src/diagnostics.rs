// ABOUTME: Diagnostics accumulator for non-fatal conditions seen by the controller.
// ABOUTME: Collects warnings that must not fail an operation but should reach operators.

/// Collects non-fatal warnings.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Hand over the collected warnings, leaving the accumulator empty.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

/// A non-fatal warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A container exited with a nonzero code.
    pub fn brutal_stop(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::BrutalStop,
            message: message.into(),
        }
    }

    /// Listing containers failed and an empty result was returned instead.
    pub fn listing_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ListingFailed,
            message: message.into(),
        }
    }

    /// A command hit a permission failure and was re-run privileged.
    pub fn privileged_retry(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::PrivilegedRetry,
            message: message.into(),
        }
    }
}

/// Categories of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Exit code was nonzero when checking for a graceful stop.
    BrutalStop,
    /// Best-effort listing swallowed a daemon error.
    ListingFailed,
    /// Unprivileged exec output reported a permission failure.
    PrivilegedRetry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn take_drains_warnings() {
        let mut diag = Diagnostics::default();
        diag.warn(Warning::brutal_stop("exit code 137"));
        diag.warn(Warning::listing_failed("connection refused"));

        let taken = diag.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].kind, WarningKind::BrutalStop);
        assert_eq!(taken[1].kind, WarningKind::ListingFailed);
        assert!(diag.warnings().is_empty());
    }
}
