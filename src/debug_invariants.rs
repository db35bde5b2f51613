//! Invariant validation hooks for the index structures.

use crate::error::PeakMapError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    ///
    /// A [`PeakMapError::Comparison`] coming out of validation means the
    /// caller's ordering is currently unavailable; there is nothing to check
    /// in that case, so it is not treated as a violation.
    fn debug_assert_invariants(&self);

    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), PeakMapError>;
}

/// `true` when invariant assertions are compiled in.
#[inline]
pub(crate) const fn invariant_checks_enabled() -> bool {
    cfg!(any(
        debug_assertions,
        feature = "check-invariants",
        feature = "strict-invariants"
    ))
}
