use crate::bound_error::BoundVarError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), BoundVarError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
///
/// Without `strict-invariants` a failed check in a release build with
/// `check-invariants` is only logged.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
        #[cfg(all(
            not(debug_assertions),
            not(feature = "strict-invariants"),
            feature = "check-invariants"
        ))]
        if let Err(e) = $expr {
            log::error!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
