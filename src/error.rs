//! `PeakMapError`: unified error type for peak-map public APIs
//!
//! This error type is used throughout the peak-map library to provide robust,
//! non-panicking error handling for all public APIs.

use std::sync::Arc;
use thiserror::Error;

/// Unified error type for peak-map operations.
#[derive(Debug, Error, Clone)]
pub enum PeakMapError {
    /// Queried an argument that is not in the function's domain.
    #[error("invalid argument: not in the function domain")]
    InvalidArgument,
    /// A caller-supplied ordering comparison reported failure. The structure
    /// is guaranteed to be unchanged when this is returned from a mutation.
    #[error("ordering comparison failed")]
    Comparison(#[source] Arc<dyn std::error::Error + Send + Sync + 'static>),
    /// An index inconsistency was detected by invariant validation.
    #[error("index invariant violated: {0}")]
    InvariantViolation(String),
}

impl PeakMapError {
    /// Wrap a comparator failure for propagation through the public API.
    pub(crate) fn comparison<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PeakMapError::Comparison(Arc::new(err))
    }
}
