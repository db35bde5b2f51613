//! Fallible strict-weak ordering strategies.
//!
//! Both indices phrase every ordering decision through a single "less than"
//! question asked of a caller-supplied strategy object, and nothing else: no
//! equality, no `>` derived behind the caller's back. The strategy occupies
//! the same slot a hasher does in `HashMap<K, V, S>`: totally ordered types
//! get [`NaturalOrder`] by default with no ceremony, while custom strategies
//! can fail, or order by only part of a type (a genuine strict weak order
//! with equivalence classes).
//!
//! Two elements that are mutually not-less-than each other are *equivalent*
//! for ordering purposes. The library leans on that notion alone and never
//! assumes equivalence implies interchangeability.

use crate::error::PeakMapError;
use std::convert::Infallible;

/// A strict weak ordering over `T` given by one fallible "less than"
/// primitive.
pub trait TryOrder<T> {
    /// Failure reported by a comparison attempt.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns `true` iff `a` orders strictly before `b`.
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, Self::Error>;
}

/// The ordering every totally ordered type already carries. Comparisons
/// through it cannot fail.
///
/// # Example
/// ```rust
/// use peak_map::{NaturalOrder, TryOrder};
/// assert_eq!(NaturalOrder.try_lt(&3, &5), Ok(true));
/// assert_eq!(NaturalOrder.try_lt(&5, &5), Ok(false));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> TryOrder<T> for NaturalOrder {
    type Error = Infallible;

    #[inline]
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, Self::Error> {
        Ok(a < b)
    }
}

/// Comparison helper used by the index internals: lifts the strategy's own
/// error into [`PeakMapError`] at the library boundary.
#[inline]
pub(crate) fn lt<T, O: TryOrder<T>>(order: &O, a: &T, b: &T) -> Result<bool, PeakMapError> {
    order.try_lt(a, b).map_err(PeakMapError::comparison)
}
