//! `Point`: the immutable (argument, value) pair held by both indices.
//!
//! A point is created once by the mutation engine and never mutated in
//! place. Its argument and value live behind `Arc`s so that the domain
//! index and the maxima index observe literally the same pair: inserting a
//! point into the second index clones the handle, which bumps two reference
//! counts instead of copying data. This is what makes the relationship
//! invariant (maxima entries mirror domain entries, never diverging copies)
//! cheap to uphold and cheap to check.
//!
//! Handles returned to callers are snapshots: cloning one keeps the
//! underlying pair alive and unchanged regardless of later map mutations,
//! though the pair may no longer correspond to a live domain entry.

use std::fmt;
use std::sync::Arc;

/// An immutable (argument, value) pair of the function.
pub struct Point<A, V> {
    arg: Arc<A>,
    value: Arc<V>,
}

impl<A, V> Point<A, V> {
    /// Only the map itself mints points; callers receive handles.
    #[inline]
    pub(crate) fn new(arg: A, value: V) -> Self {
        Self {
            arg: Arc::new(arg),
            value: Arc::new(value),
        }
    }

    /// The point's argument.
    #[inline]
    pub fn arg(&self) -> &A {
        &self.arg
    }

    /// The point's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// `true` iff `other` is a handle to the very same pair (pointer
    /// identity, not ordering equivalence). Used by invariant validation to
    /// prove the maxima index aliases domain storage rather than copying it.
    #[inline]
    pub(crate) fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.arg, &other.arg) && Arc::ptr_eq(&self.value, &other.value)
    }
}

/// Cloning is two reference-count bumps; no `A: Clone`/`V: Clone` needed.
impl<A, V> Clone for Point<A, V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            arg: Arc::clone(&self.arg),
            value: Arc::clone(&self.value),
        }
    }
}

impl<A: fmt::Debug, V: fmt::Debug> fmt::Debug for Point<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("arg", &*self.arg)
            .field("value", &*self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let p = Point::new(3u32, -7i64);
        assert_eq!(*p.arg(), 3);
        assert_eq!(*p.value(), -7);
    }

    #[test]
    fn clone_shares_storage() {
        let p = Point::new("k".to_string(), 1u8);
        let q = p.clone();
        assert!(p.shares_storage(&q));
        let r = Point::new("k".to_string(), 1u8);
        assert!(!p.shares_storage(&r));
    }

    #[test]
    fn debug_format() {
        let p = Point::new(1u32, 2u32);
        assert_eq!(format!("{p:?}"), "Point { arg: 1, value: 2 }");
    }
}

#[cfg(test)]
mod layout_tests {
    //! A handle is two pointers, independent of `A`/`V` size.
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Point<u8, [u64; 16]>, [usize; 2]);
}
