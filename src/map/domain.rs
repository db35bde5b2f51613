//! Domain index: the authoritative, argument-ordered point set.
//!
//! Entries are kept in a vector sorted strictly ascending by argument under
//! the caller's ordering strategy. Every fallible comparison happens inside
//! a binary search; the structural operations (`insert_at`, `replace_at`,
//! `remove_at`) are positional splices that perform no comparisons and
//! cannot fail. The mutation engine relies on that split: it finishes all
//! comparisons against an unmodified index before committing anything.
//!
//! Arguments are unique up to ordering equivalence. There is no entry pair
//! `(p, q)` with neither `p.arg < q.arg` nor `q.arg < p.arg`; an update to
//! an occupied slot replaces it in place, so the invariant holds even
//! mid-mutation.

use super::point::Point;
use crate::error::PeakMapError;
use crate::order::{TryOrder, lt};
use std::fmt;

/// Where an argument lives (or would live) in the domain.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DomainSlot {
    /// Entry index for an occupied slot; insertion index otherwise.
    pub index: usize,
    /// `true` iff an entry with an equivalent argument sits at `index`.
    pub occupied: bool,
}

pub(crate) struct DomainIndex<A, V> {
    entries: Vec<Point<A, V>>,
}

impl<A, V> DomainIndex<A, V> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Point<A, V> {
        &self.entries[index]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Point<A, V>> {
        self.entries.iter()
    }

    /// Splice a point in at `index`, shifting later entries right.
    #[inline]
    pub fn insert_at(&mut self, index: usize, point: Point<A, V>) {
        self.entries.insert(index, point);
    }

    /// Overwrite the slot at `index`, dropping the superseded point.
    #[inline]
    pub fn replace_at(&mut self, index: usize, point: Point<A, V>) {
        self.entries[index] = point;
    }

    /// Remove and return the entry at `index`.
    #[inline]
    pub fn remove_at(&mut self, index: usize) -> Point<A, V> {
        self.entries.remove(index)
    }

    /// First index whose argument is not less than `arg`.
    fn lower_bound<O: TryOrder<A>>(&self, arg: &A, order: &O) -> Result<usize, PeakMapError> {
        let (mut lo, mut hi) = (0, self.entries.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if lt(order, self.entries[mid].arg(), arg)? {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Locate the slot for `arg`: its entry index when present, the
    /// insertion index otherwise.
    pub fn locate<O: TryOrder<A>>(&self, arg: &A, order: &O) -> Result<DomainSlot, PeakMapError> {
        let index = self.lower_bound(arg, order)?;
        let occupied = match self.entries.get(index) {
            Some(entry) => !lt(order, arg, entry.arg())?,
            None => false,
        };
        Ok(DomainSlot { index, occupied })
    }

    /// Entry index holding an argument equivalent to `arg`, if any.
    pub fn find_index<O: TryOrder<A>>(
        &self,
        arg: &A,
        order: &O,
    ) -> Result<Option<usize>, PeakMapError> {
        let slot = self.locate(arg, order)?;
        Ok(slot.occupied.then_some(slot.index))
    }
}

impl<A, V> Default for DomainIndex<A, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A, V> Clone for DomainIndex<A, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<A: fmt::Debug, V: fmt::Debug> fmt::Debug for DomainIndex<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::NaturalOrder;

    fn index_of(pairs: &[(u32, i32)]) -> DomainIndex<u32, i32> {
        let mut idx = DomainIndex::default();
        for &(a, v) in pairs {
            let slot = idx.locate(&a, &NaturalOrder).unwrap();
            assert!(!slot.occupied);
            idx.insert_at(slot.index, Point::new(a, v));
        }
        idx
    }

    #[test]
    fn locate_empty() {
        let idx = DomainIndex::<u32, i32>::default();
        let slot = idx.locate(&5, &NaturalOrder).unwrap();
        assert_eq!(slot.index, 0);
        assert!(!slot.occupied);
    }

    #[test]
    fn locate_hits_and_misses() {
        let idx = index_of(&[(10, 0), (20, 0), (30, 0)]);
        assert!(matches!(
            idx.locate(&20, &NaturalOrder).unwrap(),
            DomainSlot {
                index: 1,
                occupied: true
            }
        ));
        assert!(matches!(
            idx.locate(&25, &NaturalOrder).unwrap(),
            DomainSlot {
                index: 2,
                occupied: false
            }
        ));
        assert!(matches!(
            idx.locate(&35, &NaturalOrder).unwrap(),
            DomainSlot {
                index: 3,
                occupied: false
            }
        ));
    }

    #[test]
    fn out_of_order_inserts_end_up_sorted() {
        let idx = index_of(&[(30, 0), (10, 0), (20, 0)]);
        let args: Vec<u32> = idx.iter().map(|p| *p.arg()).collect();
        assert_eq!(args, vec![10, 20, 30]);
    }

    #[test]
    fn find_index_absent() {
        let idx = index_of(&[(1, 0)]);
        assert_eq!(idx.find_index(&2, &NaturalOrder).unwrap(), None);
        assert_eq!(idx.find_index(&1, &NaturalOrder).unwrap(), Some(0));
    }
}
