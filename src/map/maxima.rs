//! Maxima index: the derived, rank-ordered view of the local maxima.
//!
//! Entries are kept sorted by *rank*: best value first, ties between
//! equivalent values broken by ascending argument. Because domain arguments
//! are unique, no two entries are rank-equivalent, so a point's rank pins a
//! single position and identity lookup is a plain lower-bound.
//!
//! The ordering is value-first, so lookup and removal need the point's
//! current (value, argument) key, which the mutation engine always has
//! because it holds the point handle itself.
//!
//! Like the domain index, all fallible comparisons happen in searches;
//! splices are positional and infallible.

use super::point::Point;
use crate::error::PeakMapError;
use crate::order::{TryOrder, lt};
use std::fmt;

pub(crate) struct MaximaIndex<A, V> {
    entries: Vec<Point<A, V>>,
}

impl<A, V> MaximaIndex<A, V> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Point<A, V>> {
        self.entries.iter()
    }

    /// Best-ranked entry, if the index is non-empty.
    #[inline]
    pub fn first(&self) -> Option<&Point<A, V>> {
        self.entries.first()
    }

    #[inline]
    pub fn insert_at(&mut self, index: usize, point: Point<A, V>) {
        self.entries.insert(index, point);
    }

    #[inline]
    pub fn remove_at(&mut self, index: usize) -> Point<A, V> {
        self.entries.remove(index)
    }

    /// Rank comparator: `p` ranks before `q` iff `p`'s value is better, or
    /// the values are equivalent and `p`'s argument orders first.
    pub(crate) fn ranks_before<OA, OV>(
        p: &Point<A, V>,
        q: &Point<A, V>,
        value_order: &OV,
        arg_order: &OA,
    ) -> Result<bool, PeakMapError>
    where
        OA: TryOrder<A>,
        OV: TryOrder<V>,
    {
        if lt(value_order, q.value(), p.value())? {
            return Ok(true);
        }
        if lt(value_order, p.value(), q.value())? {
            return Ok(false);
        }
        lt(arg_order, p.arg(), q.arg())
    }

    /// Position at which `point` belongs: the first entry that does not rank
    /// before it.
    pub fn insert_position<OA, OV>(
        &self,
        point: &Point<A, V>,
        value_order: &OV,
        arg_order: &OA,
    ) -> Result<usize, PeakMapError>
    where
        OA: TryOrder<A>,
        OV: TryOrder<V>,
    {
        let (mut lo, mut hi) = (0, self.entries.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if Self::ranks_before(&self.entries[mid], point, value_order, arg_order)? {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(lo)
    }

    /// Current position of the entry mirroring `point`, if it is a member.
    pub fn position_of<OA, OV>(
        &self,
        point: &Point<A, V>,
        value_order: &OV,
        arg_order: &OA,
    ) -> Result<Option<usize>, PeakMapError>
    where
        OA: TryOrder<A>,
        OV: TryOrder<V>,
    {
        let pos = self.insert_position(point, value_order, arg_order)?;
        match self.entries.get(pos) {
            // `pos` is a lower bound, so the entry there does not rank before
            // `point`; rank-equivalence then means same value class and same
            // argument class, i.e. the mirrored entry itself.
            Some(entry) if !Self::ranks_before(point, entry, value_order, arg_order)? => {
                Ok(Some(pos))
            }
            _ => Ok(None),
        }
    }
}

impl<A, V> Default for MaximaIndex<A, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A, V> Clone for MaximaIndex<A, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<A: fmt::Debug, V: fmt::Debug> fmt::Debug for MaximaIndex<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::NaturalOrder;

    fn insert(idx: &mut MaximaIndex<u32, i32>, arg: u32, value: i32) {
        let p = Point::new(arg, value);
        let pos = idx
            .insert_position(&p, &NaturalOrder, &NaturalOrder)
            .unwrap();
        idx.insert_at(pos, p);
    }

    #[test]
    fn best_value_first() {
        let mut idx = MaximaIndex::default();
        insert(&mut idx, 1, 5);
        insert(&mut idx, 2, 9);
        insert(&mut idx, 3, 1);
        let ranks: Vec<(u32, i32)> = idx.iter().map(|p| (*p.arg(), *p.value())).collect();
        assert_eq!(ranks, vec![(2, 9), (1, 5), (3, 1)]);
    }

    #[test]
    fn equal_values_tie_break_by_argument() {
        let mut idx = MaximaIndex::default();
        insert(&mut idx, 9, 7);
        insert(&mut idx, 1, 7);
        insert(&mut idx, 4, 7);
        let args: Vec<u32> = idx.iter().map(|p| *p.arg()).collect();
        assert_eq!(args, vec![1, 4, 9]);
    }

    #[test]
    fn position_of_member_and_non_member() {
        let mut idx = MaximaIndex::default();
        insert(&mut idx, 1, 5);
        insert(&mut idx, 2, 9);
        let pos = |arg, value| {
            idx.position_of(&Point::new(arg, value), &NaturalOrder, &NaturalOrder)
                .unwrap()
        };
        assert_eq!(pos(1, 5), Some(1));
        // same argument, different value: not this member's key
        assert_eq!(pos(1, 6), None);
        assert_eq!(pos(3, 9), None);
    }
}
