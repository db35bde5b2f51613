//! Staged maxima insertions with exact rollback.
//!
//! A mutation stages its maxima-index insertions one at a time; each staged
//! insert runs a fallible position search against the index *as already
//! modified by earlier staged inserts*, then splices infallibly and records
//! the position. If a later search fails, `unwind` reverses exactly the
//! recorded splices in reverse order, restoring the index byte-for-byte.
//!
//! Positions of pre-existing entries recorded before staging (pending
//! demotions and retirements) are shifted by the staged splices; `adjust`
//! replays the staged positions to map such a position into the post-staging
//! index.

use super::maxima::MaximaIndex;
use super::point::Point;
use crate::error::PeakMapError;
use crate::order::TryOrder;

#[derive(Default)]
pub(crate) struct StagedInserts {
    // chronological splice positions
    applied: Vec<usize>,
}

impl StagedInserts {
    /// Search, splice, record. On a failed search nothing is applied and the
    /// recorder is unchanged; the caller is expected to `unwind`.
    pub fn insert<A, V, OA, OV>(
        &mut self,
        maxima: &mut MaximaIndex<A, V>,
        point: Point<A, V>,
        value_order: &OV,
        arg_order: &OA,
    ) -> Result<(), PeakMapError>
    where
        OA: TryOrder<A>,
        OV: TryOrder<V>,
    {
        let pos = maxima.insert_position(&point, value_order, arg_order)?;
        maxima.insert_at(pos, point);
        self.applied.push(pos);
        Ok(())
    }

    /// Reverse every recorded splice, most recent first.
    pub fn unwind<A, V>(self, maxima: &mut MaximaIndex<A, V>) {
        for &pos in self.applied.iter().rev() {
            maxima.remove_at(pos);
        }
    }

    /// Map a pre-staging entry position to its post-staging position.
    pub fn adjust(&self, position: usize) -> usize {
        let mut current = position;
        for &p in &self.applied {
            if p <= current {
                current += 1;
            }
        }
        current
    }

    #[inline]
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::NaturalOrder;

    #[test]
    fn unwind_restores_prior_contents() {
        let mut maxima = MaximaIndex::<u32, i32>::default();
        for (a, v) in [(1u32, 10i32), (2, 5)] {
            let p = Point::new(a, v);
            let pos = maxima
                .insert_position(&p, &NaturalOrder, &NaturalOrder)
                .unwrap();
            maxima.insert_at(pos, p);
        }

        let mut staged = StagedInserts::default();
        staged
            .insert(&mut maxima, Point::new(3, 20), &NaturalOrder, &NaturalOrder)
            .unwrap();
        staged
            .insert(&mut maxima, Point::new(4, 1), &NaturalOrder, &NaturalOrder)
            .unwrap();
        assert_eq!(maxima.len(), 4);

        staged.unwind(&mut maxima);
        let left: Vec<(u32, i32)> = maxima.iter().map(|p| (*p.arg(), *p.value())).collect();
        assert_eq!(left, vec![(1, 10), (2, 5)]);
    }

    #[test]
    fn adjust_tracks_shifts() {
        let mut staged = StagedInserts::default();
        staged.applied = vec![0, 2];
        // entry originally at 0: shifted once by the splice at 0; the splice
        // at 2 lands past it.
        assert_eq!(staged.adjust(0), 1);
        // entry originally at 3: shifted by both splices.
        assert_eq!(staged.adjust(3), 5);
    }
}
