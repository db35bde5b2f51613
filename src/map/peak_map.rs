//! In-memory ordered function map with incrementally tracked local maxima.
//!
//! This module provides [`PeakMap`], the public structure tying the two
//! indices together: the argument-ordered domain index (authoritative) and
//! the rank-ordered maxima index (derived, always consistent). Every
//! mutation goes through the staged engine in [`PeakMap::set_value`] and
//! [`PeakMap::erase`], which reclassifies at most three points (the mutated
//! one and its two domain-neighbors) and never rescans the full domain.

use super::domain::DomainIndex;
use super::maxima::MaximaIndex;
use super::point::Point;
use super::staged::StagedInserts;
use crate::debug_invariants::{DebugInvariants, invariant_checks_enabled};
use crate::error::PeakMapError;
use crate::order::{NaturalOrder, TryOrder, lt};
use std::fmt;

/// Ascending traversal over point handles (argument order for [`PeakMap::iter`],
/// best-rank-first for [`PeakMap::peaks`]).
pub type Iter<'a, A, V> = std::slice::Iter<'a, Point<A, V>>;

/// Local-maximum predicate: `mid` qualifies iff its value is not less than
/// either neighbor's. A missing neighbor satisfies its side, so a boundary
/// point only has to dominate the neighbor it has, and a sole point always
/// qualifies.
pub(crate) fn is_local_maximum<A, V, OV: TryOrder<V>>(
    left: Option<&Point<A, V>>,
    mid: &Point<A, V>,
    right: Option<&Point<A, V>>,
    value_order: &OV,
) -> Result<bool, PeakMapError> {
    if let Some(l) = left {
        if lt(value_order, mid.value(), l.value())? {
            return Ok(false);
        }
    }
    if let Some(r) = right {
        if lt(value_order, mid.value(), r.value())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// An ordered mapping from arguments to values that maintains, incrementally,
/// the set of its locally-maximal points.
///
/// Arguments and values only need a strict weak ordering through the single
/// fallible primitive [`TryOrder::try_lt`], supplied by the `OA`/`OV`
/// strategy parameters (defaulting to [`NaturalOrder`] for `Ord` types, the
/// way `HashMap` defaults its hasher). If a comparison fails partway through
/// a mutation, the map is left exactly as it was before the call and the
/// failure propagates.
///
/// # Example
/// ```rust
/// use peak_map::PeakMap;
/// let mut f = PeakMap::new();
/// f.set_value(1, 10)?;
/// f.set_value(2, 5)?;
/// f.set_value(3, 10)?;
/// f.set_value(4, 1)?;
/// let peaks: Vec<(i32, i32)> = f.peaks().map(|p| (*p.arg(), *p.value())).collect();
/// assert_eq!(peaks, vec![(1, 10), (3, 10)]);
/// # Ok::<(), peak_map::PeakMapError>(())
/// ```
pub struct PeakMap<A, V, OA = NaturalOrder, OV = NaturalOrder> {
    domain: DomainIndex<A, V>,
    maxima: MaximaIndex<A, V>,
    arg_order: OA,
    value_order: OV,
}

impl<A, V> PeakMap<A, V> {
    /// Creates a new, empty `PeakMap` ordered by the types' own `Ord`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: Ord, V: Ord> PeakMap<A, V> {
    /// Builds a map from `(argument, value)` pairs, applying them in order
    /// (later pairs overwrite earlier ones with an equivalent argument).
    ///
    /// # Example
    /// ```rust
    /// use peak_map::PeakMap;
    /// let f = PeakMap::from_pairs([(2, 20), (1, 10), (2, 5)])?;
    /// assert_eq!(f.len(), 2);
    /// assert_eq!(f.value_at(&2)?, &5);
    /// # Ok::<(), peak_map::PeakMapError>(())
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PeakMapError>
    where
        I: IntoIterator<Item = (A, V)>,
    {
        let mut map = Self::new();
        for (a, v) in pairs {
            map.set_value(a, v)?;
        }
        Ok(map)
    }
}

impl<A, V, OA, OV> PeakMap<A, V, OA, OV> {
    /// Creates an empty map using the given ordering strategies.
    pub fn with_orders(arg_order: OA, value_order: OV) -> Self {
        Self {
            domain: DomainIndex::default(),
            maxima: MaximaIndex::default(),
            arg_order,
            value_order,
        }
    }

    /// Number of points in the domain.
    #[inline]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// `true` iff the domain is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.domain.len() == 0
    }

    /// Ascending-argument traversal over the domain's point handles.
    #[inline]
    pub fn iter(&self) -> Iter<'_, A, V> {
        self.domain.iter()
    }

    /// Traversal over the current local maxima, best value first, ties
    /// between equivalent values broken by ascending argument.
    #[inline]
    pub fn peaks(&self) -> Iter<'_, A, V> {
        self.maxima.iter()
    }

    /// The best-ranked local maximum, i.e. the handle holding the domain's
    /// globally largest value, or `None` on an empty map.
    #[inline]
    pub fn peak(&self) -> Option<&Point<A, V>> {
        self.maxima.first()
    }
}

impl<A, V, OA, OV> PeakMap<A, V, OA, OV>
where
    OA: TryOrder<A>,
    OV: TryOrder<V>,
{
    /// Handle of the point at `arg`, or `None` when `arg` is outside the
    /// domain. Clone the handle to keep a snapshot across later mutations.
    pub fn find(&self, arg: &A) -> Result<Option<&Point<A, V>>, PeakMapError> {
        Ok(self
            .domain
            .find_index(arg, &self.arg_order)?
            .map(|i| self.domain.get(i)))
    }

    /// `true` iff `arg` is in the domain.
    pub fn contains(&self, arg: &A) -> Result<bool, PeakMapError> {
        Ok(self.domain.find_index(arg, &self.arg_order)?.is_some())
    }

    /// The value at `arg`.
    ///
    /// # Errors
    /// [`PeakMapError::InvalidArgument`] when `arg` is not in the domain.
    ///
    /// # Example
    /// ```rust
    /// use peak_map::{PeakMap, PeakMapError};
    /// let mut f = PeakMap::new();
    /// f.set_value(7, "seven")?;
    /// assert_eq!(f.value_at(&7)?, &"seven");
    /// assert!(matches!(f.value_at(&8), Err(PeakMapError::InvalidArgument)));
    /// # Ok::<(), PeakMapError>(())
    /// ```
    pub fn value_at(&self, arg: &A) -> Result<&V, PeakMapError> {
        match self.domain.find_index(arg, &self.arg_order)? {
            Some(i) => Ok(self.domain.get(i).value()),
            None => Err(PeakMapError::InvalidArgument),
        }
    }

    /// Makes the function return `v` at `a`, adding `a` to the domain when
    /// absent, and reclassifies the affected neighbors in the maxima index.
    ///
    /// On a comparison failure the map is unchanged and the failure
    /// propagates as [`PeakMapError::Comparison`].
    pub fn set_value(&mut self, a: A, v: V) -> Result<(), PeakMapError> {
        let point = Point::new(a, v);

        // Locate phase: every comparison below runs against the unmodified
        // structure. `left`/`right` are the neighbors of the slot `point`
        // will occupy, skipping the superseded entry when the slot is taken.
        let slot = self.domain.locate(point.arg(), &self.arg_order)?;
        let left_idx = slot.index.checked_sub(1);
        let right_idx = {
            let r = if slot.occupied { slot.index + 1 } else { slot.index };
            (r < self.domain.len()).then_some(r)
        };

        let old = slot.occupied.then(|| self.domain.get(slot.index).clone());
        let left = left_idx.map(|i| self.domain.get(i).clone());
        let right = right_idx.map(|i| self.domain.get(i).clone());

        // Desired classification once `point` occupies the slot. The
        // superseded entry's own status is irrelevant; it is on its way out.
        let left_is_max = match (left.as_ref(), left_idx) {
            (Some(l), Some(li)) => {
                let ll = li.checked_sub(1).map(|i| self.domain.get(i));
                is_local_maximum(ll, l, Some(&point), &self.value_order)?
            }
            _ => false,
        };
        let right_is_max = match (right.as_ref(), right_idx) {
            (Some(r), Some(ri)) => {
                let rr = (ri + 1 < self.domain.len()).then(|| self.domain.get(ri + 1));
                is_local_maximum(Some(&point), r, rr, &self.value_order)?
            }
            _ => false,
        };
        let new_is_max = is_local_maximum(left.as_ref(), &point, right.as_ref(), &self.value_order)?;

        let left_member = match left.as_ref() {
            Some(l) => self.maxima.position_of(l, &self.value_order, &self.arg_order)?,
            None => None,
        };
        let right_member = match right.as_ref() {
            Some(r) => self.maxima.position_of(r, &self.value_order, &self.arg_order)?,
            None => None,
        };
        let old_member = match old.as_ref() {
            Some(o) => self.maxima.position_of(o, &self.value_order, &self.arg_order)?,
            None => None,
        };

        // Staged commit: promote newly-qualifying points one splice at a
        // time. A failed position search unwinds the applied splices and
        // leaves the map untouched.
        let mut staged = StagedInserts::default();
        let commit = (|| -> Result<(), PeakMapError> {
            if let Some(l) = left.as_ref() {
                if left_is_max && left_member.is_none() {
                    staged.insert(
                        &mut self.maxima,
                        l.clone(),
                        &self.value_order,
                        &self.arg_order,
                    )?;
                }
            }
            if let Some(r) = right.as_ref() {
                if right_is_max && right_member.is_none() {
                    staged.insert(
                        &mut self.maxima,
                        r.clone(),
                        &self.value_order,
                        &self.arg_order,
                    )?;
                }
            }
            if new_is_max {
                staged.insert(
                    &mut self.maxima,
                    point.clone(),
                    &self.value_order,
                    &self.arg_order,
                )?;
            }
            Ok(())
        })();
        if let Err(err) = commit {
            log::trace!(
                "set_value: comparison failed mid-commit; rolling back {} staged maxima insert(s)",
                staged.applied_count()
            );
            staged.unwind(&mut self.maxima);
            return Err(err);
        }

        // Domain commit. Positions were computed before any maxima splice
        // and the domain itself has not moved, so this is comparison-free.
        // Replacing in place keeps arguments unique at every step.
        if slot.occupied {
            self.domain.replace_at(slot.index, point);
        } else {
            self.domain.insert_at(slot.index, point);
        }

        // Retirement: demote neighbors that stopped qualifying and drop the
        // superseded entry's membership. Positions recorded before staging
        // are mapped through the staged splices, then removed high-to-low.
        let mut retire: Vec<usize> = Vec::new();
        if let Some(pos) = left_member {
            if !left_is_max {
                retire.push(staged.adjust(pos));
            }
        }
        if let Some(pos) = right_member {
            if !right_is_max {
                retire.push(staged.adjust(pos));
            }
        }
        if let Some(pos) = old_member {
            retire.push(staged.adjust(pos));
        }
        retire.sort_unstable();
        for pos in retire.into_iter().rev() {
            self.maxima.remove_at(pos);
        }

        self.debug_assert_invariants();
        Ok(())
    }

    /// Removes `a` from the domain and reclassifies its neighbors. A
    /// successful no-op when `a` is absent.
    ///
    /// On a comparison failure the map is unchanged and the failure
    /// propagates as [`PeakMapError::Comparison`].
    ///
    /// # Example
    /// ```rust
    /// use peak_map::PeakMap;
    /// let mut f = PeakMap::from_pairs([(1, 1)])?;
    /// f.erase(&1)?;
    /// f.erase(&1)?; // absent: still Ok
    /// assert!(f.is_empty());
    /// # Ok::<(), peak_map::PeakMapError>(())
    /// ```
    pub fn erase(&mut self, a: &A) -> Result<(), PeakMapError> {
        let Some(mid_idx) = self.domain.find_index(a, &self.arg_order)? else {
            return Ok(());
        };
        let left_idx = mid_idx.checked_sub(1);
        let right_idx = (mid_idx + 1 < self.domain.len()).then(|| mid_idx + 1);

        let mid = self.domain.get(mid_idx).clone();
        let left = left_idx.map(|i| self.domain.get(i).clone());
        let right = right_idx.map(|i| self.domain.get(i).clone());

        // Desired classification with `mid` gone: the two neighbors become
        // adjacent to each other.
        let left_is_max = match (left.as_ref(), left_idx) {
            (Some(l), Some(li)) => {
                let ll = li.checked_sub(1).map(|i| self.domain.get(i));
                is_local_maximum(ll, l, right.as_ref(), &self.value_order)?
            }
            _ => false,
        };
        let right_is_max = match (right.as_ref(), right_idx) {
            (Some(r), Some(ri)) => {
                let rr = (ri + 1 < self.domain.len()).then(|| self.domain.get(ri + 1));
                is_local_maximum(left.as_ref(), r, rr, &self.value_order)?
            }
            _ => false,
        };

        let left_member = match left.as_ref() {
            Some(l) => self.maxima.position_of(l, &self.value_order, &self.arg_order)?,
            None => None,
        };
        let right_member = match right.as_ref() {
            Some(r) => self.maxima.position_of(r, &self.value_order, &self.arg_order)?,
            None => None,
        };
        let mid_member = self
            .maxima
            .position_of(&mid, &self.value_order, &self.arg_order)?;

        let mut staged = StagedInserts::default();
        let commit = (|| -> Result<(), PeakMapError> {
            if let Some(l) = left.as_ref() {
                if left_is_max && left_member.is_none() {
                    staged.insert(
                        &mut self.maxima,
                        l.clone(),
                        &self.value_order,
                        &self.arg_order,
                    )?;
                }
            }
            if let Some(r) = right.as_ref() {
                if right_is_max && right_member.is_none() {
                    staged.insert(
                        &mut self.maxima,
                        r.clone(),
                        &self.value_order,
                        &self.arg_order,
                    )?;
                }
            }
            Ok(())
        })();
        if let Err(err) = commit {
            log::trace!(
                "erase: comparison failed mid-commit; rolling back {} staged maxima insert(s)",
                staged.applied_count()
            );
            staged.unwind(&mut self.maxima);
            return Err(err);
        }

        let mut retire: Vec<usize> = Vec::new();
        if let Some(pos) = left_member {
            if !left_is_max {
                retire.push(staged.adjust(pos));
            }
        }
        if let Some(pos) = right_member {
            if !right_is_max {
                retire.push(staged.adjust(pos));
            }
        }
        if let Some(pos) = mid_member {
            retire.push(staged.adjust(pos));
        }
        retire.sort_unstable();
        for pos in retire.into_iter().rev() {
            self.maxima.remove_at(pos);
        }

        self.domain.remove_at(mid_idx);

        self.debug_assert_invariants();
        Ok(())
    }
}

impl<A, V, OA: Default, OV: Default> Default for PeakMap<A, V, OA, OV> {
    fn default() -> Self {
        Self::with_orders(OA::default(), OV::default())
    }
}

/// Deep copy: both indices are rebuilt with independent entry storage. The
/// immutable pairs themselves stay structurally shared, which preserves the
/// aliasing between a clone's own two indices.
impl<A, V, OA: Clone, OV: Clone> Clone for PeakMap<A, V, OA, OV> {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            maxima: self.maxima.clone(),
            arg_order: self.arg_order.clone(),
            value_order: self.value_order.clone(),
        }
    }
}

/// Like `HashMap`, the ordering strategies are omitted from the output.
impl<A: fmt::Debug, V: fmt::Debug, OA, OV> fmt::Debug for PeakMap<A, V, OA, OV> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeakMap")
            .field("domain", &self.domain)
            .field("maxima", &self.maxima)
            .finish()
    }
}

impl<'a, A, V, OA, OV> IntoIterator for &'a PeakMap<A, V, OA, OV> {
    type Item = &'a Point<A, V>;
    type IntoIter = Iter<'a, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A, V, OA, OV> DebugInvariants for PeakMap<A, V, OA, OV>
where
    OA: TryOrder<A>,
    OV: TryOrder<V>,
{
    fn debug_assert_invariants(&self) {
        if !invariant_checks_enabled() {
            return;
        }
        match self.validate_invariants() {
            Ok(()) => {}
            // The caller's ordering is unavailable right now; there is
            // nothing to check against.
            Err(PeakMapError::Comparison(_)) => {}
            Err(err) => panic!("[invariants] {err}"),
        }
    }

    fn validate_invariants(&self) -> Result<(), PeakMapError> {
        use itertools::Itertools;

        if self.maxima.len() > self.domain.len() {
            return Err(PeakMapError::InvariantViolation(
                "more maxima entries than domain points".into(),
            ));
        }

        for (p, q) in self.domain.iter().tuple_windows() {
            if !lt(&self.arg_order, p.arg(), q.arg())? {
                return Err(PeakMapError::InvariantViolation(
                    "domain entries not in strictly ascending argument order".into(),
                ));
            }
        }

        for (p, q) in self.maxima.iter().tuple_windows() {
            if MaximaIndex::ranks_before(q, p, &self.value_order, &self.arg_order)? {
                return Err(PeakMapError::InvariantViolation(
                    "maxima entries out of rank order".into(),
                ));
            }
        }

        for m in self.maxima.iter() {
            let Some(i) = self.domain.find_index(m.arg(), &self.arg_order)? else {
                return Err(PeakMapError::InvariantViolation(
                    "maxima entry without a matching domain entry".into(),
                ));
            };
            if !m.shares_storage(self.domain.get(i)) {
                return Err(PeakMapError::InvariantViolation(
                    "maxima entry does not alias its domain entry".into(),
                ));
            }
        }

        for i in 0..self.domain.len() {
            let entry = self.domain.get(i);
            let left = i.checked_sub(1).map(|j| self.domain.get(j));
            let right = (i + 1 < self.domain.len()).then(|| self.domain.get(i + 1));
            let expected = is_local_maximum(left, entry, right, &self.value_order)?;
            let actual = self
                .maxima
                .position_of(entry, &self.value_order, &self.arg_order)?
                .is_some();
            if expected != actual {
                return Err(PeakMapError::InvariantViolation(format!(
                    "domain entry {i}: local_maximum={expected} but membership={actual}"
                )));
            }
        }

        Ok(())
    }
}
