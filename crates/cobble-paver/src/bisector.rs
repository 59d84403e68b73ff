// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Bisectors
//!
//! A bisector chooses the dimension along which a surviving cell's box
//! is split and performs the split at a fixed ratio point. A dimension
//! is eligible when its width is finite and strictly above the
//! bisector's precision threshold; when no dimension is eligible the
//! bisector declines and the driver discards the cell.
//!
//! The chosen dimension is recorded on the resulting cells as
//! `last_split_var`, which the round-robin policy reads to continue the
//! cycle where the parent left off.

use crate::cell::Cell;
use cobble_contract::index::VarIndex;
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;

/// The outcome of a successful bisection: two sub-boxes partitioning the
/// chosen dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Bisection<T>
where
    T: PaverNumeric,
{
    pub left: IntervalBox<T>,
    pub right: IntervalBox<T>,
    pub var: VarIndex,
}

/// A dimension-selection strategy.
pub trait Bisector<T>
where
    T: PaverNumeric,
{
    /// A human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Splits the cell's box, or returns `None` if no dimension is wide
    /// enough to split.
    fn bisect(&mut self, cell: &Cell<T>) -> Option<Bisection<T>>;
}

impl<T> std::fmt::Debug for dyn Bisector<T> + '_
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bisector({})", self.name())
    }
}

#[inline]
fn default_split_ratio<T>() -> T
where
    T: PaverNumeric,
{
    T::from_f64(0.5).expect("default split ratio must be representable")
}

#[inline]
fn check_params<T>(prec: T, ratio: T)
where
    T: PaverNumeric,
{
    assert!(
        prec.is_finite() && prec >= T::zero(),
        "called bisector constructor with a negative or non-finite precision"
    );
    assert!(
        ratio > T::zero() && ratio < T::one(),
        "called bisector constructor with ratio outside (0, 1)"
    );
}

/// Is `width` worth splitting under threshold `prec`?
#[inline]
fn eligible<T>(width: T, prec: T) -> bool
where
    T: PaverNumeric,
{
    width.is_finite() && width > prec
}

/// Always splits the widest eligible dimension (ties broken by the
/// lowest dimension index).
#[derive(Clone, Debug, PartialEq)]
pub struct LargestFirstBisector<T> {
    prec: T,
    ratio: T,
}

impl<T> LargestFirstBisector<T>
where
    T: PaverNumeric,
{
    /// Creates a largest-first bisector splitting at `ratio`.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is negative or non-finite, or `ratio` is not
    /// strictly between 0 and 1.
    pub fn new(prec: T, ratio: T) -> Self {
        check_params(prec, ratio);
        Self { prec, ratio }
    }

    /// Creates a largest-first bisector splitting at the midpoint.
    pub fn midpoint(prec: T) -> Self {
        Self::new(prec, default_split_ratio())
    }
}

impl<T> Bisector<T> for LargestFirstBisector<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "LargestFirstBisector"
    }

    fn bisect(&mut self, cell: &Cell<T>) -> Option<Bisection<T>> {
        let domain = cell.domain();
        let mut best: Option<(usize, T)> = None;
        for (dim, component) in domain.iter().enumerate() {
            let width = component.width();
            if !eligible(width, self.prec) {
                continue;
            }
            match best {
                Some((_, best_width)) if width <= best_width => {}
                _ => best = Some((dim, width)),
            }
        }
        let (dim, _) = best?;
        let (left, right) = domain.bisect(dim, self.ratio);
        Some(Bisection {
            left,
            right,
            var: VarIndex::new(dim),
        })
    }
}

/// Cycles through the dimensions, resuming after the dimension the
/// parent cell was split on and skipping ineligible ones.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundRobinBisector<T> {
    prec: T,
    ratio: T,
}

impl<T> RoundRobinBisector<T>
where
    T: PaverNumeric,
{
    /// Creates a round-robin bisector splitting at `ratio`.
    ///
    /// # Panics
    ///
    /// Panics if `prec` is negative or non-finite, or `ratio` is not
    /// strictly between 0 and 1.
    pub fn new(prec: T, ratio: T) -> Self {
        check_params(prec, ratio);
        Self { prec, ratio }
    }

    /// Creates a round-robin bisector splitting at the midpoint.
    pub fn midpoint(prec: T) -> Self {
        Self::new(prec, default_split_ratio())
    }
}

impl<T> Bisector<T> for RoundRobinBisector<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "RoundRobinBisector"
    }

    fn bisect(&mut self, cell: &Cell<T>) -> Option<Bisection<T>> {
        let domain = cell.domain();
        let dim_count = domain.dim();
        let start = match cell.last_split_var() {
            Some(var) => (var.get() + 1) % dim_count,
            None => 0,
        };
        for offset in 0..dim_count {
            let dim = (start + offset) % dim_count;
            if eligible(domain[dim].width(), self.prec) {
                let (left, right) = domain.bisect(dim, self.ratio);
                return Some(Bisection {
                    left,
                    right,
                    var: VarIndex::new(dim),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtrack::{BacktrackableRegistry, BranchSide};
    use cobble_core::math::interval::Interval;

    fn cell(bounds: &[(f64, f64)]) -> Cell<f64> {
        Cell::root(
            IntervalBox::from_bounds(bounds),
            &BacktrackableRegistry::new(),
        )
    }

    #[test]
    fn test_largest_first_picks_widest_dimension() {
        let mut bisector = LargestFirstBisector::midpoint(0.0);
        let cell = cell(&[(0.0, 1.0), (0.0, 8.0), (0.0, 3.0)]);
        let bisection = bisector.bisect(&cell).unwrap();
        assert_eq!(bisection.var, VarIndex::new(1));
        assert_eq!(bisection.left[1], Interval::new(0.0, 4.0));
        assert_eq!(bisection.right[1], Interval::new(4.0, 8.0));
        // Untouched dimensions are copied unchanged.
        assert_eq!(bisection.left[0], cell.domain()[0]);
        assert_eq!(bisection.right[2], cell.domain()[2]);
    }

    #[test]
    fn test_largest_first_tie_breaks_low_dimension() {
        let mut bisector = LargestFirstBisector::midpoint(0.0);
        let cell = cell(&[(0.0, 5.0), (10.0, 15.0)]);
        let bisection = bisector.bisect(&cell).unwrap();
        assert_eq!(bisection.var, VarIndex::new(0));
    }

    #[test]
    fn test_precision_threshold_declines_small_boxes() {
        let mut bisector = LargestFirstBisector::midpoint(1.0);
        let cell = cell(&[(0.0, 0.5), (0.0, 1.0)]);
        assert!(bisector.bisect(&cell).is_none());
    }

    #[test]
    fn test_unbounded_dimensions_are_skipped() {
        let mut bisector = LargestFirstBisector::midpoint(0.0);
        let registry = BacktrackableRegistry::new();
        let mut domain = IntervalBox::<f64>::new(2);
        domain[1] = Interval::new(0.0, 4.0);
        let cell = Cell::root(domain, &registry);
        let bisection = bisector.bisect(&cell).unwrap();
        assert_eq!(bisection.var, VarIndex::new(1));
    }

    #[test]
    fn test_custom_ratio_split_point() {
        let mut bisector = LargestFirstBisector::new(0.0, 0.25);
        let cell = cell(&[(0.0, 8.0)]);
        let bisection = bisector.bisect(&cell).unwrap();
        assert_eq!(bisection.left[0], Interval::new(0.0, 2.0));
        assert_eq!(bisection.right[0], Interval::new(2.0, 8.0));
    }

    #[test]
    fn test_round_robin_starts_after_parent_split() {
        let mut bisector = RoundRobinBisector::midpoint(0.0);
        let registry = BacktrackableRegistry::new();
        let root = cell(&[(0.0, 4.0), (0.0, 4.0), (0.0, 4.0)]);

        let first = bisector.bisect(&root).unwrap();
        assert_eq!(first.var, VarIndex::new(0));

        let child = root.child(&registry, BranchSide::Left, first.left, first.var);
        let second = bisector.bisect(&child).unwrap();
        assert_eq!(second.var, VarIndex::new(1));

        let grandchild = child.child(&registry, BranchSide::Left, second.left, second.var);
        let third = bisector.bisect(&grandchild).unwrap();
        assert_eq!(third.var, VarIndex::new(2));
    }

    #[test]
    fn test_round_robin_wraps_and_skips_ineligible() {
        let mut bisector = RoundRobinBisector::midpoint(1.0);
        let registry = BacktrackableRegistry::new();
        // Only dimension 0 is wide enough.
        let root = cell(&[(0.0, 4.0), (0.0, 0.5)]);
        let first = bisector.bisect(&root).unwrap();
        assert_eq!(first.var, VarIndex::new(0));

        // The child resumes at dimension 1, finds it too small, wraps
        // back to dimension 0.
        let child = root.child(&registry, BranchSide::Right, first.right, first.var);
        let second = bisector.bisect(&child).unwrap();
        assert_eq!(second.var, VarIndex::new(0));
    }

    #[test]
    #[should_panic(expected = "ratio outside (0, 1)")]
    fn test_constructor_rejects_bad_ratio() {
        let _ = LargestFirstBisector::new(0.0, 1.5);
    }
}
