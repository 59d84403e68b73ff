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

//! # Interval Boxes
//!
//! An `IntervalBox<T>` is an axis-aligned hyper-rectangle: one closed real
//! interval per dimension. It is the mutable search region narrowed by
//! contractors and split by bisectors. A box is empty as soon as any of
//! its components is empty; `set_empty` canonicalizes all components so
//! that two empty boxes of the same dimension compare equal.

use crate::math::interval::Interval;
use num_traits::Float;
use std::ops::{Index, IndexMut};

/// An axis-aligned box of closed real intervals, one per variable.
#[derive(Clone, PartialEq)]
pub struct IntervalBox<T>
where
    T: Float,
{
    components: Vec<Interval<T>>,
}

impl<T> IntervalBox<T>
where
    T: Float,
{
    /// Creates a box of `dim` unbounded components `(-inf, +inf)`.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is zero.
    #[inline]
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "Invalid box: dimension must be at least 1");
        Self {
            components: vec![Interval::all_reals(); dim],
        }
    }

    /// Creates a box from explicit `(lb, ub)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if `bounds` is empty or any pair is an invalid interval.
    #[inline]
    pub fn from_bounds(bounds: &[(T, T)]) -> Self {
        assert!(!bounds.is_empty(), "Invalid box: dimension must be at least 1");
        Self {
            components: bounds
                .iter()
                .map(|&(lb, ub)| Interval::new(lb, ub))
                .collect(),
        }
    }

    /// Creates a box with `dim` copies of the same interval.
    #[inline]
    pub fn uniform(dim: usize, itv: Interval<T>) -> Self {
        assert!(dim > 0, "Invalid box: dimension must be at least 1");
        Self {
            components: vec![itv; dim],
        }
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if any component is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.iter().any(Interval::is_empty)
    }

    /// Empties every component (canonical empty box).
    #[inline]
    pub fn set_empty(&mut self) {
        for c in self.components.iter_mut() {
            *c = Interval::empty();
        }
    }

    /// Intersects this box componentwise with `other`.
    ///
    /// If the result is empty in any dimension the whole box is
    /// canonicalized to empty.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn intersect_with(&mut self, other: &Self) {
        assert_eq!(
            self.dim(),
            other.dim(),
            "called `IntervalBox::intersect_with` with mismatched dimensions"
        );
        for (c, o) in self.components.iter_mut().zip(other.components.iter()) {
            *c = c.intersection(o);
        }
        if self.is_empty() {
            self.set_empty();
        }
    }

    /// Returns `true` if the point lies inside the box.
    ///
    /// # Panics
    ///
    /// Panics if the point dimension differs.
    pub fn contains(&self, point: &[T]) -> bool {
        assert_eq!(
            self.dim(),
            point.len(),
            "called `IntervalBox::contains` with mismatched dimensions"
        );
        self.components
            .iter()
            .zip(point.iter())
            .all(|(c, &x)| c.contains(x))
    }

    /// Returns `true` if this box is a subset of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn is_subset(&self, other: &Self) -> bool {
        assert_eq!(
            self.dim(),
            other.dim(),
            "called `IntervalBox::is_subset` with mismatched dimensions"
        );
        if self.is_empty() {
            return true;
        }
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(c, o)| c.is_subset(o))
    }

    /// Returns the largest component width.
    ///
    /// The empty box has maximal width zero.
    #[inline]
    pub fn max_width(&self) -> T {
        if self.is_empty() {
            return T::zero();
        }
        self.components
            .iter()
            .map(Interval::width)
            .fold(T::zero(), T::max)
    }

    /// Returns the dimension with the largest width (ties broken by the
    /// lowest dimension index).
    ///
    /// # Panics
    ///
    /// Panics if the box is empty.
    pub fn widest_dim(&self) -> usize {
        assert!(
            !self.is_empty(),
            "called `IntervalBox::widest_dim` on an empty box"
        );
        let mut best = 0;
        let mut best_width = self.components[0].width();
        for (i, c) in self.components.iter().enumerate().skip(1) {
            let w = c.width();
            if w > best_width {
                best = i;
                best_width = w;
            }
        }
        best
    }

    /// Splits the box along `dim` at the given ratio point, returning the
    /// two sub-boxes. All other dimensions are copied unchanged; the two
    /// children share exactly the split plane along `dim`.
    ///
    /// # Panics
    ///
    /// Panics if `dim` is out of range, the component is empty or
    /// unbounded, or `ratio` is not strictly between 0 and 1.
    pub fn bisect(&self, dim: usize, ratio: T) -> (Self, Self) {
        assert!(
            dim < self.dim(),
            "called `IntervalBox::bisect` with dimension out of bounds: the dim is {} but the index is {}",
            self.dim(),
            dim
        );
        let (lo, hi) = self.components[dim].split(ratio);
        let mut left = self.clone();
        let mut right = self.clone();
        left.components[dim] = lo;
        right.components[dim] = hi;
        (left, right)
    }

    /// Returns an iterator over the components.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<T>> {
        self.components.iter()
    }
}

impl<T> Index<usize> for IntervalBox<T>
where
    T: Float,
{
    type Output = Interval<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.components[index]
    }
}

impl<T> IndexMut<usize> for IntervalBox<T>
where
    T: Float,
{
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.components[index]
    }
}

impl<T> std::fmt::Debug for IntervalBox<T>
where
    T: Float + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.components.iter()).finish()
    }
}

impl<T> std::fmt::Display for IntervalBox<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ; ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Bx = IntervalBox<f64>;

    fn unit_square() -> Bx {
        Bx::from_bounds(&[(0.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_new_is_unbounded() {
        let b = Bx::new(3);
        assert_eq!(b.dim(), 3);
        assert!(!b.is_empty());
        assert!(b[0].is_unbounded());
    }

    #[test]
    #[should_panic(expected = "dimension must be at least 1")]
    fn test_new_rejects_zero_dim() {
        let _ = Bx::new(0);
    }

    #[test]
    fn test_from_bounds_round_trip() {
        let b = Bx::from_bounds(&[(0.0, 1.0), (-2.0, 3.0)]);
        assert_eq!(b[0], Interval::new(0.0, 1.0));
        assert_eq!(b[1], Interval::new(-2.0, 3.0));
    }

    #[test]
    fn test_uniform_repeats_component() {
        let b = Bx::uniform(3, Interval::new(-1.0, 1.0));
        assert_eq!(b.dim(), 3);
        for component in b.iter() {
            assert_eq!(component, &Interval::new(-1.0, 1.0));
        }
    }

    #[test]
    fn test_set_empty_canonicalizes() {
        let mut a = unit_square();
        let mut b = Bx::from_bounds(&[(5.0, 6.0), (7.0, 8.0)]);
        a.set_empty();
        b.set_empty();
        assert!(a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_intersect_with_overlap() {
        let mut a = Bx::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
        let b = Bx::from_bounds(&[(5.0, 15.0), (-5.0, 5.0)]);
        a.intersect_with(&b);
        assert_eq!(a[0], Interval::new(5.0, 10.0));
        assert_eq!(a[1], Interval::new(0.0, 5.0));
    }

    #[test]
    fn test_intersect_with_disjoint_empties_whole_box() {
        let mut a = Bx::from_bounds(&[(0.0, 1.0), (0.0, 1.0)]);
        let b = Bx::from_bounds(&[(2.0, 3.0), (0.0, 1.0)]);
        a.intersect_with(&b);
        assert!(a.is_empty());
        // All components are canonical empty, not just the disjoint one.
        assert!(a[1].is_empty());
    }

    #[test]
    fn test_max_width_and_widest_dim() {
        let b = Bx::from_bounds(&[(0.0, 1.0), (0.0, 5.0), (0.0, 3.0)]);
        assert_eq!(b.max_width(), 5.0);
        assert_eq!(b.widest_dim(), 1);
    }

    #[test]
    fn test_widest_dim_tie_breaks_low() {
        let b = Bx::from_bounds(&[(0.0, 4.0), (1.0, 5.0)]);
        assert_eq!(b.widest_dim(), 0);
    }

    #[test]
    fn test_bisect_partitions_dimension() {
        let b = Bx::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
        let (l, r) = b.bisect(0, 0.5);
        assert_eq!(l[0], Interval::new(0.0, 5.0));
        assert_eq!(r[0], Interval::new(5.0, 10.0));
        assert_eq!(l[1], b[1]);
        assert_eq!(r[1], b[1]);
    }

    #[test]
    #[should_panic(expected = "dimension out of bounds")]
    fn test_bisect_rejects_bad_dim() {
        let _ = unit_square().bisect(2, 0.5);
    }

    #[test]
    fn test_contains_point() {
        let b = Bx::from_bounds(&[(0.0, 1.0), (-1.0, 1.0)]);
        assert!(b.contains(&[0.5, 0.0]));
        assert!(b.contains(&[0.0, 1.0]));
        assert!(!b.contains(&[1.5, 0.0]));
    }

    #[test]
    fn test_is_subset() {
        let outer = Bx::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
        let inner = Bx::from_bounds(&[(1.0, 2.0), (3.0, 4.0)]);
        assert!(inner.is_subset(&outer));
        assert!(!outer.is_subset(&inner));
        let mut e = outer.clone();
        e.set_empty();
        assert!(e.is_subset(&inner));
    }

    proptest! {
        #[test]
        fn prop_bisect_children_partition_parent(
            lb in -1.0e3f64..1.0e3,
            w in 1.0e-2f64..1.0e3,
            ratio in 0.05f64..0.95,
        ) {
            let b = Bx::from_bounds(&[(lb, lb + w), (0.0, 1.0)]);
            let (l, r) = b.bisect(0, ratio);
            // Children reconstruct the split dimension exactly and are
            // disjoint except at the shared boundary point.
            prop_assert_eq!(l[0].hull(&r[0]), b[0]);
            let overlap = l[0].intersection(&r[0]);
            prop_assert!(overlap.is_degenerate());
            prop_assert!(l.is_subset(&b));
            prop_assert!(r.is_subset(&b));
        }
    }
}
