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

use num_traits::Float;
use std::ops::{Add, Neg, Sub};

/// A closed real interval `[lb, ub]` over a floating-point scalar.
///
/// The empty interval has the canonical representation `[+inf, -inf]`,
/// so structural equality coincides with set equality. `NaN` bounds are
/// rejected by every constructor.
///
/// # Invariants
/// Either `lb <= ub` (both possibly infinite), or the interval is the
/// canonical empty interval.
#[derive(Clone, Copy, PartialEq)]
pub struct Interval<T>
where
    T: Float,
{
    lb: T,
    ub: T,
}

impl<T> Interval<T>
where
    T: Float,
{
    /// Creates a new `Interval`.
    ///
    /// # Panics
    ///
    /// Panics if `lb > ub` or either bound is `NaN`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cobble_core::math::interval::Interval;
    ///
    /// let itv = Interval::new(0.0, 10.0);
    /// assert_eq!(itv.width(), 10.0);
    /// ```
    #[inline]
    pub fn new(lb: T, ub: T) -> Self {
        assert!(
            !lb.is_nan() && !ub.is_nan(),
            "Invalid interval: bounds must not be NaN"
        );
        assert!(
            lb <= ub,
            "Invalid interval: lb must be less than or equal to ub"
        );
        Self { lb, ub }
    }

    /// Creates a new `Interval` if the inputs are valid.
    ///
    /// Returns `None` if `lb > ub` or either bound is `NaN`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cobble_core::math::interval::Interval;
    ///
    /// assert!(Interval::try_new(0.0, 10.0).is_some());
    /// assert!(Interval::try_new(10.0, 0.0).is_none());
    /// ```
    #[inline]
    pub fn try_new(lb: T, ub: T) -> Option<Self> {
        if !lb.is_nan() && !ub.is_nan() && lb <= ub {
            Some(Self { lb, ub })
        } else {
            None
        }
    }

    /// Creates a degenerate interval `[x, x]`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is `NaN` or infinite.
    #[inline]
    pub fn point(x: T) -> Self {
        assert!(
            x.is_finite(),
            "Invalid interval: a point interval requires a finite value"
        );
        Self { lb: x, ub: x }
    }

    /// Returns the empty interval in its canonical form `[+inf, -inf]`.
    #[inline]
    pub fn empty() -> Self {
        Self {
            lb: T::infinity(),
            ub: T::neg_infinity(),
        }
    }

    /// Returns the interval `(-inf, +inf)` covering the whole real line.
    #[inline]
    pub fn all_reals() -> Self {
        Self {
            lb: T::neg_infinity(),
            ub: T::infinity(),
        }
    }

    /// Returns the lower bound.
    #[inline]
    pub fn lb(&self) -> T {
        self.lb
    }

    /// Returns the upper bound.
    #[inline]
    pub fn ub(&self) -> T {
        self.ub
    }

    /// Returns `true` if this interval contains no point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lb > self.ub
    }

    /// Returns `true` if this interval is a single point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lb == self.ub
    }

    /// Returns `true` if either bound is infinite (and the interval is
    /// not empty).
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        !self.is_empty() && (self.lb.is_infinite() || self.ub.is_infinite())
    }

    /// Returns the width (diameter) of the interval.
    ///
    /// The empty interval has width zero; an unbounded interval has
    /// infinite width.
    #[inline]
    pub fn width(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            self.ub - self.lb
        }
    }

    /// Returns the midpoint of a non-empty bounded interval.
    ///
    /// # Panics
    ///
    /// Panics if the interval is empty or unbounded.
    #[inline]
    pub fn mid(&self) -> T {
        assert!(
            !self.is_empty(),
            "called `Interval::mid` on an empty interval"
        );
        assert!(
            !self.is_unbounded(),
            "called `Interval::mid` on an unbounded interval"
        );
        let two = T::one() + T::one();
        let m = (self.lb + self.ub) / two;
        // Guard against outward rounding on huge magnitudes.
        if m < self.lb {
            self.lb
        } else if m > self.ub {
            self.ub
        } else {
            m
        }
    }

    /// Returns `true` if `x` lies inside the interval.
    #[inline]
    pub fn contains(&self, x: T) -> bool {
        self.lb <= x && x <= self.ub
    }

    /// Returns `true` if this interval is a subset of `other`.
    ///
    /// The empty interval is a subset of everything.
    #[inline]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.is_empty() || (other.lb <= self.lb && self.ub <= other.ub)
    }

    /// Returns `true` if the two intervals share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.lb.max(other.lb) <= self.ub.min(other.ub)
    }

    /// Returns the intersection of the two intervals (possibly empty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cobble_core::math::interval::Interval;
    ///
    /// let a = Interval::new(0.0, 10.0);
    /// let b = Interval::new(5.0, 15.0);
    /// assert_eq!(a.intersection(&b), Interval::new(5.0, 10.0));
    /// assert!(a.intersection(&Interval::new(11.0, 12.0)).is_empty());
    /// ```
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let lb = self.lb.max(other.lb);
        let ub = self.ub.min(other.ub);
        if lb <= ub {
            Self { lb, ub }
        } else {
            Self::empty()
        }
    }

    /// Returns the smallest interval enclosing both operands.
    #[inline]
    pub fn hull(&self, other: &Self) -> Self {
        if self.is_empty() {
            *other
        } else if other.is_empty() {
            *self
        } else {
            Self {
                lb: self.lb.min(other.lb),
                ub: self.ub.max(other.ub),
            }
        }
    }

    /// Splits the interval at `lb + ratio * width` into a lower and an
    /// upper part sharing the split point.
    ///
    /// # Panics
    ///
    /// Panics if the interval is empty or unbounded, or if `ratio` is not
    /// strictly between 0 and 1.
    #[inline]
    pub fn split(&self, ratio: T) -> (Self, Self) {
        assert!(
            !self.is_empty(),
            "called `Interval::split` on an empty interval"
        );
        assert!(
            !self.is_unbounded(),
            "called `Interval::split` on an unbounded interval"
        );
        assert!(
            ratio > T::zero() && ratio < T::one(),
            "called `Interval::split` with ratio outside (0, 1)"
        );
        let mut point = self.lb + ratio * self.width();
        // The ratio point can collapse onto a bound for tiny widths; fall
        // back to the midpoint so both parts stay non-degenerate whenever
        // a strictly interior point exists at all.
        if point <= self.lb || point >= self.ub {
            point = self.mid();
        }
        (Self::new(self.lb, point), Self::new(point, self.ub))
    }
}

impl<T> Add for Interval<T>
where
    T: Float,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self::empty();
        }
        Self {
            lb: self.lb + rhs.lb,
            ub: self.ub + rhs.ub,
        }
    }
}

impl<T> Sub for Interval<T>
where
    T: Float,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self::empty();
        }
        Self {
            lb: self.lb - rhs.ub,
            ub: self.ub - rhs.lb,
        }
    }
}

impl<T> Neg for Interval<T>
where
    T: Float,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        Self {
            lb: -self.ub,
            ub: -self.lb,
        }
    }
}

impl<T> std::fmt::Debug for Interval<T>
where
    T: Float + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{:?}, {:?}]", self.lb, self.ub)
        }
    }
}

impl<T> std::fmt::Display for Interval<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{}, {}]", self.lb, self.ub)
        }
    }
}
