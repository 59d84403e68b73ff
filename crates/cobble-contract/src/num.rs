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

//! # Paver Numeric Trait
//!
//! Unified numeric bounds for the contraction and search components.
//! `PaverNumeric` specifies the floating-point capabilities required by
//! the engine: intrinsic traits (`Float`), conversions from primitives,
//! formatting, and thread-safety markers. Collecting the bounds into a
//! single alias keeps generic signatures short and consistent across the
//! contraction and paver crates.
//!
//! `f64` and `f32` both satisfy the alias; `f64` is the usual choice.

use num_traits::{Float, FromPrimitive};

/// A trait alias for floating-point scalars usable throughout the engine.
///
/// Interval bounds, widths, contraction gain ratios and bisection ratios
/// are all values of a type implementing this trait.
pub trait PaverNumeric:
    Float
    + FromPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
}

impl<X> PaverNumeric for X where
    X: Float
        + FromPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}
