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

//! # Cobble Core
//!
//! Foundational math and utility primitives for the Cobble paving
//! ecosystem. This crate consolidates the reusable building blocks that
//! underpin the contraction and search crates.
//!
//! ## Modules
//!
//! - `math`: Closed real intervals `[lb, ub]` over a floating-point scalar
//!   with a canonical empty representation, set operations
//!   (intersection/hull), measurements (width/midpoint), leaf arithmetic
//!   (`+`, `-`, negation), and ratio-point splitting; interval boxes
//!   (axis-aligned hyper-rectangles) with emptiness, width queries and
//!   bisection.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`)
//!   preventing accidental mixing of index spaces.
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod utils;
