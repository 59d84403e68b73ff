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

//! Cobble-Contract: the contraction layer
//!
//! This crate defines the contractor, the abstract unit of work of the
//! engine, together with the static machinery that coordinates many
//! contractors over one shared box: the constraint/variable hypergraph,
//! the deduplicating work agenda, and the AC3-style fixpoint propagation
//! driver.
//!
//! Core flow
//! - Implement `contractor::Contractor<T>` for each constraint; a
//!   contractor narrows a mutable `IntervalBox` in place or signals
//!   infeasibility with the `EmptyBox` condition.
//! - Wrap a list of contractors in a `propagation::Propagation<T>` to
//!   obtain a single contractor that drives the whole list to a fixpoint,
//!   waking up neighbors through the `graph::HyperGraph` whenever a
//!   contraction was significant.
//! - Terminate solver setups with a `precision::PrecisionContractor<T>`
//!   so that small-enough boxes are classified instead of split forever.
//!
//! Module map
//! - `agenda`: deduplicating FIFO worklists (flat and arc-indexed).
//! - `contractor`: the contraction protocol, indicators, `EmptyBox`.
//! - `graph`: static bipartite incidence between constraints and variables.
//! - `index`: strongly typed variable/constraint indices.
//! - `num`: the `PaverNumeric` scalar trait alias.
//! - `precision`: the terminal box-size contractor.
//! - `propagation`: the fixpoint driver, itself a contractor.

pub mod agenda;
pub mod contractor;
pub mod graph;
pub mod index;
pub mod num;
pub mod precision;
pub mod propagation;
