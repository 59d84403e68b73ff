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

//! Cobble-Paver: branch-and-bound exploration
//!
//! High-level crate that drives a contractor list over a search tree of
//! boxes. The driver separates dimension selection (bisectors), traversal
//! order (cell buffers), per-node operator state (backtrackable data),
//! result retention (full tree vs. selected leaves), and observation
//! (monitors) so strategies can be swapped without touching the core
//! loop.
//!
//! Core flow
//! - Build an ordered contractor list (see `cobble_contract`), typically
//!   ending with a `PrecisionContractor`.
//! - Choose a `bisector::Bisector` and, optionally, a non-default
//!   `buffer::CellBuffer` and a `backtrack::BacktrackableRegistry`.
//! - Choose a `retention::Retention` policy and a `config::PaverConfig`.
//! - Run `paver::Paver::explore`, or step manually with
//!   `paver::Paver::next_box`.
//!
//! Module map
//! - `backtrack`: slot-table registry of per-node operator payloads.
//! - `bisector`: dimension-selection strategies and the split record.
//! - `buffer`: pluggable cell orderings (depth-first, widest-first).
//! - `cell`: the search node owning its box and payloads.
//! - `config`: the driver's resource and policy knobs.
//! - `monitor`: pluggable observers and termination control.
//! - `paver`: the branch-and-bound driver.
//! - `paving`: the realized search tree and its visitor.
//! - `result`: outcomes, accepted boxes, termination reasons.
//! - `retention`: full-tree vs. leaves-only retention strategies.
//! - `stats`: counters and timing for the report.

pub mod backtrack;
pub mod bisector;
pub mod buffer;
pub mod cell;
pub mod config;
pub mod monitor;
pub mod paver;
pub mod paving;
pub mod result;
pub mod retention;
pub mod stats;
