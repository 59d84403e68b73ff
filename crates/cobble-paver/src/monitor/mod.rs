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

//! # Paver Monitors
//!
//! Pluggable observers and controllers for the exploration lifecycle.
//! Monitors receive the per-node events (accepted boxes, bisections) the
//! driver produces, and can request termination; the interrupt monitor
//! turns an external atomic flag into such a request. Commands are
//! polled once per accepted node, so a running contraction always
//! finishes its call.
//!
//! ## Submodules
//!
//! - `paver_monitor`: Core trait (`PaverMonitor<T>`) and `SearchCommand`.
//! - `composite`: Aggregate multiple monitors into one.
//! - `interrupt`: Atomically-driven interrupt monitor for cross-thread stops.
//! - `log`: Routes events to the `log` facade.
//! - `no_op`: The do-nothing monitor.

pub mod composite;
pub mod interrupt;
pub mod log;
pub mod no_op;
pub mod paver_monitor;
