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

use std::time::Duration;

/// Resource limits and loop policies of a paver run.
///
/// All limits are optional; the default configuration runs to
/// exhaustion with a single contraction pass per cell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PaverConfig {
    /// Maximum number of retained boxes; exceeding it raises overflow.
    pub capacity: Option<usize>,
    /// Maximum number of cells created in one run.
    pub cell_limit: Option<u64>,
    /// Wall-clock budget for one run.
    pub time_limit: Option<Duration>,
    /// Re-apply the contractor list to a cell until no contractor
    /// further reduces the box, instead of a single pass.
    pub ctc_loop: bool,
    /// Emit per-node diagnostic log lines.
    pub trace: bool,
}

impl PaverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retained-box capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the created-cell limit.
    pub fn with_cell_limit(mut self, cell_limit: u64) -> Self {
        self.cell_limit = Some(cell_limit);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Enables the per-cell contraction fixpoint loop.
    pub fn with_ctc_loop(mut self, ctc_loop: bool) -> Self {
        self.ctc_loop = ctc_loop;
        self
    }

    /// Enables per-node diagnostic logging.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
