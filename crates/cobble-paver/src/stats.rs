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

use cobble_contract::index::CtrIndex;
use std::time::Duration;

/// Statistics collected during the execution of a paver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaverStatistics {
    /// Total cells created (root plus bisection children).
    pub cells_created: u64,
    /// Total cells popped from the buffer and processed.
    pub cells_processed: u64,
    /// Total bisections performed.
    pub bisections: u64,
    /// Cells dropped because no dimension was wide enough to split.
    pub cells_discarded: u64,
    /// Accepted boxes per contractor (contractions and prunings).
    pub boxes_accepted: Vec<u64>,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Total time spent exploring.
    pub time_total: Duration,
}

impl PaverStatistics {
    /// Creates zeroed statistics for `nb_ctr` contractors.
    pub fn new(nb_ctr: usize) -> Self {
        Self {
            cells_created: 0,
            cells_processed: 0,
            bisections: 0,
            cells_discarded: 0,
            boxes_accepted: vec![0; nb_ctr],
            max_depth: 0,
            time_total: Duration::ZERO,
        }
    }

    #[inline]
    pub fn on_cell_created(&mut self) {
        self.cells_created = self.cells_created.saturating_add(1);
    }

    #[inline]
    pub fn on_cell_processed(&mut self) {
        self.cells_processed = self.cells_processed.saturating_add(1);
    }

    #[inline]
    pub fn on_bisection(&mut self) {
        self.bisections = self.bisections.saturating_add(1);
    }

    #[inline]
    pub fn on_cell_discarded(&mut self) {
        self.cells_discarded = self.cells_discarded.saturating_add(1);
    }

    /// Records an accepted box for `ctc`.
    ///
    /// # Panics
    ///
    /// Panics if `ctc` is out of range.
    #[inline]
    pub fn on_box_accepted(&mut self, ctc: CtrIndex) {
        assert!(
            ctc.get() < self.boxes_accepted.len(),
            "called `PaverStatistics::on_box_accepted` with contractor index out of bounds: the len is {} but the index is {}",
            self.boxes_accepted.len(),
            ctc.get()
        );
        self.boxes_accepted[ctc.get()] = self.boxes_accepted[ctc.get()].saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total accepted boxes across all contractors.
    #[inline]
    pub fn total_accepted(&self) -> u64 {
        self.boxes_accepted.iter().sum()
    }
}

impl std::fmt::Display for PaverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Cobble Paver Statistics:")?;
        writeln!(f, "  Cells created:        {}", self.cells_created)?;
        writeln!(f, "  Cells processed:      {}", self.cells_processed)?;
        writeln!(f, "  Bisections:           {}", self.bisections)?;
        writeln!(f, "  Cells discarded:      {}", self.cells_discarded)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        for (i, count) in self.boxes_accepted.iter().enumerate() {
            writeln!(f, "  Boxes (contractor {}): {}", i, count)?;
        }
        writeln!(f, "  Boxes (total):        {}", self.total_accepted())?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
