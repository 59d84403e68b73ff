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

use crate::cell::Cell;
use crate::monitor::paver_monitor::{PaverMonitor, SearchCommand};
use crate::stats::PaverStatistics;
use cobble_contract::index::CtrIndex;
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;

/// A monitor that routes lifecycle events to the `log` facade at debug
/// level. Useful for watching a search without touching the driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPaverMonitor<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> LogPaverMonitor<T> {
    /// Creates a new logging monitor.
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> PaverMonitor<T> for LogPaverMonitor<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "LogPaverMonitor"
    }

    fn on_enter_search(&mut self, _stats: &PaverStatistics) {
        log::debug!("paver: search started");
    }

    fn on_exit_search(&mut self, stats: &PaverStatistics) {
        log::debug!(
            "paver: search finished after {} cells in {:.2?}",
            stats.cells_processed,
            stats.time_total
        );
    }

    fn on_cell_accepted(&mut self, domain: &IntervalBox<T>, ctc: CtrIndex, stats: &PaverStatistics) {
        log::debug!(
            "paver: {} accepted {} ({} boxes total)",
            ctc,
            domain,
            stats.total_accepted()
        );
    }

    fn on_cell_bisected(&mut self, left: &Cell<T>, right: &Cell<T>, _stats: &PaverStatistics) {
        log::debug!("paver: bisected into {} and {}", left, right);
    }

    fn search_command(&self, _stats: &PaverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}
