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
use std::sync::atomic::AtomicBool;

/// A monitor that checks an atomic boolean flag to determine whether the
/// search should be interrupted.
///
/// Cancellation is advisory: the flag is polled between accepted nodes
/// only, so a currently running contractor always finishes its call.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a, T> {
    stop_flag: &'a AtomicBool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> InterruptMonitor<'a, T> {
    /// Creates a new `InterruptMonitor` that monitors the given atomic
    /// boolean flag. The search will be terminated if the flag is set to
    /// `true`.
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self {
            stop_flag,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, T> PaverMonitor<T> for InterruptMonitor<'a, T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _stats: &PaverStatistics) {}
    fn on_exit_search(&mut self, _stats: &PaverStatistics) {}
    fn on_cell_accepted(
        &mut self,
        _domain: &IntervalBox<T>,
        _ctc: CtrIndex,
        _stats: &PaverStatistics,
    ) {
    }
    fn on_cell_bisected(&mut self, _left: &Cell<T>, _right: &Cell<T>, _stats: &PaverStatistics) {}

    fn search_command(&self, _stats: &PaverStatistics) -> SearchCommand {
        if self.stop_flag.load(std::sync::atomic::Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
