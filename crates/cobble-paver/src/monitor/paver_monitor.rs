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
use crate::stats::PaverStatistics;
use cobble_contract::index::CtrIndex;
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;

/// A monitor's verdict on whether the search should continue.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observer of the exploration lifecycle.
///
/// Hooks run synchronously inline with the search loop; a monitor that
/// wants to stop the run returns `Terminate` from `search_command`,
/// which the driver polls once per accepted node.
pub trait PaverMonitor<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, stats: &PaverStatistics);
    fn on_exit_search(&mut self, stats: &PaverStatistics);
    fn on_cell_accepted(&mut self, domain: &IntervalBox<T>, ctc: CtrIndex, stats: &PaverStatistics);
    fn on_cell_bisected(&mut self, left: &Cell<T>, right: &Cell<T>, stats: &PaverStatistics);
    fn search_command(&self, stats: &PaverStatistics) -> SearchCommand;
}

impl<T> std::fmt::Debug for dyn PaverMonitor<T> + '_
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaverMonitor({})", self.name())
    }
}
