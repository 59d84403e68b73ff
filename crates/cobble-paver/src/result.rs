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

use crate::paving::Paving;
use crate::stats::PaverStatistics;
use cobble_contract::index::CtrIndex;
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;
use thiserror::Error;

/// The lifecycle state of a paver.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PaverState {
    /// Constructed, not yet started.
    #[default]
    Ready,
    /// A search is in progress.
    Running,
    /// The buffer drained: the region is fully paved.
    Exhausted,
    /// The retained-box capacity was exceeded.
    Overflow,
    /// The cell or wall-clock limit was exceeded.
    TimedOut,
    /// A monitor requested termination.
    Aborted,
}

impl std::fmt::Display for PaverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaverState::Ready => "Ready",
            PaverState::Running => "Running",
            PaverState::Exhausted => "Exhausted",
            PaverState::Overflow => "Overflow",
            PaverState::TimedOut => "TimedOut",
            PaverState::Aborted => "Aborted",
        };
        write!(f, "{}", name)
    }
}

/// Resource-limit conditions that end a run early.
///
/// These are expected but unrecoverable for the current run; partial
/// results remain valid and inspectable.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum PaverError {
    #[error("overflow: the retained box count reached the capacity of {capacity}")]
    Overflow { capacity: usize },
    #[error("timed out: {reason}")]
    TimedOut { reason: String },
    #[error("aborted: {reason}")]
    Aborted { reason: String },
}

/// Why a run ended.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TerminationReason {
    /// Every cell was classified; the paving is complete.
    Exhausted,
    /// The retained-box capacity was exceeded.
    Overflow,
    /// A cell or wall-clock limit fired.
    TimedOut(String),
    /// A monitor requested termination.
    Aborted(String),
}

impl From<PaverError> for TerminationReason {
    fn from(err: PaverError) -> Self {
        match err {
            PaverError::Overflow { .. } => TerminationReason::Overflow,
            PaverError::TimedOut { reason } => TerminationReason::TimedOut(reason),
            PaverError::Aborted { reason } => TerminationReason::Aborted(reason),
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "Exhausted"),
            TerminationReason::Overflow => write!(f, "Overflow"),
            TerminationReason::TimedOut(reason) => write!(f, "TimedOut: {}", reason),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// One retained contraction record: the box the contractor fired on and
/// the remainder it left (canonically empty for a pruned leaf).
#[derive(Clone, Debug, PartialEq)]
pub struct AcceptedBox<T>
where
    T: PaverNumeric,
{
    pub(crate) domain: IntervalBox<T>,
    pub(crate) remainder: IntervalBox<T>,
}

impl<T> AcceptedBox<T>
where
    T: PaverNumeric,
{
    /// The box the contractor fired on.
    #[inline]
    pub fn domain(&self) -> &IntervalBox<T> {
        &self.domain
    }

    /// The non-accepted remainder (empty for a leaf).
    #[inline]
    pub fn remainder(&self) -> &IntervalBox<T> {
        &self.remainder
    }

    /// Returns `true` if the contraction emptied the box.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Result of a paver run: termination reason, statistics, the retained
/// boxes per contractor, and (under full-tree retention) the paving.
#[derive(Clone, Debug)]
pub struct PaverOutcome<T>
where
    T: PaverNumeric,
{
    termination: TerminationReason,
    statistics: PaverStatistics,
    accepted: Vec<Vec<AcceptedBox<T>>>,
    paving: Option<Paving<T>>,
}

impl<T> PaverOutcome<T>
where
    T: PaverNumeric,
{
    pub(crate) fn new(
        termination: TerminationReason,
        statistics: PaverStatistics,
        accepted: Vec<Vec<AcceptedBox<T>>>,
        paving: Option<Paving<T>>,
    ) -> Self {
        Self {
            termination,
            statistics,
            accepted,
            paving,
        }
    }

    /// Returns why the run ended.
    #[inline]
    pub fn termination(&self) -> &TerminationReason {
        &self.termination
    }

    /// Returns the run statistics.
    #[inline]
    pub fn statistics(&self) -> &PaverStatistics {
        &self.statistics
    }

    /// Returns the paving tree, if the run retained one.
    #[inline]
    pub fn paving(&self) -> Option<&Paving<T>> {
        self.paving.as_ref()
    }

    #[inline]
    fn records(&self, ctc: CtrIndex) -> &[AcceptedBox<T>] {
        assert!(
            ctc.get() < self.accepted.len(),
            "called `PaverOutcome` accessor with contractor index out of bounds: the len is {} but the index is {}",
            self.accepted.len(),
            ctc.get()
        );
        &self.accepted[ctc.get()]
    }

    /// Returns the number of retained boxes accepted by `ctc`.
    #[inline]
    pub fn nb_boxes(&self, ctc: CtrIndex) -> usize {
        self.records(ctc).len()
    }

    /// Returns the `i`-th box accepted by `ctc`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn accepted(&self, ctc: CtrIndex, i: usize) -> &IntervalBox<T> {
        self.records(ctc)[i].domain()
    }

    /// Returns the remainder left by the `i`-th contraction of `ctc`
    /// (empty for a pruned leaf).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn rejected(&self, ctc: CtrIndex, i: usize) -> &IntervalBox<T> {
        self.records(ctc)[i].remainder()
    }

    /// Returns all records accepted by `ctc`.
    #[inline]
    pub fn accepted_boxes(&self, ctc: CtrIndex) -> &[AcceptedBox<T>] {
        self.records(ctc)
    }

    /// Returns the total number of retained boxes.
    #[inline]
    pub fn total_boxes(&self) -> usize {
        self.accepted.iter().map(Vec::len).sum()
    }

    /// Prints the textual summary to standard output.
    pub fn report(&self) {
        println!("{}", self);
    }
}

impl<T> std::fmt::Display for PaverOutcome<T>
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Cobble Paver Report")?;
        writeln!(f, "  Termination:          {}", self.termination)?;
        writeln!(f, "  Retained boxes:       {}", self.total_boxes())?;
        write!(f, "{}", self.statistics)
    }
}
