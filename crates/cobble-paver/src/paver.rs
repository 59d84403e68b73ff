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

//! # The Paver
//!
//! The branch-and-bound driver: it pulls cells from a pluggable buffer,
//! applies the contractor list, records accepted boxes, bisects
//! survivors, and enforces the configured resource limits. A single
//! `next_box` call runs until one box is accepted (some contractor
//! empties a cell's box) or the buffer drains; `explore` loops to
//! termination and packages the outcome.
//!
//! The loop is single-threaded, synchronous and recursion-free. The only
//! cooperative points are the monitor hooks, which run synchronously
//! inline, and the termination command, polled once per accepted node.
//!
//! Recording under full-tree retention: every contraction that strictly
//! narrows a box stores one accepted record (box before, remainder
//! after) for the firing contractor and one `ContractorNode`; a
//! contraction to empty stores a leaf record. Under leaves-only
//! retention, only leaves of the selected contractors are stored and no
//! tree is built. The retained-box capacity is checked before every
//! store, so an overflowing box is never recorded.

use crate::backtrack::{BacktrackableRegistry, BranchSide};
use crate::bisector::{Bisection, Bisector};
use crate::buffer::{CellBuffer, DepthFirstBuffer};
use crate::cell::Cell;
use crate::config::PaverConfig;
use crate::monitor::paver_monitor::{PaverMonitor, SearchCommand};
use crate::paving::{NodeLink, Paving};
use crate::result::{AcceptedBox, PaverError, PaverOutcome, PaverState, TerminationReason};
use crate::retention::Retention;
use crate::stats::PaverStatistics;
use cobble_contract::contractor::Contractor;
use cobble_contract::index::CtrIndex;
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;
use std::time::Instant;

/// The branch-and-bound exploration driver.
pub struct Paver<T>
where
    T: PaverNumeric,
{
    ctcs: Vec<Box<dyn Contractor<T>>>,
    bisector: Box<dyn Bisector<T>>,
    buffer: Box<dyn CellBuffer<T>>,
    registry: BacktrackableRegistry,
    retention: Retention,
    config: PaverConfig,
    state: PaverState,
    stats: PaverStatistics,
    accepted: Vec<Vec<AcceptedBox<T>>>,
    retained: usize,
    paving: Paving<T>,
    last_error: Option<PaverError>,
    start_time: Instant,
    nb_var: usize,
}

impl<T> Paver<T>
where
    T: PaverNumeric,
{
    /// Creates a paver with no backtrackable data kinds and the default
    /// depth-first buffer.
    ///
    /// # Panics
    ///
    /// Panics if the contractor list is empty, the contractors disagree
    /// on the number of variables, or a leaves-only retention set does
    /// not match the list length.
    pub fn new(
        ctcs: Vec<Box<dyn Contractor<T>>>,
        bisector: Box<dyn Bisector<T>>,
        retention: Retention,
        config: PaverConfig,
    ) -> Self {
        Self::with_registry(ctcs, bisector, BacktrackableRegistry::new(), retention, config)
    }

    /// Creates a paver whose cells carry the registered backtrackable
    /// data kinds.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Paver::new`].
    pub fn with_registry(
        ctcs: Vec<Box<dyn Contractor<T>>>,
        bisector: Box<dyn Bisector<T>>,
        registry: BacktrackableRegistry,
        retention: Retention,
        config: PaverConfig,
    ) -> Self {
        assert!(
            !ctcs.is_empty(),
            "called `Paver::new` with an empty contractor list"
        );
        let nb_var = ctcs[0].nb_vars();
        for ctc in ctcs.iter() {
            assert_eq!(
                ctc.nb_vars(),
                nb_var,
                "called `Paver::new` with mismatched contractor dimensions: '{}' works on {} variables but the first contractor works on {}",
                ctc.name(),
                ctc.nb_vars(),
                nb_var
            );
        }
        if let Retention::LeavesOnly(selected) = &retention {
            assert_eq!(
                selected.len(),
                ctcs.len(),
                "called `Paver::new` with mismatched retention set: the list has {} contractors but the set covers {}",
                ctcs.len(),
                selected.len()
            );
        }
        let nb_ctr = ctcs.len();
        Self {
            ctcs,
            bisector,
            buffer: Box::new(DepthFirstBuffer::new()),
            registry,
            retention,
            config,
            state: PaverState::Ready,
            stats: PaverStatistics::new(nb_ctr),
            accepted: vec![Vec::new(); nb_ctr],
            retained: 0,
            paving: Paving::new(),
            last_error: None,
            start_time: Instant::now(),
            nb_var,
        }
    }

    /// Replaces the cell buffer (e.g., with a best-first ordering).
    ///
    /// # Panics
    ///
    /// Panics if a search is in progress.
    pub fn set_buffer(&mut self, buffer: Box<dyn CellBuffer<T>>) {
        assert!(
            self.state != PaverState::Running,
            "called `Paver::set_buffer` while a search is running"
        );
        self.buffer = buffer;
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub fn state(&self) -> PaverState {
        self.state
    }

    /// Returns the statistics of the current (or last) run.
    #[inline]
    pub fn statistics(&self) -> &PaverStatistics {
        &self.stats
    }

    /// Returns the number of contractors.
    #[inline]
    pub fn nb_ctrs(&self) -> usize {
        self.ctcs.len()
    }

    /// Returns the number of variables.
    #[inline]
    pub fn nb_vars(&self) -> usize {
        self.nb_var
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &PaverConfig {
        &self.config
    }

    /// Begins a new run on the given box, clearing all per-run state.
    ///
    /// # Panics
    ///
    /// Panics if the box dimension does not match the contractors.
    pub fn start(&mut self, domain: IntervalBox<T>) {
        assert_eq!(
            domain.dim(),
            self.nb_var,
            "called `Paver::start` with mismatched box dimension: the contractors work on {} variables but the box has {}",
            self.nb_var,
            domain.dim()
        );
        self.buffer.flush();
        self.accepted = vec![Vec::new(); self.ctcs.len()];
        self.retained = 0;
        self.paving = Paving::new();
        self.stats = PaverStatistics::new(self.ctcs.len());
        self.last_error = None;
        self.start_time = Instant::now();
        self.state = PaverState::Running;

        let mut root = Cell::root(domain, &self.registry);
        if self.retention.is_full_tree() {
            root.link = Some(NodeLink::Root);
        }
        self.stats.on_cell_created();
        self.buffer.push(root);
    }

    /// Computes the next accepted box.
    ///
    /// Pops cells, contracts them, and bisects survivors until some
    /// contractor accepts (empties) a cell's box, returning that
    /// contractor's index, or the buffer drains, returning `None`.
    /// Resource-limit conditions are returned as errors; once one fired,
    /// every further call returns it again.
    ///
    /// # Panics
    ///
    /// Panics if called before [`Paver::start`].
    pub fn next_box<M>(&mut self, monitor: &mut M) -> Result<Option<CtrIndex>, PaverError>
    where
        M: PaverMonitor<T>,
    {
        match self.state {
            PaverState::Ready => panic!("called `Paver::next_box` before `Paver::start`"),
            PaverState::Running | PaverState::Exhausted => {}
            PaverState::Overflow | PaverState::TimedOut | PaverState::Aborted => {
                let err = self
                    .last_error
                    .clone()
                    .expect("a terminal error state must carry its error");
                return Err(err);
            }
        }

        loop {
            let Some(mut cell) = self.buffer.pop() else {
                self.state = PaverState::Exhausted;
                return Ok(None);
            };
            self.stats.on_cell_processed();
            if self.config.trace {
                log::debug!("paver: processing {}", cell);
            }

            match self.sweep(&mut cell) {
                Err(err) => return Err(self.fail(err)),
                Ok(Some((ctc, domain))) => {
                    monitor.on_cell_accepted(&domain, ctc, &self.stats);
                    if let SearchCommand::Terminate(reason) = monitor.search_command(&self.stats)
                    {
                        return Err(self.fail(PaverError::Aborted { reason }));
                    }
                    return Ok(Some(ctc));
                }
                Ok(None) => {
                    if let Err(err) = self.check_limits() {
                        return Err(self.fail(err));
                    }
                    self.bisect_cell(cell, monitor);
                }
            }
        }
    }

    /// Runs to termination and returns the outcome.
    ///
    /// The buffer is drained (Exhausted), or a limit fires (Overflow /
    /// TimedOut), or a monitor terminates the run (Aborted); in every
    /// case the partial results gathered so far are returned.
    pub fn explore<M>(&mut self, domain: IntervalBox<T>, monitor: &mut M) -> PaverOutcome<T>
    where
        M: PaverMonitor<T>,
    {
        self.start(domain);
        monitor.on_enter_search(&self.stats);

        let termination = loop {
            match self.next_box(monitor) {
                Ok(Some(_)) => {}
                Ok(None) => break TerminationReason::Exhausted,
                Err(err) => break TerminationReason::from(err),
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        monitor.on_exit_search(&self.stats);

        let accepted =
            std::mem::replace(&mut self.accepted, vec![Vec::new(); self.ctcs.len()]);
        self.retained = 0;
        let paving = if self.retention.is_full_tree() {
            Some(std::mem::replace(&mut self.paving, Paving::new()))
        } else {
            None
        };
        PaverOutcome::new(termination, self.stats.clone(), accepted, paving)
    }

    /// Applies the contractor list to the cell, once or to the per-cell
    /// fixpoint depending on `ctc_loop`. Returns the accepting
    /// contractor and the box it accepted, or `None` if the cell
    /// survived.
    fn sweep(
        &mut self,
        cell: &mut Cell<T>,
    ) -> Result<Option<(CtrIndex, IntervalBox<T>)>, PaverError> {
        loop {
            let mut narrowed = false;
            for i in 0..self.ctcs.len() {
                let ctc = CtrIndex::new(i);
                let before = cell.domain().clone();
                match self.ctcs[i].contract(cell.domain_mut()) {
                    Err(_) => {
                        let domain = self.record_leaf(cell, ctc, before)?;
                        return Ok(Some((ctc, domain)));
                    }
                    Ok(()) => {
                        if cell.domain() != &before {
                            narrowed = true;
                            self.record_contraction(cell, ctc, before)?;
                        }
                    }
                }
            }
            if !self.config.ctc_loop || !narrowed {
                return Ok(None);
            }
        }
    }

    /// Records a pruned leaf: contractor `ctc` emptied the box `before`.
    /// Returns the accepted box for the monitor hook.
    fn record_leaf(
        &mut self,
        cell: &Cell<T>,
        ctc: CtrIndex,
        before: IntervalBox<T>,
    ) -> Result<IntervalBox<T>, PaverError> {
        let stored = self.retention.selects(ctc);
        if stored {
            self.check_capacity()?;
        }
        self.stats.on_box_accepted(ctc);
        if self.config.trace {
            log::debug!("paver: {} pruned {}", ctc, before);
        }
        if stored {
            self.accepted[ctc.get()].push(AcceptedBox {
                domain: before.clone(),
                remainder: cell.domain().clone(),
            });
            self.retained += 1;
        }
        if self.retention.is_full_tree() {
            let node = self.paving.push_contractor(ctc, before.clone());
            if let Some(link) = cell.link {
                self.paving.attach(link, node);
            }
        }
        Ok(before)
    }

    /// Records a strict narrowing: contractor `ctc` reduced `before` to
    /// the cell's current box. The cell's pending tree edge moves below
    /// the new contractor node.
    fn record_contraction(
        &mut self,
        cell: &mut Cell<T>,
        ctc: CtrIndex,
        before: IntervalBox<T>,
    ) -> Result<(), PaverError> {
        if self.retention.is_full_tree() {
            self.check_capacity()?;
        }
        self.stats.on_box_accepted(ctc);
        if self.config.trace {
            log::debug!("paver: {} narrowed {} to {}", ctc, before, cell.domain());
        }
        if self.retention.is_full_tree() {
            self.accepted[ctc.get()].push(AcceptedBox {
                domain: before.clone(),
                remainder: cell.domain().clone(),
            });
            self.retained += 1;
            let node = self.paving.push_contractor(ctc, before);
            if let Some(link) = cell.link {
                self.paving.attach(link, node);
            }
            cell.link = Some(NodeLink::RejectedOf(node));
        }
        Ok(())
    }

    /// Bisects a surviving cell and enqueues both children, or discards
    /// the cell when no dimension is wide enough to split.
    fn bisect_cell<M>(&mut self, mut cell: Cell<T>, monitor: &mut M)
    where
        M: PaverMonitor<T>,
    {
        let Some(Bisection { left, right, var }) = self.bisector.bisect(&cell) else {
            self.stats.on_cell_discarded();
            if self.config.trace {
                log::debug!("paver: discarding unbisectable {}", cell);
            }
            return;
        };

        let mut left_cell = cell.child(&self.registry, BranchSide::Left, left, var);
        let mut right_cell = cell.child(&self.registry, BranchSide::Right, right, var);

        if self.retention.is_full_tree() {
            let node = self.paving.push_bisector(var);
            if let Some(link) = cell.link.take() {
                self.paving.attach(link, node);
            }
            left_cell.link = Some(NodeLink::LeftOf(node));
            right_cell.link = Some(NodeLink::RightOf(node));
        }

        self.stats.on_bisection();
        self.stats.on_cell_created();
        self.stats.on_cell_created();
        self.stats.on_depth_update(u64::from(left_cell.depth()));
        if self.config.trace {
            log::debug!("paver: bisected {} on {}", cell.domain(), var);
        }
        monitor.on_cell_bisected(&left_cell, &right_cell, &self.stats);

        self.buffer.push(left_cell);
        self.buffer.push(right_cell);
    }

    fn check_capacity(&self) -> Result<(), PaverError> {
        if let Some(capacity) = self.config.capacity {
            if self.retained >= capacity {
                return Err(PaverError::Overflow { capacity });
            }
        }
        Ok(())
    }

    fn check_limits(&self) -> Result<(), PaverError> {
        if let Some(limit) = self.config.cell_limit {
            if self.stats.cells_created >= limit {
                return Err(PaverError::TimedOut {
                    reason: format!("cell limit of {} reached", limit),
                });
            }
        }
        if let Some(limit) = self.config.time_limit {
            if self.start_time.elapsed() >= limit {
                return Err(PaverError::TimedOut {
                    reason: "time limit reached".to_string(),
                });
            }
        }
        Ok(())
    }

    fn fail(&mut self, err: PaverError) -> PaverError {
        self.state = match &err {
            PaverError::Overflow { .. } => PaverState::Overflow,
            PaverError::TimedOut { .. } => PaverState::TimedOut,
            PaverError::Aborted { .. } => PaverState::Aborted,
        };
        self.last_error = Some(err.clone());
        err
    }
}

impl<T> std::fmt::Debug for Paver<T>
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paver")
            .field("nb_ctrs", &self.ctcs.len())
            .field("nb_vars", &self.nb_var)
            .field("state", &self.state)
            .field("retention", &self.retention)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bisector::LargestFirstBisector;
    use crate::monitor::no_op::NoOperationMonitor;
    use cobble_contract::precision::PrecisionContractor;

    fn precision_only(ceil: f64) -> Paver<f64> {
        let ctcs: Vec<Box<dyn Contractor<f64>>> =
            vec![Box::new(PrecisionContractor::new(1, ceil))];
        Paver::new(
            ctcs,
            Box::new(LargestFirstBisector::midpoint(0.0)),
            Retention::FullTree,
            PaverConfig::default(),
        )
    }

    #[test]
    fn test_initial_state_is_ready() {
        let paver = precision_only(1.0);
        assert_eq!(paver.state(), PaverState::Ready);
        assert_eq!(paver.nb_ctrs(), 1);
        assert_eq!(paver.nb_vars(), 1);
    }

    #[test]
    #[should_panic(expected = "called `Paver::next_box` before `Paver::start`")]
    fn test_next_box_before_start_panics() {
        let mut paver = precision_only(1.0);
        let mut monitor = NoOperationMonitor::new();
        let _ = paver.next_box(&mut monitor);
    }

    #[test]
    fn test_single_cell_run_accepts_root() {
        let mut paver = precision_only(2.0);
        let mut monitor = NoOperationMonitor::new();
        // The root box is already below the precision ceiling.
        paver.start(IntervalBox::from_bounds(&[(0.0, 1.5)]));
        let first = paver.next_box(&mut monitor).unwrap();
        assert_eq!(first, Some(CtrIndex::new(0)));
        let second = paver.next_box(&mut monitor).unwrap();
        assert_eq!(second, None);
        assert_eq!(paver.state(), PaverState::Exhausted);
    }

    #[test]
    fn test_exhausted_next_box_stays_exhausted() {
        let mut paver = precision_only(2.0);
        let mut monitor = NoOperationMonitor::new();
        paver.start(IntervalBox::from_bounds(&[(0.0, 1.0)]));
        while paver.next_box(&mut monitor).unwrap().is_some() {}
        assert_eq!(paver.next_box(&mut monitor).unwrap(), None);
        assert_eq!(paver.state(), PaverState::Exhausted);
    }

    #[test]
    #[should_panic(expected = "mismatched box dimension")]
    fn test_start_rejects_wrong_dimension() {
        let mut paver = precision_only(1.0);
        paver.start(IntervalBox::from_bounds(&[(0.0, 1.0), (0.0, 1.0)]));
    }

    #[test]
    #[should_panic(expected = "empty contractor list")]
    fn test_new_rejects_empty_list() {
        let _ = Paver::<f64>::new(
            Vec::new(),
            Box::new(LargestFirstBisector::midpoint(0.0)),
            Retention::FullTree,
            PaverConfig::default(),
        );
    }

    #[test]
    #[should_panic(expected = "mismatched retention set")]
    fn test_new_rejects_wrong_retention_width() {
        let ctcs: Vec<Box<dyn Contractor<f64>>> =
            vec![Box::new(PrecisionContractor::new(1, 1.0))];
        let _ = Paver::new(
            ctcs,
            Box::new(LargestFirstBisector::midpoint(0.0)),
            Retention::leaves_only(2, [CtrIndex::new(0)]),
            PaverConfig::default(),
        );
    }

    mod scenarios {
        use super::*;
        use crate::backtrack::Backtrackable;
        use crate::buffer::WidestFirstBuffer;
        use crate::monitor::interrupt::InterruptMonitor;
        use crate::paving::{BisectorNode, ContractorNode, PavingVisitor};
        use crate::result::PaverError;
        use cobble_contract::contractor::{ContractionResult, EmptyBox, Indicators};
        use cobble_contract::index::VarIndex;
        use cobble_contract::propagation::Propagation;
        use cobble_core::math::interval::Interval;
        use std::any::Any;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::time::Duration;

        /// Rejects any box that lies entirely in `x + y >= bound`
        /// (i.e., enforces the open half-plane `x + y < bound`).
        /// Performs no narrowing.
        struct HalfPlaneReject {
            bound: f64,
        }

        impl Contractor<f64> for HalfPlaneReject {
            fn name(&self) -> &str {
                "HalfPlaneReject"
            }

            fn nb_vars(&self) -> usize {
                2
            }

            fn can_contract(&self, var: VarIndex) -> bool {
                var.get() < 2
            }

            fn contract_with(
                &mut self,
                domain: &mut IntervalBox<f64>,
                _indicators: &Indicators,
            ) -> ContractionResult {
                if domain[0].lb() + domain[1].lb() >= self.bound {
                    domain.set_empty();
                    return Err(EmptyBox);
                }
                Ok(())
            }
        }

        /// Narrows upper bounds to enforce `x + y <= bound`.
        struct SumNarrow {
            bound: f64,
        }

        impl Contractor<f64> for SumNarrow {
            fn name(&self) -> &str {
                "SumNarrow"
            }

            fn nb_vars(&self) -> usize {
                2
            }

            fn can_contract(&self, var: VarIndex) -> bool {
                var.get() < 2
            }

            fn contract_with(
                &mut self,
                domain: &mut IntervalBox<f64>,
                _indicators: &Indicators,
            ) -> ContractionResult {
                if domain[0].lb() + domain[1].lb() > self.bound {
                    domain.set_empty();
                    return Err(EmptyBox);
                }
                let x = domain[0];
                let y = domain[1];
                domain[0] = Interval::new(x.lb(), x.ub().min(self.bound - y.lb()));
                domain[1] = Interval::new(y.lb(), y.ub().min(self.bound - x.lb()));
                Ok(())
            }
        }

        /// Halves the first dimension while it is wider than 2.
        struct ShrinkWide;

        impl Contractor<f64> for ShrinkWide {
            fn name(&self) -> &str {
                "ShrinkWide"
            }

            fn nb_vars(&self) -> usize {
                1
            }

            fn can_contract(&self, var: VarIndex) -> bool {
                var.get() == 0
            }

            fn contract_with(
                &mut self,
                domain: &mut IntervalBox<f64>,
                _indicators: &Indicators,
            ) -> ContractionResult {
                let itv = domain[0];
                if itv.width() > 2.0 {
                    domain[0] = Interval::new(itv.lb(), itv.lb() + itv.width() / 2.0);
                }
                Ok(())
            }
        }

        fn half_plane_paver(retention: Retention, config: PaverConfig) -> Paver<f64> {
            let ctcs: Vec<Box<dyn Contractor<f64>>> = vec![
                Box::new(HalfPlaneReject { bound: 5.0 }),
                Box::new(PrecisionContractor::new(2, 1.0)),
            ];
            Paver::new(
                ctcs,
                Box::new(LargestFirstBisector::midpoint(0.0)),
                retention,
                config,
            )
        }

        fn square_10() -> IntervalBox<f64> {
            IntervalBox::from_bounds(&[(0.0, 10.0), (0.0, 10.0)])
        }

        #[test]
        fn test_scenario_a_right_child_pruned_left_requeued() {
            let mut paver = half_plane_paver(Retention::FullTree, PaverConfig::default());
            let mut monitor = NoOperationMonitor::new();
            paver.start(square_10());

            // The root survives (0 + 0 < 5), splits on x at 0.5; the
            // right child [5,10]x[0,10] has minimal sum 5 and is pruned
            // under the half-plane contractor's index.
            let first = paver.next_box(&mut monitor).unwrap();
            assert_eq!(first, Some(CtrIndex::new(0)));
            assert_eq!(paver.stats.boxes_accepted[0], 1);
            assert_eq!(
                paver.accepted[0][0].domain(),
                &IntervalBox::from_bounds(&[(5.0, 10.0), (0.0, 10.0)])
            );
            assert!(paver.accepted[0][0].is_leaf());

            // The left child [0,5]x[0,10] was retained and re-queued:
            // the search goes on instead of reporting exhaustion.
            let second = paver.next_box(&mut monitor).unwrap();
            assert!(second.is_some(), "left child must still be explorable");
        }

        #[test]
        fn test_scenario_b_capacity_one_overflows_on_second_accept() {
            let config = PaverConfig::default().with_capacity(1);
            let mut paver = half_plane_paver(Retention::FullTree, config);
            let mut monitor = NoOperationMonitor::new();

            let outcome = paver.explore(square_10(), &mut monitor);

            assert_eq!(outcome.termination(), &TerminationReason::Overflow);
            assert_eq!(paver.state(), PaverState::Overflow);
            assert_eq!(outcome.total_boxes(), 1, "exactly one box must be retained");

            // Once overflowed, stepping again reports the same error.
            let err = paver.next_box(&mut monitor).unwrap_err();
            assert_eq!(err, PaverError::Overflow { capacity: 1 });
        }

        #[test]
        fn test_exhaustion_covers_the_whole_region() {
            let ctcs: Vec<Box<dyn Contractor<f64>>> =
                vec![Box::new(PrecisionContractor::new(1, 2.0))];
            let mut paver = Paver::new(
                ctcs,
                Box::new(LargestFirstBisector::midpoint(0.0)),
                Retention::FullTree,
                PaverConfig::default(),
            );
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(IntervalBox::from_bounds(&[(0.0, 8.0)]), &mut monitor);

            assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
            assert_eq!(outcome.nb_boxes(CtrIndex::new(0)), 4);
            let total_width: f64 = outcome
                .accepted_boxes(CtrIndex::new(0))
                .iter()
                .map(|record| record.domain()[0].width())
                .sum();
            assert_eq!(total_width, 8.0, "accepted leaves must tile [0, 8]");
        }

        #[test]
        fn test_solver_mode_retains_selected_leaves_only() {
            let retention = Retention::leaves_only(2, [CtrIndex::new(1)]);
            let mut paver = half_plane_paver(retention, PaverConfig::default());
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);

            assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
            assert!(outcome.paving().is_none(), "solver mode builds no tree");
            // Half-plane prunings happened but were not retained.
            assert_eq!(outcome.nb_boxes(CtrIndex::new(0)), 0);
            assert!(outcome.statistics().boxes_accepted[0] > 0);
            // Every retained box is a precision leaf inside the search
            // region.
            let precision = CtrIndex::new(1);
            assert!(outcome.nb_boxes(precision) > 0);
            for record in outcome.accepted_boxes(precision) {
                assert!(record.is_leaf());
                assert!(record.domain().is_subset(&square_10()));
                assert!(record.domain().max_width() <= 1.0);
            }
        }

        #[test]
        fn test_full_tree_matches_accepted_records() {
            #[derive(Default)]
            struct Counter {
                leaves: usize,
                contractions: usize,
                bisections: usize,
            }

            impl PavingVisitor<f64> for Counter {
                fn visit_contractor(&mut self, node: &ContractorNode<f64>) {
                    if node.is_leaf() {
                        self.leaves += 1;
                    } else {
                        self.contractions += 1;
                    }
                }

                fn visit_bisector(&mut self, node: &BisectorNode) {
                    assert!(node.var().get() < 2);
                    self.bisections += 1;
                }
            }

            let mut paver = half_plane_paver(Retention::FullTree, PaverConfig::default());
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);
            assert_eq!(outcome.termination(), &TerminationReason::Exhausted);

            let paving = outcome.paving().expect("full tree must be retained");
            let mut counter = Counter::default();
            paving.accept(&mut counter);

            // The half-plane contractor never narrows, so every record
            // is a leaf and tree leaves match retained boxes one-to-one.
            assert_eq!(counter.contractions, 0);
            assert_eq!(counter.leaves, outcome.total_boxes());
            assert_eq!(counter.bisections as u64, outcome.statistics().bisections);
        }

        #[test]
        fn test_cell_limit_bounds_created_cells() {
            let config = PaverConfig::default().with_cell_limit(5);
            let mut paver = half_plane_paver(Retention::FullTree, config);
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);

            match outcome.termination() {
                TerminationReason::TimedOut(reason) => {
                    assert!(reason.contains("cell limit"), "unexpected reason: {reason}");
                }
                other => panic!("expected TimedOut, got {:?}", other),
            }
            assert_eq!(paver.state(), PaverState::TimedOut);
            assert!(outcome.statistics().cells_created <= 5);
        }

        #[test]
        fn test_zero_time_limit_times_out_immediately() {
            let config = PaverConfig::default().with_time_limit(Duration::ZERO);
            let mut paver = half_plane_paver(Retention::FullTree, config);
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);

            match outcome.termination() {
                TerminationReason::TimedOut(reason) => {
                    assert!(reason.contains("time limit"), "unexpected reason: {reason}");
                }
                other => panic!("expected TimedOut, got {:?}", other),
            }
            assert_eq!(outcome.total_boxes(), 0);
        }

        #[test]
        fn test_interrupt_aborts_after_first_accepted_node() {
            let flag = AtomicBool::new(false);
            flag.store(true, Ordering::Relaxed);

            let mut paver = half_plane_paver(Retention::FullTree, PaverConfig::default());
            let mut monitor = InterruptMonitor::new(&flag);
            let outcome = paver.explore(square_10(), &mut monitor);

            match outcome.termination() {
                TerminationReason::Aborted(reason) => {
                    assert_eq!(reason, "Interrupt signal received");
                }
                other => panic!("expected Aborted, got {:?}", other),
            }
            assert_eq!(paver.state(), PaverState::Aborted);
            // The accepted box that triggered the poll is kept.
            assert_eq!(outcome.total_boxes(), 1);
        }

        #[test]
        fn test_monitor_sees_every_accept_and_bisection() {
            struct EventCounter {
                accepted: u64,
                bisected: u64,
            }

            impl PaverMonitor<f64> for EventCounter {
                fn name(&self) -> &str {
                    "EventCounter"
                }

                fn on_enter_search(&mut self, _stats: &PaverStatistics) {}
                fn on_exit_search(&mut self, _stats: &PaverStatistics) {}

                fn on_cell_accepted(
                    &mut self,
                    domain: &IntervalBox<f64>,
                    _ctc: CtrIndex,
                    _stats: &PaverStatistics,
                ) {
                    assert!(!domain.is_empty(), "monitors see the box before pruning");
                    self.accepted += 1;
                }

                fn on_cell_bisected(
                    &mut self,
                    left: &Cell<f64>,
                    right: &Cell<f64>,
                    _stats: &PaverStatistics,
                ) {
                    assert_eq!(left.depth(), right.depth());
                    self.bisected += 1;
                }

                fn search_command(&self, _stats: &PaverStatistics) -> SearchCommand {
                    SearchCommand::Continue
                }
            }

            let mut paver = half_plane_paver(Retention::FullTree, PaverConfig::default());
            let mut monitor = EventCounter {
                accepted: 0,
                bisected: 0,
            };
            let outcome = paver.explore(square_10(), &mut monitor);

            assert_eq!(monitor.accepted, outcome.statistics().total_accepted());
            assert_eq!(monitor.bisected, outcome.statistics().bisections);
        }

        #[test]
        fn test_ctc_loop_contracts_to_per_cell_fixpoint() {
            fn shrink_paver(ctc_loop: bool) -> Paver<f64> {
                let ctcs: Vec<Box<dyn Contractor<f64>>> = vec![
                    Box::new(ShrinkWide),
                    Box::new(PrecisionContractor::new(1, 1.0)),
                ];
                Paver::new(
                    ctcs,
                    Box::new(LargestFirstBisector::midpoint(0.0)),
                    Retention::FullTree,
                    PaverConfig::default().with_ctc_loop(ctc_loop),
                )
            }

            // With the loop, the root [0,16] is halved three times
            // before the first bisection.
            let mut looping = shrink_paver(true);
            let mut monitor = NoOperationMonitor::new();
            looping.start(IntervalBox::from_bounds(&[(0.0, 16.0)]));
            let first = looping.next_box(&mut monitor).unwrap();
            assert!(first.is_some());
            assert_eq!(looping.stats.boxes_accepted[0], 3);

            // Without it, only one contraction happens per pop.
            let mut single = shrink_paver(false);
            single.start(IntervalBox::from_bounds(&[(0.0, 16.0)]));
            let first = single.next_box(&mut monitor).unwrap();
            assert!(first.is_some());
            assert_eq!(single.stats.boxes_accepted[0], 2);
        }

        #[test]
        fn test_widest_first_buffer_reaches_same_paving() {
            let ctcs: Vec<Box<dyn Contractor<f64>>> =
                vec![Box::new(PrecisionContractor::new(1, 2.0))];
            let mut paver = Paver::new(
                ctcs,
                Box::new(LargestFirstBisector::midpoint(0.0)),
                Retention::FullTree,
                PaverConfig::default(),
            );
            paver.set_buffer(Box::new(WidestFirstBuffer::new()));
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(IntervalBox::from_bounds(&[(0.0, 8.0)]), &mut monitor);

            assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
            assert_eq!(outcome.nb_boxes(CtrIndex::new(0)), 4);
        }

        #[test]
        fn test_propagation_as_paver_contractor() {
            let sub: Vec<Box<dyn Contractor<f64>>> = vec![Box::new(SumNarrow { bound: 5.0 })];
            let ctcs: Vec<Box<dyn Contractor<f64>>> = vec![
                Box::new(Propagation::with_default_ratio(sub, false)),
                Box::new(PrecisionContractor::new(2, 1.0)),
            ];
            let mut paver = Paver::new(
                ctcs,
                Box::new(LargestFirstBisector::midpoint(0.0)),
                Retention::FullTree,
                PaverConfig::default(),
            );
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);

            assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
            // The propagation entry both narrows and prunes.
            assert!(outcome.statistics().boxes_accepted[0] > 0);
            // Every solution leaf respects the constraint at its corner.
            for record in outcome.accepted_boxes(CtrIndex::new(1)) {
                let corner = record.domain()[0].lb() + record.domain()[1].lb();
                assert!(
                    corner <= 5.0 + 1e-9,
                    "leaf corner {} violates x + y <= 5",
                    corner
                );
            }
        }

        #[test]
        fn test_backtrackable_data_flows_through_the_search() {
            struct DepthTag {
                below_root: u32,
            }

            impl Backtrackable for DepthTag {
                fn derive(&self, _side: BranchSide) -> Box<dyn Backtrackable> {
                    Box::new(DepthTag {
                        below_root: self.below_root + 1,
                    })
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn as_any_mut(&mut self) -> &mut dyn Any {
                    self
                }
            }

            /// Wraps the largest-first policy and checks each cell's
            /// payload against its recorded depth.
            struct CheckingBisector {
                inner: LargestFirstBisector<f64>,
                handle: crate::backtrack::DataHandle<DepthTag>,
            }

            impl Bisector<f64> for CheckingBisector {
                fn name(&self) -> &str {
                    "CheckingBisector"
                }

                fn bisect(&mut self, cell: &Cell<f64>) -> Option<Bisection<f64>> {
                    assert_eq!(
                        cell.data().get(self.handle).below_root,
                        cell.depth(),
                        "payload derivation must track the tree depth"
                    );
                    self.inner.bisect(cell)
                }
            }

            let mut registry = BacktrackableRegistry::new();
            let handle = registry.register("depth-tag", || DepthTag { below_root: 0 });

            let ctcs: Vec<Box<dyn Contractor<f64>>> = vec![
                Box::new(HalfPlaneReject { bound: 5.0 }),
                Box::new(PrecisionContractor::new(2, 2.0)),
            ];
            let mut paver = Paver::with_registry(
                ctcs,
                Box::new(CheckingBisector {
                    inner: LargestFirstBisector::midpoint(0.0),
                    handle,
                }),
                registry,
                Retention::FullTree,
                PaverConfig::default(),
            );
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);
            assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
            assert!(outcome.statistics().bisections > 0);
        }

        #[test]
        fn test_report_mentions_termination_and_counts() {
            let mut paver = half_plane_paver(Retention::FullTree, PaverConfig::default());
            let mut monitor = NoOperationMonitor::new();
            let outcome = paver.explore(square_10(), &mut monitor);
            outcome.report();
            let text = format!("{}", outcome);
            assert!(text.contains("Termination:          Exhausted"));
            assert!(text.contains("Boxes (contractor 0)"));
            assert!(text.contains("Total time"));
        }

        proptest::proptest! {
            /// Precision-only paving of `[0, w]` always terminates
            /// exhausted, with leaves below the ceiling that tile the
            /// whole interval.
            #[test]
            fn prop_precision_paving_tiles_any_interval(
                w in 1.0f64..50.0,
                k in 1.5f64..10.0,
            ) {
                let ceil = w / k;
                let ctcs: Vec<Box<dyn Contractor<f64>>> =
                    vec![Box::new(PrecisionContractor::new(1, ceil))];
                let mut paver = Paver::new(
                    ctcs,
                    Box::new(LargestFirstBisector::midpoint(0.0)),
                    Retention::FullTree,
                    PaverConfig::default(),
                );
                let mut monitor = NoOperationMonitor::new();
                let outcome =
                    paver.explore(IntervalBox::from_bounds(&[(0.0, w)]), &mut monitor);

                proptest::prop_assert_eq!(outcome.termination(), &TerminationReason::Exhausted);
                let mut total = 0.0;
                for record in outcome.accepted_boxes(CtrIndex::new(0)) {
                    proptest::prop_assert!(record.domain()[0].width() <= ceil + 1e-9);
                    total += record.domain()[0].width();
                }
                proptest::prop_assert!(approx::relative_eq!(
                    total,
                    w,
                    max_relative = 1e-9
                ));
            }
        }

        #[test]
        fn test_re_exploration_resets_per_run_state() {
            let mut paver = half_plane_paver(Retention::FullTree, PaverConfig::default());
            let mut monitor = NoOperationMonitor::new();

            let first = paver.explore(square_10(), &mut monitor);
            let second = paver.explore(square_10(), &mut monitor);

            assert_eq!(first.total_boxes(), second.total_boxes());
            assert_eq!(
                first.statistics().cells_created,
                second.statistics().cells_created
            );
            assert_eq!(paver.state(), PaverState::Exhausted);
        }
    }
}
