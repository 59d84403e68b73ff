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

//! # Fixpoint Propagation
//!
//! An AC3-style driver that applies a list of contractors to one shared
//! box until no contractor can significantly reduce it. Work items are
//! (constraint, variable) arcs popped from an `ArcAgenda`; after each
//! contraction the domains of the fired constraint's whole scope are
//! compared against a pre-call snapshot, and every variable whose width
//! shrank by at least the configured `ratio` (proportionally) wakes up
//! the constraints sharing it.
//!
//! `Propagation` is itself a `Contractor`, so a whole constraint system
//! collapses into a single entry of a paver's contractor list.
//!
//! Termination holds because every re-enqueue requires a proportional
//! width reduction of at least `ratio > 0`, and widths are bounded below
//! by floating-point granularity. An unbounded domain becoming bounded
//! counts as a full reduction.
//!
//! A `Propagation` instance owns its graph and agenda and is not
//! reentrant: it must not be invoked recursively from within one of its
//! own contractors.

use crate::agenda::ArcAgenda;
use crate::contractor::{ContractionResult, Contractor, Indicators, Target};
use crate::graph::HyperGraph;
use crate::index::{CtrIndex, VarIndex};
use crate::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

/// AC3-style fixpoint driver over a contractor list.
pub struct Propagation<T>
where
    T: PaverNumeric,
{
    ctcs: Vec<Box<dyn Contractor<T>>>,
    graph: HyperGraph,
    agenda: ArcAgenda,
    ratio: T,
    incremental: bool,
    /// Per variable, the constraint fired most recently for it.
    prev_ctc: Vec<Option<CtrIndex>>,
    nb_var: usize,
}

impl<T> Propagation<T>
where
    T: PaverNumeric,
{
    /// The default significance threshold for re-enqueueing.
    pub fn default_ratio() -> T {
        T::from_f64(0.1).expect("default propagation ratio must be representable")
    }

    /// Creates a propagation over the given contractor list.
    ///
    /// `ratio` is the proportional width reduction a contraction must
    /// achieve on some scope variable for its neighborhood to be woken
    /// up again. `incremental` enables seeding the agenda from the
    /// caller-provided impact variable instead of the whole graph.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty, the contractors disagree on the
    /// number of variables, or `ratio` is not in `(0, 1]`.
    pub fn new(ctcs: Vec<Box<dyn Contractor<T>>>, ratio: T, incremental: bool) -> Self {
        assert!(
            !ctcs.is_empty(),
            "called `Propagation::new` with an empty contractor list"
        );
        assert!(
            ratio > T::zero() && ratio <= T::one(),
            "called `Propagation::new` with ratio outside (0, 1]"
        );
        let nb_var = ctcs[0].nb_vars();
        let graph = HyperGraph::from_contractors(&ctcs, nb_var);
        let agenda = ArcAgenda::new(ctcs.len(), nb_var);
        Self {
            ctcs,
            graph,
            agenda,
            ratio,
            incremental,
            prev_ctc: vec![None; nb_var],
            nb_var,
        }
    }

    /// Creates a propagation with the default ratio.
    pub fn with_default_ratio(ctcs: Vec<Box<dyn Contractor<T>>>, incremental: bool) -> Self {
        Self::new(ctcs, Self::default_ratio(), incremental)
    }

    /// Returns the significance threshold.
    #[inline]
    pub fn ratio(&self) -> T {
        self.ratio
    }

    /// Returns `true` if incremental seeding is enabled.
    #[inline]
    pub fn is_incremental(&self) -> bool {
        self.incremental
    }

    /// Returns the number of sub-contractors.
    #[inline]
    pub fn nb_ctrs(&self) -> usize {
        self.ctcs.len()
    }

    /// Returns the incidence graph over the sub-contractors.
    #[inline]
    pub fn graph(&self) -> &HyperGraph {
        &self.graph
    }

    /// Proportional width reduction from `old` to `new`.
    ///
    /// Unbounded-to-bounded counts as a full reduction; an unchanged,
    /// still-unbounded or zero-width domain counts as none.
    fn gain(old: T, new: T) -> T {
        if old.is_infinite() {
            if new.is_infinite() {
                T::zero()
            } else {
                T::one()
            }
        } else if old == T::zero() {
            T::zero()
        } else {
            (old - new) / old
        }
    }

    /// Runs the main loop until the agenda drains or a contractor
    /// reports an empty box. On failure the agenda is flushed so the
    /// next run starts clean.
    fn fixpoint(&mut self, domain: &mut IntervalBox<T>) -> ContractionResult {
        while let Some((ctr, var)) = self.agenda.pop_arc() {
            // A repeat visit of the same constraint for the same
            // variable means nothing else changed in between; the
            // contractor only needs to reconsider that one variable.
            let impact = if self.prev_ctc[var.get()] == Some(ctr) {
                Target::OneVar(var)
            } else {
                Target::AllVars
            };
            self.prev_ctc[var.get()] = Some(ctr);

            let scope: SmallVec<[VarIndex; 8]> =
                SmallVec::from_slice(self.graph.ctr_vars(ctr));
            let before: SmallVec<[T; 8]> =
                scope.iter().map(|&v| domain[v.get()].width()).collect();

            log::trace!(
                "propagation: fire {} on {} (impact: {})",
                ctr,
                var,
                impact
            );

            let indicators = Indicators::new(impact, Target::OneVar(var));
            if let Err(e) = self.ctcs[ctr.get()].contract_with(domain, &indicators) {
                log::trace!("propagation: {} proved the box empty", ctr);
                self.agenda.flush();
                return Err(e);
            }

            for (&scoped, &old_width) in scope.iter().zip(before.iter()) {
                let new_width = domain[scoped.get()].width();
                if Self::gain(old_width, new_width) >= self.ratio {
                    self.agenda.propagate(&self.graph, ctr, scoped);
                }
            }
        }
        Ok(())
    }
}

impl<T> Contractor<T> for Propagation<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "Propagation"
    }

    fn nb_vars(&self) -> usize {
        self.nb_var
    }

    fn can_contract(&self, var: VarIndex) -> bool {
        self.graph.var_nb_ctrs(var) > 0
    }

    fn contract_with(
        &mut self,
        domain: &mut IntervalBox<T>,
        indicators: &Indicators,
    ) -> ContractionResult {
        assert_eq!(
            domain.dim(),
            self.nb_var,
            "called `Propagation::contract_with` with mismatched box dimension: the graph has {} variables but the box has {}",
            self.nb_var,
            domain.dim()
        );
        debug_assert!(
            !domain.is_empty(),
            "called `Propagation::contract_with` on an already empty box"
        );

        for prev in self.prev_ctc.iter_mut() {
            *prev = None;
        }

        match (self.incremental, indicators.impact) {
            (true, Target::OneVar(var)) => {
                let mut mask = FixedBitSet::with_capacity(self.nb_var);
                mask.insert(var.get());
                self.agenda.propagate_mask(&self.graph, &mask);
            }
            _ => self.agenda.init_all(&self.graph),
        }

        self.fixpoint(domain)
    }
}

impl<T> std::fmt::Debug for Propagation<T>
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Propagation")
            .field("nb_ctrs", &self.ctcs.len())
            .field("nb_vars", &self.nb_var)
            .field("ratio", &self.ratio)
            .field("incremental", &self.incremental)
            .finish()
    }
}
