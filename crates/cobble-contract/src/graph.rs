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

//! # Constraint/Variable Hypergraph
//!
//! Static bipartite incidence between constraints and variables, built
//! once from the contractor list's `can_contract` declarations and
//! immutable afterwards. Two adjacency views are maintained, constraint
//! to variables and variable to constraints, and arc presence is kept
//! symmetric across them by construction.
//!
//! Arcs carry an opaque nonzero label; `arc` returns the label or zero
//! for an absent arc. Out-of-range indices are programming errors and
//! panic.

use crate::contractor::Contractor;
use crate::index::{CtrIndex, VarIndex};
use crate::num::PaverNumeric;
use smallvec::SmallVec;

/// Adjacency rows are small for typical constraint scopes.
type VarRow = SmallVec<[VarIndex; 8]>;
type CtrRow = SmallVec<[CtrIndex; 8]>;

/// Static incidence structure between `nb_ctr` constraints and `nb_var`
/// variables.
#[derive(Clone, Debug)]
pub struct HyperGraph {
    nb_ctr: usize,
    nb_var: usize,
    /// Dense label table, `ctr * nb_var + var`; 0 means "no arc".
    labels: Vec<u32>,
    ctr_adj: Vec<VarRow>,
    var_adj: Vec<CtrRow>,
}

impl HyperGraph {
    /// Creates a graph with no arcs.
    pub fn new(nb_ctr: usize, nb_var: usize) -> Self {
        Self {
            nb_ctr,
            nb_var,
            labels: vec![0; nb_ctr * nb_var],
            ctr_adj: vec![VarRow::new(); nb_ctr],
            var_adj: vec![CtrRow::new(); nb_var],
        }
    }

    /// Builds the graph from a contractor list: one arc per
    /// `(ctr, var)` pair with `can_contract(var)`. Arcs are labeled with
    /// their 1-based insertion rank.
    ///
    /// # Panics
    ///
    /// Panics if any contractor's `nb_vars` differs from `nb_var`.
    pub fn from_contractors<T>(ctcs: &[Box<dyn Contractor<T>>], nb_var: usize) -> Self
    where
        T: PaverNumeric,
    {
        let mut graph = Self::new(ctcs.len(), nb_var);
        let mut next_label = 1u32;
        for (c, ctc) in ctcs.iter().enumerate() {
            assert_eq!(
                ctc.nb_vars(),
                nb_var,
                "called `HyperGraph::from_contractors` with mismatched graph dimensions: contractor '{}' works on {} variables but the graph has {}",
                ctc.name(),
                ctc.nb_vars(),
                nb_var
            );
            for v in 0..nb_var {
                let var = VarIndex::new(v);
                if ctc.can_contract(var) {
                    graph.add_arc(CtrIndex::new(c), var, next_label);
                    next_label += 1;
                }
            }
        }
        graph
    }

    /// Returns the number of constraints.
    #[inline]
    pub fn nb_ctrs(&self) -> usize {
        self.nb_ctr
    }

    /// Returns the number of variables.
    #[inline]
    pub fn nb_vars(&self) -> usize {
        self.nb_var
    }

    #[inline]
    fn slot(&self, ctr: CtrIndex, var: VarIndex) -> usize {
        assert!(
            ctr.get() < self.nb_ctr,
            "called `HyperGraph` accessor with constraint index out of bounds: the len is {} but the index is {}",
            self.nb_ctr,
            ctr.get()
        );
        assert!(
            var.get() < self.nb_var,
            "called `HyperGraph` accessor with variable index out of bounds: the len is {} but the index is {}",
            self.nb_var,
            var.get()
        );
        ctr.get() * self.nb_var + var.get()
    }

    /// Registers an arc between `ctr` and `var` with a nonzero label.
    ///
    /// Adding the same pair again is a no-op (the first label wins), so
    /// both adjacency views stay duplicate-free.
    ///
    /// # Panics
    ///
    /// Panics if `label` is zero or either index is out of range.
    pub fn add_arc(&mut self, ctr: CtrIndex, var: VarIndex, label: u32) {
        assert!(
            label != 0,
            "called `HyperGraph::add_arc` with a zero label"
        );
        let slot = self.slot(ctr, var);
        if self.labels[slot] != 0 {
            return;
        }
        self.labels[slot] = label;
        self.ctr_adj[ctr.get()].push(var);
        self.var_adj[var.get()].push(ctr);
    }

    /// Returns the arc label, or zero if the pair is not connected.
    #[inline]
    pub fn arc(&self, ctr: CtrIndex, var: VarIndex) -> u32 {
        self.labels[self.slot(ctr, var)]
    }

    /// Returns the number of variables in `ctr`'s scope.
    #[inline]
    pub fn ctr_nb_vars(&self, ctr: CtrIndex) -> usize {
        self.ctr_adj[ctr.get()].len()
    }

    /// Returns the `i`-th variable of `ctr`'s scope (insertion order).
    #[inline]
    pub fn ctr_ith_var(&self, ctr: CtrIndex, i: usize) -> VarIndex {
        self.ctr_adj[ctr.get()][i]
    }

    /// Returns `ctr`'s scope as a slice.
    #[inline]
    pub fn ctr_vars(&self, ctr: CtrIndex) -> &[VarIndex] {
        &self.ctr_adj[ctr.get()]
    }

    /// Returns the number of constraints involving `var`.
    #[inline]
    pub fn var_nb_ctrs(&self, var: VarIndex) -> usize {
        self.var_adj[var.get()].len()
    }

    /// Returns the `i`-th constraint involving `var` (insertion order).
    #[inline]
    pub fn var_ith_ctr(&self, var: VarIndex, i: usize) -> CtrIndex {
        self.var_adj[var.get()][i]
    }

    /// Returns the constraints involving `var` as a slice.
    #[inline]
    pub fn var_ctrs(&self, var: VarIndex) -> &[CtrIndex] {
        &self.var_adj[var.get()]
    }

    /// Returns the total number of arcs.
    #[inline]
    pub fn nb_arcs(&self) -> usize {
        self.ctr_adj.iter().map(|row| row.len()).sum()
    }
}

impl std::fmt::Display for HyperGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HyperGraph(ctrs: {}, vars: {}, arcs: {})",
            self.nb_ctr,
            self.nb_var,
            self.nb_arcs()
        )
    }
}
