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

//! # Search Cells
//!
//! A cell is one node of the branch-and-bound tree while it is alive: it
//! exclusively owns its box and its backtrackable payload map, remembers
//! its depth and the dimension its parent split on, and (in full-tree
//! retention) the pending attachment point of its realized subtree.
//! Cells are created for the root or as bisection children and dropped
//! when pruned or fully explored.

use crate::backtrack::{BacktrackableRegistry, BranchSide, CellData};
use crate::paving::NodeLink;
use cobble_contract::index::VarIndex;
use cobble_contract::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;

/// One node of the search tree, owning its box and payloads.
pub struct Cell<T>
where
    T: PaverNumeric,
{
    domain: IntervalBox<T>,
    data: CellData,
    depth: u32,
    last_split_var: Option<VarIndex>,
    /// Where this cell's realized subtree attaches in the paving arena
    /// (full-tree retention only).
    pub(crate) link: Option<NodeLink>,
}

impl<T> Cell<T>
where
    T: PaverNumeric,
{
    /// Creates the root cell, filling one payload per registered kind.
    pub fn root(domain: IntervalBox<T>, registry: &BacktrackableRegistry) -> Self {
        Self {
            domain,
            data: registry.init_data(),
            depth: 0,
            last_split_var: None,
            link: None,
        }
    }

    /// Creates a child cell with the given sub-box, deriving every
    /// payload from this cell's corresponding payload.
    pub fn child(
        &self,
        registry: &BacktrackableRegistry,
        side: BranchSide,
        domain: IntervalBox<T>,
        split_var: VarIndex,
    ) -> Self {
        Self {
            domain,
            data: registry.derive_data(&self.data, side),
            depth: self.depth + 1,
            last_split_var: Some(split_var),
            link: None,
        }
    }

    /// Returns the cell's box.
    #[inline]
    pub fn domain(&self) -> &IntervalBox<T> {
        &self.domain
    }

    /// Returns the cell's box, mutably.
    #[inline]
    pub fn domain_mut(&mut self) -> &mut IntervalBox<T> {
        &mut self.domain
    }

    /// Consumes the cell and returns its box.
    #[inline]
    pub fn into_domain(self) -> IntervalBox<T> {
        self.domain
    }

    /// Returns the payload map.
    #[inline]
    pub fn data(&self) -> &CellData {
        &self.data
    }

    /// Returns the payload map, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut CellData {
        &mut self.data
    }

    /// Returns the depth below the root (the root has depth 0).
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the dimension the parent bisected to produce this cell,
    /// or `None` for the root.
    #[inline]
    pub fn last_split_var(&self) -> Option<VarIndex> {
        self.last_split_var
    }
}

impl<T> std::fmt::Debug for Cell<T>
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("domain", &self.domain)
            .field("depth", &self.depth)
            .field("last_split_var", &self.last_split_var)
            .finish()
    }
}

impl<T> std::fmt::Display for Cell<T>
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell(depth: {}, domain: {})", self.depth, self.domain)
    }
}
