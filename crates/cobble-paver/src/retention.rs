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

//! # Retention Policies
//!
//! What the driver keeps of the explored tree, chosen once at
//! construction. `FullTree` retains every accepted box plus the whole
//! `Paving` for later traversal and visualization. `LeavesOnly` retains
//! only the leaf boxes accepted by an explicitly selected set of
//! contractors and builds no tree, bounding memory for pure
//! existence/enumeration queries.

use cobble_contract::index::CtrIndex;
use fixedbitset::FixedBitSet;

/// The retention strategy of a paver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Retention {
    /// Keep every accepted box and the full search tree.
    FullTree,
    /// Keep only leaf boxes of the selected contractors; no tree.
    LeavesOnly(FixedBitSet),
}

impl Retention {
    /// Builds a leaves-only policy selecting the given contractors out
    /// of a list of `nb_ctr`.
    ///
    /// # Panics
    ///
    /// Panics if a selected index is out of range.
    pub fn leaves_only<I>(nb_ctr: usize, selected: I) -> Self
    where
        I: IntoIterator<Item = CtrIndex>,
    {
        let mut set = FixedBitSet::with_capacity(nb_ctr);
        for ctc in selected {
            assert!(
                ctc.get() < nb_ctr,
                "called `Retention::leaves_only` with contractor index out of bounds: the len is {} but the index is {}",
                nb_ctr,
                ctc.get()
            );
            set.insert(ctc.get());
        }
        Retention::LeavesOnly(set)
    }

    /// Returns `true` for the full-tree policy.
    #[inline]
    pub fn is_full_tree(&self) -> bool {
        matches!(self, Retention::FullTree)
    }

    /// Returns `true` if boxes accepted by `ctc` are retained.
    #[inline]
    pub fn selects(&self, ctc: CtrIndex) -> bool {
        match self {
            Retention::FullTree => true,
            Retention::LeavesOnly(selected) => selected.contains(ctc.get()),
        }
    }
}

impl std::fmt::Display for Retention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Retention::FullTree => write!(f, "FullTree"),
            Retention::LeavesOnly(selected) => {
                write!(f, "LeavesOnly({} selected)", selected.count_ones(..))
            }
        }
    }
}
