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

//! # Work Agendas
//!
//! A deduplicating FIFO worklist over a bounded integer domain, backed by
//! a sparse linked table: each slot stores the index of its successor or
//! a past-the-end tail sentinel, and a distinct marker when the item is
//! not queued at all. `push` is O(1) and a no-op on queued items, `pop`
//! is O(1) FIFO removal, and no item can appear twice.
//!
//! `ArcAgenda` layers the constraint × variable product domain on top
//! (items encoded as `ctr * nb_var + var`) and implements the standard
//! arc-consistency wake-up rule used by the propagation loop, plus a
//! mask-seeded variant for incremental re-propagation after an outside
//! change to the box.

use crate::graph::HyperGraph;
use crate::index::{CtrIndex, VarIndex};
use fixedbitset::FixedBitSet;

/// Marker for "not currently queued".
const NOT_QUEUED: usize = usize::MAX;

/// A deduplicating FIFO set over `0..capacity`.
#[derive(Clone, Debug)]
pub struct Agenda {
    /// `NOT_QUEUED`, a successor index, or `capacity` as tail sentinel.
    next: Vec<usize>,
    first: usize,
    last: usize,
    len: usize,
}

impl Agenda {
    /// Creates an empty agenda over the domain `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            next: vec![NOT_QUEUED; capacity],
            first: capacity,
            last: capacity,
            len: 0,
        }
    }

    /// The past-the-end sentinel value.
    #[inline]
    fn tail(&self) -> usize {
        self.next.len()
    }

    /// Returns the domain size.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.next.len()
    }

    /// Returns the number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no item is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `item` is currently queued.
    #[inline]
    pub fn contains(&self, item: usize) -> bool {
        assert!(
            item < self.capacity(),
            "called `Agenda::contains` with item out of bounds: the capacity is {} but the item is {}",
            self.capacity(),
            item
        );
        self.next[item] != NOT_QUEUED
    }

    /// Appends `item` at the tail; a no-op if it is already queued.
    ///
    /// # Panics
    ///
    /// Panics if `item` is outside the domain.
    pub fn push(&mut self, item: usize) {
        assert!(
            item < self.capacity(),
            "called `Agenda::push` with item out of bounds: the capacity is {} but the item is {}",
            self.capacity(),
            item
        );
        if self.next[item] != NOT_QUEUED {
            return;
        }
        let tail = self.tail();
        if self.len == 0 {
            self.first = item;
        } else {
            self.next[self.last] = item;
        }
        self.next[item] = tail;
        self.last = item;
        self.len += 1;
    }

    /// Removes and returns the oldest item, or `None` on an empty agenda.
    ///
    /// The main loop always checks `is_empty` first; popping an empty
    /// agenda is a logic error on the caller's side.
    pub fn pop(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let item = self.first;
        let succ = self.next[item];
        self.next[item] = NOT_QUEUED;
        self.len -= 1;
        if succ == self.tail() {
            self.first = self.tail();
            self.last = self.tail();
        } else {
            self.first = succ;
        }
        Some(item)
    }

    /// Drains the agenda without processing, so a later run starts clean.
    pub fn flush(&mut self) {
        while self.pop().is_some() {}
    }
}

impl std::fmt::Display for Agenda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Agenda(len: {}, capacity: {})",
            self.len(),
            self.capacity()
        )
    }
}

/// An agenda over the product of constraints × variables.
///
/// Items are encoded as `ctr * nb_var + var`.
#[derive(Clone, Debug)]
pub struct ArcAgenda {
    inner: Agenda,
    nb_ctr: usize,
    nb_var: usize,
}

impl ArcAgenda {
    /// Creates an empty arc agenda for `nb_ctr` constraints over
    /// `nb_var` variables.
    pub fn new(nb_ctr: usize, nb_var: usize) -> Self {
        Self {
            inner: Agenda::new(nb_ctr * nb_var),
            nb_ctr,
            nb_var,
        }
    }

    #[inline]
    fn encode(&self, ctr: CtrIndex, var: VarIndex) -> usize {
        assert!(
            ctr.get() < self.nb_ctr && var.get() < self.nb_var,
            "called `ArcAgenda` with arc out of bounds: the shape is {}x{} but the arc is ({}, {})",
            self.nb_ctr,
            self.nb_var,
            ctr.get(),
            var.get()
        );
        ctr.get() * self.nb_var + var.get()
    }

    #[inline]
    fn decode(&self, item: usize) -> (CtrIndex, VarIndex) {
        (
            CtrIndex::new(item / self.nb_var),
            VarIndex::new(item % self.nb_var),
        )
    }

    #[inline]
    fn check_graph(&self, graph: &HyperGraph) {
        assert!(
            graph.nb_ctrs() == self.nb_ctr && graph.nb_vars() == self.nb_var,
            "called `ArcAgenda` with mismatched graph dimensions: the agenda is {}x{} but the graph is {}x{}",
            self.nb_ctr,
            self.nb_var,
            graph.nb_ctrs(),
            graph.nb_vars()
        );
    }

    /// Returns the number of queued arcs.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no arc is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the arc is currently queued.
    #[inline]
    pub fn contains_arc(&self, ctr: CtrIndex, var: VarIndex) -> bool {
        self.inner.contains(self.encode(ctr, var))
    }

    /// Enqueues one arc (idempotent).
    #[inline]
    pub fn push_arc(&mut self, ctr: CtrIndex, var: VarIndex) {
        let item = self.encode(ctr, var);
        self.inner.push(item);
    }

    /// Dequeues the oldest arc.
    #[inline]
    pub fn pop_arc(&mut self) -> Option<(CtrIndex, VarIndex)> {
        self.inner.pop().map(|item| self.decode(item))
    }

    /// Seeds the agenda with every arc of the graph.
    pub fn init_all(&mut self, graph: &HyperGraph) {
        self.check_graph(graph);
        for c in 0..self.nb_ctr {
            let ctr = CtrIndex::new(c);
            for &var in graph.ctr_vars(ctr) {
                self.push_arc(ctr, var);
            }
        }
    }

    /// The arc-consistency wake-up rule: after `ctr` narrowed `var`,
    /// re-enqueues every pair of every other constraint sharing `var`.
    pub fn propagate(&mut self, graph: &HyperGraph, ctr: CtrIndex, var: VarIndex) {
        self.check_graph(graph);
        for &other in graph.var_ctrs(var) {
            if other == ctr {
                continue;
            }
            for &scoped in graph.ctr_vars(other) {
                self.push_arc(other, scoped);
            }
        }
    }

    /// Seeds the agenda from an externally supplied set of impacted
    /// variables: for each variable in the mask, the arcs of every
    /// constraint involving it.
    ///
    /// # Panics
    ///
    /// Panics if the mask length differs from the variable count.
    pub fn propagate_mask(&mut self, graph: &HyperGraph, impacted: &FixedBitSet) {
        self.check_graph(graph);
        assert_eq!(
            impacted.len(),
            self.nb_var,
            "called `ArcAgenda::propagate_mask` with mismatched mask length: the agenda has {} variables but the mask has {}",
            self.nb_var,
            impacted.len()
        );
        for v in impacted.ones() {
            let var = VarIndex::new(v);
            for &ctr in graph.var_ctrs(var) {
                self.push_arc(ctr, var);
            }
        }
    }

    /// Drains the agenda without processing.
    #[inline]
    pub fn flush(&mut self) {
        self.inner.flush();
    }
}

impl std::fmt::Display for ArcAgenda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ArcAgenda(len: {}, shape: {}x{})",
            self.len(),
            self.nb_ctr,
            self.nb_var
        )
    }
}
