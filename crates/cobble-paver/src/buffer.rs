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

//! # Cell Buffers
//!
//! The driver pulls its next cell from a pluggable buffer, which decides
//! the traversal order. `DepthFirstBuffer` is a plain LIFO stack (the
//! default, depth-first order); `WidestFirstBuffer` is a priority queue
//! popping the cell with the largest box first (a best-first strategy),
//! with ties broken by insertion order for determinism.

use crate::cell::Cell;
use cobble_contract::num::PaverNumeric;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// The traversal-order abstraction of the driver.
pub trait CellBuffer<T>
where
    T: PaverNumeric,
{
    /// A human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Adds a cell.
    fn push(&mut self, cell: Cell<T>);

    /// Removes and returns the next cell, or `None` when empty.
    fn pop(&mut self) -> Option<Cell<T>>;

    /// Returns the number of buffered cells.
    fn len(&self) -> usize;

    /// Returns `true` if no cell is buffered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all buffered cells.
    fn flush(&mut self);
}

impl<T> std::fmt::Debug for dyn CellBuffer<T> + '_
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CellBuffer({}, len: {})", self.name(), self.len())
    }
}

/// LIFO buffer: depth-first exploration.
pub struct DepthFirstBuffer<T>
where
    T: PaverNumeric,
{
    cells: Vec<Cell<T>>,
}

impl<T> DepthFirstBuffer<T>
where
    T: PaverNumeric,
{
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }
}

impl<T> Default for DepthFirstBuffer<T>
where
    T: PaverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CellBuffer<T> for DepthFirstBuffer<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "DepthFirstBuffer"
    }

    fn push(&mut self, cell: Cell<T>) {
        self.cells.push(cell);
    }

    fn pop(&mut self) -> Option<Cell<T>> {
        self.cells.pop()
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn flush(&mut self) {
        self.cells.clear();
    }
}

struct WidthOrdered<T>
where
    T: PaverNumeric,
{
    width: T,
    seq: u64,
    cell: Cell<T>,
}

impl<T> PartialEq for WidthOrdered<T>
where
    T: PaverNumeric,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for WidthOrdered<T> where T: PaverNumeric {}

impl<T> PartialOrd for WidthOrdered<T>
where
    T: PaverNumeric,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for WidthOrdered<T>
where
    T: PaverNumeric,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // Widths are never NaN (they come from valid intervals), so the
        // partial comparison is total in practice.
        self.width
            .partial_cmp(&other.width)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Max-priority buffer popping the cell with the widest box first.
pub struct WidestFirstBuffer<T>
where
    T: PaverNumeric,
{
    heap: BinaryHeap<WidthOrdered<T>>,
    counter: u64,
}

impl<T> WidestFirstBuffer<T>
where
    T: PaverNumeric,
{
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            counter: 0,
        }
    }
}

impl<T> Default for WidestFirstBuffer<T>
where
    T: PaverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CellBuffer<T> for WidestFirstBuffer<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "WidestFirstBuffer"
    }

    fn push(&mut self, cell: Cell<T>) {
        let width = cell.domain().max_width();
        let seq = self.counter;
        self.counter += 1;
        self.heap.push(WidthOrdered { width, seq, cell });
    }

    fn pop(&mut self) -> Option<Cell<T>> {
        self.heap.pop().map(|entry| entry.cell)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn flush(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtrack::BacktrackableRegistry;
    use cobble_core::math::boxes::IntervalBox;

    fn cell(width: f64) -> Cell<f64> {
        Cell::root(
            IntervalBox::from_bounds(&[(0.0, width)]),
            &BacktrackableRegistry::new(),
        )
    }

    #[test]
    fn test_depth_first_is_lifo() {
        let mut buffer = DepthFirstBuffer::new();
        buffer.push(cell(1.0));
        buffer.push(cell(2.0));
        buffer.push(cell(3.0));
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.pop().unwrap().domain().max_width(), 3.0);
        assert_eq!(buffer.pop().unwrap().domain().max_width(), 2.0);
        assert_eq!(buffer.pop().unwrap().domain().max_width(), 1.0);
        assert!(buffer.pop().is_none());
    }

    #[test]
    fn test_widest_first_pops_by_width() {
        let mut buffer = WidestFirstBuffer::new();
        buffer.push(cell(2.0));
        buffer.push(cell(5.0));
        buffer.push(cell(1.0));
        assert_eq!(buffer.pop().unwrap().domain().max_width(), 5.0);
        assert_eq!(buffer.pop().unwrap().domain().max_width(), 2.0);
        assert_eq!(buffer.pop().unwrap().domain().max_width(), 1.0);
    }

    #[test]
    fn test_widest_first_ties_pop_in_insertion_order() {
        let mut buffer = WidestFirstBuffer::new();
        let mut first = cell(2.0);
        first.domain_mut()[0] = cobble_core::math::interval::Interval::new(10.0, 12.0);
        buffer.push(first);
        buffer.push(cell(2.0));
        let popped = buffer.pop().unwrap();
        assert_eq!(popped.domain()[0].lb(), 10.0);
    }

    #[test]
    fn test_flush_empties_buffer() {
        let mut buffer = DepthFirstBuffer::new();
        buffer.push(cell(1.0));
        buffer.push(cell(2.0));
        buffer.flush();
        assert!(buffer.is_empty());

        let mut widest = WidestFirstBuffer::new();
        widest.push(cell(1.0));
        widest.flush();
        assert!(widest.is_empty());
    }
}
