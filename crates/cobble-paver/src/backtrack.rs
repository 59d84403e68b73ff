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

//! # Backtrackable Cell Data
//!
//! Operators taking part in a search (contractors, bisectors, external
//! observers) may need private per-node state that is inherited from
//! parent to child when a cell is bisected. Each data kind registers a
//! factory once, before the search starts, and receives a stable slot
//! handle; cells then carry one payload per registered kind, created for
//! the root and derived (never shared) for children.
//!
//! Slot handles are phantom-typed small integers, so payload access is a
//! vector index plus a checked downcast instead of a runtime type-name
//! lookup. Querying a slot that was never registered, or with the wrong
//! kind, is a configuration error and panics at first use.
//!
//! Invariant: a cell's payload for a kind is only ever read or written
//! by the operator that registered that kind; siblings never share a
//! payload object.

use rustc_hash::FxHashMap;
use std::any::Any;
use std::marker::PhantomData;

/// Which side of a bisection a child cell is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BranchSide {
    Left,
    Right,
}

impl std::fmt::Display for BranchSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchSide::Left => write!(f, "left"),
            BranchSide::Right => write!(f, "right"),
        }
    }
}

/// A per-node operator payload that knows how to derive the payload of a
/// child node from itself.
pub trait Backtrackable: Any {
    /// Produces the payload of a child cell on the given side.
    ///
    /// The result must be a fresh object; returning shared state would
    /// let one sibling observe the other's mutations.
    fn derive(&self, side: BranchSide) -> Box<dyn Backtrackable>;

    /// Upcast for typed access.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable access.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A copyable, phantom-typed handle to a registered data slot.
pub struct DataHandle<D> {
    slot: usize,
    _marker: PhantomData<fn() -> D>,
}

impl<D> DataHandle<D> {
    /// Returns the underlying slot index.
    #[inline]
    pub const fn slot(&self) -> usize {
        self.slot
    }
}

impl<D> Clone for DataHandle<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DataHandle<D> {}

impl<D> std::fmt::Debug for DataHandle<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DataHandle({})", self.slot)
    }
}

type RootFactory = Box<dyn Fn() -> Box<dyn Backtrackable>>;

/// The per-paver registry of backtrackable data factories.
///
/// Every kind required by some operator must be registered exactly once
/// before the search starts.
#[derive(Default)]
pub struct BacktrackableRegistry {
    factories: Vec<RootFactory>,
    names: Vec<&'static str>,
    by_name: FxHashMap<&'static str, usize>,
}

impl BacktrackableRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a data kind under a unique name and returns its handle.
    ///
    /// The factory builds the root payload; child payloads are derived
    /// through [`Backtrackable::derive`].
    ///
    /// # Panics
    ///
    /// Panics if `name` was already registered.
    pub fn register<D, F>(&mut self, name: &'static str, factory: F) -> DataHandle<D>
    where
        D: Backtrackable,
        F: Fn() -> D + 'static,
    {
        assert!(
            !self.by_name.contains_key(name),
            "called `BacktrackableRegistry::register` with duplicate data kind '{}'",
            name
        );
        let slot = self.factories.len();
        self.factories
            .push(Box::new(move || Box::new(factory()) as Box<dyn Backtrackable>));
        self.names.push(name);
        self.by_name.insert(name, slot);
        DataHandle {
            slot,
            _marker: PhantomData,
        }
    }

    /// Returns the number of registered kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no kind is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Returns the name registered for a slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is out of range.
    pub fn name(&self, slot: usize) -> &'static str {
        assert!(
            slot < self.names.len(),
            "called `BacktrackableRegistry::name` with slot out of bounds: the len is {} but the slot is {}",
            self.names.len(),
            slot
        );
        self.names[slot]
    }

    /// Builds the payload set of a root cell: one fresh payload per
    /// registered kind.
    pub fn init_data(&self) -> CellData {
        CellData {
            slots: self.factories.iter().map(|factory| factory()).collect(),
        }
    }

    /// Derives a child payload set from a parent's, kind by kind.
    ///
    /// # Panics
    ///
    /// Panics if the parent data does not match this registry's layout.
    pub fn derive_data(&self, parent: &CellData, side: BranchSide) -> CellData {
        assert_eq!(
            parent.slots.len(),
            self.factories.len(),
            "called `BacktrackableRegistry::derive_data` with foreign cell data: the registry has {} kinds but the data has {}",
            self.factories.len(),
            parent.slots.len()
        );
        CellData {
            slots: parent
                .slots
                .iter()
                .map(|payload| payload.derive(side))
                .collect(),
        }
    }
}

impl std::fmt::Debug for BacktrackableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktrackableRegistry")
            .field("kinds", &self.names)
            .finish()
    }
}

/// The payload map of one cell: one payload per registered kind.
#[derive(Default)]
pub struct CellData {
    slots: Vec<Box<dyn Backtrackable>>,
}

impl CellData {
    /// Creates an empty payload set (for searches without registered
    /// data kinds).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of payloads.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no payloads.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the payload for `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the slot was never registered with this cell's registry
    /// or the registered kind differs from `D`. Both are configuration
    /// errors caught at first use.
    pub fn get<D>(&self, handle: DataHandle<D>) -> &D
    where
        D: Backtrackable,
    {
        assert!(
            handle.slot < self.slots.len(),
            "called `CellData::get` with an unregistered data slot: the len is {} but the slot is {}",
            self.slots.len(),
            handle.slot
        );
        match self.slots[handle.slot].as_any().downcast_ref::<D>() {
            Some(payload) => payload,
            None => panic!(
                "called `CellData::get` with mismatched data kind for slot {}",
                handle.slot
            ),
        }
    }

    /// Returns the payload for `handle`, mutably.
    ///
    /// # Panics
    ///
    /// Same conditions as [`CellData::get`].
    pub fn get_mut<D>(&mut self, handle: DataHandle<D>) -> &mut D
    where
        D: Backtrackable,
    {
        assert!(
            handle.slot < self.slots.len(),
            "called `CellData::get_mut` with an unregistered data slot: the len is {} but the slot is {}",
            self.slots.len(),
            handle.slot
        );
        match self.slots[handle.slot].as_any_mut().downcast_mut::<D>() {
            Some(payload) => payload,
            None => panic!(
                "called `CellData::get_mut` with mismatched data kind for slot {}",
                handle.slot
            ),
        }
    }
}

impl std::fmt::Debug for CellData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CellData(len: {})", self.slots.len())
    }
}
