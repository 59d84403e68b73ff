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

//! # Precision Contractor
//!
//! Accepts, by emptying, every box whose largest dimension width is at
//! or below a fixed ceiling. Placed at the end of a paver's contractor
//! list, it is the operator under whose index small-enough boxes are
//! recorded as solution leaves; without it, a search over a feasible
//! region would bisect forever (or until a resource limit fires).

use crate::contractor::{ContractionResult, Contractor, EmptyBox, Indicators};
use crate::index::VarIndex;
use crate::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;

/// Accepts boxes whose maximal width is at or below `ceil`.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecisionContractor<T> {
    nb_var: usize,
    ceil: T,
}

impl<T> PrecisionContractor<T>
where
    T: PaverNumeric,
{
    /// Creates a precision contractor for boxes of `nb_var` variables.
    ///
    /// # Panics
    ///
    /// Panics if `ceil` is not a finite positive value.
    pub fn new(nb_var: usize, ceil: T) -> Self {
        assert!(
            ceil.is_finite() && ceil > T::zero(),
            "called `PrecisionContractor::new` with a non-positive or non-finite ceiling"
        );
        Self { nb_var, ceil }
    }

    /// Returns the width ceiling.
    #[inline]
    pub fn ceil(&self) -> T {
        self.ceil
    }
}

impl<T> Contractor<T> for PrecisionContractor<T>
where
    T: PaverNumeric,
{
    fn name(&self) -> &str {
        "PrecisionContractor"
    }

    fn nb_vars(&self) -> usize {
        self.nb_var
    }

    fn can_contract(&self, var: VarIndex) -> bool {
        var.get() < self.nb_var
    }

    fn contract_with(
        &mut self,
        domain: &mut IntervalBox<T>,
        _indicators: &Indicators,
    ) -> ContractionResult {
        if domain.max_width() <= self.ceil {
            domain.set_empty();
            return Err(EmptyBox);
        }
        Ok(())
    }
}
