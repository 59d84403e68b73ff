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

//! # Contractor Protocol
//!
//! A contractor is the abstract unit of work of the engine: given a
//! mutable box, it removes points that cannot satisfy its constraint,
//! either narrowing the box in place or proving it entirely infeasible.
//! Narrowing must be conservative (a contractor never discards a
//! feasible point) and deterministic; the engine never retries a call.
//!
//! The `EmptyBox` condition is *expected* control flow, not a bug: it is
//! how a contractor reports that the current search region can be pruned.
//! Callers at the cell/paver boundary recover from it locally.
//!
//! `Indicators` let a caller pass optional work-saving hints: `impact`
//! names the single variable that changed since the contractor last ran
//! (or all of them), and `scope` names the variable the caller actually
//! wants refined. Both are pure optimizations; a contractor is free to
//! ignore them.

use crate::index::VarIndex;
use crate::num::PaverNumeric;
use cobble_core::math::boxes::IntervalBox;
use thiserror::Error;

/// Selects either the whole variable set or one specific variable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Target {
    /// All variables are concerned.
    #[default]
    AllVars,
    /// Exactly one variable is concerned.
    OneVar(VarIndex),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::AllVars => write!(f, "all"),
            Target::OneVar(v) => write!(f, "{}", v),
        }
    }
}

/// Optional hints passed along a contraction call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Indicators {
    /// The variable whose domain changed since the last call to this
    /// contractor, or `AllVars` when unknown.
    pub impact: Target,
    /// The variable the caller wants refined, or `AllVars` for a full
    /// contraction.
    pub scope: Target,
}

impl Indicators {
    /// Creates indicators with the given impact and scope.
    #[inline]
    pub fn new(impact: Target, scope: Target) -> Self {
        Self { impact, scope }
    }
}

/// The expected infeasibility condition: the contracted region contains
/// no feasible point and the search node can be pruned.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("empty box: the contracted region contains no feasible point")]
pub struct EmptyBox;

/// Result of a contraction call.
pub type ContractionResult = Result<(), EmptyBox>;

/// The abstract contraction operator.
///
/// A contractor is constructed once per constraint and reused across all
/// search nodes; it carries no per-node state (per-node bookkeeping lives
/// in backtrackable cell data, owned by the search layer).
pub trait Contractor<T>
where
    T: PaverNumeric,
{
    /// A human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// The number of variables of the boxes this contractor operates on.
    fn nb_vars(&self) -> usize;

    /// Declares whether this contractor can ever narrow `var`.
    ///
    /// This must be a pure function of the contractor's definition, not
    /// of any box state; it is consulted exactly once, when the
    /// hypergraph is built.
    fn can_contract(&self, var: VarIndex) -> bool;

    /// Narrows `domain` in place, or returns `EmptyBox`.
    ///
    /// On `EmptyBox` the implementation must leave the box canonically
    /// empty (`IntervalBox::set_empty`).
    #[inline]
    fn contract(&mut self, domain: &mut IntervalBox<T>) -> ContractionResult {
        self.contract_with(domain, &Indicators::default())
    }

    /// Narrows `domain` in place, consulting the given indicators.
    fn contract_with(
        &mut self,
        domain: &mut IntervalBox<T>,
        indicators: &Indicators,
    ) -> ContractionResult;
}

impl<T> std::fmt::Debug for dyn Contractor<T> + '_
where
    T: PaverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Contractor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clamps every variable into a fixed band.
    struct BandContractor {
        band: IntervalBox<f64>,
    }

    impl Contractor<f64> for BandContractor {
        fn name(&self) -> &str {
            "BandContractor"
        }

        fn nb_vars(&self) -> usize {
            self.band.dim()
        }

        fn can_contract(&self, var: VarIndex) -> bool {
            var.get() < self.band.dim()
        }

        fn contract_with(
            &mut self,
            domain: &mut IntervalBox<f64>,
            _indicators: &Indicators,
        ) -> ContractionResult {
            domain.intersect_with(&self.band);
            if domain.is_empty() {
                return Err(EmptyBox);
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_contract_delegates_to_contract_with() {
        let mut ctc = BandContractor {
            band: IntervalBox::from_bounds(&[(0.0, 1.0), (0.0, 1.0)]),
        };
        let mut domain = IntervalBox::from_bounds(&[(-1.0, 0.5), (0.25, 2.0)]);
        ctc.contract(&mut domain).unwrap();
        assert_eq!(domain[0].lb(), 0.0);
        assert_eq!(domain[0].ub(), 0.5);
        assert_eq!(domain[1].lb(), 0.25);
        assert_eq!(domain[1].ub(), 1.0);
    }

    #[test]
    fn test_empty_box_is_signalled_and_box_is_canonical() {
        let mut ctc = BandContractor {
            band: IntervalBox::from_bounds(&[(0.0, 1.0), (0.0, 1.0)]),
        };
        let mut domain = IntervalBox::from_bounds(&[(2.0, 3.0), (0.0, 1.0)]);
        assert_eq!(ctc.contract(&mut domain), Err(EmptyBox));
        assert!(domain.is_empty());
        assert!(domain[1].is_empty());
    }

    #[test]
    fn test_indicators_default_is_all_all() {
        let ind = Indicators::default();
        assert_eq!(ind.impact, Target::AllVars);
        assert_eq!(ind.scope, Target::AllVars);
    }

    #[test]
    fn test_target_display() {
        assert_eq!(format!("{}", Target::AllVars), "all");
        assert_eq!(format!("{}", Target::OneVar(VarIndex::new(2))), "VarIndex(2)");
    }
}
