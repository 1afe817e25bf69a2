use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// A [`ValueSelector`] which implements [phase saving \[1\]](https://www.researchgate.net/profile/Thammanit-Pipatsrisawat/publication/220944633_A_Lightweight_Component_Caching_Scheme_for_Satisfiability_Solvers/links/0f31753c48ffead666000000/A-Lightweight-Component-Caching-Scheme-for-Satisfiability-Solvers.pdf):
/// a variable is assigned the value it had when it was last unassigned, or the default value if
/// it was never assigned.
///
/// # Bibliography
/// \[1\] K. Pipatsrisawat and A. Darwiche, ‘A lightweight component caching scheme for
/// satisfiability solvers’, in Theory and Applications of Satisfiability Testing--SAT 2007: 10th
/// International Conference, Lisbon, Portugal, May 28-31, 2007. Proceedings 10, 2007, pp. 294–299.
#[derive(Debug, Clone)]
pub struct PhaseSaving<Var, Value> {
    saved_values: KeyedVec<Var, Value>,
    default_value: Value,
}

impl PhaseSaving<PropositionalVariable, bool> {
    /// Phase saving over [`PropositionalVariable`]s which assigns `false` to fresh variables.
    pub fn new(variables: &[PropositionalVariable]) -> Self {
        PhaseSaving::with_default_value(variables, false)
    }
}

impl<Var: StorageKey + Copy, Value: Copy> PhaseSaving<Var, Value> {
    pub fn with_default_value(variables: &[Var], default_value: Value) -> Self {
        let mut saved_values = KeyedVec::default();
        if let Some(max_variable) = variables.iter().max_by_key(|variable| variable.index()) {
            saved_values.accommodate(*max_variable, default_value);
        }
        PhaseSaving {
            saved_values,
            default_value,
        }
    }

    fn saved_value(&self, variable: Var) -> Value {
        if variable.index() < self.saved_values.len() {
            self.saved_values[variable]
        } else {
            self.default_value
        }
    }
}

impl ValueSelector<PropositionalVariable> for PhaseSaving<PropositionalVariable, bool> {
    fn select_value(
        &mut self,
        _context: &mut SelectionContext,
        decision_variable: PropositionalVariable,
    ) -> Literal {
        Literal::new(decision_variable, self.saved_value(decision_variable))
    }

    fn on_unassign_literal(&mut self, literal: Literal) {
        let variable = literal.get_propositional_variable();
        self.saved_values.accommodate(variable, self.default_value);
        self.saved_values[variable] = literal.is_positive();
    }
}
