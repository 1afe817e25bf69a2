mod phase_saving;

pub use phase_saving::PhaseSaving;

use crate::branching::SelectionContext;
use crate::engine::variables::Literal;

/// Chooses the polarity of the decision on a selected variable.
pub trait ValueSelector<Var> {
    fn select_value(&mut self, context: &mut SelectionContext, decision_variable: Var) -> Literal;

    fn on_unassign_literal(&mut self, _literal: Literal) {}

    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}
