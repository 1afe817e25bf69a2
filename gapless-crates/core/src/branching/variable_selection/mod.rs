mod vsids;

pub use vsids::Vsids;

use crate::branching::SelectionContext;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// Chooses the variable to branch on.
pub trait VariableSelector<Var> {
    /// Returns an unassigned variable, or `None` if every variable under consideration is
    /// assigned.
    fn select_variable(&mut self, context: &SelectionContext) -> Option<Var>;

    fn on_conflict(&mut self) {}

    fn on_unassign_literal(&mut self, _literal: Literal) {}

    fn on_appearance_in_conflict(&mut self, _variable: PropositionalVariable) {}

    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}
