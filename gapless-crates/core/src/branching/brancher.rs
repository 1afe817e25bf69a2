use crate::branching::SelectionContext;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// Makes the decisions of the search and is notified of the events it may want to learn from.
pub trait Brancher {
    /// Returns the literal to set true next, or `None` if every variable is assigned.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Literal>;

    /// Called after a conflict has been analysed.
    fn on_conflict(&mut self) {}

    /// Called for every literal which is removed from the trail when backtracking; `literal` is the
    /// literal which was true.
    fn on_unassign_literal(&mut self, _literal: Literal) {}

    /// Called for every variable which takes part in the resolution of a conflict.
    fn on_appearance_in_conflict(&mut self, _variable: PropositionalVariable) {}

    /// Whether a restart would lead to the same decisions being made again; restarts are skipped
    /// if so.
    fn is_restart_pointless(&mut self) -> bool {
        true
    }
}
