use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// Assigns the unassigned variable with the lowest index to false.
///
/// The decisions only depend on the assignment, which makes runs reproducible.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputOrder {
    /// Every variable below this index was assigned when it was last inspected.
    next_candidate: usize,
}

impl Brancher for InputOrder {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Literal> {
        while self.next_candidate < context.num_propositional_variables() {
            let variable = PropositionalVariable::new(self.next_candidate as u32);
            if !context.is_propositional_variable_fixed(variable) {
                return Some(Literal::new(variable, false));
            }
            self.next_candidate += 1;
        }
        None
    }

    fn on_unassign_literal(&mut self, literal: Literal) {
        let index = literal.get_propositional_variable().index();
        self.next_candidate = self.next_candidate.min(index);
    }
}
