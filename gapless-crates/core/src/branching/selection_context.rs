use rand::rngs::SmallRng;

#[cfg(doc)]
use crate::branching::Brancher;
use crate::engine::assignments::Assignments;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// The view of the solver state given to a [`Brancher`] when it has to make a decision.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments, random_generator: &'a mut SmallRng) -> Self {
        SelectionContext {
            assignments,
            random_generator,
        }
    }

    pub fn random(&mut self) -> &mut SmallRng {
        self.random_generator
    }

    pub fn is_propositional_variable_fixed(&self, variable: PropositionalVariable) -> bool {
        !self.assignments.is_variable_unassigned(variable)
    }

    pub fn is_literal_fixed(&self, literal: Literal) -> bool {
        !self.assignments.is_literal_unassigned(literal)
    }

    pub fn num_propositional_variables(&self) -> usize {
        self.assignments.num_propositional_variables()
    }

    pub fn get_propositional_variables(&self) -> impl Iterator<Item = PropositionalVariable> + '_ {
        self.assignments.get_propositional_variables()
    }
}
