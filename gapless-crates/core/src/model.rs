use crate::constraints::Constraint;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;
use crate::variable_names::VariableNames;

/// A description of a satisfaction problem which is independent of any solver.
///
/// A model can be built once and handed to several solvers, for instance to the workers of a
/// [`Portfolio`](crate::Portfolio). Variables are numbered in order of creation, which is the
/// numbering every solver created with [`Solver::from_model`](crate::Solver::from_model) uses.
#[derive(Clone, Debug, Default)]
pub struct Model {
    num_variables: usize,
    variable_names: VariableNames,
    constraints: Vec<Constraint>,
}

impl Model {
    pub fn new_literal(&mut self) -> Literal {
        let variable = PropositionalVariable::create_from_index(self.num_variables);
        self.num_variables += 1;
        Literal::new(variable, true)
    }

    pub fn new_named_literal(&mut self, name: impl Into<String>) -> Literal {
        let literal = self.new_literal();
        self.variable_names
            .add_propositional(literal.get_propositional_variable(), name.into());
        literal
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn variable_names(&self) -> &VariableNames {
        &self.variable_names
    }
}

#[cfg(test)]
mod tests {
    use super::Model;
    use crate::constraints;

    #[test]
    fn named_literals_can_be_looked_up() {
        let mut model = Model::default();
        let _ = model.new_literal();
        let x = model.new_named_literal("x");

        let variable = x.get_propositional_variable();
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.variable_names().get_propositional_name(variable), Some("x"));
        assert_eq!(model.variable_names().get_propositional_variable("x"), Some(variable));
    }

    #[test]
    fn constraints_are_kept_in_order() {
        let mut model = Model::default();
        let x = model.new_literal();
        let y = model.new_literal();

        model.add_constraint(constraints::clause([x, y]));
        model.add_constraint(constraints::at_most_one([x, y]));

        assert_eq!(model.constraints(), &[
            constraints::clause([x, y]),
            constraints::at_most_one([x, y])
        ]);
    }
}
