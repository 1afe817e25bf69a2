use std::marker::PhantomData;

use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// A [`Brancher`] which picks a variable with its [`VariableSelector`] and then its value with
/// its [`ValueSelector`], independently of each other.
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    variable_selector: VariableSelect,
    value_selector: ValueSelect,
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl<VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<PropositionalVariable, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<PropositionalVariable>,
    ValueSelect: ValueSelector<PropositionalVariable>,
{
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Literal> {
        let variable = self.variable_selector.select_variable(context)?;
        Some(self.value_selector.select_value(context, variable))
    }

    fn on_conflict(&mut self) {
        self.variable_selector.on_conflict()
    }

    fn on_unassign_literal(&mut self, literal: Literal) {
        self.variable_selector.on_unassign_literal(literal);
        self.value_selector.on_unassign_literal(literal);
    }

    fn on_appearance_in_conflict(&mut self, variable: PropositionalVariable) {
        self.variable_selector.on_appearance_in_conflict(variable)
    }

    fn is_restart_pointless(&mut self) -> bool {
        self.variable_selector.is_restart_pointless() && self.value_selector.is_restart_pointless()
    }
}
