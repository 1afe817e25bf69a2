use log::warn;

use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::containers::KeyValueHeap;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;
use crate::gapless_assert_eq_simple;

/// A [`VariableSelector`] which implements [VSIDS \[1\]](https://dl.acm.org/doi/pdf/10.1145/378239.379017):
/// the variable which appeared most often in recent conflicts is branched on first.
///
/// # Bibliography
/// \[1\] M. W. Moskewicz, C. F. Madigan, Y. Zhao, L. Zhang, and S. Malik, ‘Chaff: Engineering an
/// efficient SAT solver’, in Proceedings of the 38th annual Design Automation Conference, 2001, pp.
/// 530–535.
#[derive(Debug, Clone)]
pub struct Vsids<Var> {
    heap: KeyValueHeap<Var, f64>,
    /// Added to the activity of a variable which appears in a conflict; grows after every
    /// conflict so that recent conflicts weigh more.
    increment: f64,
    /// Once an activity would exceed this value, all activities and the increment are scaled
    /// down by it.
    max_threshold: f64,
    /// After a conflict the increment is multiplied by `1 / decay_factor`.
    decay_factor: f64,
}

const DEFAULT_VSIDS_INCREMENT: f64 = 1.0;
const DEFAULT_VSIDS_MAX_THRESHOLD: f64 = 1e100;
const DEFAULT_VSIDS_DECAY_FACTOR: f64 = 0.95;
const DEFAULT_VSIDS_VALUE: f64 = 0.0;

impl<Var: StorageKey + Copy> Vsids<Var> {
    /// Creates the selector over `variables`, all starting with activity zero.
    pub fn new(variables: &[Var]) -> Self {
        Vsids::with_initial_values(variables, &vec![DEFAULT_VSIDS_VALUE; variables.len()])
    }

    /// Creates the selector with the given starting activities; `initial_values[i]` belongs to
    /// `variables[i]`. Small random starting activities let independent searches explore in
    /// different orders.
    pub fn with_initial_values(variables: &[Var], initial_values: &[f64]) -> Self {
        gapless_assert_eq_simple!(variables.len(), initial_values.len());
        if variables.is_empty() {
            warn!("The VSIDS variable selector was not provided with any variables");
        }

        let num_keys = variables
            .iter()
            .map(|variable| variable.index() + 1)
            .max()
            .unwrap_or(0);
        let mut values = vec![DEFAULT_VSIDS_VALUE; num_keys];
        for (variable, &value) in variables.iter().zip(initial_values) {
            values[variable.index()] = value;
        }

        let mut heap = KeyValueHeap::default();
        for (index, value) in values.into_iter().enumerate() {
            heap.grow(Var::create_from_index(index), value);
        }

        Vsids {
            heap,
            increment: DEFAULT_VSIDS_INCREMENT,
            max_threshold: DEFAULT_VSIDS_MAX_THRESHOLD,
            decay_factor: DEFAULT_VSIDS_DECAY_FACTOR,
        }
    }

    pub fn get_activity(&self, variable: Var) -> f64 {
        self.heap.get_value(variable)
    }

    fn bump_activity(&mut self, variable: Var) {
        if self.heap.get_value(variable) + self.increment >= self.max_threshold {
            self.heap.divide_values(self.max_threshold);
            self.increment /= self.max_threshold;
        }
        self.heap.increment(variable, self.increment);
    }

    fn decay_activities(&mut self) {
        self.increment *= 1.0 / self.decay_factor;
    }
}

impl VariableSelector<PropositionalVariable> for Vsids<PropositionalVariable> {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<PropositionalVariable> {
        // Assigned variables are only removed from the heap lazily, here.
        while let Some(candidate) = self.heap.peek_max() {
            if !context.is_propositional_variable_fixed(candidate) {
                return Some(candidate);
            }
            let _ = self.heap.pop_max();
        }
        None
    }

    fn on_conflict(&mut self) {
        self.decay_activities()
    }

    fn on_unassign_literal(&mut self, literal: Literal) {
        let variable = literal.get_propositional_variable();
        if variable.index() < self.heap.len() {
            self.heap.restore_key(variable);
        }
    }

    fn on_appearance_in_conflict(&mut self, variable: PropositionalVariable) {
        if variable.index() < self.heap.len() {
            self.bump_activity(variable);
        }
    }

    fn is_restart_pointless(&mut self) -> bool {
        false
    }
}
