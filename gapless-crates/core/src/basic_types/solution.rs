use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::PropositionalVariable;

/// A complete assignment of truth values to every variable declared in a solver or model.
///
/// Solutions are detached from the solver which produced them, so they can be moved across
/// threads and outlive the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    values: Vec<bool>,
}

impl Solution {
    pub(crate) fn new(values: Vec<bool>) -> Solution {
        Solution { values }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn get_propositional_variable_value(&self, variable: PropositionalVariable) -> bool {
        self.values[variable.index()]
    }

    /// Returns whether `literal` is true under this solution.
    pub fn get_literal_value(&self, literal: Literal) -> bool {
        let value = self.get_propositional_variable_value(literal.get_propositional_variable());
        value == literal.is_positive()
    }

    /// The variables which are assigned true, in increasing index order.
    pub fn true_variables(&self) -> impl Iterator<Item = PropositionalVariable> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &value)| value)
            .map(|(index, _)| PropositionalVariable::new(index as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::Solution;
    use crate::engine::variables::Literal;
    use crate::engine::variables::PropositionalVariable;

    #[test]
    fn literal_value_respects_polarity() {
        let solution = Solution::new(vec![true, false]);
        let x = PropositionalVariable::new(0);
        let y = PropositionalVariable::new(1);

        assert!(solution.get_literal_value(Literal::new(x, true)));
        assert!(!solution.get_literal_value(Literal::new(x, false)));
        assert!(solution.get_literal_value(Literal::new(y, false)));
        assert_eq!(solution.true_variables().collect::<Vec<_>>(), vec![x]);
    }

    #[test]
    fn variable_values_are_read_by_index() {
        let solution = Solution::new(vec![false, true, false]);

        assert_eq!(solution.num_variables(), 3);
        assert!(!solution.get_propositional_variable_value(PropositionalVariable::new(0)));
        assert!(solution.get_propositional_variable_value(PropositionalVariable::new(1)));
        assert!(!solution.get_propositional_variable_value(PropositionalVariable::new(2)));
    }
}
