//! The constraints which can be added to a [`Model`] or a [`Solver`].
//!
//! Every constraint is posted as a combination of clauses and at-most-one constraints:
//! - [`exactly_one`] is a clause together with an at-most-one over the same literals;
//! - [`boolean_equals`] with terms `x_1, ..., x_k` and right-hand side `y` is exactly one of
//!   `{~y, x_1, ..., x_k}`.
#[cfg(doc)]
use crate::Model;
#[cfg(doc)]
use crate::Solver;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::engine::variables::Literal;
use crate::engine::ConstraintSatisfactionSolver;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// At least one of the literals is true.
    Clause(Vec<Literal>),
    /// At most one of the literals is true.
    AtMostOne(Vec<Literal>),
    /// Exactly one of the literals is true.
    ExactlyOne(Vec<Literal>),
    /// The number of true terms equals 1 if `rhs` is true and 0 otherwise.
    BooleanEquals { terms: Vec<Literal>, rhs: Literal },
}

/// Creates the constraint that at least one of `literals` is true.
pub fn clause(literals: impl IntoIterator<Item = Literal>) -> Constraint {
    Constraint::Clause(literals.into_iter().collect())
}

/// Creates the constraint that at most one of `literals` is true.
pub fn at_most_one(literals: impl IntoIterator<Item = Literal>) -> Constraint {
    Constraint::AtMostOne(literals.into_iter().collect())
}

/// Creates the constraint that exactly one of `literals` is true.
pub fn exactly_one(literals: impl IntoIterator<Item = Literal>) -> Constraint {
    Constraint::ExactlyOne(literals.into_iter().collect())
}

/// Creates the constraint `sum(terms) = rhs`, where true counts as 1 and false as 0.
pub fn boolean_equals(terms: impl IntoIterator<Item = Literal>, rhs: Literal) -> Constraint {
    Constraint::BooleanEquals {
        terms: terms.into_iter().collect(),
        rhs,
    }
}

impl Constraint {
    /// Evaluates the constraint under a complete assignment.
    pub fn is_satisfied_by(&self, solution: &Solution) -> bool {
        let num_true = |literals: &[Literal]| {
            literals
                .iter()
                .filter(|&&literal| solution.get_literal_value(literal))
                .count()
        };

        match self {
            Constraint::Clause(literals) => num_true(literals) >= 1,
            Constraint::AtMostOne(literals) => num_true(literals) <= 1,
            Constraint::ExactlyOne(literals) => num_true(literals) == 1,
            Constraint::BooleanEquals { terms, rhs } => {
                num_true(terms) == usize::from(solution.get_literal_value(*rhs))
            }
        }
    }

    pub(crate) fn post(
        self,
        solver: &mut ConstraintSatisfactionSolver,
    ) -> Result<(), ConstraintOperationError> {
        match self {
            Constraint::Clause(literals) => solver.add_clause(literals),
            Constraint::AtMostOne(literals) => solver.add_at_most_one(literals),
            Constraint::ExactlyOne(literals) => {
                solver.add_clause(literals.clone())?;
                solver.add_at_most_one(literals)
            }
            Constraint::BooleanEquals { terms, rhs } => {
                Constraint::ExactlyOne(std::iter::once(!rhs).chain(terms).collect()).post(solver)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::PropositionalVariable;

    fn literal(index: u32) -> Literal {
        Literal::new(PropositionalVariable::new(index), true)
    }

    #[test]
    fn boolean_equals_counts_true_terms() {
        let solution = Solution::new(vec![true, false, true]);
        let (x, y, z) = (literal(0), literal(1), literal(2));

        assert!(boolean_equals([x, y], z).is_satisfied_by(&solution));
        assert!(!boolean_equals([x, z], z).is_satisfied_by(&solution));
        assert!(boolean_equals([y], y).is_satisfied_by(&solution));
    }

    #[test]
    fn cardinality_constraints_are_evaluated() {
        let solution = Solution::new(vec![true, false, true]);
        let (x, y, z) = (literal(0), literal(1), literal(2));

        assert!(clause([y, z]).is_satisfied_by(&solution));
        assert!(!clause([y]).is_satisfied_by(&solution));
        assert!(!at_most_one([x, y, z]).is_satisfied_by(&solution));
        assert!(exactly_one([x, y]).is_satisfied_by(&solution));
        assert!(!exactly_one([x, z]).is_satisfied_by(&solution));
    }
}
