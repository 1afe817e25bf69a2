use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// A solution was found.
    Satisfiable(Solution),
    /// There is no solution to the satisfaction problem.
    Unsatisfiable,
    /// It is not known whether a solution exists, most likely because a [`TerminationCondition`]
    /// triggered.
    Unknown,
}

impl SatisfactionResult {
    /// Whether the result settles the question of satisfiability.
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, SatisfactionResult::Unknown)
    }
}
