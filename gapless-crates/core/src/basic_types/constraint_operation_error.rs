use thiserror::Error;

#[cfg(doc)]
use crate::Solver;

/// Errors related to adding constraints to the [`Solver`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    /// Adding the constraint left a clause without any literal that can still become true.
    #[error("adding the clause failed because it is infeasible at the root")]
    InfeasibleClause,
    /// A constraint was added while the [`Solver`] was already infeasible at the root.
    #[error("adding the constraint failed because the solver is in an infeasible state")]
    InfeasibleState,
    /// Propagating the new constraint at the root led to a conflict.
    #[error("adding the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator,
}
