pub(crate) mod assignments;
pub(crate) mod clause_allocator;
mod constraint_satisfaction_solver;
pub(crate) mod reason;
mod restart_strategy;
mod solver_statistics;
pub mod termination;
pub mod variables;

pub(crate) use constraint_satisfaction_solver::CSPSolverExecutionFlag;
pub(crate) use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use constraint_satisfaction_solver::SatisfactionSolverOptions;
pub use restart_strategy::RestartOptions;
pub use solver_statistics::EngineStatistics;
pub use solver_statistics::LearnedClauseStatistics;
pub use solver_statistics::SolverStatistics;
