mod outputs;
mod portfolio;
mod solver;

pub use outputs::SatisfactionResult;
pub use portfolio::Portfolio;
pub use portfolio::PortfolioResult;
pub use solver::Solver;
pub use solver::SolverOptions;
