//! # Gapless core
//! A conflict-driven clause learning solver over propositional variables, with native support
//! for at-most-one constraints.
//!
//! Problems are either stated directly on a [`Solver`], or first collected in a [`Model`] which
//! can then be handed to several solvers; a [`Portfolio`] runs differently seeded solvers on
//! one model in parallel and reports the first conclusive answer.
//!
//! # Formulating a problem
//! ```rust
//! # use gapless_core::constraints;
//! # use gapless_core::termination::Indefinite;
//! # use gapless_core::Model;
//! # use gapless_core::SatisfactionResult;
//! # use gapless_core::Solver;
//! # use gapless_core::SolverOptions;
//! let mut model = Model::default();
//! let a = model.new_named_literal("a");
//! let b = model.new_named_literal("b");
//! let c = model.new_named_literal("c");
//!
//! // `c` holds exactly when one of `a` and `b` holds.
//! model.add_constraint(constraints::boolean_equals([a, b], c));
//! model.add_constraint(constraints::clause([c]));
//! model.add_constraint(constraints::clause([!a]));
//!
//! let mut solver = Solver::from_model(&model, SolverOptions::default());
//! let mut brancher = solver.default_brancher();
//! match solver.satisfy(&mut brancher, &mut Indefinite) {
//!     SatisfactionResult::Satisfiable(solution) => {
//!         assert!(solution.get_literal_value(b));
//!     }
//!     SatisfactionResult::Unsatisfiable | SatisfactionResult::Unknown => {
//!         panic!("the model has a solution")
//!     }
//! }
//! ```
//!
//! # Limiting the search
//! Every call to [`Solver::satisfy`] takes a [`TerminationCondition`]; when it triggers, the
//! result is [`SatisfactionResult::Unknown`].
//!
//! [`TerminationCondition`]: termination::TerminationCondition
pub mod asserts;
pub(crate) mod basic_types;
pub mod branching;
pub mod constraints;
pub mod containers;
pub(crate) mod engine;
mod model;
pub(crate) mod propagators;
pub mod statistics;
mod variable_names;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
mod api;

pub use api::*;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::CumulativeMovingAverage;
pub use crate::basic_types::SequenceGeneratorType;
pub use crate::basic_types::Solution;
pub use crate::engine::termination;
pub use crate::engine::variables;
pub use crate::engine::EngineStatistics;
pub use crate::engine::LearnedClauseStatistics;
pub use crate::engine::RestartOptions;
pub use crate::engine::SolverStatistics;
pub use crate::model::Model;
pub use crate::variable_names::VariableNames;
