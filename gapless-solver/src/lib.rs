//! # Gapless
//! Schedules a single-table round robin, in which every pair of participants meets exactly once
//! and one match is played per round, such that the longest stretch of rounds any participant
//! sits out is as short as possible.
//!
//! For a bound `T`, [`ScheduleEncoding`] states the problem "no participant sits out more than
//! `T` consecutive rounds" as a boolean [`Model`](gapless_core::Model).
//! [`find_optimal_schedule`] tries `T = 0, 1, ...` and stops at the first bound the
//! [`SatisfiabilitySolver`] finds a schedule for.
//!
//! ```rust
//! # use gapless_core::SolverOptions;
//! # use gapless_solver::find_optimal_schedule;
//! # use gapless_solver::PortfolioSolver;
//! # use gapless_solver::SearchOptions;
//! # use gapless_solver::SearchOutcome;
//! let mut solver = PortfolioSolver::new(SolverOptions::default());
//!
//! let outcome = find_optimal_schedule(3, &SearchOptions::default(), &mut solver)
//!     .expect("three participants are a valid tournament");
//!
//! let SearchOutcome::Optimal(optimal) = outcome else {
//!     panic!("no time budget was set");
//! };
//! // Every participant sits out exactly one of the three rounds.
//! assert_eq!(optimal.bound, 1);
//! ```
mod encoding;
mod result;
mod schedule;
mod search;
mod solver;
mod tournament;

pub use encoding::ScheduleEncoding;
pub use result::ScheduleViolation;
pub use result::SchedulingError;
pub use result::SchedulingResult;
pub use schedule::Schedule;
pub use schedule::ScheduledMatch;
pub use search::find_optimal_schedule;
pub use search::OptimalSchedule;
pub use search::SearchOptions;
pub use search::SearchOutcome;
pub use solver::PortfolioSolver;
pub use solver::SatisfiabilitySolver;
pub use tournament::Pairing;
pub use tournament::Tournament;
