use std::num::NonZeroUsize;
use std::time::Duration;

use gapless_core::SatisfactionResult;
use log::debug;
use log::info;
use log::warn;

use crate::encoding::ScheduleEncoding;
use crate::result::SchedulingError;
use crate::result::SchedulingResult;
use crate::schedule::Schedule;
use crate::solver::SatisfiabilitySolver;
use crate::tournament::Tournament;

/// The number of workers when none is given.
const DEFAULT_NUM_WORKERS: usize = 8;

/// Limits on every single solver call made by [`find_optimal_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// The time each bound may take; `None` lets every attempt run to completion.
    pub time_budget: Option<Duration>,
    /// Passed on to the solver as is.
    pub num_workers: NonZeroUsize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            time_budget: None,
            num_workers: NonZeroUsize::new(DEFAULT_NUM_WORKERS)
                .unwrap_or_else(|| unreachable!("the default is non-zero")),
        }
    }
}

/// A schedule together with the smallest bound any schedule achieves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalSchedule {
    pub bound: usize,
    pub schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every smaller bound was proven infeasible and `schedule` achieves `bound`.
    Optimal(OptimalSchedule),
    /// Every bound below `bound` was proven infeasible, but the solver gave no answer for
    /// `bound` itself. This says nothing about whether a schedule with that bound exists.
    Inconclusive { bound: usize },
}

/// Finds a schedule of a round robin between `num_participants` participants in which the
/// longest stretch of rounds any participant sits out is as short as possible.
///
/// The bounds `0, 1, ...` are tried in order with a fresh model each, and the first satisfiable
/// one is optimal; a schedule with bound `T` also satisfies every larger bound.
pub fn find_optimal_schedule(
    num_participants: usize,
    options: &SearchOptions,
    solver: &mut impl SatisfiabilitySolver,
) -> SchedulingResult<SearchOutcome> {
    let tournament = Tournament::new(num_participants)?;
    let num_rounds = tournament.num_rounds();

    for bound in 0..num_rounds {
        let encoding = ScheduleEncoding::new(&tournament, bound)?;
        debug!("Trying bound {bound} for {num_participants} participants");

        match solver.solve(encoding.model(), options.time_budget, options.num_workers) {
            SatisfactionResult::Satisfiable(solution) => {
                let schedule = encoding.decode(&solution);
                schedule
                    .validate(&tournament, bound)
                    .map_err(|violation| SchedulingError::InvalidSchedule { bound, violation })?;

                info!("Optimal maximum idle gap for {num_participants} participants: {bound}");
                return Ok(SearchOutcome::Optimal(OptimalSchedule { bound, schedule }));
            }
            SatisfactionResult::Unsatisfiable => {
                debug!("No schedule has a maximum idle gap of {bound}");
            }
            SatisfactionResult::Unknown => {
                warn!("The solver could not decide bound {bound}");
                return Ok(SearchOutcome::Inconclusive { bound });
            }
        }
    }

    Err(SchedulingError::ExhaustedSearchSpace { num_rounds })
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::time::Duration;

    use gapless_core::branching::branchers::InputOrder;
    use gapless_core::termination::Indefinite;
    use gapless_core::Model;
    use gapless_core::SatisfactionResult;
    use gapless_core::Solver;
    use gapless_core::SolverOptions;

    use super::find_optimal_schedule;
    use super::SearchOptions;
    use super::SearchOutcome;
    use crate::PortfolioSolver;
    use crate::SatisfiabilitySolver;
    use crate::ScheduleViolation;
    use crate::SchedulingError;

    /// Answers every model with a fixed result and counts the calls.
    #[derive(Debug)]
    struct FixedAnswer {
        answer: SatisfactionResult,
        num_calls: usize,
    }

    impl FixedAnswer {
        fn new(answer: SatisfactionResult) -> Self {
            FixedAnswer {
                answer,
                num_calls: 0,
            }
        }
    }

    impl SatisfiabilitySolver for FixedAnswer {
        fn solve(
            &mut self,
            _: &Model,
            _: Option<Duration>,
            _: NonZeroUsize,
        ) -> SatisfactionResult {
            self.num_calls += 1;
            self.answer.clone()
        }
    }

    /// Proves the first `num_infeasible` models unsatisfiable and gives up on the rest.
    #[derive(Debug)]
    struct GivesUpAfter {
        num_infeasible: usize,
        num_calls: usize,
    }

    impl SatisfiabilitySolver for GivesUpAfter {
        fn solve(
            &mut self,
            _: &Model,
            _: Option<Duration>,
            _: NonZeroUsize,
        ) -> SatisfactionResult {
            self.num_calls += 1;
            if self.num_calls <= self.num_infeasible {
                SatisfactionResult::Unsatisfiable
            } else {
                SatisfactionResult::Unknown
            }
        }
    }

    /// Returns the all-false assignment, which no schedule corresponds to.
    #[derive(Debug)]
    struct IgnoresConstraints;

    impl SatisfiabilitySolver for IgnoresConstraints {
        fn solve(
            &mut self,
            model: &Model,
            _: Option<Duration>,
            _: NonZeroUsize,
        ) -> SatisfactionResult {
            let mut solver = Solver::default();
            for _ in 0..model.num_variables() {
                let _ = solver.new_literal();
            }
            solver.satisfy(&mut InputOrder::default(), &mut Indefinite)
        }
    }

    fn single_worker() -> SearchOptions {
        SearchOptions {
            num_workers: NonZeroUsize::new(1).expect("non-zero"),
            ..Default::default()
        }
    }

    #[test]
    fn invalid_participant_count_never_reaches_the_solver() {
        for num_participants in [0, 1] {
            let mut solver = FixedAnswer::new(SatisfactionResult::Unknown);

            let result = find_optimal_schedule(num_participants, &single_worker(), &mut solver);

            assert_eq!(
                result,
                Err(SchedulingError::InvalidParticipantCount(num_participants))
            );
            assert_eq!(solver.num_calls, 0);
        }
    }

    #[test]
    fn unknown_answer_is_inconclusive() {
        for num_participants in 2..=6 {
            let mut solver = FixedAnswer::new(SatisfactionResult::Unknown);

            let result = find_optimal_schedule(num_participants, &single_worker(), &mut solver);

            assert_eq!(result, Ok(SearchOutcome::Inconclusive { bound: 0 }));
            assert_eq!(solver.num_calls, 1);
        }
    }

    #[test]
    fn unknown_after_infeasible_bounds_reports_the_undecided_bound() {
        for num_infeasible in 1..4 {
            let mut solver = GivesUpAfter {
                num_infeasible,
                num_calls: 0,
            };

            let result = find_optimal_schedule(5, &single_worker(), &mut solver);

            assert_eq!(
                result,
                Ok(SearchOutcome::Inconclusive {
                    bound: num_infeasible
                })
            );
            assert_eq!(solver.num_calls, num_infeasible + 1);
        }
    }

    #[test]
    fn proven_infeasibility_for_every_bound_is_an_internal_error() {
        let mut solver = FixedAnswer::new(SatisfactionResult::Unsatisfiable);

        let result = find_optimal_schedule(4, &single_worker(), &mut solver);

        assert_eq!(
            result,
            Err(SchedulingError::ExhaustedSearchSpace { num_rounds: 6 })
        );
        assert_eq!(solver.num_calls, 6);
    }

    #[test]
    fn solution_violating_the_encoding_is_rejected() {
        let result = find_optimal_schedule(3, &single_worker(), &mut IgnoresConstraints);

        assert_eq!(
            result,
            Err(SchedulingError::InvalidSchedule {
                bound: 0,
                violation: ScheduleViolation::WrongNumberOfRounds {
                    expected: 3,
                    actual: 0
                },
            })
        );
    }

    #[test]
    fn two_participants_meet_in_the_only_round() {
        let mut solver = PortfolioSolver::new(SolverOptions::default());

        let Ok(SearchOutcome::Optimal(optimal)) =
            find_optimal_schedule(2, &single_worker(), &mut solver)
        else {
            panic!("two participants always have a schedule");
        };

        assert_eq!(optimal.bound, 0);
        assert_eq!(optimal.schedule.len(), 1);
        let only_match = optimal.schedule.matches()[0];
        assert_eq!(
            (only_match.round, only_match.first, only_match.second),
            (0, 0, 1)
        );
    }
}
