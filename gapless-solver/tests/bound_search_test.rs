#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use gapless_core::SatisfactionResult;
use gapless_core::SolverOptions;
use gapless_solver::find_optimal_schedule;
use gapless_solver::OptimalSchedule;
use gapless_solver::Pairing;
use gapless_solver::PortfolioSolver;
use gapless_solver::SatisfiabilitySolver;
use gapless_solver::ScheduleEncoding;
use gapless_solver::SearchOptions;
use gapless_solver::SearchOutcome;
use gapless_solver::Tournament;

fn search_options() -> SearchOptions {
    SearchOptions {
        time_budget: None,
        num_workers: NonZeroUsize::new(2).expect("non-zero"),
    }
}

fn optimal_schedule(num_participants: usize) -> OptimalSchedule {
    let mut solver = PortfolioSolver::new(SolverOptions::default());
    match find_optimal_schedule(num_participants, &search_options(), &mut solver) {
        Ok(SearchOutcome::Optimal(optimal)) => optimal,
        other => panic!("expected an optimal schedule for {num_participants}, got {other:?}"),
    }
}

#[test]
fn two_participants_need_a_single_round() {
    let optimal = optimal_schedule(2);

    assert_eq!(optimal.bound, 0);
    let rounds = optimal
        .schedule
        .matches()
        .iter()
        .map(|scheduled| (scheduled.round, scheduled.first, scheduled.second))
        .collect::<Vec<_>>();
    assert_eq!(rounds, vec![(0, 0, 1)]);
}

#[test]
fn three_participants_sit_out_one_round_at_a_time() {
    assert_eq!(optimal_schedule(3).bound, 1);
}

#[test]
fn four_participants_sit_out_at_most_two_rounds() {
    // Two consecutive rounds hold only four places, so a bound of one would need every pair of
    // consecutive rounds to be disjoint, which forces round `r + 2` to repeat round `r`.
    assert_eq!(optimal_schedule(4).bound, 2);
}

#[test]
fn schedules_are_round_robins() {
    for num_participants in 2..=5 {
        let num_rounds = num_participants * (num_participants - 1) / 2;
        let optimal = optimal_schedule(num_participants);
        let matches = optimal.schedule.matches();

        let rounds = matches
            .iter()
            .map(|scheduled| scheduled.round)
            .collect::<BTreeSet<_>>();
        assert_eq!(rounds, (0..num_rounds).collect::<BTreeSet<_>>());

        let pairings = matches
            .iter()
            .map(|scheduled| {
                Pairing::new(scheduled.first, scheduled.second).expect("distinct participants")
            })
            .collect::<BTreeSet<_>>();
        assert_eq!(pairings.len(), num_rounds);
        assert!(pairings
            .iter()
            .all(|pairing| pairing.second < num_participants));
    }
}

#[test]
fn every_window_contains_every_participant() {
    for num_participants in 2..=5 {
        let optimal = optimal_schedule(num_participants);
        let matches = optimal.schedule.matches();

        for window in matches.windows(optimal.bound + 1) {
            for participant in 0..num_participants {
                assert!(
                    window
                        .iter()
                        .any(|scheduled| scheduled.first == participant
                            || scheduled.second == participant),
                    "participant {participant} idles through {window:?}"
                );
            }
        }
        assert_eq!(
            optimal.schedule.max_idle_gap(num_participants),
            optimal.bound
        );
    }
}

#[test]
fn one_below_the_optimal_bound_is_infeasible() {
    for num_participants in 3..=5 {
        let optimal = optimal_schedule(num_participants);
        assert!(optimal.bound > 0);

        let tournament = Tournament::new(num_participants).expect("valid participant count");
        let encoding =
            ScheduleEncoding::new(&tournament, optimal.bound - 1).expect("bound below rounds");
        let mut solver = PortfolioSolver::new(SolverOptions::default());

        assert_eq!(
            solver.solve(encoding.model(), None, NonZeroUsize::MIN),
            SatisfactionResult::Unsatisfiable
        );
    }
}

#[test]
fn optimal_schedule_satisfies_every_larger_bound() {
    let tournament = Tournament::new(5).expect("valid participant count");
    let optimal = optimal_schedule(5);

    for bound in optimal.bound..tournament.num_rounds() {
        assert_eq!(optimal.schedule.validate(&tournament, bound), Ok(()));
    }
}

#[test]
fn different_seeds_reach_the_same_bound() {
    let bounds = [1, 7, 1234]
        .into_iter()
        .map(|random_seed| {
            let mut solver = PortfolioSolver::new(SolverOptions {
                random_seed,
                ..Default::default()
            });
            match find_optimal_schedule(5, &search_options(), &mut solver) {
                Ok(SearchOutcome::Optimal(optimal)) => optimal.bound,
                other => panic!("expected an optimal schedule, got {other:?}"),
            }
        })
        .collect::<BTreeSet<_>>();

    assert_eq!(bounds.len(), 1);
}
