use std::num::NonZeroUsize;
use std::thread;

use log::debug;

use super::outputs::SatisfactionResult;
use super::solver::Solver;
use super::solver::SolverOptions;
use crate::engine::SolverStatistics;
use crate::model::Model;
use crate::termination::Combinator;
use crate::termination::Interrupt;
use crate::termination::TerminationCondition;

/// Solves a [`Model`] with several independently seeded [`Solver`]s at the same time.
///
/// Worker `i` uses the random seed of the options plus `i`. The first worker to reach a
/// conclusion interrupts the others; its answer is returned.
#[derive(Debug, Clone, Copy)]
pub struct Portfolio {
    num_workers: NonZeroUsize,
    options: SolverOptions,
}

/// The answer of a [`Portfolio`] together with the statistics of the worker that produced it.
#[derive(Debug, Clone)]
pub struct PortfolioResult {
    pub result: SatisfactionResult,
    pub statistics: SolverStatistics,
    /// The worker that reached the conclusion; `None` if no worker did.
    pub winner: Option<usize>,
}

impl Portfolio {
    pub fn new(num_workers: NonZeroUsize, options: SolverOptions) -> Self {
        Portfolio {
            num_workers,
            options,
        }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers.get()
    }

    /// Solves `model` until one worker reaches a conclusion or `termination` triggers in every
    /// worker. Each worker polls its own clone of `termination`.
    pub fn solve<T>(&self, model: &Model, termination: T) -> PortfolioResult
    where
        T: TerminationCondition + Clone + Send,
    {
        if self.num_workers.get() == 1 {
            let mut termination = termination;
            return run_worker(model, self.worker_options(0), &mut termination, 0);
        }

        let interrupt = Interrupt::new();

        let outcomes = thread::scope(|scope| {
            let handles = (0..self.num_workers.get())
                .map(|worker| {
                    let options = self.worker_options(worker);
                    let interrupt = interrupt.clone();
                    let mut termination = Combinator::new(interrupt.clone(), termination.clone());

                    scope.spawn(move || {
                        let outcome = run_worker(model, options, &mut termination, worker);
                        if outcome.result.is_conclusive() {
                            interrupt.trigger();
                        }
                        outcome
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect::<Vec<_>>()
        });

        pick_outcome(outcomes)
    }

    fn worker_options(&self, worker: usize) -> SolverOptions {
        SolverOptions {
            random_seed: self.options.random_seed.wrapping_add(worker as u64),
            ..self.options
        }
    }
}

fn run_worker(
    model: &Model,
    options: SolverOptions,
    termination: &mut impl TerminationCondition,
    worker: usize,
) -> PortfolioResult {
    let mut solver = Solver::from_model(model, options);
    let mut brancher = solver.default_brancher();
    let result = solver.satisfy(&mut brancher, termination);
    debug!("Worker {worker} finished with seed {}", options.random_seed);

    PortfolioResult {
        winner: result.is_conclusive().then_some(worker),
        result,
        statistics: solver.statistics(),
    }
}

/// Prefers a conclusive outcome; among several, the one of the lowest worker. Without any
/// conclusive outcome, the statistics of the first worker are reported.
fn pick_outcome(outcomes: Vec<PortfolioResult>) -> PortfolioResult {
    let mut outcomes = outcomes.into_iter();
    let first = outcomes
        .next()
        .unwrap_or_else(|| unreachable!("a portfolio has at least one worker"));

    if first.result.is_conclusive() {
        return first;
    }
    outcomes
        .find(|outcome| outcome.result.is_conclusive())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::Portfolio;
    use crate::constraints;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;
    use crate::Model;
    use crate::SatisfactionResult;
    use crate::SolverOptions;

    fn pigeonhole(pigeons: usize, holes: usize) -> Model {
        let mut model = Model::default();
        let placements = (0..pigeons)
            .map(|_| (0..holes).map(|_| model.new_literal()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        for pigeon in &placements {
            model.add_constraint(constraints::clause(pigeon.iter().copied()));
        }
        for hole in 0..holes {
            model.add_constraint(constraints::at_most_one(
                placements.iter().map(|pigeon| pigeon[hole]),
            ));
        }
        model
    }

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[test]
    fn all_workers_agree_on_unsatisfiability() {
        let portfolio = Portfolio::new(workers(3), SolverOptions::default());

        let outcome = portfolio.solve(&pigeonhole(5, 4), Indefinite);

        assert_eq!(outcome.result, SatisfactionResult::Unsatisfiable);
        assert!(outcome.winner.is_some());
    }

    #[test]
    fn solution_of_a_worker_satisfies_the_model() {
        let model = pigeonhole(4, 4);
        let portfolio = Portfolio::new(workers(4), SolverOptions::default());

        let outcome = portfolio.solve(&model, Indefinite);

        let SatisfactionResult::Satisfiable(solution) = outcome.result else {
            panic!("four pigeons fit in four holes");
        };
        assert!(model
            .constraints()
            .iter()
            .all(|constraint| constraint.is_satisfied_by(&solution)));
    }

    #[test]
    fn single_worker_runs_without_threads() {
        let portfolio = Portfolio::new(workers(1), SolverOptions::default());

        let outcome = portfolio.solve(&pigeonhole(3, 3), Indefinite);

        assert!(matches!(outcome.result, SatisfactionResult::Satisfiable(_)));
        assert_eq!(outcome.winner, Some(0));
    }

    #[test]
    fn exhausted_budgets_give_an_unknown_result() {
        let portfolio = Portfolio::new(workers(2), SolverOptions::default());

        let outcome = portfolio.solve(&pigeonhole(7, 6), DecisionBudget::new(0));

        assert_eq!(outcome.result, SatisfactionResult::Unknown);
        assert_eq!(outcome.winner, None);
    }
}
