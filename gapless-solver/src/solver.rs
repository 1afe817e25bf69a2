use std::num::NonZeroUsize;
use std::time::Duration;

use gapless_core::statistics::log_statistic;
use gapless_core::statistics::log_statistic_postfix;
use gapless_core::statistics::should_log_statistics;
use gapless_core::statistics::Statistic;
use gapless_core::statistics::StatisticLogger;
use gapless_core::termination::Combinator;
use gapless_core::termination::Indefinite;
use gapless_core::termination::TerminationCondition;
use gapless_core::termination::TimeBudget;
use gapless_core::Model;
use gapless_core::Portfolio;
use gapless_core::SatisfactionResult;
use gapless_core::SolverOptions;
use gapless_core::SolverStatistics;
use log::debug;

/// Decides the satisfiability of a [`Model`].
///
/// Every call must be independent of the previous ones: nothing learned while solving one model
/// may influence the answer for the next.
pub trait SatisfiabilitySolver {
    /// Solves `model` within `time_budget` (no limit when `None`). The number of workers is a
    /// hint which implementations are free to ignore.
    fn solve(
        &mut self,
        model: &Model,
        time_budget: Option<Duration>,
        num_workers: NonZeroUsize,
    ) -> SatisfactionResult;
}

/// A [`SatisfiabilitySolver`] which runs a [`Portfolio`] of fresh solvers for every model.
///
/// An additional termination condition, such as one reacting to OS signals, stops every
/// attempt it is polled in.
#[derive(Debug, Clone)]
pub struct PortfolioSolver<T = Indefinite> {
    options: SolverOptions,
    termination: T,
    num_attempts: usize,
    last_statistics: Option<SolverStatistics>,
}

impl PortfolioSolver<Indefinite> {
    pub fn new(options: SolverOptions) -> Self {
        PortfolioSolver::with_termination(options, Indefinite)
    }
}

impl<T> PortfolioSolver<T> {
    pub fn with_termination(options: SolverOptions, termination: T) -> Self {
        PortfolioSolver {
            options,
            termination,
            num_attempts: 0,
            last_statistics: None,
        }
    }

    /// The statistics of the worker which decided the last model, or of the first worker if
    /// none did.
    pub fn last_statistics(&self) -> Option<&SolverStatistics> {
        self.last_statistics.as_ref()
    }
}

impl<T: TerminationCondition + Clone + Send> SatisfiabilitySolver for PortfolioSolver<T> {
    fn solve(
        &mut self,
        model: &Model,
        time_budget: Option<Duration>,
        num_workers: NonZeroUsize,
    ) -> SatisfactionResult {
        let attempt = self.num_attempts;
        self.num_attempts += 1;

        let termination = Combinator::new(
            time_budget.map(TimeBudget::starting_now),
            self.termination.clone(),
        );
        let outcome = Portfolio::new(num_workers, self.options).solve(model, termination);

        debug!(
            "Attempt {attempt} finished in {} ms, decided by worker {:?}",
            outcome.statistics.engine_statistics.time_spent_in_solver, outcome.winner
        );

        if should_log_statistics() {
            log_statistic(format!("attempt_{attempt}_num_workers"), num_workers);
            outcome
                .statistics
                .log(StatisticLogger::new(format!("attempt_{attempt}")));
            log_statistic_postfix();
        }

        self.last_statistics = Some(outcome.statistics);
        outcome.result
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;
    use std::time::Duration;

    use gapless_core::constraints;
    use gapless_core::termination::Interrupt;
    use gapless_core::Model;
    use gapless_core::SatisfactionResult;
    use gapless_core::SolverOptions;

    use super::PortfolioSolver;
    use super::SatisfiabilitySolver;

    fn two_workers() -> NonZeroUsize {
        NonZeroUsize::new(2).expect("non-zero")
    }

    fn contradiction() -> Model {
        let mut model = Model::default();
        let a = model.new_literal();
        let b = model.new_literal();
        model.add_constraint(constraints::exactly_one([a, b]));
        model.add_constraint(constraints::clause([a, b]));
        model.add_constraint(constraints::clause([!a]));
        model.add_constraint(constraints::clause([!b]));
        model
    }

    #[test]
    fn successive_models_are_solved_independently() {
        let mut solver = PortfolioSolver::new(SolverOptions::default());

        assert_eq!(
            solver.solve(&contradiction(), None, two_workers()),
            SatisfactionResult::Unsatisfiable
        );

        let mut satisfiable = Model::default();
        let a = satisfiable.new_literal();
        satisfiable.add_constraint(constraints::clause([a]));
        assert!(matches!(
            solver.solve(&satisfiable, Some(Duration::from_secs(10)), two_workers()),
            SatisfactionResult::Satisfiable(_)
        ));
        assert!(solver.last_statistics().is_some());
    }

    #[test]
    fn triggered_termination_gives_unknown() {
        let interrupt = Interrupt::new();
        interrupt.trigger();
        let mut solver = PortfolioSolver::with_termination(SolverOptions::default(), interrupt);

        let mut model = Model::default();
        let literals = (0..3).map(|_| model.new_literal()).collect::<Vec<_>>();
        model.add_constraint(constraints::at_most_one(literals));

        assert_eq!(
            solver.solve(&model, None, two_workers()),
            SatisfactionResult::Unknown
        );
    }
}
