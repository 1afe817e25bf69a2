//! A [`TerminationCondition`] is polled by the solver during search and tells it to give up,
//! even though no conclusion has been reached. The most common one is [`TimeBudget`], which
//! bounds the wall-clock time of a single call.

mod combinator;
mod decision_budget;
mod indefinite;
mod interrupt;
mod time_budget;

pub use combinator::Combinator;
pub use decision_budget::DecisionBudget;
pub use indefinite::Indefinite;
pub use interrupt::Interrupt;
pub use time_budget::TimeBudget;

/// Determines when the solver should give up searching.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }
}
