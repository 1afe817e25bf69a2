//! The two propagators the engine is built from: clauses and at-most-one constraints.
mod at_most_one;
mod clausal_propagator;

pub(crate) use at_most_one::AtMostOnePropagator;
pub(crate) use clausal_propagator::ClausalPropagator;

use crate::engine::clause_allocator::ClauseReference;
use crate::engine::variables::Literal;

/// A constraint that is violated by the current assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Conflict {
    /// Every literal of the clause is false.
    Clause(ClauseReference),
    /// Two members of the same at-most-one constraint are true.
    AtMostOne { first: Literal, second: Literal },
}
