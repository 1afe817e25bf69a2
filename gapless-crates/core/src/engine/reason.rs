use super::clause_allocator::ClauseReference;
use super::variables::Literal;

/// Why a literal was assigned.
///
/// Reasons are kept lazily: the literals which imply a propagation are only reconstructed when
/// conflict analysis asks for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reason {
    Decision,
    /// A unit clause, asserted at the root.
    Unit,
    /// Propagated by the clause; the clause stores the propagated literal at position 0.
    Clause(ClauseReference),
    /// Set false by an at-most-one constraint because `trigger` became true.
    AtMostOne { trigger: Literal },
}

impl Reason {
    pub(crate) fn is_decision(&self) -> bool {
        matches!(self, Reason::Decision)
    }
}
