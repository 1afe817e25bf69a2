use thiserror::Error;

#[cfg(doc)]
use crate::find_optimal_schedule;

pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// The fatal outcomes of [`find_optimal_schedule`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("A round robin needs at least two participants, got {0}")]
    InvalidParticipantCount(usize),
    #[error("The idle gap bound {bound} is not below the number of rounds {num_rounds}")]
    InvalidBound { bound: usize, num_rounds: usize },
    #[error("The solver returned a schedule which violates bound {bound}: {violation}")]
    InvalidSchedule {
        bound: usize,
        violation: ScheduleViolation,
    },
    #[error("No bound below {num_rounds} admits a schedule, which contradicts the encoding")]
    ExhaustedSearchSpace { num_rounds: usize },
}

/// The first requirement a [`Schedule`](crate::Schedule) fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleViolation {
    #[error("expected {expected} rounds but the schedule has {actual}")]
    WrongNumberOfRounds { expected: usize, actual: usize },
    #[error("round {round} lies outside of [0, {num_rounds})")]
    RoundOutOfRange { round: usize, num_rounds: usize },
    #[error("round {round} hosts more than one match")]
    RoundPlayedTwice { round: usize },
    #[error("round {round} pairs {first} with {second}, which is not a match of the tournament")]
    InvalidPairing {
        round: usize,
        first: usize,
        second: usize,
    },
    #[error("{first} and {second} meet more than once")]
    RepeatedMatch { first: usize, second: usize },
    #[error("participant {participant} sits out {length} rounds starting at round {start}")]
    IdleGapExceeded {
        participant: usize,
        start: usize,
        length: usize,
    },
}
