use gapless_solver::SchedulingError;
use thiserror::Error;

pub(crate) type GaplessResult<T> = Result<T, GaplessError>;

#[derive(Error, Debug)]
pub(crate) enum GaplessError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to schedule the tournament, more details: {0}")]
    Scheduling(#[from] SchedulingError),
}
