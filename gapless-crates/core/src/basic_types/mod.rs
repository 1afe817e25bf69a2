mod constraint_operation_error;
mod moving_averages;
pub(crate) mod sequence_generators;
mod solution;
mod trail;

pub use constraint_operation_error::ConstraintOperationError;
pub use moving_averages::CumulativeMovingAverage;
pub use sequence_generators::SequenceGeneratorType;
pub use solution::Solution;
pub(crate) use trail::Trail;
