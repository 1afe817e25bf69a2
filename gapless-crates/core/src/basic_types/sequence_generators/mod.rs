//! Integer sequences used to space out restarts.
mod constant_sequence;
mod geometric_sequence;
mod luby_sequence;
mod sequence_generator_type;

use std::fmt::Debug;

pub(crate) use constant_sequence::ConstantSequence;
pub(crate) use geometric_sequence::GeometricSequence;
pub(crate) use luby_sequence::LubySequence;
pub use sequence_generator_type::SequenceGeneratorType;

pub(crate) trait SequenceGenerator: Debug + Send {
    fn next(&mut self) -> i64;
}

impl SequenceGeneratorType {
    /// Creates the generator of this type whose first element is `base_value`.
    pub(crate) fn create(
        self,
        base_value: i64,
        multiplication_factor: f64,
    ) -> Box<dyn SequenceGenerator> {
        match self {
            SequenceGeneratorType::Constant => Box::new(ConstantSequence::new(base_value)),
            SequenceGeneratorType::Geometric => Box::new(GeometricSequence::new(
                base_value,
                multiplication_factor,
            )),
            SequenceGeneratorType::Luby => Box::new(LubySequence::new(base_value)),
        }
    }
}
