use crate::basic_types::sequence_generators::SequenceGenerator;
use crate::basic_types::SequenceGeneratorType;

/// Determines how often the solver abandons its decisions and starts again from the root, keeping
/// the learned clauses.
#[derive(Debug, Clone, Copy)]
pub struct RestartOptions {
    /// Which sequence determines the number of conflicts between two restarts.
    pub sequence_generator_type: SequenceGeneratorType,
    /// The first element of the sequence.
    pub base_interval: u64,
    /// The multiplication factor of the geometric sequence; not used by the other sequences.
    pub geometric_coef: f64,
    /// Never restart.
    pub no_restarts: bool,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            sequence_generator_type: SequenceGeneratorType::Luby,
            base_interval: 50,
            geometric_coef: 1.5,
            no_restarts: false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RestartStrategy {
    sequence_generator: Box<dyn SequenceGenerator>,
    number_of_conflicts_encountered_since_restart: u64,
    number_of_conflicts_until_restart: u64,
    no_restarts: bool,
}

impl Default for RestartStrategy {
    fn default() -> Self {
        RestartStrategy::new(RestartOptions::default())
    }
}

impl RestartStrategy {
    pub(crate) fn new(options: RestartOptions) -> Self {
        let mut sequence_generator = options
            .sequence_generator_type
            .create(options.base_interval as i64, options.geometric_coef);
        let number_of_conflicts_until_restart = next_interval(sequence_generator.as_mut());

        RestartStrategy {
            sequence_generator,
            number_of_conflicts_encountered_since_restart: 0,
            number_of_conflicts_until_restart,
            no_restarts: options.no_restarts,
        }
    }

    pub(crate) fn should_restart(&self) -> bool {
        !self.no_restarts
            && self.number_of_conflicts_encountered_since_restart
                >= self.number_of_conflicts_until_restart
    }

    pub(crate) fn notify_conflict(&mut self) {
        self.number_of_conflicts_encountered_since_restart += 1;
    }

    pub(crate) fn notify_restart(&mut self) {
        self.number_of_conflicts_encountered_since_restart = 0;
        self.number_of_conflicts_until_restart = next_interval(self.sequence_generator.as_mut());
    }
}

/// The sequences are not meant to produce values below one; if they do (for instance after
/// overflowing) restarts happen after every conflict.
fn next_interval(sequence_generator: &mut dyn SequenceGenerator) -> u64 {
    sequence_generator.next().max(1) as u64
}
