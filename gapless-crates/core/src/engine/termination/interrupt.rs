use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A stop flag shared between clones; once any clone is triggered, all of them stop.
///
/// The portfolio uses it to stop the remaining workers when one of them reaches a conclusion.
#[derive(Clone, Debug, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Interrupt {
        Interrupt::default()
    }

    /// Wraps an existing flag, for example one which is raised by a signal handler.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Interrupt {
        Interrupt { flag }
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl TerminationCondition for Interrupt {
    fn should_stop(&mut self) -> bool {
        self.is_triggered()
    }
}
