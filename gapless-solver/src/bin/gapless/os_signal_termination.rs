use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use gapless_core::termination::Interrupt;
use gapless_core::termination::TerminationCondition;

use crate::result::GaplessResult;

/// A [`TerminationCondition`] which triggers due to a SIGINT or SIGTERM signal.
#[derive(Clone, Debug)]
pub(crate) struct OsSignal {
    signal_received: Interrupt,
}

impl OsSignal {
    /// Create a termination and install the event listeners.
    pub(crate) fn install() -> GaplessResult<OsSignal> {
        // The signals to listen to for termination.
        const TERMINATION_SIGNALS: &[std::ffi::c_int] =
            &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

        let flag = Arc::new(AtomicBool::new(false));
        for &signal in TERMINATION_SIGNALS {
            let _ = signal_hook::flag::register(signal, Arc::clone(&flag))?;
        }

        Ok(OsSignal {
            signal_received: Interrupt::from_flag(flag),
        })
    }
}

impl TerminationCondition for OsSignal {
    fn should_stop(&mut self) -> bool {
        self.signal_received.is_triggered()
    }
}
