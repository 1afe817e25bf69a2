//! Writes statistics with a configured prefix, casing and closing line.

use std::fmt::Display;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;
use log::debug;

/// Statistics are written as `{prefix} {name}={value}`, optionally followed by a closing line.
struct StatisticOptions {
    statistic_prefix: &'static str,
    after_statistics: Option<&'static str>,
    statistics_casing: Option<Case>,
    statistics_writer: Box<dyn Write + Send + Sync>,
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Enables statistic logging. Only the first configuration of a process takes effect.
///
/// Statistics go to `writer`, or to standard output if none is given.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::new(StatisticOptions {
            statistic_prefix: prefix,
            after_statistics: after,
            statistics_casing: casing,
            statistics_writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    if let Ok(mut statistic_options) = statistic_options_lock.write() {
        let name = match statistic_options.statistics_casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        let prefix = statistic_options.statistic_prefix;
        if let Err(e) = writeln!(statistic_options.statistics_writer, "{prefix} {name}={value}") {
            debug!("Could not write statistic: {e}");
        }
    }
}

/// Writes the closing line after a block of statistics, if one is configured.
pub fn log_statistic_postfix() {
    let Some(statistic_options_lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    if let Ok(mut statistic_options) = statistic_options_lock.write() {
        if let Some(post_fix) = statistic_options.after_statistics {
            if let Err(e) = writeln!(statistic_options.statistics_writer, "{post_fix}") {
                debug!("Could not write statistic: {e}");
            }
        }
    }
}

pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
