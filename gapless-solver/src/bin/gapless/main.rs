mod os_signal_termination;
mod result;

use std::io::Write;
use std::num::NonZeroUsize;
use std::time::Duration;

use clap::Parser;
use gapless_core::convert_case::Case;
use gapless_core::statistics::configure_statistic_logging;
use gapless_core::RestartOptions;
use gapless_core::SequenceGeneratorType;
use gapless_core::SolverOptions;
use gapless_solver::find_optimal_schedule;
use gapless_solver::PortfolioSolver;
use gapless_solver::SearchOptions;
use gapless_solver::SearchOutcome;
use log::error;
use log::info;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::GaplessResult;

/// The exit status when no bound could be decided.
const INCONCLUSIVE_EXIT_CODE: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about
)]
struct Args {
    /// The number of participants in the round robin.
    ///
    /// Possible values: usize, at least 2
    #[arg(default_value_t = 6, verbatim_doc_comment)]
    num_participants: usize,

    /// The time in milliseconds the solver may spend on a single bound.
    ///
    /// Possible values: u64
    #[arg(short = 't', long = "time-limit", default_value_t = 30_000, verbatim_doc_comment)]
    time_limit: u64,

    /// Lets the solver spend as much time on every bound as it needs; overrides `--time-limit`.
    #[arg(long = "no-time-limit")]
    no_time_limit: bool,

    /// The number of solvers which search for a schedule in parallel.
    ///
    /// Possible values: usize, at least 1
    #[arg(short = 'w', long = "workers", default_value = "8", verbatim_doc_comment)]
    num_workers: NonZeroUsize,

    /// The random seed of the first worker; worker `i` uses this seed plus `i`.
    ///
    /// Possible values: u64
    #[arg(short = 'r', long = "random-seed", default_value_t = 42, verbatim_doc_comment)]
    random_seed: u64,

    /// Decides the sequence which is used to determine when to restart.
    ///
    /// Possible values: ["constant", "geometric", "luby"]
    #[arg(long = "restart-sequence", value_enum, default_value_t = SequenceGeneratorType::Luby, verbatim_doc_comment)]
    restart_sequence_generator_type: SequenceGeneratorType,

    /// The base interval length is used as a multiplier to the restart sequence.
    ///
    /// Possible values: u64, at least 1
    #[arg(long = "restart-base-interval", default_value_t = 50, verbatim_doc_comment)]
    restart_base_interval: u64,

    /// Disables restarts entirely.
    #[arg(long = "no-restarts")]
    no_restarts: bool,

    /// Enables debug logging.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Enables logging of the statistics of every solver call.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,

    /// Prints which participants play in every round after the schedule.
    #[arg(long = "table")]
    table: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging(
            "%%%gapless-stat:",
            Some("%%%gapless-stat-end"),
            Some(Case::Snake),
            Some(Box::new(std::io::stderr())),
        );
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(SearchOutcome::Optimal(_)) => {}
        Ok(SearchOutcome::Inconclusive { .. }) => std::process::exit(INCONCLUSIVE_EXIT_CODE),
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> GaplessResult<SearchOutcome> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    let solver_options = SolverOptions {
        restart_options: RestartOptions {
            sequence_generator_type: args.restart_sequence_generator_type,
            base_interval: args.restart_base_interval,
            no_restarts: args.no_restarts,
            ..Default::default()
        },
        random_seed: args.random_seed,
    };
    let search_options = SearchOptions {
        time_budget: (!args.no_time_limit).then(|| Duration::from_millis(args.time_limit)),
        num_workers: args.num_workers,
    };

    let mut solver = PortfolioSolver::with_termination(solver_options, OsSignal::install()?);
    let outcome = find_optimal_schedule(args.num_participants, &search_options, &mut solver)?;

    let mut stdout = std::io::stdout().lock();
    match &outcome {
        SearchOutcome::Optimal(optimal) => {
            writeln!(stdout, "Optimal maximum idle gap: {}", optimal.bound)?;
            writeln!(stdout)?;
            write!(stdout, "{}", optimal.schedule)?;

            if args.table {
                writeln!(stdout)?;
                write!(
                    stdout,
                    "{}",
                    optimal.schedule.participation_table(args.num_participants)
                )?;
            }
        }
        SearchOutcome::Inconclusive { bound } => {
            writeln!(
                stdout,
                "No schedule could be confirmed for bound {bound} before the solver was stopped."
            )?;
        }
    }
    stdout.flush()?;

    Ok(outcome)
}
