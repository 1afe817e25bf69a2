use std::fmt::Display;
use std::fmt::Write;

use fnv::FnvHashSet;
use itertools::Itertools;

use crate::result::ScheduleViolation;
use crate::tournament::Pairing;
use crate::tournament::Tournament;

/// The match played in one round; participants are numbered from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduledMatch {
    pub round: usize,
    pub first: usize,
    pub second: usize,
}

/// A single-table round robin: the matches ordered by round.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    matches: Vec<ScheduledMatch>,
}

impl Schedule {
    pub fn new(mut matches: Vec<ScheduledMatch>) -> Schedule {
        matches.sort_unstable();
        Schedule { matches }
    }

    pub fn matches(&self) -> &[ScheduledMatch] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Checks that the schedule is a round robin of `tournament` in which no participant sits
    /// out more than `bound` consecutive rounds. Returns the first violation found.
    pub fn validate(&self, tournament: &Tournament, bound: usize) -> Result<(), ScheduleViolation> {
        let num_rounds = tournament.num_rounds();
        if self.matches.len() != num_rounds {
            return Err(ScheduleViolation::WrongNumberOfRounds {
                expected: num_rounds,
                actual: self.matches.len(),
            });
        }

        let mut played_rounds = FnvHashSet::default();
        let mut played_pairings = FnvHashSet::default();
        for scheduled in &self.matches {
            if scheduled.round >= num_rounds {
                return Err(ScheduleViolation::RoundOutOfRange {
                    round: scheduled.round,
                    num_rounds,
                });
            }
            if !played_rounds.insert(scheduled.round) {
                return Err(ScheduleViolation::RoundPlayedTwice {
                    round: scheduled.round,
                });
            }

            let pairing = Pairing::new(scheduled.first, scheduled.second)
                .filter(|pairing| pairing.second < tournament.num_participants())
                .ok_or(ScheduleViolation::InvalidPairing {
                    round: scheduled.round,
                    first: scheduled.first,
                    second: scheduled.second,
                })?;
            if !played_pairings.insert(pairing) {
                return Err(ScheduleViolation::RepeatedMatch {
                    first: pairing.first,
                    second: pairing.second,
                });
            }
        }

        // With as many distinct rounds and distinct pairings as there are matches, every round
        // and every match is covered exactly once.
        for participant in 0..tournament.num_participants() {
            if let Some((start, length)) = self
                .idle_runs(participant)
                .find(|&(_, length)| length > bound)
            {
                return Err(ScheduleViolation::IdleGapExceeded {
                    participant,
                    start,
                    length,
                });
            }
        }

        Ok(())
    }

    /// The longest run of consecutive rounds in which one of the participants does not play.
    pub fn max_idle_gap(&self, num_participants: usize) -> usize {
        (0..num_participants)
            .flat_map(|participant| self.idle_runs(participant))
            .map(|(_, length)| length)
            .max()
            .unwrap_or(0)
    }

    /// The maximal runs `(start, length)` of rounds in which `participant` does not play.
    fn idle_runs(&self, participant: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let num_rounds = self.matches.len();
        let mut playing_rounds = self
            .matches
            .iter()
            .filter(move |scheduled| {
                scheduled.first == participant || scheduled.second == participant
            })
            .map(|scheduled| scheduled.round)
            .collect::<Vec<_>>();
        playing_rounds.sort_unstable();

        // Sentinels on either side turn the leading and trailing idle stretches into ordinary
        // gaps between consecutive plays.
        let boundaries = std::iter::once(-1_isize)
            .chain(playing_rounds.into_iter().map(|round| round as isize))
            .chain(std::iter::once(num_rounds as isize));

        boundaries
            .tuple_windows()
            .map(|(previous, next)| ((previous + 1) as usize, (next - previous - 1) as usize))
            .filter(|&(_, length)| length > 0)
    }

    /// A table with one row per round and one column per participant, containing `1` when the
    /// participant plays in that round and `0` otherwise. Rounds and participants are numbered
    /// from one.
    pub fn participation_table(&self, num_participants: usize) -> String {
        let headers = (1..=num_participants)
            .map(|participant| format!("Player {participant}"))
            .collect::<Vec<_>>();

        let mut table = String::new();
        let _ = writeln!(table, "Round | {}", headers.iter().join(" | "));
        for scheduled in &self.matches {
            let cells = headers
                .iter()
                .enumerate()
                .map(|(participant, header)| {
                    let plays = scheduled.first == participant || scheduled.second == participant;
                    format!("{:>width$}", u8::from(plays), width = header.len())
                })
                .join(" | ");
            let _ = writeln!(table, "{:>5} | {cells}", scheduled.round + 1);
        }
        table
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for scheduled in &self.matches {
            writeln!(
                f,
                "Round {:2}: Player {} vs Player {}",
                scheduled.round + 1,
                scheduled.first + 1,
                scheduled.second + 1
            )?;
        }
        Ok(())
    }
}
