use gapless_core::constraints;
use gapless_core::variables::Literal;
use gapless_core::Model;
use gapless_core::Solution;
use log::debug;

use crate::result::SchedulingError;
use crate::result::SchedulingResult;
use crate::schedule::Schedule;
use crate::schedule::ScheduledMatch;
use crate::tournament::Pairing;
use crate::tournament::Tournament;

/// The boolean model of a tournament whose maximum idle gap is at most `bound`.
///
/// Its solutions correspond one to one with the schedules of the tournament in which no
/// participant sits out more than `bound` consecutive rounds. It uses two families of
/// variables:
/// - `x_{i}_{j}_{r}`: the match between `i` and `j` is played in round `r`;
/// - `y_{i}_{r}`: participant `i` plays in round `r`.
#[derive(Debug, Clone)]
pub struct ScheduleEncoding {
    model: Model,
    bound: usize,
    pairings: Vec<Pairing>,
    /// Indexed by pairing, then by round.
    match_in_round: Vec<Vec<Literal>>,
    /// Indexed by participant, then by round.
    plays_in_round: Vec<Vec<Literal>>,
}

impl ScheduleEncoding {
    pub fn new(tournament: &Tournament, bound: usize) -> SchedulingResult<ScheduleEncoding> {
        let num_rounds = tournament.num_rounds();
        if bound >= num_rounds {
            return Err(SchedulingError::InvalidBound { bound, num_rounds });
        }

        let mut model = Model::default();

        let match_in_round = tournament
            .pairings()
            .iter()
            .map(|pairing| {
                (0..num_rounds)
                    .map(|round| {
                        model.new_named_literal(format!(
                            "x_{}_{}_{round}",
                            pairing.first, pairing.second
                        ))
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let plays_in_round = (0..tournament.num_participants())
            .map(|participant| {
                (0..num_rounds)
                    .map(|round| model.new_named_literal(format!("y_{participant}_{round}")))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        // Every match is played in exactly one round.
        for rounds in &match_in_round {
            model.add_constraint(constraints::exactly_one(rounds.iter().copied()));
        }

        // Every round hosts exactly one match.
        for round in 0..num_rounds {
            model.add_constraint(constraints::exactly_one(
                match_in_round.iter().map(|rounds| rounds[round]),
            ));
        }

        // A participant plays in a round exactly when one of its matches is played there.
        for (participant, rounds) in plays_in_round.iter().enumerate() {
            for (round, &plays) in rounds.iter().enumerate() {
                let own_matches = tournament
                    .pairings_of(participant)
                    .map(|pairing| match_in_round[pairing][round]);
                model.add_constraint(constraints::boolean_equals(own_matches, plays));
            }
        }

        // Nobody sits out `bound + 1` consecutive rounds.
        for rounds in &plays_in_round {
            for window in rounds.windows(bound + 1) {
                model.add_constraint(constraints::clause(window.iter().copied()));
            }
        }

        debug!(
            "Encoded {} participants with bound {bound}: {} variables, {} constraints",
            tournament.num_participants(),
            model.num_variables(),
            model.constraints().len(),
        );

        Ok(ScheduleEncoding {
            model,
            bound,
            pairings: tournament.pairings().to_vec(),
            match_in_round,
            plays_in_round,
        })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// The literal stating that the `pairing`-th match of the tournament is played in `round`.
    pub fn match_in_round(&self, pairing: usize, round: usize) -> Literal {
        self.match_in_round[pairing][round]
    }

    /// The literal stating that `participant` plays in `round`.
    pub fn plays_in_round(&self, participant: usize, round: usize) -> Literal {
        self.plays_in_round[participant][round]
    }

    /// Reads the schedule off a solution of [`ScheduleEncoding::model`]: every match placed in a
    /// round by the solution becomes an entry of the schedule.
    pub fn decode(&self, solution: &Solution) -> Schedule {
        let matches = self
            .match_in_round
            .iter()
            .zip(&self.pairings)
            .flat_map(|(rounds, pairing)| {
                rounds
                    .iter()
                    .enumerate()
                    .filter(|&(_, &literal)| solution.get_literal_value(literal))
                    .map(|(round, _)| ScheduledMatch {
                        round,
                        first: pairing.first,
                        second: pairing.second,
                    })
            })
            .collect();

        Schedule::new(matches)
    }
}

#[cfg(test)]
mod tests {
    use gapless_core::termination::Indefinite;
    use gapless_core::SatisfactionResult;
    use gapless_core::Solver;
    use gapless_core::SolverOptions;

    use super::ScheduleEncoding;
    use crate::SchedulingError;
    use crate::Tournament;

    fn solve(
        num_participants: usize,
        bound: usize,
    ) -> (Tournament, ScheduleEncoding, SatisfactionResult) {
        let tournament = Tournament::new(num_participants).expect("valid participant count");
        let encoding = ScheduleEncoding::new(&tournament, bound).expect("valid bound");

        let mut solver = Solver::from_model(encoding.model(), SolverOptions::default());
        let mut brancher = solver.default_brancher();
        let result = solver.satisfy(&mut brancher, &mut Indefinite);

        (tournament, encoding, result)
    }

    #[test]
    fn variables_are_named_after_their_meaning() {
        let tournament = Tournament::new(3).expect("valid participant count");
        let encoding = ScheduleEncoding::new(&tournament, 1).expect("valid bound");
        let names = encoding.model().variable_names();

        // The pairings of three participants are (0, 1), (0, 2) and (1, 2).
        let x = encoding.match_in_round(2, 0).get_propositional_variable();
        let y = encoding.plays_in_round(1, 2).get_propositional_variable();

        assert_eq!(names.get_propositional_name(x), Some("x_1_2_0"));
        assert_eq!(names.get_propositional_name(y), Some("y_1_2"));
        assert_eq!(encoding.model().num_variables(), 3 * 3 + 3 * 3);
    }

    #[test]
    fn bound_must_be_below_the_number_of_rounds() {
        let tournament = Tournament::new(3).expect("valid participant count");

        assert_eq!(
            ScheduleEncoding::new(&tournament, 3).map(|_| ()),
            Err(SchedulingError::InvalidBound {
                bound: 3,
                num_rounds: 3
            })
        );
    }

    #[test]
    fn largest_bound_is_always_satisfiable() {
        for num_participants in 2..=5 {
            let num_rounds = num_participants * (num_participants - 1) / 2;
            let (tournament, encoding, result) = solve(num_participants, num_rounds - 1);

            let SatisfactionResult::Satisfiable(solution) = result else {
                panic!("bound {} admits a schedule", num_rounds - 1);
            };
            let schedule = encoding.decode(&solution);
            assert_eq!(schedule.validate(&tournament, num_rounds - 1), Ok(()));
        }
    }

    #[test]
    fn participation_matches_the_decoded_schedule() {
        let (_, encoding, result) = solve(4, 2);

        let SatisfactionResult::Satisfiable(solution) = result else {
            panic!("four participants admit bound two");
        };
        let schedule = encoding.decode(&solution);

        for scheduled in schedule.matches() {
            for participant in 0..4 {
                let plays = participant == scheduled.first || participant == scheduled.second;
                let literal = encoding.plays_in_round(participant, scheduled.round);
                assert_eq!(solution.get_literal_value(literal), plays);
            }
        }
    }

    #[test]
    fn three_participants_cannot_all_play_every_round() {
        let (_, _, result) = solve(3, 0);

        assert_eq!(result, SatisfactionResult::Unsatisfiable);
    }

    #[test]
    fn consecutive_rounds_of_four_participants_cannot_be_disjoint_throughout() {
        let (_, _, result) = solve(4, 1);

        assert_eq!(result, SatisfactionResult::Unsatisfiable);
    }
}
