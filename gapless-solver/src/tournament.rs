use crate::result::SchedulingError;
use crate::result::SchedulingResult;

/// An unordered pair of distinct participants, stored with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pairing {
    pub first: usize,
    pub second: usize,
}

impl Pairing {
    /// Creates the pairing of `a` and `b` in either order; `None` if they are the same
    /// participant.
    pub fn new(a: usize, b: usize) -> Option<Pairing> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Pairing {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(Pairing {
                first: b,
                second: a,
            }),
        }
    }

    pub fn involves(&self, participant: usize) -> bool {
        self.first == participant || self.second == participant
    }
}

/// A single round robin between the participants `0..n`; every pair meets exactly once and one
/// match is played per round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    num_participants: usize,
    /// All pairs `(i, j)` with `i < j`, in lexicographic order.
    pairings: Vec<Pairing>,
}

impl Tournament {
    pub fn new(num_participants: usize) -> SchedulingResult<Tournament> {
        if num_participants < 2 {
            return Err(SchedulingError::InvalidParticipantCount(num_participants));
        }

        let pairings = (0..num_participants)
            .flat_map(|first| {
                ((first + 1)..num_participants).map(move |second| Pairing { first, second })
            })
            .collect();

        Ok(Tournament {
            num_participants,
            pairings,
        })
    }

    pub fn num_participants(&self) -> usize {
        self.num_participants
    }

    /// The number of rounds, which equals the number of matches `n(n-1)/2`.
    pub fn num_rounds(&self) -> usize {
        self.pairings.len()
    }

    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    /// The indices into [`Tournament::pairings`] of the matches `participant` plays in.
    pub fn pairings_of(&self, participant: usize) -> impl Iterator<Item = usize> + '_ {
        self.pairings
            .iter()
            .enumerate()
            .filter(move |(_, pairing)| pairing.involves(participant))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::Pairing;
    use super::Tournament;
    use crate::SchedulingError;

    #[test]
    fn fewer_than_two_participants_are_rejected() {
        assert_eq!(
            Tournament::new(0),
            Err(SchedulingError::InvalidParticipantCount(0))
        );
        assert_eq!(
            Tournament::new(1),
            Err(SchedulingError::InvalidParticipantCount(1))
        );
    }

    #[test]
    fn pairings_are_lexicographic() {
        let tournament = Tournament::new(4).expect("valid participant count");

        let pairs = tournament
            .pairings()
            .iter()
            .map(|pairing| (pairing.first, pairing.second))
            .collect::<Vec<_>>();

        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(tournament.num_rounds(), 6);
    }

    #[test]
    fn every_participant_plays_everyone_else() {
        let tournament = Tournament::new(5).expect("valid participant count");

        for participant in 0..5 {
            assert_eq!(tournament.pairings_of(participant).count(), 4);
        }
    }

    #[test]
    fn pairing_is_unordered() {
        assert_eq!(Pairing::new(3, 1), Pairing::new(1, 3));
        assert_eq!(Pairing::new(2, 2), None);
    }
}
