use super::Conflict;
use crate::containers::KeyedVec;
use crate::engine::assignments::Assignments;
use crate::engine::reason::Reason;
use crate::engine::variables::Literal;
use crate::gapless_assert_moderate;

/// Propagates groups of literals of which at most one may be true.
///
/// As soon as a member becomes true every other member is set false, with the true member as the
/// reason. A group is expected to contain distinct variables.
#[derive(Clone, Debug, Default)]
pub(crate) struct AtMostOnePropagator {
    groups: Vec<Vec<Literal>>,
    /// For every literal, the groups which have to be inspected when it becomes true.
    watch_lists: KeyedVec<Literal, Vec<usize>>,
    next_position_on_trail_to_propagate: usize,
}

impl AtMostOnePropagator {
    pub(crate) fn grow(&mut self) {
        let _ = self.watch_lists.push(vec![]);
        let _ = self.watch_lists.push(vec![]);
    }

    pub(crate) fn add_group_unchecked(&mut self, literals: Vec<Literal>) {
        gapless_assert_moderate!(literals.len() >= 2);

        let group_index = self.groups.len();
        for &literal in literals.iter() {
            self.watch_lists[literal].push(group_index);
        }
        self.groups.push(literals);
    }

    pub(crate) fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub(crate) fn propagate(&mut self, assignments: &mut Assignments) -> Result<(), Conflict> {
        while self.next_position_on_trail_to_propagate < assignments.num_trail_entries() {
            let trigger = assignments.get_trail_entry(self.next_position_on_trail_to_propagate);

            for &group_index in self.watch_lists[trigger].iter() {
                for &other in self.groups[group_index].iter() {
                    if other == trigger {
                        continue;
                    }

                    match assignments.get_literal_value(other) {
                        Some(true) => {
                            return Err(Conflict::AtMostOne {
                                first: trigger,
                                second: other,
                            });
                        }
                        Some(false) => {}
                        None => {
                            assignments.enqueue_propagated_literal(
                                !other,
                                Reason::AtMostOne { trigger },
                            );
                        }
                    }
                }
            }

            self.next_position_on_trail_to_propagate += 1;
        }

        Ok(())
    }

    pub(crate) fn synchronise(&mut self, trail_size: usize) {
        self.next_position_on_trail_to_propagate =
            self.next_position_on_trail_to_propagate.min(trail_size);
    }

    pub(crate) fn is_propagation_complete(&self, trail_size: usize) -> bool {
        self.next_position_on_trail_to_propagate == trail_size
    }
}
