use super::Conflict;
use crate::containers::KeyedVec;
use crate::engine::assignments::Assignments;
use crate::engine::clause_allocator::ClauseAllocator;
use crate::engine::clause_allocator::ClauseReference;
use crate::engine::reason::Reason;
use crate::engine::variables::Literal;
use crate::gapless_assert_simple;

#[derive(Clone, Copy, Debug)]
struct ClauseWatcher {
    /// Some other literal of the clause; if it is true the clause does not have to be visited.
    cached_literal: Literal,
    clause_reference: ClauseReference,
}

/// Unit propagation with two watched literals.
///
/// The watched literals of a clause are the ones at positions 0 and 1. The watcher of a clause is
/// stored in the watch list of each watched literal and is visited when that literal becomes
/// false.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClausalPropagator {
    watch_lists: KeyedVec<Literal, Vec<ClauseWatcher>>,
    next_position_on_trail_to_propagate: usize,
}

impl ClausalPropagator {
    /// Makes room for the watch lists of both polarities of a new variable.
    pub(crate) fn grow(&mut self) {
        let _ = self.watch_lists.push(vec![]);
        let _ = self.watch_lists.push(vec![]);
    }

    /// Stores the clause and watches its first two literals. The caller is responsible for
    /// placing literals that are not false at positions 0 and 1, or, for an asserting clause,
    /// the highest-level false literal at position 1.
    pub(crate) fn add_clause_unchecked(
        &mut self,
        literals: Vec<Literal>,
        is_learned: bool,
        clause_allocator: &mut ClauseAllocator,
    ) -> ClauseReference {
        let clause_reference = clause_allocator.create_clause(literals, is_learned);
        let clause = clause_allocator.get_clause(clause_reference);

        self.watch_lists[clause[0]].push(ClauseWatcher {
            cached_literal: clause[1],
            clause_reference,
        });
        self.watch_lists[clause[1]].push(ClauseWatcher {
            cached_literal: clause[0],
            clause_reference,
        });

        clause_reference
    }

    pub(crate) fn propagate(
        &mut self,
        assignments: &mut Assignments,
        clause_allocator: &mut ClauseAllocator,
    ) -> Result<(), Conflict> {
        while self.next_position_on_trail_to_propagate < assignments.num_trail_entries() {
            let true_literal = assignments.get_trail_entry(self.next_position_on_trail_to_propagate);
            let false_literal = !true_literal;

            // The watch list is rebuilt in place: watchers which stay are compacted towards the
            // front and the tail is truncated at the end.
            let watch_list = &mut self.watch_lists[false_literal];
            let mut end_index = 0;
            let mut current_index = 0;
            let mut moved_watchers = vec![];
            let mut conflict = None;

            while current_index < watch_list.len() {
                let mut watcher = watch_list[current_index];
                current_index += 1;

                if assignments.is_literal_assigned_true(watcher.cached_literal) {
                    watch_list[end_index] = watcher;
                    end_index += 1;
                    continue;
                }

                let clause = clause_allocator.get_mutable_clause(watcher.clause_reference);
                if clause[0] == false_literal {
                    clause[0] = clause[1];
                    clause[1] = false_literal;
                }

                if assignments.is_literal_assigned_true(clause[0]) {
                    watcher.cached_literal = clause[0];
                    watch_list[end_index] = watcher;
                    end_index += 1;
                    continue;
                }

                let replacement = (2..clause.len())
                    .find(|&index| !assignments.is_literal_assigned_false(clause[index]));
                if let Some(index) = replacement {
                    clause[1] = clause[index];
                    clause[index] = false_literal;
                    moved_watchers.push((clause[1], ClauseWatcher {
                        cached_literal: clause[0],
                        clause_reference: watcher.clause_reference,
                    }));
                    continue;
                }

                watch_list[end_index] = watcher;
                end_index += 1;

                if assignments.is_literal_unassigned(clause[0]) {
                    assignments.enqueue_propagated_literal(
                        clause[0],
                        Reason::Clause(watcher.clause_reference),
                    );
                } else {
                    conflict = Some(Conflict::Clause(watcher.clause_reference));
                    break;
                }
            }

            // Keep the watchers that were not visited because of a conflict.
            while current_index < watch_list.len() {
                watch_list[end_index] = watch_list[current_index];
                end_index += 1;
                current_index += 1;
            }
            watch_list.truncate(end_index);

            for (literal, watcher) in moved_watchers {
                gapless_assert_simple!(literal != false_literal);
                self.watch_lists[literal].push(watcher);
            }

            if let Some(conflict) = conflict {
                return Err(conflict);
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

    #[cfg(test)]
    fn num_watchers(&self, literal: Literal) -> usize {
        self.watch_lists[literal].len()
    }
}
