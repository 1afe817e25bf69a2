use super::reason::Reason;
use super::variables::Literal;
use super::variables::PropositionalVariable;
use crate::basic_types::Solution;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::gapless_assert_moderate;
use crate::gapless_assert_simple;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AssignmentInfo {
    Unassigned,
    Assigned {
        truth_value: bool,
        decision_level: usize,
        reason: Reason,
    },
}

/// The current partial assignment of the propositional variables together with the trail of
/// true literals in assignment order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    assignment_info: KeyedVec<PropositionalVariable, AssignmentInfo>,
    trail: Trail<Literal>,
}

impl Assignments {
    pub(crate) fn grow(&mut self) -> PropositionalVariable {
        self.assignment_info.push(AssignmentInfo::Unassigned)
    }

    pub(crate) fn num_propositional_variables(&self) -> usize {
        self.assignment_info.len()
    }

    pub(crate) fn get_propositional_variables(
        &self,
    ) -> impl Iterator<Item = PropositionalVariable> + '_ {
        self.assignment_info.keys()
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level()
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    pub(crate) fn is_at_the_root_level(&self) -> bool {
        self.get_decision_level() == 0
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn get_trail_entry(&self, index: usize) -> Literal {
        self.trail[index]
    }

    /// The truth value of the literal, or `None` if its variable is unassigned.
    pub(crate) fn get_literal_value(&self, literal: Literal) -> Option<bool> {
        match self.assignment_info[literal.get_propositional_variable()] {
            AssignmentInfo::Unassigned => None,
            AssignmentInfo::Assigned { truth_value, .. } => {
                Some(truth_value == literal.is_positive())
            }
        }
    }

    pub(crate) fn is_literal_assigned_true(&self, literal: Literal) -> bool {
        self.get_literal_value(literal) == Some(true)
    }

    pub(crate) fn is_literal_assigned_false(&self, literal: Literal) -> bool {
        self.get_literal_value(literal) == Some(false)
    }

    pub(crate) fn is_literal_unassigned(&self, literal: Literal) -> bool {
        self.is_variable_unassigned(literal.get_propositional_variable())
    }

    pub(crate) fn is_variable_unassigned(&self, variable: PropositionalVariable) -> bool {
        self.assignment_info[variable] == AssignmentInfo::Unassigned
    }

    pub(crate) fn is_literal_root_assignment(&self, literal: Literal) -> bool {
        matches!(
            self.assignment_info[literal.get_propositional_variable()],
            AssignmentInfo::Assigned {
                decision_level: 0,
                ..
            }
        )
    }

    pub(crate) fn get_variable_assignment_level(&self, variable: PropositionalVariable) -> usize {
        match self.assignment_info[variable] {
            AssignmentInfo::Assigned { decision_level, .. } => decision_level,
            AssignmentInfo::Unassigned => {
                panic!("unassigned variable {variable} does not have an assignment level")
            }
        }
    }

    pub(crate) fn get_literal_assignment_level(&self, literal: Literal) -> usize {
        self.get_variable_assignment_level(literal.get_propositional_variable())
    }

    pub(crate) fn get_variable_reason(&self, variable: PropositionalVariable) -> Reason {
        match self.assignment_info[variable] {
            AssignmentInfo::Assigned { reason, .. } => reason,
            AssignmentInfo::Unassigned => {
                panic!("unassigned variable {variable} does not have a reason")
            }
        }
    }

    pub(crate) fn enqueue_decision_literal(&mut self, decision_literal: Literal) {
        self.make_assignment(decision_literal, Reason::Decision);
    }

    pub(crate) fn enqueue_propagated_literal(&mut self, propagated_literal: Literal, reason: Reason) {
        gapless_assert_moderate!(!reason.is_decision());
        self.make_assignment(propagated_literal, reason);
    }

    fn make_assignment(&mut self, true_literal: Literal, reason: Reason) {
        gapless_assert_simple!(self.is_literal_unassigned(true_literal));

        self.assignment_info[true_literal.get_propositional_variable()] = AssignmentInfo::Assigned {
            truth_value: true_literal.is_positive(),
            decision_level: self.get_decision_level(),
            reason,
        };
        self.trail.push(true_literal);
    }

    /// Unassigns every literal above `new_decision_level`, newest first, reporting each to
    /// `on_unassign`.
    pub(crate) fn synchronise(
        &mut self,
        new_decision_level: usize,
        mut on_unassign: impl FnMut(Literal),
    ) {
        for literal in self.trail.synchronise(new_decision_level) {
            self.assignment_info[literal.get_propositional_variable()] = AssignmentInfo::Unassigned;
            on_unassign(literal);
        }
    }

    /// Reads off the assignment as a [`Solution`]; every variable has to be assigned.
    pub(crate) fn to_solution(&self) -> Solution {
        Solution::new(
            self.assignment_info
                .iter()
                .map(|info| match info {
                    AssignmentInfo::Assigned { truth_value, .. } => *truth_value,
                    AssignmentInfo::Unassigned => {
                        panic!("a solution can only be extracted from a complete assignment")
                    }
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Assignments;
    use crate::engine::reason::Reason;
    use crate::engine::variables::Literal;

    #[test]
    fn assignments_record_level_and_reason() {
        let mut assignments = Assignments::default();
        let x = Literal::new(assignments.grow(), true);
        let y = Literal::new(assignments.grow(), true);

        assignments.enqueue_propagated_literal(!x, Reason::Unit);
        assignments.increase_decision_level();
        assignments.enqueue_decision_literal(y);

        assert!(assignments.is_literal_assigned_false(x));
        assert!(assignments.is_literal_root_assignment(!x));
        assert_eq!(assignments.get_literal_assignment_level(y), 1);
        assert!(assignments
            .get_variable_reason(y.get_propositional_variable())
            .is_decision());
    }

    #[test]
    fn synchronise_unassigns_newest_literals_first() {
        let mut assignments = Assignments::default();
        let literals = (0..3)
            .map(|_| Literal::new(assignments.grow(), false))
            .collect::<Vec<_>>();

        assignments.enqueue_propagated_literal(literals[0], Reason::Unit);
        assignments.increase_decision_level();
        assignments.enqueue_decision_literal(literals[1]);
        assignments.enqueue_propagated_literal(literals[2], Reason::AtMostOne {
            trigger: literals[1],
        });

        let mut unassigned = vec![];
        assignments.synchronise(0, |literal| unassigned.push(literal));

        assert_eq!(unassigned, vec![literals[2], literals[1]]);
        assert!(assignments.is_literal_unassigned(literals[1]));
        assert!(assignments.is_literal_assigned_true(literals[0]));
        assert_eq!(assignments.num_trail_entries(), 1);
    }
}
