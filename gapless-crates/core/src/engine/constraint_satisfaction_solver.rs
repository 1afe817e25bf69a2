//! The conflict-driven clause learning search.
use std::time::Instant;

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::assignments::Assignments;
use super::clause_allocator::ClauseAllocator;
use super::reason::Reason;
use super::restart_strategy::RestartOptions;
use super::restart_strategy::RestartStrategy;
use super::solver_statistics::SolverStatistics;
use super::termination::TerminationCondition;
use super::variables::Literal;
use super::variables::PropositionalVariable;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Solution;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::containers::KeyedVec;
use crate::gapless_assert_advanced;
use crate::gapless_assert_moderate;
use crate::gapless_assert_simple;
use crate::propagators::AtMostOnePropagator;
use crate::propagators::ClausalPropagator;
use crate::propagators::Conflict;

/// Options which determine how the search of a solver behaves.
#[derive(Debug, Clone, Copy)]
pub struct SatisfactionSolverOptions {
    pub restart_options: RestartOptions,
    /// Seeds the random generator handed to the brancher.
    pub random_seed: u64,
}

impl Default for SatisfactionSolverOptions {
    fn default() -> Self {
        SatisfactionSolverOptions {
            restart_options: RestartOptions::default(),
            random_seed: 42,
        }
    }
}

/// The outcome of a call to [`ConstraintSatisfactionSolver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CSPSolverExecutionFlag {
    Feasible,
    Infeasible,
    Timeout,
}

/// A solver over propositional variables with clauses and at-most-one constraints.
///
/// Constraints are added at the root. A call to [`ConstraintSatisfactionSolver::solve`]
/// alternates propagation with decisions from a [`Brancher`]; every conflict is analysed into a
/// learned clause (first unique implication point) after which the solver backjumps to the
/// second highest decision level of that clause.
#[derive(Debug)]
pub(crate) struct ConstraintSatisfactionSolver {
    state: CSPSolverState,
    assignments: Assignments,
    clause_allocator: ClauseAllocator,
    clausal_propagator: ClausalPropagator,
    at_most_one_propagator: AtMostOnePropagator,
    restart_strategy: RestartStrategy,
    random_generator: SmallRng,
    /// Marks the variables which have been encountered during conflict analysis; all entries
    /// are false outside of [`ConstraintSatisfactionSolver::analyse_conflict`].
    seen: KeyedVec<PropositionalVariable, bool>,
    statistics: SolverStatistics,
}

#[derive(Debug)]
struct ConflictAnalysisResult {
    /// The asserting literal is at index 0, and the literal with the highest decision level of
    /// the remaining ones at index 1.
    learned_literals: Vec<Literal>,
    backjump_level: usize,
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver::new(SatisfactionSolverOptions::default())
    }
}

impl ConstraintSatisfactionSolver {
    pub(crate) fn new(options: SatisfactionSolverOptions) -> Self {
        ConstraintSatisfactionSolver {
            state: CSPSolverState::default(),
            assignments: Assignments::default(),
            clause_allocator: ClauseAllocator::default(),
            clausal_propagator: ClausalPropagator::default(),
            at_most_one_propagator: AtMostOnePropagator::default(),
            restart_strategy: RestartStrategy::new(options.restart_options),
            random_generator: SmallRng::seed_from_u64(options.random_seed),
            seen: KeyedVec::default(),
            statistics: SolverStatistics::default(),
        }
    }

    pub(crate) fn create_new_propositional_variable(&mut self) -> PropositionalVariable {
        let variable = self.assignments.grow();
        self.clausal_propagator.grow();
        self.at_most_one_propagator.grow();
        let _ = self.seen.push(false);
        variable
    }

    pub(crate) fn num_propositional_variables(&self) -> usize {
        self.assignments.num_propositional_variables()
    }

    pub(crate) fn get_propositional_variables(
        &self,
    ) -> impl Iterator<Item = PropositionalVariable> + '_ {
        self.assignments.get_propositional_variables()
    }

    /// The value of the literal at the root, if it is fixed there.
    pub(crate) fn get_literal_value(&self, literal: Literal) -> Option<bool> {
        if self.assignments.is_literal_root_assignment(literal) {
            self.assignments.get_literal_value(literal)
        } else {
            None
        }
    }

    pub(crate) fn statistics(&self) -> SolverStatistics {
        self.statistics
    }

    /// Only valid after [`ConstraintSatisfactionSolver::solve`] reported a solution and before
    /// the state is restored.
    pub(crate) fn get_solution(&self) -> Solution {
        gapless_assert_simple!(self.state.has_solution());
        self.assignments.to_solution()
    }

    /// Adds the clause at the root. Duplicate literals are removed, tautologies and clauses
    /// satisfied at the root are dropped, literals which are false at the root are removed and
    /// unit clauses are assigned directly.
    pub(crate) fn add_clause(
        &mut self,
        mut literals: Vec<Literal>,
    ) -> Result<(), ConstraintOperationError> {
        if self.state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        gapless_assert_simple!(self.assignments.is_at_the_root_level());

        literals.sort();
        literals.dedup();

        let is_tautology = literals.windows(2).any(|pair| pair[0] == !pair[1]);
        let is_satisfied = literals
            .iter()
            .any(|&literal| self.assignments.is_literal_assigned_true(literal));
        if is_tautology || is_satisfied {
            return Ok(());
        }

        literals.retain(|&literal| !self.assignments.is_literal_assigned_false(literal));

        match literals.len() {
            0 => {
                self.state.declare_infeasible();
                Err(ConstraintOperationError::InfeasibleClause)
            }
            1 => {
                self.assignments
                    .enqueue_propagated_literal(literals[0], Reason::Unit);
                Ok(())
            }
            _ => {
                let _ = self.clausal_propagator.add_clause_unchecked(
                    literals,
                    false,
                    &mut self.clause_allocator,
                );
                Ok(())
            }
        }
    }

    /// Adds the constraint that at most one of `literals` is true, at the root.
    ///
    /// A literal which occurs more than once is fixed to false. A literal together with its
    /// negation always contributes exactly one true literal, as does a literal which is true at
    /// the root; if there is such a forced contribution every other literal is fixed to false.
    pub(crate) fn add_at_most_one(
        &mut self,
        mut literals: Vec<Literal>,
    ) -> Result<(), ConstraintOperationError> {
        if self.state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }
        gapless_assert_simple!(self.assignments.is_at_the_root_level());

        literals.sort();
        let mut distinct = vec![];
        for (count, literal) in literals.into_iter().dedup_with_count() {
            if count > 1 {
                self.add_clause(vec![!literal])?;
            } else {
                distinct.push(literal);
            }
        }
        distinct.retain(|&literal| !self.assignments.is_literal_assigned_false(literal));

        let num_true = distinct
            .iter()
            .filter(|&&literal| self.assignments.is_literal_assigned_true(literal))
            .count();
        let complementary_variables = distinct
            .windows(2)
            .filter(|pair| pair[0] == !pair[1])
            .map(|pair| pair[0].get_propositional_variable())
            .collect::<Vec<_>>();
        let num_forced = num_true + complementary_variables.len();

        match num_forced {
            0 if distinct.len() >= 2 => {
                self.at_most_one_propagator.add_group_unchecked(distinct);
                Ok(())
            }
            0 => Ok(()),
            1 => {
                let unforced = distinct
                    .into_iter()
                    .filter(|literal| {
                        let variable = literal.get_propositional_variable();
                        self.assignments.is_literal_unassigned(*literal)
                            && !complementary_variables.contains(&variable)
                    })
                    .collect::<Vec<_>>();
                for literal in unforced {
                    self.add_clause(vec![!literal])?;
                }
                Ok(())
            }
            _ => {
                self.state.declare_infeasible();
                Err(ConstraintOperationError::InfeasiblePropagator)
            }
        }
    }

    pub(crate) fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.state.is_infeasible() {
            return CSPSolverExecutionFlag::Infeasible;
        }

        let start_time = Instant::now();
        self.state.declare_solving();
        let flag = self.solve_internal(termination, brancher);
        self.statistics.engine_statistics.time_spent_in_solver +=
            start_time.elapsed().as_millis() as u64;

        flag
    }

    /// Undoes every decision, so that constraints can be added again.
    pub(crate) fn restore_state_at_root(&mut self, brancher: &mut impl Brancher) {
        if !self.assignments.is_at_the_root_level() {
            self.backtrack(0, brancher);
        }
        if !self.state.is_infeasible() {
            self.state.declare_ready();
        }
    }

    fn solve_internal(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        loop {
            if termination.should_stop() {
                self.state.declare_timeout();
                return CSPSolverExecutionFlag::Timeout;
            }

            self.propagate();

            if let Some(conflict) = self.state.get_conflict() {
                if self.assignments.is_at_the_root_level() {
                    self.state.declare_infeasible();
                    return CSPSolverExecutionFlag::Infeasible;
                }

                self.resolve_conflict(conflict, brancher);
                brancher.on_conflict();
                self.restart_strategy.notify_conflict();
                continue;
            }

            if self.restart_strategy.should_restart()
                && !self.assignments.is_at_the_root_level()
                && !brancher.is_restart_pointless()
            {
                self.backtrack(0, brancher);
                self.restart_strategy.notify_restart();
                self.statistics.engine_statistics.num_restarts += 1;
                continue;
            }

            let decision = {
                let mut context =
                    SelectionContext::new(&self.assignments, &mut self.random_generator);
                brancher.next_decision(&mut context)
            };

            let Some(decision_literal) = decision else {
                self.state.declare_solution_found();
                return CSPSolverExecutionFlag::Feasible;
            };

            gapless_assert_simple!(self.assignments.is_literal_unassigned(decision_literal));
            self.statistics.engine_statistics.num_decisions += 1;
            termination.decision_has_been_made();
            self.assignments.increase_decision_level();
            self.assignments.enqueue_decision_literal(decision_literal);
        }
    }

    /// Runs both propagators until neither changes the assignment or a conflict is found.
    fn propagate(&mut self) {
        let num_assigned_before = self.assignments.num_trail_entries();

        loop {
            if let Err(conflict) = self
                .clausal_propagator
                .propagate(&mut self.assignments, &mut self.clause_allocator)
            {
                self.state.declare_conflict(conflict);
                break;
            }

            if let Err(conflict) = self.at_most_one_propagator.propagate(&mut self.assignments) {
                self.state.declare_conflict(conflict);
                break;
            }

            let trail_size = self.assignments.num_trail_entries();
            if self.clausal_propagator.is_propagation_complete(trail_size) {
                gapless_assert_moderate!(self
                    .at_most_one_propagator
                    .is_propagation_complete(trail_size));
                break;
            }
        }

        self.statistics.engine_statistics.num_propagations +=
            (self.assignments.num_trail_entries() - num_assigned_before) as u64;
    }

    /// Learns a clause from the conflict, backjumps and assigns the asserting literal.
    fn resolve_conflict(&mut self, conflict: Conflict, brancher: &mut impl Brancher) {
        self.statistics.engine_statistics.num_conflicts += 1;

        let analysis_result = self.analyse_conflict(conflict, brancher);
        let learned_clause_statistics = &mut self.statistics.learned_clause_statistics;
        learned_clause_statistics
            .average_learned_clause_length
            .add_term(analysis_result.learned_literals.len() as u64);
        learned_clause_statistics.average_backtrack_amount.add_term(
            (self.assignments.get_decision_level() - analysis_result.backjump_level) as u64,
        );

        self.backtrack(analysis_result.backjump_level, brancher);

        let asserting_literal = analysis_result.learned_literals[0];
        if analysis_result.learned_literals.len() == 1 {
            self.statistics
                .learned_clause_statistics
                .num_unit_clauses_learned += 1;
            self.assignments
                .enqueue_propagated_literal(asserting_literal, Reason::Unit);
        } else {
            let clause_reference = self.clausal_propagator.add_clause_unchecked(
                analysis_result.learned_literals,
                true,
                &mut self.clause_allocator,
            );
            self.assignments
                .enqueue_propagated_literal(asserting_literal, Reason::Clause(clause_reference));
        }

        self.state.declare_solving();
    }

    fn analyse_conflict(
        &mut self,
        conflict: Conflict,
        brancher: &mut impl Brancher,
    ) -> ConflictAnalysisResult {
        let current_decision_level = self.assignments.get_decision_level();

        // Index 0 is reserved for the asserting literal; the placeholder is overwritten below.
        let mut learned_literals = vec![Literal::new(PropositionalVariable::new(0), true)];
        let mut backjump_level = 0;
        let mut num_current_decision_level_literals = 0;
        let mut next_trail_index = self.assignments.num_trail_entries();
        let mut reason_literals = self.explain_conflict(conflict);

        let uip = loop {
            for &reason_literal in reason_literals.iter() {
                let variable = reason_literal.get_propositional_variable();
                if self.seen[variable] || self.assignments.is_literal_root_assignment(reason_literal)
                {
                    continue;
                }

                self.seen[variable] = true;
                brancher.on_appearance_in_conflict(variable);

                let literal_decision_level =
                    self.assignments.get_literal_assignment_level(reason_literal);
                if literal_decision_level == current_decision_level {
                    num_current_decision_level_literals += 1;
                } else {
                    learned_literals.push(reason_literal);
                    if literal_decision_level > backjump_level {
                        backjump_level = literal_decision_level;
                        let last_index = learned_literals.len() - 1;
                        learned_literals.swap(1, last_index);
                    }
                }
            }

            // Only literals of the current decision level are expanded; the last one left is
            // the first unique implication point.
            let next_literal = loop {
                next_trail_index -= 1;
                let literal = self.assignments.get_trail_entry(next_trail_index);
                if self.seen[literal.get_propositional_variable()] {
                    break literal;
                }
            };
            gapless_assert_advanced!(
                self.assignments.get_literal_assignment_level(next_literal)
                    == current_decision_level
            );

            self.seen[next_literal.get_propositional_variable()] = false;
            num_current_decision_level_literals -= 1;
            if num_current_decision_level_literals == 0 {
                break next_literal;
            }

            reason_literals = self.explain_propagation(next_literal);
        };
        learned_literals[0] = !uip;

        let num_literals_before_minimisation = learned_literals.len();
        self.minimise(&mut learned_literals);
        self.statistics
            .learned_clause_statistics
            .average_number_of_removed_literals
            .add_term((num_literals_before_minimisation - learned_literals.len()) as u64);

        if learned_literals.len() > 1 && num_literals_before_minimisation != learned_literals.len()
        {
            let (index, level) = learned_literals
                .iter()
                .enumerate()
                .skip(1)
                .map(|(index, &literal)| {
                    (index, self.assignments.get_literal_assignment_level(literal))
                })
                .max_by_key(|&(_, level)| level)
                .unwrap_or((1, 0));
            learned_literals.swap(1, index);
            backjump_level = level;
        } else if learned_literals.len() == 1 {
            backjump_level = 0;
        }

        ConflictAnalysisResult {
            learned_literals,
            backjump_level,
        }
    }

    /// Removes the literals whose reason only consists of other literals of the learned clause
    /// and root assignments. Clears the seen marks of every lower level literal.
    fn minimise(&mut self, learned_literals: &mut Vec<Literal>) {
        let candidates = learned_literals[1..].to_vec();
        learned_literals.truncate(1);

        for &literal in candidates.iter() {
            let variable = literal.get_propositional_variable();
            let is_redundant = match self.assignments.get_variable_reason(variable) {
                Reason::Decision | Reason::Unit => false,
                Reason::Clause(_) | Reason::AtMostOne { .. } => {
                    self.explain_propagation(!literal)
                        .iter()
                        .all(|&reason_literal| {
                            self.seen[reason_literal.get_propositional_variable()]
                                || self.assignments.is_literal_root_assignment(reason_literal)
                        })
                }
            };
            if !is_redundant {
                learned_literals.push(literal);
            }
        }

        for literal in candidates {
            self.seen[literal.get_propositional_variable()] = false;
        }
        gapless_assert_advanced!(self.seen.iter().all(|&seen| !seen));
    }

    /// The literals of the conflicting constraint, all of which are false.
    fn explain_conflict(&self, conflict: Conflict) -> Vec<Literal> {
        match conflict {
            Conflict::Clause(clause_reference) => self
                .clause_allocator
                .get_clause(clause_reference)
                .get_literal_slice()
                .to_vec(),
            Conflict::AtMostOne { first, second } => vec![!first, !second],
        }
    }

    /// The false literals which, together with the reason of `propagated_literal`, imply it.
    fn explain_propagation(&self, propagated_literal: Literal) -> Vec<Literal> {
        match self
            .assignments
            .get_variable_reason(propagated_literal.get_propositional_variable())
        {
            Reason::Clause(clause_reference) => self
                .clause_allocator
                .get_clause(clause_reference)
                .get_literal_slice()
                .iter()
                .copied()
                .filter(|&literal| literal != propagated_literal)
                .collect(),
            Reason::AtMostOne { trigger } => vec![!trigger],
            Reason::Decision | Reason::Unit => {
                unreachable!("decisions and unit clauses are never explained")
            }
        }
    }

    fn backtrack(&mut self, backtrack_level: usize, brancher: &mut impl Brancher) {
        gapless_assert_simple!(backtrack_level < self.assignments.get_decision_level());

        self.assignments
            .synchronise(backtrack_level, |literal| brancher.on_unassign_literal(literal));

        let trail_size = self.assignments.num_trail_entries();
        self.clausal_propagator.synchronise(trail_size);
        self.at_most_one_propagator.synchronise(trail_size);
    }

    pub(crate) fn num_clauses(&self) -> usize {
        self.clause_allocator.num_clauses()
    }

    pub(crate) fn num_learned_clauses(&self) -> usize {
        self.clause_allocator.num_learned_clauses()
    }

    pub(crate) fn num_at_most_one_constraints(&self) -> usize {
        self.at_most_one_propagator.num_groups()
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum CSPSolverStateInternal {
    #[default]
    Ready,
    Solving,
    ContainsSolution,
    Conflict {
        conflict: Conflict,
    },
    Infeasible,
    Timeout,
}

/// The state machine of a [`ConstraintSatisfactionSolver`].
#[derive(Debug, Default)]
pub(crate) struct CSPSolverState {
    internal_state: CSPSolverStateInternal,
}

impl CSPSolverState {
    pub(crate) fn is_infeasible(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::Infeasible)
    }

    pub(crate) fn has_solution(&self) -> bool {
        matches!(self.internal_state, CSPSolverStateInternal::ContainsSolution)
    }

    fn get_conflict(&self) -> Option<Conflict> {
        match self.internal_state {
            CSPSolverStateInternal::Conflict { conflict } => Some(conflict),
            _ => None,
        }
    }

    fn declare_ready(&mut self) {
        self.internal_state = CSPSolverStateInternal::Ready;
    }

    fn declare_solving(&mut self) {
        gapless_assert_simple!(!self.is_infeasible());
        self.internal_state = CSPSolverStateInternal::Solving;
    }

    fn declare_conflict(&mut self, conflict: Conflict) {
        gapless_assert_simple!(matches!(
            self.internal_state,
            CSPSolverStateInternal::Solving
        ));
        self.internal_state = CSPSolverStateInternal::Conflict { conflict };
    }

    fn declare_infeasible(&mut self) {
        self.internal_state = CSPSolverStateInternal::Infeasible;
    }

    fn declare_solution_found(&mut self) {
        self.internal_state = CSPSolverStateInternal::ContainsSolution;
    }

    fn declare_timeout(&mut self) {
        self.internal_state = CSPSolverStateInternal::Timeout;
    }
}

#[cfg(test)]
mod tests {
    use super::CSPSolverExecutionFlag;
    use super::ConstraintSatisfactionSolver;
    use crate::basic_types::ConstraintOperationError;
    use crate::branching::branchers::InputOrder;
    use crate::engine::termination::Indefinite;
    use crate::engine::variables::Literal;

    fn solver_with_literals(amount: usize) -> (ConstraintSatisfactionSolver, Vec<Literal>) {
        let mut solver = ConstraintSatisfactionSolver::default();
        let literals = (0..amount)
            .map(|_| Literal::new(solver.create_new_propositional_variable(), true))
            .collect();
        (solver, literals)
    }

    #[test]
    fn tautologies_and_duplicates_are_not_stored() {
        let (mut solver, x) = solver_with_literals(2);

        assert!(solver.add_clause(vec![x[0], !x[0], x[1]]).is_ok());
        assert!(solver.add_clause(vec![x[0], x[1], x[0]]).is_ok());

        assert_eq!(solver.num_clauses(), 1);
    }

    #[test]
    fn clause_falsified_at_the_root_is_infeasible() {
        let (mut solver, x) = solver_with_literals(2);

        assert!(solver.add_clause(vec![x[0]]).is_ok());
        assert!(solver.add_clause(vec![x[1]]).is_ok());
        assert_eq!(
            solver.add_clause(vec![!x[0], !x[1]]),
            Err(ConstraintOperationError::InfeasibleClause)
        );
        assert_eq!(
            solver.add_clause(vec![x[0], x[1]]),
            Err(ConstraintOperationError::InfeasibleState)
        );
    }

    #[test]
    fn repeated_member_of_at_most_one_is_false() {
        let (mut solver, x) = solver_with_literals(2);

        assert!(solver.add_at_most_one(vec![x[0], x[1], x[0]]).is_ok());
        assert!(solver.add_clause(vec![x[0], x[1]]).is_ok());

        let flag = solver.solve(&mut Indefinite, &mut InputOrder::default());
        assert_eq!(flag, CSPSolverExecutionFlag::Feasible);
        let solution = solver.get_solution();
        assert!(!solution.get_literal_value(x[0]));
        assert!(solution.get_literal_value(x[1]));
    }

    #[test]
    fn complementary_pair_in_at_most_one_forces_the_rest_false() {
        let (mut solver, x) = solver_with_literals(3);

        assert!(solver.add_at_most_one(vec![x[0], !x[0], x[1], x[2]]).is_ok());
        assert_eq!(
            solver.add_clause(vec![x[1], x[2]]),
            Err(ConstraintOperationError::InfeasibleClause)
        );
    }

    #[test]
    fn two_true_members_of_at_most_one_are_infeasible() {
        let (mut solver, x) = solver_with_literals(3);

        assert!(solver.add_clause(vec![x[0]]).is_ok());
        assert!(solver.add_clause(vec![x[2]]).is_ok());
        assert_eq!(
            solver.add_at_most_one(x.clone()),
            Err(ConstraintOperationError::InfeasiblePropagator)
        );
    }

    #[test]
    fn pigeonhole_three_into_two_is_unsatisfiable() {
        // Pigeon p sits in hole h if literal 2 * p + h is true.
        let (mut solver, x) = solver_with_literals(6);
        for pigeon in 0..3 {
            assert!(solver
                .add_clause(vec![x[2 * pigeon], x[2 * pigeon + 1]])
                .is_ok());
        }
        for hole in 0..2 {
            assert!(solver
                .add_at_most_one((0..3).map(|pigeon| x[2 * pigeon + hole]).collect())
                .is_ok());
        }

        let flag = solver.solve(&mut Indefinite, &mut InputOrder::default());

        assert_eq!(flag, CSPSolverExecutionFlag::Infeasible);
        assert!(solver.statistics().engine_statistics.num_conflicts > 0);
    }

    #[test]
    fn solution_satisfies_every_clause() {
        let (mut solver, x) = solver_with_literals(4);
        let clauses = vec![
            vec![x[0], x[1]],
            vec![!x[0], x[2]],
            vec![!x[1], !x[2], x[3]],
            vec![!x[3], !x[0]],
        ];
        for clause in clauses.iter() {
            assert!(solver.add_clause(clause.clone()).is_ok());
        }

        let flag = solver.solve(&mut Indefinite, &mut InputOrder::default());

        assert_eq!(flag, CSPSolverExecutionFlag::Feasible);
        let solution = solver.get_solution();
        assert!(clauses.iter().all(|clause| clause
            .iter()
            .any(|&literal| solution.get_literal_value(literal))));
    }
}
