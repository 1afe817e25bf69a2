use log::debug;

use super::outputs::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::branching::Brancher;
use crate::branching::DefaultBrancher;
use crate::constraints::Constraint;
use crate::engine::variables::Literal;
use crate::engine::CSPSolverExecutionFlag;
use crate::engine::ConstraintSatisfactionSolver;
use crate::engine::SolverStatistics;
use crate::model::Model;
use crate::termination::TerminationCondition;
use crate::variable_names::VariableNames;

pub use crate::engine::SatisfactionSolverOptions as SolverOptions;

/// The main interaction point: create variables, add constraints and solve.
///
/// ```rust
/// # use gapless_core::constraints;
/// # use gapless_core::termination::Indefinite;
/// # use gapless_core::SatisfactionResult;
/// # use gapless_core::Solver;
/// let mut solver = Solver::default();
/// let x = solver.new_literal();
/// let y = solver.new_named_literal("y");
///
/// solver
///     .add_constraint(constraints::exactly_one([x, y]))
///     .expect("the constraint is satisfiable at the root");
/// solver
///     .add_constraint(constraints::clause([!x]))
///     .expect("the constraint is satisfiable at the root");
///
/// let mut brancher = solver.default_brancher();
/// let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
/// else {
///     panic!("the problem is satisfiable");
/// };
/// assert!(solution.get_literal_value(y));
/// ```
#[derive(Debug)]
pub struct Solver {
    satisfaction_solver: ConstraintSatisfactionSolver,
    options: SolverOptions,
    variable_names: VariableNames,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::with_options(SolverOptions::default())
    }
}

impl Solver {
    pub fn with_options(options: SolverOptions) -> Self {
        Solver {
            satisfaction_solver: ConstraintSatisfactionSolver::new(options),
            options,
            variable_names: VariableNames::default(),
        }
    }

    /// Creates a solver containing the variables and constraints of `model`; the variables of
    /// the model are the variables of the solver with the same index.
    ///
    /// If a constraint turns out to be infeasible at the root, the solver is left in an
    /// infeasible state and [`Solver::satisfy`] reports [`SatisfactionResult::Unsatisfiable`].
    pub fn from_model(model: &Model, options: SolverOptions) -> Self {
        let mut solver = Solver::with_options(options);
        for _ in 0..model.num_variables() {
            let _ = solver.new_literal();
        }
        solver.variable_names = model.variable_names().clone();

        for constraint in model.constraints() {
            if let Err(error) = solver.add_constraint(constraint.clone()) {
                debug!("Model is infeasible at the root: {error}");
                break;
            }
        }

        debug!(
            "Created solver with {} variables, {} clauses and {} at-most-one constraints",
            solver.num_variables(),
            solver.satisfaction_solver.num_clauses(),
            solver.satisfaction_solver.num_at_most_one_constraints(),
        );
        solver
    }

    /// Creates a fresh propositional variable and returns its positive literal.
    pub fn new_literal(&mut self) -> Literal {
        Literal::new(
            self.satisfaction_solver.create_new_propositional_variable(),
            true,
        )
    }

    pub fn new_named_literal(&mut self, name: impl Into<String>) -> Literal {
        let literal = self.new_literal();
        self.variable_names
            .add_propositional(literal.get_propositional_variable(), name.into());
        literal
    }

    /// An infinite iterator of the positive literals of fresh, unnamed variables.
    pub fn new_literals(&mut self) -> impl Iterator<Item = Literal> + '_ {
        std::iter::from_fn(move || Some(self.new_literal()))
    }

    pub fn num_variables(&self) -> usize {
        self.satisfaction_solver.num_propositional_variables()
    }

    pub fn variable_names(&self) -> &VariableNames {
        &self.variable_names
    }

    /// The value of `literal` at the root, or `None` if it is not fixed there.
    pub fn get_literal_value(&self, literal: Literal) -> Option<bool> {
        self.satisfaction_solver.get_literal_value(literal)
    }

    /// Adds the constraint at the root.
    ///
    /// An error means that the problem has become infeasible; later calls to
    /// [`Solver::satisfy`] report [`SatisfactionResult::Unsatisfiable`].
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ConstraintOperationError> {
        constraint.post(&mut self.satisfaction_solver)
    }

    /// A [`DefaultBrancher`] over every variable of the solver, seeded with the random seed of
    /// the [`SolverOptions`].
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self
            .satisfaction_solver
            .get_propositional_variables()
            .collect::<Vec<_>>();
        DefaultBrancher::default_over_all_variables(&variables, self.options.random_seed)
    }

    /// Searches for a solution until one is found, infeasibility is proven or `termination`
    /// triggers. The solver is back at the root afterwards, so constraints can be added and
    /// `satisfy` can be called again.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        let result = match self.satisfaction_solver.solve(termination, brancher) {
            CSPSolverExecutionFlag::Feasible => {
                SatisfactionResult::Satisfiable(self.satisfaction_solver.get_solution())
            }
            CSPSolverExecutionFlag::Infeasible => SatisfactionResult::Unsatisfiable,
            CSPSolverExecutionFlag::Timeout => SatisfactionResult::Unknown,
        };
        // Reset the state whenever we return a result
        self.satisfaction_solver.restore_state_at_root(brancher);

        debug!(
            "Search finished after {} conflicts with {} learned clauses",
            self.statistics().engine_statistics.num_conflicts,
            self.satisfaction_solver.num_learned_clauses(),
        );
        result
    }

    pub fn statistics(&self) -> SolverStatistics {
        self.satisfaction_solver.statistics()
    }
}

#[cfg(test)]
mod tests {
    use super::Solver;
    use crate::constraints;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;
    use crate::SatisfactionResult;

    #[test]
    fn unit_constraint_is_visible_at_the_root() {
        let mut solver = Solver::default();
        let x = solver.new_literal();

        assert!(solver.add_constraint(constraints::clause([x])).is_ok());

        assert_eq!(solver.get_literal_value(x), Some(true));
        assert_eq!(solver.get_literal_value(!x), Some(false));
    }

    #[test]
    fn infeasible_root_yields_unsatisfiable() {
        let mut solver = Solver::default();
        let x = solver.new_literal();
        assert!(solver.add_constraint(constraints::clause([x])).is_ok());
        assert!(solver.add_constraint(constraints::clause([!x])).is_err());

        let mut brancher = solver.default_brancher();
        assert_eq!(
            solver.satisfy(&mut brancher, &mut Indefinite),
            SatisfactionResult::Unsatisfiable
        );
    }

    #[test]
    fn exhausted_budget_yields_unknown() {
        let mut solver = Solver::default();
        let literals = solver.new_literals().take(4).collect::<Vec<_>>();
        assert!(solver
            .add_constraint(constraints::clause(literals.iter().copied()))
            .is_ok());

        let mut brancher = solver.default_brancher();
        let result = solver.satisfy(&mut brancher, &mut DecisionBudget::new(0));

        assert_eq!(result, SatisfactionResult::Unknown);
    }

    #[test]
    fn solver_can_be_called_again_after_a_solution() {
        let mut solver = Solver::default();
        let x = solver.new_literal();
        let y = solver.new_literal();
        assert!(solver.add_constraint(constraints::exactly_one([x, y])).is_ok());

        let mut brancher = solver.default_brancher();
        let SatisfactionResult::Satisfiable(first) = solver.satisfy(&mut brancher, &mut Indefinite)
        else {
            panic!("expected a solution");
        };

        // Exclude the first solution.
        let blocking_literal = if first.get_literal_value(x) { !x } else { !y };
        assert!(solver
            .add_constraint(constraints::clause([blocking_literal]))
            .is_ok());

        let SatisfactionResult::Satisfiable(second) =
            solver.satisfy(&mut brancher, &mut Indefinite)
        else {
            panic!("expected a second solution");
        };
        assert_ne!(first, second);
    }

    #[test]
    fn statistics_accumulate_over_the_search() {
        let mut solver = Solver::default();
        let pigeons = (0..3)
            .map(|_| solver.new_literals().take(2).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        for pigeon in &pigeons {
            assert!(solver
                .add_constraint(constraints::clause(pigeon.iter().copied()))
                .is_ok());
        }
        for hole in 0..2 {
            assert!(solver
                .add_constraint(constraints::at_most_one(pigeons.iter().map(|p| p[hole])))
                .is_ok());
        }

        let mut brancher = solver.default_brancher();
        let result = solver.satisfy(&mut brancher, &mut Indefinite);

        assert_eq!(result, SatisfactionResult::Unsatisfiable);
        let statistics = solver.statistics();
        assert!(statistics.engine_statistics.num_decisions > 0);
        assert!(statistics.engine_statistics.num_conflicts > 0);
    }
}
