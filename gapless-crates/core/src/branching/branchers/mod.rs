mod independent_variable_value_brancher;
mod input_order;

pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
pub use input_order::InputOrder;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::branching::value_selection::PhaseSaving;
use crate::branching::variable_selection::Vsids;
use crate::engine::variables::PropositionalVariable;

/// The brancher used when none is given: [`Vsids`] for the variable and [`PhaseSaving`] for the
/// value.
pub type DefaultBrancher = IndependentVariableValueBrancher<
    PropositionalVariable,
    Vsids<PropositionalVariable>,
    PhaseSaving<PropositionalVariable, bool>,
>;

/// Upper bound of the random starting activities; one conflict outweighs all of them.
const MAX_INITIAL_ACTIVITY: f64 = 1e-3;

impl DefaultBrancher {
    /// Creates the default brancher over `variables`.
    ///
    /// The starting activities are drawn from `random_seed`, so that solvers with different
    /// seeds start their search in different parts of the search space.
    pub fn default_over_all_variables(
        variables: &[PropositionalVariable],
        random_seed: u64,
    ) -> DefaultBrancher {
        let mut random_generator = SmallRng::seed_from_u64(random_seed);
        let initial_activities = variables
            .iter()
            .map(|_| random_generator.gen_range(0.0..MAX_INITIAL_ACTIVITY))
            .collect::<Vec<_>>();

        IndependentVariableValueBrancher::new(
            Vsids::with_initial_values(variables, &initial_activities),
            PhaseSaving::new(variables),
        )
    }
}
