//! Decides which literal the solver assigns when propagation has reached a fixed point.
//!
//! A [`Brancher`] is usually composed of a [`VariableSelector`] and a [`ValueSelector`]
//! through [`IndependentVariableValueBrancher`]; the [`DefaultBrancher`] combines [`Vsids`] with
//! [`PhaseSaving`].
//!
//! [`VariableSelector`]: variable_selection::VariableSelector
//! [`ValueSelector`]: value_selection::ValueSelector
//! [`IndependentVariableValueBrancher`]: branchers::IndependentVariableValueBrancher
//! [`Vsids`]: variable_selection::Vsids
//! [`PhaseSaving`]: value_selection::PhaseSaving
mod brancher;
pub mod branchers;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use branchers::DefaultBrancher;
pub use selection_context::SelectionContext;
