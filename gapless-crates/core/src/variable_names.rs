use crate::containers::HashMap;
use crate::engine::variables::PropositionalVariable;

/// Optional names of propositional variables, used for debugging and for reading back results.
#[derive(Clone, Debug, Default)]
pub struct VariableNames {
    names: HashMap<PropositionalVariable, String>,
    variables: HashMap<String, PropositionalVariable>,
}

impl VariableNames {
    pub fn get_propositional_name(&self, variable: PropositionalVariable) -> Option<&str> {
        self.names.get(&variable).map(|name| name.as_str())
    }

    pub fn get_propositional_variable(&self, name: &str) -> Option<PropositionalVariable> {
        self.variables.get(name).copied()
    }

    /// Adds a name to the variable, overriding an existing one.
    pub(crate) fn add_propositional(&mut self, variable: PropositionalVariable, name: String) {
        if let Some(old_name) = self.names.insert(variable, name.clone()) {
            let _ = self.variables.remove(&old_name);
        }
        let _ = self.variables.insert(name, variable);
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
