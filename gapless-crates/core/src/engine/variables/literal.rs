use std::ops::Not;

use super::PropositionalVariable;
use crate::containers::StorageKey;

/// A [`PropositionalVariable`] or its negation.
///
/// The literal is stored as `2 * variable + negated`, so a literal and its complement are
/// neighbouring storage keys.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, PartialOrd, Ord)]
pub struct Literal {
    code: u32,
}

impl Literal {
    pub fn new(propositional_variable: PropositionalVariable, is_positive: bool) -> Literal {
        Literal {
            code: propositional_variable.index() as u32 * 2 + (!is_positive) as u32,
        }
    }

    pub fn get_propositional_variable(&self) -> PropositionalVariable {
        PropositionalVariable::new(self.code >> 1)
    }

    pub fn is_positive(&self) -> bool {
        self.code & 1 == 0
    }

    pub fn is_negative(&self) -> bool {
        !self.is_positive()
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            code: self.code ^ 1,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_positive() {
            write!(f, "{}", self.get_propositional_variable())
        } else {
            write!(f, "~{}", self.get_propositional_variable())
        }
    }
}

impl StorageKey for Literal {
    fn index(&self) -> usize {
        self.code as usize
    }

    fn create_from_index(index: usize) -> Self {
        Literal { code: index as u32 }
    }
}
