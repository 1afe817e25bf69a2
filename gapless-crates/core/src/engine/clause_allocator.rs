use std::ops::Index;
use std::ops::IndexMut;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::gapless_assert_simple;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ClauseReference {
    id: u32,
}

impl StorageKey for ClauseReference {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        ClauseReference { id: index as u32 }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Clause {
    literals: Vec<Literal>,
    is_learned: bool,
}

impl Clause {
    fn new(literals: Vec<Literal>, is_learned: bool) -> Clause {
        gapless_assert_simple!(literals.len() >= 2);
        Clause {
            literals,
            is_learned,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.literals.len()
    }

    pub(crate) fn is_learned(&self) -> bool {
        self.is_learned
    }

    pub(crate) fn get_literal_slice(&self) -> &[Literal] {
        &self.literals
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Literal {
        &self.literals[index]
    }
}

impl IndexMut<usize> for Clause {
    fn index_mut(&mut self, index: usize) -> &mut Literal {
        &mut self.literals[index]
    }
}

/// Owns every clause of at least two literals; unit clauses live on the trail instead.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClauseAllocator {
    allocated_clauses: KeyedVec<ClauseReference, Clause>,
}

impl ClauseAllocator {
    pub(crate) fn create_clause(
        &mut self,
        literals: Vec<Literal>,
        is_learned: bool,
    ) -> ClauseReference {
        self.allocated_clauses.push(Clause::new(literals, is_learned))
    }

    pub(crate) fn get_clause(&self, clause_reference: ClauseReference) -> &Clause {
        &self.allocated_clauses[clause_reference]
    }

    pub(crate) fn get_mutable_clause(&mut self, clause_reference: ClauseReference) -> &mut Clause {
        &mut self.allocated_clauses[clause_reference]
    }

    pub(crate) fn num_clauses(&self) -> usize {
        self.allocated_clauses.len()
    }

    pub(crate) fn num_learned_clauses(&self) -> usize {
        self.allocated_clauses
            .iter()
            .filter(|clause| clause.is_learned())
            .count()
    }
}
