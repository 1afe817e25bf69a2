use crate::basic_types::CumulativeMovingAverage;
use crate::create_statistics_struct;

create_statistics_struct!(
    /// Statistics of the search performed by a single solver.
    SolverStatistics {
        /// Core statistics of the solver engine (e.g. the number of decisions)
        engine_statistics: EngineStatistics,
        /// The statistics related to clause learning
        learned_clause_statistics: LearnedClauseStatistics,
    }
);

create_statistics_struct!(
    /// Core statistics of the solver engine (e.g. the number of decisions)
    EngineStatistics {
        /// The number of decisions taken by the solver
        num_decisions: u64,
        /// The number of conflicts encountered by the solver
        num_conflicts: u64,
        /// The number of times the solver has restarted
        num_restarts: u64,
        /// The number of literals set by propagation
        num_propagations: u64,
        /// The time spent in the solver, in milliseconds
        time_spent_in_solver: u64,
    }
);

create_statistics_struct!(
    /// The statistics related to clause learning
    LearnedClauseStatistics {
        /// The number of learned clauses which have a size of 1
        num_unit_clauses_learned: u64,
        /// The average length of the learned clauses
        average_learned_clause_length: CumulativeMovingAverage,
        /// The average number of literals removed from learned clauses by minimisation
        average_number_of_removed_literals: CumulativeMovingAverage,
        /// The average number of levels which have been backtracked after a conflict
        average_backtrack_amount: CumulativeMovingAverage,
    }
);
