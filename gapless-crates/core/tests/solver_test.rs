#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::num::NonZeroUsize;

use gapless_core::constraints;
use gapless_core::termination::Indefinite;
use gapless_core::variables::Literal;
use gapless_core::Model;
use gapless_core::Portfolio;
use gapless_core::RestartOptions;
use gapless_core::SatisfactionResult;
use gapless_core::SequenceGeneratorType;
use gapless_core::Solver;
use gapless_core::SolverOptions;

/// Queens on an `n` by `n` board, one per row and column and at most one per diagonal.
fn queens(n: usize) -> (Model, Vec<Vec<Literal>>) {
    let mut model = Model::default();
    let board = (0..n)
        .map(|row| {
            (0..n)
                .map(|column| model.new_named_literal(format!("q_{row}_{column}")))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    for row in &board {
        model.add_constraint(constraints::exactly_one(row.iter().copied()));
    }
    for column in 0..n {
        model.add_constraint(constraints::exactly_one(board.iter().map(|row| row[column])));
    }
    for offset in 0..(2 * n - 1) {
        let diagonal = (0..n)
            .filter_map(|row| (offset >= row && offset - row < n).then(|| board[row][offset - row]))
            .collect::<Vec<_>>();
        model.add_constraint(constraints::at_most_one(diagonal));

        let anti_diagonal = (0..n)
            .filter_map(|row| {
                let column = offset as isize - (n as isize - 1) + row as isize;
                (0..n as isize)
                    .contains(&column)
                    .then(|| board[row][column as usize])
            })
            .collect::<Vec<_>>();
        model.add_constraint(constraints::at_most_one(anti_diagonal));
    }

    (model, board)
}

#[test]
fn eight_queens_are_placed() {
    let (model, board) = queens(8);
    let mut solver = Solver::from_model(&model, SolverOptions::default());
    let mut brancher = solver.default_brancher();

    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
    else {
        panic!("eight queens can be placed");
    };

    let placed = board
        .iter()
        .flatten()
        .filter(|&&queen| solution.get_literal_value(queen))
        .count();
    assert_eq!(placed, 8);
    assert!(model
        .constraints()
        .iter()
        .all(|constraint| constraint.is_satisfied_by(&solution)));
}

#[test]
fn three_queens_cannot_be_placed() {
    let (model, _) = queens(3);
    let mut solver = Solver::from_model(&model, SolverOptions::default());
    let mut brancher = solver.default_brancher();

    let result = solver.satisfy(&mut brancher, &mut Indefinite);

    assert_eq!(result, SatisfactionResult::Unsatisfiable);
}

#[test]
fn names_of_the_model_carry_over_to_the_solver() {
    let (model, board) = queens(4);
    let solver = Solver::from_model(&model, SolverOptions::default());

    let variable = board[2][3].get_propositional_variable();
    assert_eq!(
        solver.variable_names().get_propositional_name(variable),
        Some("q_2_3")
    );
}

#[test]
fn every_restart_strategy_solves_the_same_problem() {
    let (model, _) = queens(6);

    for sequence_generator_type in [
        SequenceGeneratorType::Constant,
        SequenceGeneratorType::Geometric,
        SequenceGeneratorType::Luby,
    ] {
        let options = SolverOptions {
            restart_options: RestartOptions {
                sequence_generator_type,
                base_interval: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut solver = Solver::from_model(&model, options);
        let mut brancher = solver.default_brancher();

        let result = solver.satisfy(&mut brancher, &mut Indefinite);
        assert!(
            matches!(result, SatisfactionResult::Satisfiable(_)),
            "{sequence_generator_type} did not find a solution"
        );
    }
}

#[test]
fn portfolio_and_single_solver_agree() {
    let (model, _) = queens(5);
    let portfolio = Portfolio::new(
        NonZeroUsize::new(3).expect("non-zero"),
        SolverOptions::default(),
    );

    let outcome = portfolio.solve(&model, Indefinite);

    let SatisfactionResult::Satisfiable(solution) = outcome.result else {
        panic!("five queens can be placed");
    };
    assert!(model
        .constraints()
        .iter()
        .all(|constraint| constraint.is_satisfied_by(&solution)));
    assert!(outcome.statistics.engine_statistics.num_decisions > 0);
}
