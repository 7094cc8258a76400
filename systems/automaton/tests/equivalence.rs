use std::collections::HashSet;

use life_sandbox_core::{Board, CellCoord};
use life_sandbox_system_automaton::{advance, dense, Engine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Straightforward full-grid scan written independently of both engines.
fn naive_next(board: &Board) -> HashSet<CellCoord> {
    let mut next = HashSet::new();
    for row in 0..board.height() {
        for column in 0..board.width() {
            let mut count = 0;
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    if dc == 0 && dr == 0 {
                        continue;
                    }
                    let c = i64::from(column) + dc;
                    let r = i64::from(row) + dr;
                    if c < 0 || r < 0 || c >= i64::from(board.width()) || r >= i64::from(board.height())
                    {
                        continue;
                    }
                    if board.is_alive(CellCoord::new(c as u32, r as u32)) {
                        count += 1;
                    }
                }
            }
            let cell = CellCoord::new(column, row);
            let alive = board.is_alive(cell);
            if count == 3 || (alive && count == 2) {
                let _ = next.insert(cell);
            }
        }
    }
    next
}

fn random_board(rng: &mut ChaCha8Rng, width: u32, height: u32, fill: f64) -> Board {
    let mut board = Board::new(width, height).expect("valid dimensions");
    let cells: Vec<_> = (0..height)
        .flat_map(|row| (0..width).map(move |column| CellCoord::new(column, row)))
        .filter(|_| rng.gen_bool(fill))
        .collect();
    board.seed_pattern(cells).expect("cells on board");
    board
}

fn live_set(board: &Board) -> HashSet<CellCoord> {
    board.live_cells().collect()
}

#[test]
fn sparse_matches_naive_scan_on_random_boards() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_11fe);
    for round in 0..40 {
        let width = rng.gen_range(1..=24);
        let height = rng.gen_range(1..=24);
        let fill = rng.gen_range(0.05..0.6);
        let board = random_board(&mut rng, width, height, fill);

        assert_eq!(
            live_set(&advance(&board)),
            naive_next(&board),
            "round {round}: {width}x{height} board diverged from the naive scan"
        );
    }
}

#[test]
fn sparse_and_dense_agree_across_long_runs() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..8 {
        let mut sparse = random_board(&mut rng, 32, 20, 0.3);
        let mut dense = sparse.clone();
        for generation in 1..=60 {
            sparse = advance(&sparse);
            dense = dense::advance(&dense).expect("small board");
            assert_eq!(sparse, dense, "engines diverged at generation {generation}");
        }
    }
}

#[test]
fn engine_selector_dispatches_to_both_implementations() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let board = random_board(&mut rng, 16, 16, 0.4);
    let expected = naive_next(&board);
    for engine in Engine::ALL {
        let next = engine.advance(&board).expect("small board");
        assert_eq!(live_set(&next), expected, "{engine} engine");
    }
}

#[test]
fn saturated_board_collapses_identically() {
    let mut board = Board::new(5, 4).expect("valid dimensions");
    let every_cell: Vec<_> = (0..4)
        .flat_map(|row| (0..5).map(move |column| CellCoord::new(column, row)))
        .collect();
    board.seed_pattern(every_cell).expect("cells on board");

    let next = advance(&board);
    assert_eq!(live_set(&next), naive_next(&board));
    // Only the four corners keep exactly three neighbors.
    assert_eq!(next.population(), 4);
}
