//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves until the game ends, then
//! scores the final position for a fixed reference color. Rollouts are the
//! dominant cost of a search, so this path stays allocation-light: one board
//! clone per playout and one move vector per ply.
//!
//! Randomness comes only from the caller's [`fastrand::Rng`], so a seeded
//! search replays identically.

use crate::board::{Color, GameBoard};

/// Play a uniformly random game to completion from `board` and score it.
///
/// Whenever the mover has legal moves, one is chosen uniformly at random;
/// when it has none, the turn passes. The game ends on the board's own
/// terminal test (neither side can move, or the board is full).
///
/// Returns `1.0` if `reference` ends with strictly more discs than its
/// opponent, else `0.0`. A tie scores `0.0`.
pub fn random_playout(board: &GameBoard, reference: Color, rng: &mut fastrand::Rng) -> f64 {
    let mut board = board.clone();

    while !board.is_game_complete() {
        let moves = board.legal_moves(board.current_player());
        if moves.is_empty() {
            board.apply_pass();
        } else {
            board.apply_move(moves[rng.usize(..moves.len())]);
        }
    }

    let ours = board.count_pieces(reference);
    let theirs = board.count_pieces(reference.opposite());
    if ours > theirs { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_terminates_and_scores_binary() {
        let board = GameBoard::opening();
        let mut rng = fastrand::Rng::with_seed(7);

        for _ in 0..10 {
            let score = random_playout(&board, Color::Black, &mut rng);
            assert!(score == 0.0 || score == 1.0);
        }
    }

    #[test]
    fn test_playout_is_deterministic_under_seed() {
        let board = GameBoard::opening();

        let mut a = fastrand::Rng::with_seed(99);
        let mut b = fastrand::Rng::with_seed(99);
        for _ in 0..20 {
            assert_eq!(
                random_playout(&board, Color::Black, &mut a),
                random_playout(&board, Color::Black, &mut b)
            );
        }
    }

    #[test]
    fn test_playout_leaves_input_untouched() {
        let board = GameBoard::opening();
        let mut rng = fastrand::Rng::with_seed(3);
        random_playout(&board, Color::White, &mut rng);

        assert_eq!(board.count_pieces(Color::Black), 2);
        assert_eq!(board.count_pieces(Color::White), 2);
    }

    #[test]
    fn test_playout_on_terminal_board_scores_immediately() {
        use crate::board::Bitboard;

        // Full board: 40 black, 24 white.
        let black = Bitboard::with_bits(Color::Black, 0xFFFF_FFFF_FF00_0000);
        let white = Bitboard::with_bits(Color::White, 0x0000_0000_00FF_FFFF);
        let board = GameBoard::new(black, white).unwrap();
        let mut rng = fastrand::Rng::with_seed(1);

        assert_eq!(random_playout(&board, Color::Black, &mut rng), 1.0);
        assert_eq!(random_playout(&board, Color::White, &mut rng), 0.0);
    }
}
