//! Integration tests for the board layer.
//!
//! The centerpiece is the scan-reference sweep: the bit-parallel move
//! generator and the capture resolution are checked against an exhaustive
//! per-square, per-direction walk over rank/file coordinates. The reference
//! never touches the shift/mask tables, so a wraparound mistake in either
//! implementation shows up as a disagreement instead of hiding in both.

use othello_mcts::board::{Bitboard, Color, GameBoard, Move, parse_square};

// =============================================================================
// Scan reference implementation
// =============================================================================

/// The 8 compass directions as (row, col) deltas in bit-index space.
const DIRS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn occupied(bits: u64, sq: i32) -> bool {
    (bits >> sq) & 1 != 0
}

/// Walk one direction from `sq` and report whether it is a closed capture
/// line: one or more opponent discs ending on a player disc.
fn line_closes(player: u64, opp: u64, sq: i32, dr: i32, dc: i32) -> bool {
    let mut r = sq / 8 + dr;
    let mut c = sq % 8 + dc;
    let mut run = 0;

    while (0..8).contains(&r) && (0..8).contains(&c) {
        let p = r * 8 + c;
        if occupied(opp, p) {
            run += 1;
        } else if occupied(player, p) {
            return run > 0;
        } else {
            return false;
        }
        r += dr;
        c += dc;
    }
    false
}

/// Exhaustive legal-move reference.
fn reference_move_mask(player: u64, opp: u64) -> u64 {
    let mut legal = 0u64;
    for sq in 0..64i32 {
        if occupied(player, sq) || occupied(opp, sq) {
            continue;
        }
        for (dr, dc) in DIRS {
            if line_closes(player, opp, sq, dr, dc) {
                legal |= 1u64 << sq;
                break;
            }
        }
    }
    legal
}

/// Exhaustive flip reference for a disc placed on `sq`.
fn reference_flips(player: u64, opp: u64, sq: i32) -> u64 {
    let mut flips = 0u64;
    for (dr, dc) in DIRS {
        let mut line = 0u64;
        let mut r = sq / 8 + dr;
        let mut c = sq % 8 + dc;

        while (0..8).contains(&r) && (0..8).contains(&c) {
            let p = r * 8 + c;
            if occupied(opp, p) {
                line |= 1u64 << p;
            } else if occupied(player, p) {
                flips |= line;
                break;
            } else {
                break;
            }
            r += dr;
            c += dc;
        }
    }
    flips
}

// =============================================================================
// Generator / reference equivalence
// =============================================================================

#[test]
fn test_opening_matches_scan_reference() {
    let board = GameBoard::opening();
    for c in [Color::Black, Color::White] {
        let player = board.bitboard(c).bits();
        let opp = board.bitboard(c.opposite()).bits();
        assert_eq!(board.legal_move_mask(c), reference_move_mask(player, opp));
    }
}

#[test]
fn test_random_games_match_scan_reference() {
    let mut rng = fastrand::Rng::with_seed(2024);

    for game in 0..20 {
        let mut board = GameBoard::opening();

        loop {
            // Move masks agree for both colors at every reached position,
            // including the near-edge and near-corner shapes that random
            // play piles up toward the end of a game.
            for c in [Color::Black, Color::White] {
                let player = board.bitboard(c).bits();
                let opp = board.bitboard(c.opposite()).bits();
                assert_eq!(
                    board.legal_move_mask(c),
                    reference_move_mask(player, opp),
                    "move mask diverges for {c} in game {game}"
                );
            }

            if board.is_game_complete() {
                break;
            }

            let mover = board.current_player();
            let legal = board.legal_moves(mover);
            if legal.is_empty() {
                board.apply_pass();
                continue;
            }

            let mv = legal[rng.usize(..legal.len())];
            let sq = i32::from(mv.square().expect("legal moves are never passes"));
            let player = board.bitboard(mover).bits();
            let opp = board.bitboard(mover.opposite()).bits();
            let expected = reference_flips(player, opp, sq);

            board.apply_move(mv);

            let flipped = opp & !board.bitboard(mover.opposite()).bits();
            assert_eq!(
                flipped, expected,
                "flip set diverges on {} in game {game}",
                mv.notation()
            );
            assert_eq!(
                board.bitboard(mover).bits(),
                player | (1u64 << sq) | expected,
                "mover gains exactly the placed disc and the flips"
            );
        }
    }
}

// =============================================================================
// Edge and corner behavior
// =============================================================================

#[test]
fn test_no_wraparound_across_rows() {
    // a2 and h1 are adjacent bit indices but not adjacent squares; neither
    // side may see a move through that seam.
    let black = Bitboard::with_bits(Color::Black, 1u64 << parse_square("a2").unwrap());
    let white = Bitboard::with_bits(Color::White, 1u64 << parse_square("h1").unwrap());
    let board = GameBoard::new(black, white).unwrap();

    assert_eq!(board.legal_move_mask(Color::Black), 0);
    assert_eq!(board.legal_move_mask(Color::White), 0);
}

#[test]
fn test_corner_line_capture() {
    // a1 (black), b1 (white): c1 closes the line for black.
    let black = Bitboard::with_bits(Color::Black, 1u64 << parse_square("a1").unwrap());
    let white = Bitboard::with_bits(Color::White, 1u64 << parse_square("b1").unwrap());
    let board = GameBoard::new(black, white).unwrap();

    let notations: Vec<String> = board
        .legal_moves(Color::Black)
        .iter()
        .map(|m| m.notation())
        .collect();
    assert_eq!(notations, ["c1"]);

    let mut board = board;
    board.apply_move(Move::from_notation(Color::Black, "c1").unwrap());
    assert_eq!(board.count_pieces(Color::Black), 3);
    assert_eq!(board.count_pieces(Color::White), 0);
}

#[test]
fn test_edge_run_to_the_far_corner() {
    // Black h8, white g8..b8: a8 captures a full six-disc edge run.
    let mut white_bits = 0u64;
    for s in ["b8", "c8", "d8", "e8", "f8", "g8"] {
        white_bits |= 1u64 << parse_square(s).unwrap();
    }
    let black = Bitboard::with_bits(Color::Black, 1u64 << parse_square("h8").unwrap());
    let white = Bitboard::with_bits(Color::White, white_bits);
    let board = GameBoard::new(black, white).unwrap();

    let mask = board.legal_move_mask(Color::Black);
    assert_eq!(mask, 1u64 << parse_square("a8").unwrap());

    let mut board = board;
    board.apply_move(Move::from_notation(Color::Black, "a8").unwrap());
    assert_eq!(board.count_pieces(Color::Black), 8);
    assert_eq!(board.count_pieces(Color::White), 0);
}

// =============================================================================
// Game-level invariants
// =============================================================================

#[test]
fn test_disc_count_grows_by_one_per_move() {
    let mut rng = fastrand::Rng::with_seed(31);
    let mut board = GameBoard::opening();

    while !board.is_game_complete() {
        let total = board.count_pieces(Color::Black) + board.count_pieces(Color::White);
        let mover = board.current_player();
        let legal = board.legal_moves(mover);

        if legal.is_empty() {
            board.apply_pass();
            let after = board.count_pieces(Color::Black) + board.count_pieces(Color::White);
            assert_eq!(after, total, "a pass never changes occupancy");
            continue;
        }

        board.apply_move(legal[rng.usize(..legal.len())]);
        let after = board.count_pieces(Color::Black) + board.count_pieces(Color::White);
        assert_eq!(after, total + 1, "a move occupies exactly one new square");
        assert!(after <= 64);
    }
}

#[test]
fn test_boards_never_overlap_during_play() {
    let mut rng = fastrand::Rng::with_seed(47);
    let mut board = GameBoard::opening();

    while !board.is_game_complete() {
        assert_eq!(
            board.bitboard(Color::Black).bits() & board.bitboard(Color::White).bits(),
            0
        );
        let legal = board.legal_moves(board.current_player());
        if legal.is_empty() {
            board.apply_pass();
        } else {
            board.apply_move(legal[rng.usize(..legal.len())]);
        }
    }
}

#[test]
fn test_stuck_board_is_complete_without_being_full() {
    // One lone black disc and nothing to capture: neither side can move.
    let black = Bitboard::with_bits(Color::Black, 1u64 << parse_square("a1").unwrap());
    let white = Bitboard::with_bits(Color::White, 0);
    let board = GameBoard::new(black, white).unwrap();

    assert_eq!(board.legal_move_mask(Color::Black), 0);
    assert_eq!(board.legal_move_mask(Color::White), 0);
    assert!(board.is_game_complete());
    assert!(board.count_pieces(Color::Black) + board.count_pieces(Color::White) < 64);
}
