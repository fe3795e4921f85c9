//! Constants for the board layout, move generation, and MCTS parameters.
//!
//! The board is a pair of 64-bit occupancy masks, one per color. Square
//! indices run 0..63 with bit 63 at `a1` and bit 0 at `h8`; adding 1 to an
//! index moves one file toward `a`, adding 8 moves one rank toward row 1.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of squares on the board.
pub const NUM_SQUARES: usize = 64;

/// Mask with every square occupied.
pub const FULL_BOARD: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// Starting occupancy for Black: the `d5` and `e4` central squares.
pub const BLACK_START: u64 = 0x0000_0008_1000_0000;

/// Starting occupancy for White: the `e5` and `d4` central squares.
pub const WHITE_START: u64 = 0x0000_0010_0800_0000;

// =============================================================================
// Direction Tables
// =============================================================================

/// Number of compass directions a capture line can run in.
pub const DIRECTION_COUNT: usize = 8;

/// Signed bit-index increment for each direction.
///
/// Positive increments are applied as left shifts, negative as right shifts.
/// Order matches [`DIR_MASKS`].
pub const DIR_SHIFTS: [i8; DIRECTION_COUNT] = [8, 9, 1, -7, -8, -9, -1, 7];

/// Per-direction edge masks, applied after each shift.
///
/// A shifted mask may carry bits across the board edge onto the wrong rank
/// or file; intersecting with the direction's mask keeps only squares that
/// are genuine one-step neighbors in that direction.
pub const DIR_MASKS: [u64; DIRECTION_COUNT] = [
    0xFFFF_FFFF_FFFF_FF00, // +8
    0xFEFE_FEFE_FEFE_FE00, // +9
    0xFEFE_FEFE_FEFE_FEFE, // +1
    0x00FE_FEFE_FEFE_FEFE, // -7
    0x00FF_FFFF_FFFF_FFFF, // -8
    0x007F_7F7F_7F7F_7F7F, // -9
    0x7F7F_7F7F_7F7F_7F7F, // -1
    0x7F7F_7F7F_7F7F_7F00, // +7
];

/// Longest possible run of opponent discs inside a capture line.
/// Six interior squares fit between two discs on an 8-wide board.
pub const MAX_LINE_RUN: usize = 6;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// UCT exploration constant.
pub const UCT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Default number of search iterations per move.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default number of iterations for interactive move assistance.
pub const ASSIST_ITERATIONS: usize = 100;
