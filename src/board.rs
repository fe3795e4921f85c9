//! Othello board representation and move execution.
//!
//! This module provides the core game logic, including:
//! - A 64-bit occupancy mask per color ([`Bitboard`])
//! - Bit-parallel legal-move generation with per-direction edge masks
//! - Line-capture resolution when a move is applied
//! - Algebraic move notation (`a1`..`h8`) parsing and rendering
//!
//! Square indices run 0..63 with bit 63 at `a1` and bit 0 at `h8` (see
//! [`crate::constants`] for the direction tables built on that layout).
//!
//! `apply_move` trusts its caller: legality is checked by whoever picked the
//! move, not here. Construction and notation input are validated eagerly and
//! fail with a [`BoardError`] instead of producing a corrupt board.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    BLACK_START, DIR_MASKS, DIR_SHIFTS, DIRECTION_COUNT, FULL_BOARD, MAX_LINE_RUN, NUM_SQUARES,
    WHITE_START,
};

/// Disc color. Black moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other color.
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Signed representation: Black is -1, White is +1.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Color::Black => -1,
            Color::White => 1,
        }
    }

    /// Inverse of [`Color::as_i8`].
    pub fn from_i8(v: i8) -> Result<Color, BoardError> {
        match v {
            -1 => Ok(Color::Black),
            1 => Ok(Color::White),
            _ => Err(BoardError::UnknownColor(v.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl FromStr for Color {
    type Err = BoardError;

    /// Accepts `black`/`white` (any case) and the signed forms `-1`/`1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("black") || s == "-1" {
            Ok(Color::Black)
        } else if s.eq_ignore_ascii_case("white") || s == "1" {
            Ok(Color::White)
        } else {
            Err(BoardError::UnknownColor(s.to_string()))
        }
    }
}

/// Validation failures from board construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Square index outside 0..=63.
    OutOfRange(usize),
    /// Move notation that does not name a square.
    BadNotation(String),
    /// Color input that is neither black nor white.
    UnknownColor(String),
    /// Both bitboards handed to a board carry the same color.
    DuplicateColor(Color),
    /// The two bitboards handed to a board occupy a common square.
    OverlappingBoards,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange(pos) => {
                write!(f, "square index {pos} is outside 0..=63")
            }
            BoardError::BadNotation(s) => write!(f, "'{s}' is not a square (expected a1..h8)"),
            BoardError::UnknownColor(s) => write!(f, "'{s}' is not a color"),
            BoardError::DuplicateColor(c) => write!(f, "both bitboards are {c}"),
            BoardError::OverlappingBoards => write!(f, "bitboards occupy a common square"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Parse a two-character algebraic square (e.g. `d3`) into a square index.
pub fn parse_square(s: &str) -> Result<u8, BoardError> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(BoardError::BadNotation(s.to_string()));
    }

    let col = bytes[0].to_ascii_lowercase();
    let row = bytes[1];
    if !(b'a'..=b'h').contains(&col) || !(b'1'..=b'8').contains(&row) {
        return Err(BoardError::BadNotation(s.to_string()));
    }

    let x = 7 - (col - b'a');
    let y = 8 - (row - b'0');
    Ok(y * 8 + x)
}

/// Render a square index as algebraic notation.
///
/// Inverse of [`parse_square`] for every index in 0..=63.
pub fn square_notation(sq: u8) -> String {
    let col = (b'a' + (7 - sq % 8)) as char;
    let row = 8 - sq / 8;
    format!("{col}{row}")
}

/// A move: a color placing a disc on a square, or passing.
///
/// Immutable once constructed. Both constructors validate their input, so a
/// `Move` in hand always names a real square (or the pass marker) and board
/// logic never re-checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    color: Color,
    square: Option<u8>,
}

impl Move {
    /// A move placing a disc on `square`.
    pub fn new(color: Color, square: u8) -> Result<Move, BoardError> {
        if square as usize >= NUM_SQUARES {
            return Err(BoardError::OutOfRange(square as usize));
        }
        Ok(Move {
            color,
            square: Some(square),
        })
    }

    /// The pass move for `color`.
    pub fn pass(color: Color) -> Move {
        Move {
            color,
            square: None,
        }
    }

    /// Parse algebraic notation; `pass` (any case) is the pass move.
    pub fn from_notation(color: Color, s: &str) -> Result<Move, BoardError> {
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::pass(color));
        }
        parse_square(s).map(|sq| Move {
            color,
            square: Some(sq),
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn square(&self) -> Option<u8> {
        self.square
    }

    pub fn is_pass(&self) -> bool {
        self.square.is_none()
    }

    /// Algebraic notation for the move; `pass` for the pass move.
    pub fn notation(&self) -> String {
        match self.square {
            Some(sq) => square_notation(sq),
            None => "pass".into(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.notation())
    }
}

/// Occupancy mask for a single color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitboard {
    color: Color,
    bits: u64,
}

impl Bitboard {
    /// A bitboard holding the standard opening discs for `color`.
    pub fn new(color: Color) -> Bitboard {
        let bits = match color {
            Color::Black => BLACK_START,
            Color::White => WHITE_START,
        };
        Bitboard { color, bits }
    }

    /// A bitboard with an explicit occupancy mask.
    pub fn with_bits(color: Color, bits: u64) -> Bitboard {
        Bitboard { color, bits }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Set the bit at `pos`.
    pub fn set_bit(&mut self, pos: u8) -> Result<(), BoardError> {
        if pos as usize >= NUM_SQUARES {
            return Err(BoardError::OutOfRange(pos as usize));
        }
        self.bits |= 1u64 << pos;
        Ok(())
    }

    /// Clear the bit at `pos`.
    pub fn disable_bit(&mut self, pos: u8) -> Result<(), BoardError> {
        if pos as usize >= NUM_SQUARES {
            return Err(BoardError::OutOfRange(pos as usize));
        }
        self.bits &= !(1u64 << pos);
        Ok(())
    }

    /// Whether the bit at `pos` is set. Out-of-range positions are unset.
    pub fn get_bit_state(&self, pos: u8) -> bool {
        (pos as usize) < NUM_SQUARES && (self.bits >> pos) & 1 != 0
    }

    /// Population count of the occupancy mask.
    pub fn bitcount(&self) -> u32 {
        self.bits.count_ones()
    }
}

/// Shift an occupancy mask one step along a direction, clipping bits that
/// would wrap across the board edge.
#[inline]
fn shift_dir(bits: u64, dir: usize) -> u64 {
    let s = DIR_SHIFTS[dir];
    let shifted = if s >= 0 { bits << s } else { bits >> -s };
    shifted & DIR_MASKS[dir]
}

/// Bit-parallel legal-move mask for the player owning `player` bits.
///
/// Per direction: start from opponent discs adjacent to a player disc,
/// extend the run through further opponent discs, then land one more step
/// out. A landing square that is empty closes a capture line and is legal.
fn move_mask(player: u64, opp: u64) -> u64 {
    let empty = !(player | opp);
    let mut legal = 0u64;

    for dir in 0..DIRECTION_COUNT {
        let mut run = shift_dir(player, dir) & opp;
        for _ in 1..MAX_LINE_RUN {
            run |= shift_dir(run, dir) & opp;
        }
        legal |= shift_dir(run, dir) & empty;
    }

    legal
}

/// Discs flipped by placing a disc at `move_bit`.
///
/// Scans outward per direction, collecting contiguous opponent discs; the
/// line only flips if the scan ends on a player disc. Running off the edge
/// zeroes the probe, which ends the scan without a flip.
fn line_captures(move_bit: u64, player: u64, opp: u64) -> u64 {
    let mut flips = 0u64;

    for dir in 0..DIRECTION_COUNT {
        let mut line = 0u64;
        let mut probe = shift_dir(move_bit, dir);
        while probe & opp != 0 {
            line |= probe;
            probe = shift_dir(probe, dir);
        }
        if probe & player != 0 {
            flips |= line;
        }
    }

    flips
}

/// An Othello game position: two bitboards and whose turn it is.
///
/// The two bitboards are fixed fields for the lifetime of the board; which
/// color sits in which field is decided at construction (game drivers put
/// "their" player in `player_board`). Black always moves first.
#[derive(Clone, Debug)]
pub struct GameBoard {
    player_board: Bitboard,
    opp_board: Bitboard,
    current_player: Color,
}

impl GameBoard {
    /// Build a board from two bitboards. Fails if they share a color or
    /// occupy a common square.
    pub fn new(player_board: Bitboard, opp_board: Bitboard) -> Result<GameBoard, BoardError> {
        if player_board.color() == opp_board.color() {
            return Err(BoardError::DuplicateColor(player_board.color()));
        }
        if player_board.bits() & opp_board.bits() != 0 {
            return Err(BoardError::OverlappingBoards);
        }
        Ok(GameBoard {
            player_board,
            opp_board,
            current_player: Color::Black,
        })
    }

    /// The standard opening position.
    pub fn opening() -> GameBoard {
        GameBoard {
            player_board: Bitboard::new(Color::Black),
            opp_board: Bitboard::new(Color::White),
            current_player: Color::Black,
        }
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// The bitboard owned by `c`.
    pub fn bitboard(&self, c: Color) -> &Bitboard {
        if c == self.player_board.color() {
            &self.player_board
        } else {
            &self.opp_board
        }
    }

    fn bitboard_mut(&mut self, c: Color) -> &mut Bitboard {
        if c == self.player_board.color() {
            &mut self.player_board
        } else {
            &mut self.opp_board
        }
    }

    /// Disc count for `c`.
    pub fn count_pieces(&self, c: Color) -> u32 {
        self.bitboard(c).bitcount()
    }

    /// Legal destination mask for `c`.
    pub fn legal_move_mask(&self, c: Color) -> u64 {
        move_mask(self.bitboard(c).bits(), self.bitboard(c.opposite()).bits())
    }

    /// All legal moves for `c`, in ascending square order.
    pub fn legal_moves(&self, c: Color) -> Vec<Move> {
        let mask = self.legal_move_mask(c);
        (0..NUM_SQUARES as u8)
            .filter(|sq| (mask >> sq) & 1 != 0)
            .map(|sq| Move {
                color: c,
                square: Some(sq),
            })
            .collect()
    }

    /// Place the move's disc and flip every captured line, then hand the
    /// turn to the other color. A pass move delegates to [`apply_pass`].
    ///
    /// Legality is the caller's contract; applying a move that is not in
    /// `legal_moves` corrupts the position.
    ///
    /// [`apply_pass`]: GameBoard::apply_pass
    pub fn apply_move(&mut self, m: Move) {
        let Some(sq) = m.square() else {
            self.apply_pass();
            return;
        };

        let mover = m.color();
        let move_bit = 1u64 << sq;
        let player = self.bitboard(mover).bits();
        let opp = self.bitboard(mover.opposite()).bits();
        let flips = line_captures(move_bit, player, opp);

        self.bitboard_mut(mover).bits |= move_bit | flips;
        self.bitboard_mut(mover.opposite()).bits &= !flips;
        self.current_player = self.current_player.opposite();
    }

    /// Hand the turn to the other color without touching either bitboard.
    ///
    /// Never called implicitly: the search layer and game drivers pass only
    /// after seeing an empty `legal_moves`.
    pub fn apply_pass(&mut self) {
        self.current_player = self.current_player.opposite();
    }

    /// True when neither color has a legal move, or the board is full.
    pub fn is_game_complete(&self) -> bool {
        let p = self.player_board.bits();
        let o = self.opp_board.bits();

        if (p | o) == FULL_BOARD {
            return true;
        }
        move_mask(p, o) == 0 && move_mask(o, p) == 0
    }
}

impl fmt::Display for GameBoard {
    /// Text grid: column header, then rows 1..8 top to bottom with `B`,
    /// `W`, and `-` cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    A B C D E F G H")?;
        writeln!(f, "    * * * * * * * *")?;

        let black = self.bitboard(Color::Black);
        let white = self.bitboard(Color::White);

        for i in (0..NUM_SQUARES as u8).rev() {
            if i % 8 == 7 {
                write!(f, "{} * ", 8 - i / 8)?;
            }

            if black.get_bit_state(i) {
                write!(f, "B ")?;
            } else if white.get_bit_state(i) {
                write!(f, "W ")?;
            } else {
                write!(f, "- ")?;
            }

            if i % 8 == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
