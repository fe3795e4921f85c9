//! Persistence of search statistics.
//!
//! Every searched position can be captured as a [`SearchRecord`]: the two
//! occupancy masks, the side to move, and the root children's final
//! statistics sorted best first. Records are written as JSON for the
//! offline training pipeline; this module knows nothing about how that
//! pipeline consumes them beyond the record shape.
//!
//! A loaded record set doubles as a lookup table: [`find_record`] matches a
//! live position so a data-collection game can replay a stored best move
//! instead of searching the same position again.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{Color, GameBoard, Move};
use crate::mcts::MoveStats;

/// One root child's final statistics in serializable form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub square: u8,
    pub notation: String,
    pub wins: f64,
    pub visits: u32,
    pub ratio: f64,
}

/// A searched position with its per-move statistics, best first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub bits_black: u64,
    pub bits_white: u64,
    /// Side to move: -1 for black, 1 for white.
    pub to_move: i8,
    pub results: Vec<MoveRecord>,
}

impl SearchRecord {
    /// Capture a finished search over `board`. `stats` comes from
    /// [`crate::mcts::Mcts::root_stats`] and is already sorted best first;
    /// the order is preserved.
    pub fn from_stats(board: &GameBoard, stats: &[MoveStats]) -> SearchRecord {
        SearchRecord {
            bits_black: board.bitboard(Color::Black).bits(),
            bits_white: board.bitboard(Color::White).bits(),
            to_move: board.current_player().as_i8(),
            results: stats
                .iter()
                .filter_map(|s| {
                    s.mv.square().map(|square| MoveRecord {
                        square,
                        notation: s.mv.notation(),
                        wins: s.wins,
                        visits: s.visits,
                        ratio: s.win_ratio,
                    })
                })
                .collect(),
        }
    }

    /// Whether this record was taken from exactly this position (both
    /// masks and the side to move).
    pub fn matches(&self, board: &GameBoard) -> bool {
        self.bits_black == board.bitboard(Color::Black).bits()
            && self.bits_white == board.bitboard(Color::White).bits()
            && self.to_move == board.current_player().as_i8()
    }

    /// The stored best move (records keep results best first).
    pub fn best_move(&self) -> Option<Move> {
        let color = Color::from_i8(self.to_move).ok()?;
        let first = self.results.first()?;
        Move::new(color, first.square).ok()
    }
}

/// Write records as pretty-printed JSON, replacing any existing file.
pub fn save_records(path: &Path, records: &[SearchRecord]) -> anyhow::Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("creating record file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)
        .with_context(|| format!("writing records to {}", path.display()))?;
    Ok(())
}

/// Read records back. A missing file is an empty record set, so a first
/// collection run starts from nothing without special-casing.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<SearchRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading record file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("parsing records in {}", path.display()))
}

/// The stored record for a live position, if one exists.
pub fn find_record<'a>(records: &'a [SearchRecord], board: &GameBoard) -> Option<&'a SearchRecord> {
    records.iter().find(|r| r.matches(board))
}
