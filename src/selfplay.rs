//! Self-play game drivers.
//!
//! Each driver plays one full game from the opening position, building a
//! fresh [`Mcts`] controller per move. Forced passes are applied here, never
//! by the engine: a driver passes only after seeing an empty legal-move
//! list for the mover.
//!
//! The collection driver keeps the record file as a lookup table: positions
//! it has already analyzed replay their stored best move instead of being
//! searched again, and every new search appends a record.

use std::path::Path;

use tracing::{debug, info};

use crate::board::{Color, GameBoard};
use crate::export::{self, SearchRecord};
use crate::mcts::Mcts;

/// Final disc counts of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub black: u32,
    pub white: u32,
}

impl GameResult {
    fn from_board(board: &GameBoard) -> GameResult {
        GameResult {
            black: board.count_pieces(Color::Black),
            white: board.count_pieces(Color::White),
        }
    }

    /// The color with strictly more discs; `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

fn log_board(board: &GameBoard) {
    for line in board.to_string().lines() {
        debug!("{line}");
    }
}

/// Play a full MCTS-vs-MCTS game.
pub fn play_self_play_game(
    iterations: usize,
    verbose: bool,
    rng: &mut fastrand::Rng,
) -> GameResult {
    let mut board = GameBoard::opening();

    while !board.is_game_complete() {
        let mover = board.current_player();
        if board.legal_moves(mover).is_empty() {
            info!(player = %mover, "forced pass");
            board.apply_pass();
            continue;
        }

        let mut mcts = Mcts::new(board.clone(), iterations, verbose);
        match mcts.search(rng) {
            Some(mv) => {
                info!(player = %mover, mv = %mv.notation(), "plays");
                board.apply_move(mv);
                log_board(&board);
            }
            None => board.apply_pass(),
        }
    }

    let result = GameResult::from_board(&board);
    info!(black = result.black, white = result.white, "final score");
    result
}

/// Play the agent against a uniformly random opponent.
pub fn play_vs_random_game(
    iterations: usize,
    agent_color: Color,
    verbose: bool,
    rng: &mut fastrand::Rng,
) -> GameResult {
    let mut board = GameBoard::opening();

    while !board.is_game_complete() {
        let mover = board.current_player();
        let legal = board.legal_moves(mover);
        if legal.is_empty() {
            info!(player = %mover, "forced pass");
            board.apply_pass();
            continue;
        }

        if mover == agent_color {
            let mut mcts = Mcts::new(board.clone(), iterations, verbose);
            match mcts.search(rng) {
                Some(mv) => {
                    info!(player = %mover, mv = %mv.notation(), "agent plays");
                    board.apply_move(mv);
                }
                None => board.apply_pass(),
            }
        } else {
            let mv = legal[rng.usize(..legal.len())];
            info!(player = %mover, mv = %mv.notation(), "random plays");
            board.apply_move(mv);
        }
        log_board(&board);
    }

    let result = GameResult::from_board(&board);
    info!(black = result.black, white = result.white, "final score");
    result
}

/// Play one self-play game, persisting search statistics for every position
/// that had to be searched. Positions already present in the record file
/// replay their stored best move instead.
pub fn collect_game_data(
    iterations: usize,
    out: &Path,
    verbose: bool,
    rng: &mut fastrand::Rng,
) -> anyhow::Result<GameResult> {
    let mut records = export::load_records(out)?;
    let mut new_records = 0usize;
    let mut board = GameBoard::opening();

    while !board.is_game_complete() {
        let mover = board.current_player();
        if board.legal_moves(mover).is_empty() {
            board.apply_pass();
            continue;
        }

        if let Some(mv) = export::find_record(&records, &board).and_then(SearchRecord::best_move) {
            info!(player = %mover, mv = %mv.notation(), "replaying stored best move");
            board.apply_move(mv);
            continue;
        }

        let mut mcts = Mcts::new(board.clone(), iterations, verbose);
        let Some(mv) = mcts.search(rng) else {
            board.apply_pass();
            continue;
        };

        records.push(SearchRecord::from_stats(&board, &mcts.root_stats()));
        new_records += 1;

        info!(player = %mover, mv = %mv.notation(), "plays");
        board.apply_move(mv);
    }

    export::save_records(out, &records)?;
    info!(new_records, total = records.len(), "saved search records");
    Ok(GameResult::from_board(&board))
}
