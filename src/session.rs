//! Interactive play: human vs. agent on stdin/stdout.
//!
//! The session owns the board, the iteration settings, and the RNG. Forced
//! passes are applied automatically; the agent searches and plays on its
//! turns; on the human's turn the board and legal moves are printed and one
//! line is read:
//!
//! - a square in algebraic notation (`d3`) plays that move if it is legal
//! - `help` runs a shorter assistance search and recommends a move
//! - `quit` ends the session
//!
//! Anything else re-prompts.

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::board::{Color, GameBoard, Move};
use crate::mcts::Mcts;

/// What one line of human input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Move(Move),
    Help,
    Quit,
    Invalid(String),
}

/// Interpret a line of input for the player of `color`.
///
/// `pass` is not accepted: passes are forced by the session when the mover
/// has no legal move, never chosen.
fn interpret_input(color: Color, line: &str) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("help") {
        return Input::Help;
    }
    if line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }
    match Move::from_notation(color, line) {
        Ok(m) if !m.is_pass() => Input::Move(m),
        _ => Input::Invalid(line.to_string()),
    }
}

/// An interactive game session.
pub struct InteractiveSession {
    board: GameBoard,
    human: Color,
    iterations: usize,
    assist_iterations: usize,
    rng: fastrand::Rng,
}

impl InteractiveSession {
    pub fn new(
        human: Color,
        iterations: usize,
        assist_iterations: usize,
        rng: fastrand::Rng,
    ) -> Self {
        InteractiveSession {
            board: GameBoard::opening(),
            human,
            iterations,
            assist_iterations,
            rng,
        }
    }

    /// Run the session until the game ends, stdin closes, or the human
    /// quits. Prints the final score either way.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut out = io::stdout();

        while !self.board.is_game_complete() {
            let mover = self.board.current_player();
            let legal = self.board.legal_moves(mover);

            if legal.is_empty() {
                writeln!(out, "{mover} passes (forced)")?;
                self.board.apply_pass();
                continue;
            }

            if mover != self.human {
                match self.search_move(self.iterations) {
                    Some(mv) => {
                        writeln!(out, "agent plays {}", mv.notation())?;
                        self.board.apply_move(mv);
                    }
                    None => self.board.apply_pass(),
                }
                continue;
            }

            write!(out, "{}", self.board)?;
            let notations: Vec<String> = legal.iter().map(|m| m.notation()).collect();
            writeln!(out, "legal moves: {}", notations.join(" "))?;
            writeln!(out, "your move ({mover}), or 'help' / 'quit':")?;
            out.flush()?;

            let Some(line) = lines.next() else { break };
            match interpret_input(self.human, &line?) {
                Input::Move(mv) if legal.contains(&mv) => {
                    info!(player = %mover, mv = %mv.notation(), "human plays");
                    self.board.apply_move(mv);
                }
                Input::Help => {
                    writeln!(out, "thinking...")?;
                    match self.search_move(self.assist_iterations) {
                        Some(mv) => writeln!(out, "agent recommends {}", mv.notation())?,
                        None => writeln!(out, "no move to recommend")?,
                    }
                }
                Input::Quit => break,
                Input::Move(_) | Input::Invalid(_) => {
                    writeln!(out, "invalid move, try again (e.g. a1, d3)")?;
                }
            }
        }

        writeln!(
            out,
            "final score: black {} | white {}",
            self.board.count_pieces(Color::Black),
            self.board.count_pieces(Color::White)
        )
    }

    fn search_move(&mut self, iterations: usize) -> Option<Move> {
        let mut mcts = Mcts::new(self.board.clone(), iterations, false);
        mcts.search(&mut self.rng)
    }
}
