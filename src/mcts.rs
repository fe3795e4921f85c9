//! Monte Carlo Tree Search (MCTS) implementation.
//!
//! This module implements plain UCT search with:
//! - Uniformly random single-move expansion (one new node per iteration)
//! - UCT child selection with exploration constant sqrt(2)
//! - Uniformly random playouts for value estimation
//! - Robust-child final move choice (most visits, not best ratio)
//!
//! The tree lives in an arena owned by the controller: children hold arena
//! indices, and each node keeps its parent's index for the backpropagation
//! walk. Parents own their children through the arena; there are no
//! reference cycles to manage.
//!
//! Rollout results are binary (win = 1.0, loss or tie = 0.0) for a reference
//! color fixed once per search — the color to move at the root — and are
//! added un-negated at every node on the path back to the root.

use tracing::info;

use crate::board::{GameBoard, Move};
use crate::constants::UCT_EXPLORATION;
use crate::playout::random_playout;

/// Arena index of the root node.
const ROOT: usize = 0;

/// A node in the MCTS search tree.
pub struct SearchNode {
    /// The game position at this node (a private snapshot, never shared).
    pub board: GameBoard,
    /// Arena index of the parent; `None` at the root.
    pub parent: Option<usize>,
    /// The move that produced this node; `None` at the root.
    pub mv: Option<Move>,
    /// Child indices in creation order.
    pub children: Vec<usize>,
    /// Number of rollouts propagated through this node.
    pub visits: u32,
    /// Accumulated rollout results.
    pub wins: f64,
    /// Legal moves not yet expanded into children.
    pub untried: Vec<Move>,
}

impl SearchNode {
    fn new(board: GameBoard, parent: Option<usize>, mv: Option<Move>) -> Self {
        let untried = board.legal_moves(board.current_player());
        SearchNode {
            board,
            parent,
            mv,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            untried,
        }
    }

    /// Empirical win ratio; 0 for an unvisited node.
    pub fn win_ratio(&self) -> f64 {
        if self.visits > 0 {
            self.wins / f64::from(self.visits)
        } else {
            0.0
        }
    }
}

/// Final statistics for one root child: the data contract consumed by the
/// diagnostic report and the persistence layer.
#[derive(Clone, Copy, Debug)]
pub struct MoveStats {
    pub mv: Move,
    pub wins: f64,
    pub visits: u32,
    /// `wins / visits`.
    pub win_ratio: f64,
}

/// MCTS controller: owns the whole tree for the lifetime of one search.
pub struct Mcts {
    nodes: Vec<SearchNode>,
    iterations: usize,
    verbose: bool,
}

impl Mcts {
    /// Create a controller rooted at `board` with a fixed iteration budget.
    ///
    /// When `verbose` is set, `search` logs each root child's final
    /// move/wins/visits; the report has no effect on the search outcome.
    pub fn new(board: GameBoard, iterations: usize, verbose: bool) -> Self {
        Mcts {
            nodes: vec![SearchNode::new(board, None, None)],
            iterations,
            verbose,
        }
    }

    /// Run the full iteration budget and return the best move found.
    ///
    /// The best move is the most-visited root child; ties go to the child
    /// created first. Returns `None` when the root has no legal moves — the
    /// caller decides whether that means pass or game over.
    pub fn search(&mut self, rng: &mut fastrand::Rng) -> Option<Move> {
        let reference = self.nodes[ROOT].board.current_player();

        for _ in 0..self.iterations {
            let leaf = self.select_and_expand(rng);
            let result = random_playout(&self.nodes[leaf].board, reference, rng);
            self.backpropagate(leaf, result);
        }

        if self.verbose {
            self.report_children();
        }

        self.best_child().and_then(|idx| self.nodes[idx].mv)
    }

    /// The tree policy: descend from the root, expanding one node at most.
    ///
    /// Stops at a terminal node, at a freshly expanded child, or at a dead
    /// end (a fully expanded node with no children: its mover has no legal
    /// move and the search rolls out from it directly, never passing on its
    /// behalf).
    fn select_and_expand(&mut self, rng: &mut fastrand::Rng) -> usize {
        let mut idx = ROOT;
        loop {
            if self.nodes[idx].board.is_game_complete() {
                return idx;
            }
            if !self.nodes[idx].untried.is_empty() {
                return self.expand(idx, rng);
            }
            if self.nodes[idx].children.is_empty() {
                return idx;
            }
            idx = self.uct_select(idx);
        }
    }

    /// Take one untried move uniformly at random and wrap the resulting
    /// position in a new child node.
    fn expand(&mut self, idx: usize, rng: &mut fastrand::Rng) -> usize {
        let pick = rng.usize(..self.nodes[idx].untried.len());
        let mv = self.nodes[idx].untried.swap_remove(pick);

        let mut board = self.nodes[idx].board.clone();
        board.apply_move(mv);

        let child = self.nodes.len();
        self.nodes.push(SearchNode::new(board, Some(idx), Some(mv)));
        self.nodes[idx].children.push(child);
        child
    }

    /// Pick the child maximizing `wins/visits + C * sqrt(ln(parent)/visits)`.
    ///
    /// Only called on fully expanded nodes, and every child already carries
    /// the visit from the rollout at its own creation, so `visits` is never
    /// zero here. Ties keep the earliest child in the list.
    fn uct_select(&self, idx: usize) -> usize {
        let node = &self.nodes[idx];
        let ln_parent = f64::from(node.visits).ln();

        let mut best = node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child_idx in &node.children {
            let child = &self.nodes[child_idx];
            let visits = f64::from(child.visits);
            let score = child.wins / visits + UCT_EXPLORATION * (ln_parent / visits).sqrt();
            if score > best_score {
                best_score = score;
                best = child_idx;
            }
        }
        best
    }

    /// Add the rollout result to every node from `idx` up to the root.
    fn backpropagate(&mut self, mut idx: usize, result: f64) {
        loop {
            let node = &mut self.nodes[idx];
            node.visits += 1;
            node.wins += result;
            match node.parent {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

    /// Most-visited root child; ties keep the child created first.
    fn best_child(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &child in &self.nodes[ROOT].children {
            if best.is_none_or(|b| self.nodes[child].visits > self.nodes[b].visits) {
                best = Some(child);
            }
        }
        best
    }

    /// Final per-child statistics, sorted by descending visit count.
    ///
    /// The sort is stable, so equally visited children keep creation order.
    pub fn root_stats(&self) -> Vec<MoveStats> {
        let mut stats: Vec<MoveStats> = self.nodes[ROOT]
            .children
            .iter()
            .filter_map(|&child| {
                let node = &self.nodes[child];
                node.mv.map(|mv| MoveStats {
                    mv,
                    wins: node.wins,
                    visits: node.visits,
                    win_ratio: node.win_ratio(),
                })
            })
            .collect();
        stats.sort_by(|a, b| b.visits.cmp(&a.visits));
        stats
    }

    /// The root node (its `visits` equals the number of iterations run).
    pub fn root(&self) -> &SearchNode {
        &self.nodes[ROOT]
    }

    fn report_children(&self) {
        for s in self.root_stats() {
            info!(
                mv = %s.mv.notation(),
                wins = s.wins,
                visits = s.visits,
                ratio = s.win_ratio,
                "root child"
            );
        }
    }
}
