//! Othello-MCTS command-line interface.
//!
//! ## Usage
//!
//! - `othello-mcts` / `othello-mcts demo` - Search the opening and report
//! - `othello-mcts self-play` - Play a full MCTS-vs-MCTS game
//! - `othello-mcts vs-random` - Play the agent against a random opponent
//! - `othello-mcts play` - Play interactively against the agent
//! - `othello-mcts collect` - Self-play that persists search statistics
//!
//! `--seed` makes a run reproducible; `--log-dir` redirects log output into
//! a file in that directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use othello_mcts::board::{Color, GameBoard};
use othello_mcts::constants::{ASSIST_ITERATIONS, DEFAULT_ITERATIONS};
use othello_mcts::mcts::Mcts;
use othello_mcts::selfplay;
use othello_mcts::session::InteractiveSession;

/// Othello-MCTS: a bitboard Othello engine with Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "othello-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory for the log file (logs go to stdout when absent)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log each root child's final statistics after every search
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Random generator seed (a fixed seed reproduces a run exactly)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search from the opening position and report the result
    Demo,
    /// Play a full MCTS-vs-MCTS game
    SelfPlay {
        /// Search iterations per move
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
    },
    /// Play the agent against a uniformly random opponent
    VsRandom {
        /// Search iterations per move
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
        /// Color the agent plays
        #[arg(long, default_value = "white")]
        agent_color: Color,
    },
    /// Play interactively against the agent
    Play {
        /// Search iterations per agent move
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
        /// Color the human plays
        #[arg(long, default_value = "black")]
        color: Color,
        /// Iterations for `help` assistance searches
        #[arg(long, default_value_t = ASSIST_ITERATIONS)]
        assist_iterations: usize,
    },
    /// Self-play that saves per-move search statistics as JSON
    Collect {
        /// Search iterations per move
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: usize,
        /// Record file to read and extend
        #[arg(long, default_value = "data.json")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_dir.as_deref())?;

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    match cli.command {
        Some(Commands::SelfPlay { iterations }) => {
            selfplay::play_self_play_game(iterations, cli.verbose, &mut rng);
        }
        Some(Commands::VsRandom {
            iterations,
            agent_color,
        }) => {
            selfplay::play_vs_random_game(iterations, agent_color, cli.verbose, &mut rng);
        }
        Some(Commands::Play {
            iterations,
            color,
            assist_iterations,
        }) => {
            let mut session = InteractiveSession::new(color, iterations, assist_iterations, rng);
            session.run()?;
        }
        Some(Commands::Collect { iterations, out }) => {
            selfplay::collect_game_data(iterations, &out, cli.verbose, &mut rng)?;
        }
        Some(Commands::Demo) | None => run_demo(cli.verbose, &mut rng),
    }

    Ok(())
}

fn run_demo(verbose: bool, rng: &mut fastrand::Rng) {
    let board = GameBoard::opening();
    println!("{board}");
    println!("Running {DEFAULT_ITERATIONS} search iterations...");

    let mut mcts = Mcts::new(board, DEFAULT_ITERATIONS, verbose);
    match mcts.search(rng) {
        Some(best) => {
            println!("Best move: {}", best.notation());
            for s in mcts.root_stats() {
                println!(
                    "  {}  visits={} wins={:.0} ratio={:.3}",
                    s.mv.notation(),
                    s.visits,
                    s.wins,
                    s.win_ratio
                );
            }
        }
        None => println!("No legal moves from this position"),
    }
}

/// Set up the tracing subscriber: env-filter with a verbosity default,
/// writing to stdout or to `<log_dir>/othello-mcts.log`.
fn init_logging(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let path = dir.join("othello-mcts.log");
            let file = fs::File::create(&path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
