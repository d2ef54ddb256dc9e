//! pbrain-gomoku: a Gomoku/Renju brain.
//!
//! ## Usage
//!
//! - `pbrain-gomoku` - Talk the Piskvork protocol on stdin/stdout
//! - `pbrain-gomoku serve --renju` - Same, starting under Renju rules
//! - `pbrain-gomoku demo` - Play a short self-game and print the board
//!
//! Diagnostics go to stderr and are filtered with `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use pbrain_gomoku::board::Board;
use pbrain_gomoku::constants::DEFAULT_BOARD_SIZE;
use pbrain_gomoku::engine::{Brain, Config, clamp_timeout_ms};
use pbrain_gomoku::protocol::PiskvorkServer;
use pbrain_gomoku::rules::RuleMode;
use pbrain_gomoku::transcript::Transcript;
use pbrain_gomoku::win::winner_on_board;

/// pbrain-gomoku: a Gomoku/Renju brain for Piskvork-style managers
#[derive(Parser)]
#[command(name = "pbrain-gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Append the protocol transcript to this file
    #[arg(long, global = true, conflicts_with = "log_stderr")]
    log_file: Option<PathBuf>,

    /// Write the protocol transcript to stderr
    #[arg(long, global = true)]
    log_stderr: bool,

    /// Start under Renju rules (INFO rule can still change it)
    #[arg(long, global = true)]
    renju: bool,

    /// Per-turn budget in milliseconds until INFO timeout_turn arrives
    #[arg(long, global = true)]
    timeout_turn: Option<i64>,

    /// Send a DEBUG line before every ERROR, and MESSAGE notes
    #[arg(long, global = true)]
    debug_replies: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the Piskvork protocol on stdin/stdout (default)
    Serve,
    /// Play a short self-game and print the board
    Demo,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let config = config_from(&cli);

    match cli.command {
        Some(Commands::Demo) => run_demo(config),
        Some(Commands::Serve) | None => {
            let transcript = transcript_from(&cli)?;
            let mut server = PiskvorkServer::new(Brain::with_config(config), transcript)
                .with_debug_replies(cli.debug_replies);
            server.run()
        }
    }
}

fn config_from(cli: &Cli) -> Config {
    let mut config = Config::default();
    if cli.renju {
        config.rule = RuleMode::Renju;
    }
    if let Some(ms) = cli.timeout_turn {
        config.timeout_turn = clamp_timeout_ms(ms);
    }
    config
}

fn transcript_from(cli: &Cli) -> anyhow::Result<Transcript> {
    if let Some(path) = &cli.log_file {
        return Transcript::to_file(path)
            .with_context(|| format!("opening transcript file {}", path.display()));
    }
    if cli.log_stderr {
        return Ok(Transcript::stderr());
    }
    Ok(Transcript::disabled())
}

/// Let the engine play both sides until someone wins or no move is left.
fn run_demo(config: Config) -> anyhow::Result<()> {
    println!("pbrain-gomoku self-play demo ({:?})\n", config.rule);

    let mut brain = Brain::with_config(config);
    brain.start(DEFAULT_BOARD_SIZE)?;

    let mut moves = 0;
    while brain.winner().is_none() {
        let Some(mv) = brain.choose_move() else {
            println!("No legal move left.");
            break;
        };
        brain.apply_own_move(mv)?;
        moves += 1;
        info!("move {moves}: {},{}", mv.0, mv.1);
    }

    if let Some(board) = brain.board() {
        print!("{board}");
        report(board, moves);
    }
    Ok(())
}

fn report(board: &Board, moves: usize) {
    match winner_on_board(board) {
        Some(player) => println!("\n{player:?} wins after {moves} moves"),
        None => println!("\nDraw after {moves} moves"),
    }
    println!("Fingerprint: {:016x}", board.fingerprint());
}
