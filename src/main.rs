//! draughts-mcts: self-play driver for the bit-packed draughts engine.
//!
//! The graphical front end and interactive play are out of scope for this crate - see
//! `ComputerController` in [`draughts_mcts::controller`] for the capability boundary a renderer
//! would plug into instead. This binary drives a full computer-vs-computer self-play game and
//! writes one notation line per ply to the given output path.
//!
//! ## Usage
//!
//! - `draughts-mcts game.log` - play one self-play game, 1s/move, default batch size
//! - `draughts-mcts game.log --time-ms 5000 --batch-size 16` - slower, wider search per move

use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use draughts_mcts::controller::{ComputerController, Controller};
use draughts_mcts::mcts::SearchConfig;
use draughts_mcts::notation;
use draughts_mcts::position::Position;
use draughts_mcts::simulator::HostSimulator;

/// Self-play driver for the bit-packed draughts engine.
#[derive(Parser)]
#[command(name = "draughts-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to write the move log to.
    output: PathBuf,

    /// Suppress the startup banner noting there is no graphical front end. Self-play runs
    /// either way; this only quiets the message.
    #[arg(long)]
    headless: bool,

    /// Search iterations per side per move.
    #[arg(long, default_value_t = SearchConfig::default().max_iterations)]
    iterations: u32,

    /// Search time budget per move, in milliseconds.
    #[arg(long, default_value_t = SearchConfig::default().max_time.as_millis() as u64)]
    time_ms: u64,

    /// Leaves expanded per MCTS iteration.
    #[arg(long, default_value_t = SearchConfig::default().max_selected_per_iter)]
    batch_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.headless {
        eprintln!("draughts-mcts has no graphical front end; running a self-play game instead.");
    }

    let config = SearchConfig {
        max_iterations: cli.iterations,
        max_time: Duration::from_millis(cli.time_ms),
        max_selected_per_iter: cli.batch_size,
        ..Default::default()
    };

    let mut log = File::create(&cli.output)
        .with_context(|| format!("failed to create move log at {}", cli.output.display()))?;

    let mut black = ComputerController::new(HostSimulator::new(), config);
    let mut white = ComputerController::new(HostSimulator::new(), config);

    let mut position = Position::starting();
    let mut ply = 0u32;

    loop {
        if position.has_lost() {
            let winner = if position.black_turn { "White" } else { "Black" };
            writeln!(log, "{winner} wins")?;
            break;
        }
        if position.is_draw() {
            writeln!(log, "Draw")?;
            break;
        }

        let controller = if position.black_turn { &mut black } else { &mut white };
        let next = controller.make_move(position);

        if next == Position::default() {
            writeln!(log, "Cancelled")?;
            break;
        }

        let (from, to) = moved_square(position, next);
        writeln!(log, "{}", notation::format_move(from, to))?;

        position = next;
        ply += 1;
    }

    eprintln!("game finished after {ply} plies; log written to {}", cli.output.display());
    Ok(())
}

/// Identify which square the side to move's piece left from and landed on, by diffing its own
/// colour's bitboard across the move. Reports only the net endpoints of a compound capture, not
/// every intermediate landing square.
fn moved_square(before: Position, after: Position) -> (u32, u32) {
    let mover_before = if before.black_turn { before.black } else { before.white };
    let mover_after = if before.black_turn { after.black } else { after.white };

    let from_bit = mover_before & !mover_after;
    let to_bit = mover_after & !mover_before;

    (from_bit.trailing_zeros(), to_bit.trailing_zeros())
}
