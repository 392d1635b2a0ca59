use anyhow::Context;
use chess_ai::perft::{divide, perft};
use chess_ai::Position;
use clap::Parser;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the rules adapter")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Print per-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut pos = if args.fen == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&args.fen).context("Invalid FEN")?
    };

    let t0 = Instant::now();
    let nodes = if args.divide {
        let per_move = divide(&mut pos, args.depth)?;
        for (mv, n) in &per_move { println!("{}: {}", pos.uci_string(*mv), n); }
        per_move.iter().map(|(_, n)| n).sum::<u64>()
    } else {
        perft(&mut pos, args.depth)?
    };
    let dt = t0.elapsed().as_secs_f64();
    let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
    println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    Ok(())
}
