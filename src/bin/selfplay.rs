use anyhow::Context;
use clap::Parser;
use chess_ai::selfplay::{generate_games_with, write_jsonl, SelfPlayParams};
use chess_ai::Difficulty;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "selfplay", about = "Play the engine against itself and write JSONL game records")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value = "medium")]
    white: Difficulty,
    #[arg(long, default_value = "medium")]
    black: Difficulty,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Start every game from this FEN instead of the initial position
    #[arg(long)]
    fen: Option<String>,
    /// Disable random moves on the easy tier
    #[arg(long)]
    no_easy_random: bool,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        white: a.white,
        black: a.black,
        seed: a.seed,
        start_fen: a.fen,
        easy_random: !a.no_easy_random,
    };
    eprintln!("Playing {} games (white={}, black={}, seed={})", a.games, a.white, a.black, a.seed);

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let (mut white, mut black, mut draws) = (0usize, 0usize, 0usize);
    let games = generate_games_with(&params, |g| {
        match g.result { 1 => white += 1, -1 => black += 1, _ => draws += 1 }
        pb.set_message(format!("+{white} -{black} ={draws}"));
        pb.inc(1);
    })?;
    pb.finish();

    write_jsonl(&games, &a.out).with_context(|| format!("writing {}", a.out.display()))?;
    eprintln!("White {white}, Black {black}, drawn/unfinished {draws}; wrote {}", a.out.display());
    Ok(())
}
