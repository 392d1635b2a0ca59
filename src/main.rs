use anyhow::{Context, Result};
use chess_ai::board::cozy::render;
use chess_ai::search::eval::material;
use chess_ai::{Difficulty, Engine, EngineConfig, GameState, MoveSource, Position, Side};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the computer", long_about = None)]
struct Args {
    /// Computer strength: 1/easy, 2/medium, 3/hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Engine config (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Never play random moves on easy
    #[arg(long)]
    no_easy_random: bool,

    /// Pause before the computer's move, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Side> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Side::First),
        "b" | "black" => Ok(Side::Second),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn get_human_move(pos: &Position) -> Result<Option<cozy_chess::Move>> {
    loop {
        print!("Enter your move (e.g., e2e4, 'moves' to list, 'quit' to exit): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { return Ok(None); }
        let input = input.trim();
        match input {
            "quit" | "exit" => return Ok(None),
            "moves" => {
                let list: Vec<String> = pos.legal_moves().into_iter().map(|m| pos.uci_string(m)).collect();
                println!("{}", list.join(" "));
                continue;
            }
            _ => {}
        }
        match pos.parse_move(input) {
            Ok(mv) => return Ok(Some(mv)),
            Err(e) => println!("{e}"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let human = parse_color(&args.color)?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() { config.seed = args.seed; }
    if args.no_easy_random { config.easy_random_enabled = false; }
    let mut engine = Engine::new(config)?;

    let mut pos = match &args.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };
    println!("You play {} against the computer on {}.", human, args.difficulty);

    loop {
        println!("\n{}", render(&pos.occupied_squares()));
        if let Some(outcome) = pos.outcome() {
            println!("Game over: {outcome}");
            break;
        }
        let stm = pos.side_to_move();
        println!("{}'s turn{}", stm, if pos.in_check() { " (check)" } else { "" });

        if stm == human {
            let Some(mv) = get_human_move(&pos)? else {
                println!("Thanks for playing!");
                break;
            };
            pos.apply(mv)?;
            continue;
        }

        if args.delay_ms > 0 { std::thread::sleep(Duration::from_millis(args.delay_ms)); }
        let start_time = Instant::now();
        let decision = engine.think(&mut pos, args.difficulty)?;
        let Some(mv) = decision.mv else {
            println!("No legal moves available!");
            break;
        };
        let text = pos.uci_string(mv);
        if args.verbose {
            match decision.source {
                MoveSource::Random => println!("(random move)"),
                MoveSource::Search => println!(
                    "score: {} material: {} nodes: {} elapsed: {:.3}s",
                    decision.score_cp.unwrap_or_default(), material(&pos), decision.nodes, start_time.elapsed().as_secs_f32()
                ),
            }
        }
        println!("Computer plays: {text}");
        pos.apply(mv)?;
    }

    Ok(())
}
