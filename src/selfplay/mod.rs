use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::board::cozy::Position;
use crate::board::{GameState, Outcome, Side};
use crate::config::{Difficulty, EngineConfig};
use crate::error::Result;
use crate::search::policy::Engine;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub white: Difficulty,
    pub black: Difficulty,
    pub seed: u64,
    pub start_fen: Option<String>,
    /// Keep the easy tier's random-move policy active.
    pub easy_random: bool,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 200,
            white: Difficulty::Medium,
            black: Difficulty::Medium,
            seed: 42,
            start_fen: None,
            easy_random: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: Option<String>,
    pub moves: Vec<String>,
    pub result: i8, // 1 white win, 0 draw or unfinished, -1 black win
    pub termination: String,
}

impl GameRecord {
    /// Replays the recorded moves from the recorded start.
    pub fn replay(&self) -> Result<Position> {
        let mut pos = match &self.start_fen {
            Some(fen) => Position::from_fen(fen)?,
            None => Position::startpos(),
        };
        for m in &self.moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }
}

fn game_seed(seed: u64, game_idx: usize) -> u64 {
    seed ^ (game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub fn play_game(params: &SelfPlayParams, game_idx: usize) -> Result<GameRecord> {
    let mut pos = match &params.start_fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::startpos(),
    };
    let cfg = EngineConfig {
        easy_random_enabled: params.easy_random,
        seed: Some(game_seed(params.seed, game_idx)),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(cfg)?;
    let mut record = GameRecord { start_fen: params.start_fen.clone(), moves: Vec::new(), result: 0, termination: String::new() };

    loop {
        if let Some(outcome) = pos.outcome() {
            record.result = match outcome {
                Outcome::Checkmate { winner: Side::First } => 1,
                Outcome::Checkmate { winner: Side::Second } => -1,
                Outcome::Draw(_) => 0,
            };
            record.termination = outcome.to_string();
            break;
        }
        if record.moves.len() >= params.max_plies {
            record.termination = "max plies".to_string();
            break;
        }
        let difficulty = match pos.side_to_move() { Side::First => params.white, Side::Second => params.black };
        let Some(mv) = engine.select_move(&mut pos, difficulty)? else {
            record.termination = "no legal move".to_string();
            break;
        };
        record.moves.push(pos.uci_string(mv));
        pos.apply(mv)?;
    }
    log::debug!("game {} finished after {} plies: {}", game_idx, record.moves.len(), record.termination);
    Ok(record)
}

pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>> {
    generate_games_with(params, |_| {})
}

/// Same as `generate_games`, calling `on_game` after each finished game.
pub fn generate_games_with<F: FnMut(&GameRecord)>(params: &SelfPlayParams, mut on_game: F) -> Result<Vec<GameRecord>> {
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let record = play_game(params, gi)?;
        on_game(&record);
        games.push(record);
    }
    Ok(games)
}

pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let rdr = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        let l = line.trim();
        if l.is_empty() { continue; }
        out.push(serde_json::from_str(l)?);
    }
    Ok(out)
}
