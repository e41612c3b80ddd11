// Replay module for checking recorded move decisions
//
// This module provides functionality to:
// 1. Parse JSONL debug logs written by DebugLogger
// 2. Re-run the safety filters on each recorded board
// 3. Flag turns where the recorded move was not safe (or was a wrong fallback)
// 4. Generate a summary report

use log::{info, warn};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::bot::FALLBACK_MOVE;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::safety::apply_filters;
use crate::types::{Direction, Game, GameState};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub recorded_move: Direction,
    pub safe_moves: Vec<Direction>,
    /// Recorded move is safe, or is the fallback when nothing was safe
    pub valid: bool,
    /// Recomputed safe set equals the one stored in the log
    pub safe_set_matches: bool,
}

/// Statistics for a complete replay session
#[derive(Debug, Default, PartialEq)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub valid: usize,
    pub invalid: usize,
    pub fallbacks: usize,
    pub safe_set_mismatches: usize,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Rebuilds the game state the bot saw for a logged turn
    pub fn state_for(entry: &DebugLogEntry) -> Result<GameState, String> {
        let you = entry
            .board
            .snakes
            .iter()
            .find(|s| s.id == entry.you_id)
            .cloned()
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", entry.you_id))?;

        Ok(GameState {
            game: Game {
                id: entry.game_id.clone(),
                ruleset: Value::Null,
                timeout: 0,
                source: String::new(),
            },
            turn: entry.turn,
            board: entry.board.clone(),
            you,
        })
    }

    /// Replays a single log entry and checks the recorded move
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        let state = Self::state_for(entry)?;
        let safe_moves = apply_filters(&state, &self.config.safety).safe_moves();

        let valid = if safe_moves.is_empty() {
            entry.chosen_move == FALLBACK_MOVE
        } else {
            safe_moves.contains(&entry.chosen_move)
        };

        let result = ReplayResult {
            turn: entry.turn,
            recorded_move: entry.chosen_move,
            safe_moves: safe_moves.clone(),
            valid,
            safe_set_matches: safe_moves == entry.safe_moves,
        };

        if self.verbose {
            if valid {
                info!("Turn {}: ✓ {} (safe: {:?})", entry.turn, entry.chosen_move, safe_moves);
            } else {
                warn!("Turn {}: ✗ {} not in safe set {:?}", entry.turn, entry.chosen_move, safe_moves);
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let valid = results.iter().filter(|r| r.valid).count();

        ReplayStats {
            total_turns: results.len(),
            valid,
            invalid: results.len() - valid,
            fallbacks: results.iter().filter(|r| r.safe_moves.is_empty()).count(),
            safe_set_mismatches: results.iter().filter(|r| !r.safe_set_matches).count(),
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:          {}", stats.total_turns);
        println!("Valid Moves:          {}", stats.valid);
        println!("Invalid Moves:        {}", stats.invalid);
        println!("Forced Fallbacks:     {}", stats.fallbacks);
        println!("Safe Set Mismatches:  {}", stats.safe_set_mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        for result in results.iter().filter(|r| !r.valid) {
            println!(
                "Turn {}: recorded {} but safe moves were {:?}",
                result.turn, result.recorded_move, result.safe_moves
            );
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }
}
