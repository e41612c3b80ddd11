// Writes decisions through DebugLogger and reads them back with the replay engine

mod common;

use common::{game_state, snake};
use hisssteria_snake::bot::Bot;
use hisssteria_snake::config::Config;
use hisssteria_snake::debug_logger::DebugLogger;
use hisssteria_snake::replay::ReplayEngine;
use hisssteria_snake::types::Direction;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn temp_log_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}-{}.jsonl", name, std::process::id()))
}

#[tokio::test]
async fn test_logged_decisions_replay_as_valid() {
    let path = temp_log_path("hisssteria-replay");
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(logger.is_enabled());

    let bot = Bot::new(Config::default_hardcoded());
    let mut rng = StdRng::seed_from_u64(17);

    let boards = vec![
        game_state(11, 11, snake("me", &[(5, 5), (5, 4)]), vec![], &[(2, 2)]),
        game_state(11, 11, snake("me", &[(0, 5), (0, 4), (0, 3)]), vec![], &[]),
        game_state(1, 1, snake("me", &[(0, 0)]), vec![], &[]),
    ];

    for (turn, mut state) in boards.into_iter().enumerate() {
        state.turn = turn as i32;
        let decision = bot.decide(&state, &mut rng);
        let entry = DebugLogger::entry_for(&state.game.id, state.turn, &state.you.id, &state.board, &decision);
        logger.write(entry).await;
    }

    let engine = ReplayEngine::new(Config::default_hardcoded(), true);
    let entries = engine.load_log_file(&path).unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[2].fallback);
    assert_eq!(entries[2].chosen_move, Direction::Down);

    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 3);
    assert_eq!(stats.invalid, 0);
    assert_eq!(stats.fallbacks, 1);
    assert_eq!(stats.safe_set_mismatches, 0);

    let turn_one = engine.replay_turns(&entries, &[1]).unwrap();
    assert_eq!(turn_one[0].safe_moves, vec![Direction::Up, Direction::Right]);
    assert!(engine.replay_turns(&entries, &[42]).is_err());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    assert!(engine.load_log_file("does-not-exist.jsonl").is_err());
}

#[test]
fn test_malformed_line_reports_line_number() {
    let path = temp_log_path("hisssteria-malformed");
    std::fs::write(&path, "\n{not json}\n").unwrap();

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let err = engine.load_log_file(&path).unwrap_err();
    assert!(err.contains("line 2"), "{}", err);

    let _ = std::fs::remove_file(&path);
}
