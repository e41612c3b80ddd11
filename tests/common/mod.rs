// Shared board builders for integration tests
#![allow(dead_code)]

use hisssteria_snake::types::{Battlesnake, Board, Coord, Game, GameState};
use serde_json::json;

pub fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 80,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

/// Game state on a width x height board with `you` first in the snake list
pub fn game_state(
    width: i32,
    height: i32,
    you: Battlesnake,
    opponents: Vec<Battlesnake>,
    food: &[(i32, i32)],
) -> GameState {
    let mut snakes = vec![you.clone()];
    snakes.extend(opponents);

    GameState {
        game: Game {
            id: "test-game".to_string(),
            ruleset: json!({ "name": "standard" }),
            timeout: 500,
            source: "test".to_string(),
        },
        turn: 12,
        board: Board {
            height,
            width,
            food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            snakes,
            hazards: vec![],
        },
        you,
    }
}
