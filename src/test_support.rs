// Builders for hand-written board positions in unit tests

use serde_json::Value;

use crate::types::{Battlesnake, Board, Coord, Game, GameState};

pub fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 100,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

/// Board with `you` listed first, followed by `others`
pub fn state_with(
    width: i32,
    height: i32,
    you: Battlesnake,
    others: Vec<Battlesnake>,
    food: Vec<(i32, i32)>,
) -> GameState {
    let mut snakes = vec![you.clone()];
    snakes.extend(others);

    GameState {
        game: Game {
            id: "test-game".to_string(),
            ruleset: Value::Null,
            timeout: 500,
            source: "test".to_string(),
        },
        turn: 1,
        board: Board {
            height,
            width,
            food: food.into_iter().map(|(x, y)| Coord::new(x, y)).collect(),
            snakes,
            hazards: vec![],
        },
        you,
    }
}
