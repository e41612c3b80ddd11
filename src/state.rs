// Read-only accessors over the per-turn game state
//
// The engine is trusted to send well-formed data: positive board dimensions,
// `you` present in the snake list, and non-empty bodies. Nothing here validates.

use crate::types::{Battlesnake, Coord, GameState};

impl GameState {
    pub fn width(&self) -> i32 {
        self.board.width
    }

    pub fn height(&self) -> i32 {
        self.board.height
    }

    pub fn food(&self) -> &[Coord] {
        &self.board.food
    }

    pub fn you(&self) -> &Battlesnake {
        &self.you
    }

    /// Own body segments, head first
    pub fn my_body(&self) -> &[Coord] {
        &self.you.body
    }

    pub fn my_head(&self) -> Coord {
        self.you.body.first().copied().unwrap_or(self.you.head)
    }

    /// Second body segment, absent for a single-segment snake
    pub fn my_neck(&self) -> Option<Coord> {
        self.you.body.get(1).copied()
    }

    /// Every snake on the board, including ours
    pub fn snakes(&self) -> &[Battlesnake] {
        &self.board.snakes
    }

    /// Every snake on the board except ours
    pub fn opponents(&self) -> impl Iterator<Item = &Battlesnake> {
        let my_id = self.you.id.as_str();
        self.board.snakes.iter().filter(move |s| s.id != my_id)
    }

    /// True if the coordinate lies in [0, width) x [0, height)
    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.board.width && coord.y >= 0 && coord.y < self.board.height
    }
}
