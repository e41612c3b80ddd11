// Safety filters for move selection
//
// Each filter receives the current safety map by value and returns a narrowed copy.
// Filters only ever flip entries from safe to unsafe, so the pipeline order does not
// change the final safe set, and re-running a filter is a no-op.

use log::debug;

use crate::config::SafetyConfig;
use crate::types::{Battlesnake, Coord, Direction, GameState};

/// Per-direction safety flags for a single decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSafetyMap {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl MoveSafetyMap {
    /// Starting point for every decision: all four moves considered safe
    pub fn all_safe() -> Self {
        MoveSafetyMap { up: true, down: true, left: true, right: true }
    }

    pub fn is_safe(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Marks a direction unsafe. Entries never return to safe.
    pub fn mark_unsafe(mut self, dir: Direction) -> Self {
        match dir {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
        self
    }

    /// Safe directions in up, down, left, right order
    pub fn safe_moves(&self) -> Vec<Direction> {
        Direction::all().into_iter().filter(|&d| self.is_safe(d)).collect()
    }

    pub fn any_safe(&self) -> bool {
        Direction::all().iter().any(|&d| self.is_safe(d))
    }

    /// Marks unsafe every still-safe direction whose target cell matches `blocked`
    fn narrow_where<F>(self, head: Coord, blocked: F) -> Self
    where
        F: Fn(&Coord) -> bool,
    {
        Direction::all().into_iter().fold(self, |map, dir| {
            if map.is_safe(dir) && blocked(&dir.apply(&head)) {
                map.mark_unsafe(dir)
            } else {
                map
            }
        })
    }
}

/// Signature shared by every safety filter
pub type SafetyFilter = fn(MoveSafetyMap, &GameState, &SafetyConfig) -> MoveSafetyMap;

/// Filters in the order they run
pub const FILTERS: [(&str, SafetyFilter); 4] = [
    ("reversal", avoid_reversal),
    ("walls", avoid_walls),
    ("self", avoid_self),
    ("opponents", avoid_opponents),
];

/// Runs every filter over a fresh all-safe map
pub fn apply_filters(state: &GameState, rules: &SafetyConfig) -> MoveSafetyMap {
    FILTERS
        .iter()
        .fold(MoveSafetyMap::all_safe(), |map, (name, filter)| {
            let narrowed = filter(map, state, rules);
            if narrowed != map {
                debug!("Turn {}: {} filter left {:?}", state.turn, name, narrowed.safe_moves());
            }
            narrowed
        })
}

/// Never step back onto our own neck
pub fn avoid_reversal(map: MoveSafetyMap, state: &GameState, _rules: &SafetyConfig) -> MoveSafetyMap {
    let head = state.my_head();
    let neck = match state.my_neck() {
        Some(neck) => neck,
        None => return map,
    };

    // A neck stacked on the head (turn 0) gives no heading
    match Direction::from_delta(head.x - neck.x, head.y - neck.y) {
        Some(heading) => map.mark_unsafe(heading.opposite()),
        None => map,
    }
}

/// Never leave the board
pub fn avoid_walls(map: MoveSafetyMap, state: &GameState, _rules: &SafetyConfig) -> MoveSafetyMap {
    map.narrow_where(state.my_head(), |next| !state.in_bounds(next))
}

/// Never run into our own body
pub fn avoid_self(map: MoveSafetyMap, state: &GameState, rules: &SafetyConfig) -> MoveSafetyMap {
    let body = blocking_segments(state.you(), rules.tail_vacates);
    map.narrow_where(state.my_head(), |next| body.contains(next))
}

/// Never run into another snake, and never contest a cell another head can reach
pub fn avoid_opponents(map: MoveSafetyMap, state: &GameState, rules: &SafetyConfig) -> MoveSafetyMap {
    let head = state.my_head();

    state.opponents().fold(map, |map, other| {
        let body = blocking_segments(other, rules.tail_vacates);
        let other_head = other.body.first().copied().unwrap_or(other.head);

        map.narrow_where(head, |next| {
            body.contains(next)
                || *next == other_head
                || (rules.avoid_head_to_head && next.manhattan(&other_head) == 1)
        })
    })
}

/// Body segments that will still be occupied after everyone moves.
///
/// The tail is dropped when it vacates, unless it is stacked (the snake just ate).
fn blocking_segments(snake: &Battlesnake, tail_vacates: bool) -> &[Coord] {
    let len = snake.body.len();
    if tail_vacates && len > 1 && !snake.has_stacked_tail() {
        &snake.body[..len - 1]
    } else {
        &snake.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{snake, state_with};

    fn rules() -> SafetyConfig {
        SafetyConfig { tail_vacates: true, avoid_head_to_head: true }
    }

    #[test]
    fn test_mark_unsafe_is_monotone() {
        let map = MoveSafetyMap::all_safe().mark_unsafe(Direction::Up);
        assert!(!map.is_safe(Direction::Up));
        let map = map.mark_unsafe(Direction::Up);
        assert!(!map.is_safe(Direction::Up));
        assert_eq!(map.safe_moves(), vec![Direction::Down, Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_reversal_blocks_opposite_of_heading() {
        let state = state_with(11, 11, snake("me", &[(5, 5), (5, 4)]), vec![], vec![]);
        let map = avoid_reversal(MoveSafetyMap::all_safe(), &state, &rules());
        assert_eq!(map.safe_moves(), vec![Direction::Up, Direction::Left, Direction::Right]);
    }

    #[test]
    fn test_reversal_ignores_missing_or_stacked_neck() {
        let lone = state_with(11, 11, snake("me", &[(5, 5)]), vec![], vec![]);
        assert_eq!(avoid_reversal(MoveSafetyMap::all_safe(), &lone, &rules()), MoveSafetyMap::all_safe());

        let stacked = state_with(11, 11, snake("me", &[(5, 5), (5, 5), (5, 5)]), vec![], vec![]);
        assert_eq!(avoid_reversal(MoveSafetyMap::all_safe(), &stacked, &rules()), MoveSafetyMap::all_safe());
    }

    #[test]
    fn test_walls_block_left_edge() {
        let state = state_with(11, 11, snake("me", &[(0, 5), (1, 5)]), vec![], vec![]);
        let map = avoid_walls(MoveSafetyMap::all_safe(), &state, &rules());
        assert!(!map.is_safe(Direction::Left));
        assert!(map.is_safe(Direction::Up));
        assert!(map.is_safe(Direction::Down));
        assert!(map.is_safe(Direction::Right));
    }

    #[test]
    fn test_walls_block_corner() {
        let state = state_with(11, 11, snake("me", &[(10, 10)]), vec![], vec![]);
        let map = avoid_walls(MoveSafetyMap::all_safe(), &state, &rules());
        assert_eq!(map.safe_moves(), vec![Direction::Down, Direction::Left]);
    }

    #[test]
    fn test_self_collision_excludes_vacating_tail() {
        // Head at (1,1), body wraps so the tail sits at (1,2) directly above the head
        let me = snake("me", &[(1, 1), (2, 1), (2, 2), (1, 2)]);
        let state = state_with(11, 11, me, vec![], vec![]);

        let map = avoid_self(MoveSafetyMap::all_safe(), &state, &rules());
        assert!(map.is_safe(Direction::Up), "tail vacates this turn");
        assert!(!map.is_safe(Direction::Right));

        let strict = SafetyConfig { tail_vacates: false, ..rules() };
        let map = avoid_self(MoveSafetyMap::all_safe(), &state, &strict);
        assert!(!map.is_safe(Direction::Up));
    }

    #[test]
    fn test_stacked_tail_stays_blocking() {
        let me = snake("me", &[(1, 1), (2, 1), (2, 2), (1, 2), (1, 2)]);
        let state = state_with(11, 11, me, vec![], vec![]);
        let map = avoid_self(MoveSafetyMap::all_safe(), &state, &rules());
        assert!(!map.is_safe(Direction::Up));
    }

    #[test]
    fn test_opponent_body_is_blocking() {
        let me = snake("me", &[(5, 5), (5, 4)]);
        let other = snake("other", &[(8, 6), (7, 6), (6, 6), (6, 7)]);
        let state = state_with(11, 11, me, vec![other], vec![]);

        let map = avoid_opponents(MoveSafetyMap::all_safe(), &state, &rules());
        assert!(map.is_safe(Direction::Down), "opponent filter does not handle reversal");
        assert!(map.is_safe(Direction::Left));
        assert!(map.is_safe(Direction::Right));
        // (5,6) is adjacent to opponent segment (6,6) but not its head; still free
        assert!(map.is_safe(Direction::Up));

        let wall = snake("wall", &[(9, 9), (9, 8), (8, 8), (7, 8), (6, 8), (5, 8), (5, 7), (5, 6), (4, 6)]);
        let state = state_with(11, 11, snake("me", &[(5, 5), (5, 4)]), vec![wall], vec![]);
        let map = avoid_opponents(MoveSafetyMap::all_safe(), &state, &rules());
        assert!(!map.is_safe(Direction::Up));
    }

    #[test]
    fn test_head_to_head_cells_are_unsafe() {
        // Opponent head at (7,5): both snakes can reach (6,5)
        let me = snake("me", &[(5, 5), (4, 5)]);
        let other = snake("other", &[(7, 5), (8, 5), (9, 5)]);
        let state = state_with(11, 11, me, vec![other], vec![]);

        let map = avoid_opponents(MoveSafetyMap::all_safe(), &state, &rules());
        assert!(!map.is_safe(Direction::Right));
        assert!(map.is_safe(Direction::Up));
        assert!(map.is_safe(Direction::Down));

        let relaxed = SafetyConfig { avoid_head_to_head: false, ..rules() };
        let map = avoid_opponents(MoveSafetyMap::all_safe(), &state, &relaxed);
        assert!(map.is_safe(Direction::Right));
    }

    #[test]
    fn test_opponent_head_cell_blocks_even_for_single_segment() {
        let me = snake("me", &[(5, 5), (4, 5)]);
        let other = snake("other", &[(6, 5)]);
        let state = state_with(11, 11, me, vec![other], vec![]);
        let relaxed = SafetyConfig { avoid_head_to_head: false, ..rules() };
        let map = avoid_opponents(MoveSafetyMap::all_safe(), &state, &relaxed);
        assert!(!map.is_safe(Direction::Right));
    }

    #[test]
    fn test_filters_are_idempotent() {
        let me = snake("me", &[(0, 1), (0, 0), (1, 0), (1, 1), (1, 2)]);
        let other = snake("other", &[(3, 1), (4, 1), (5, 1)]);
        let state = state_with(6, 6, me, vec![other], vec![]);

        for (name, filter) in FILTERS.iter() {
            let once = filter(MoveSafetyMap::all_safe(), &state, &rules());
            let twice = filter(once, &state, &rules());
            assert_eq!(once, twice, "{} filter is not stable", name);
        }
    }

    #[test]
    fn test_pipeline_never_restores_safety() {
        let me = snake("me", &[(0, 0), (0, 1)]);
        let state = state_with(3, 3, me, vec![], vec![]);
        let start = MoveSafetyMap::all_safe().mark_unsafe(Direction::Right);
        let narrowed = FILTERS.iter().fold(start, |m, (_, f)| f(m, &state, &rules()));
        assert!(!narrowed.is_safe(Direction::Right));
        assert!(!narrowed.any_safe());
    }
}
