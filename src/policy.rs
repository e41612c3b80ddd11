// Selection policies: pick one move out of the safe set
//
// Randomness is passed in so callers can seed it. Every policy must return a
// member of the slice it was given.

use rand::seq::IndexedRandom;
use rand::RngCore;

use crate::config::{PolicyConfig, PolicyKind};
use crate::types::{Direction, GameState};

/// Chooses among moves that already passed every safety filter
pub trait SelectionPolicy: Send + Sync {
    /// `safe` is never empty
    fn choose(&self, safe: &[Direction], state: &GameState, rng: &mut dyn RngCore) -> Direction;

    fn name(&self) -> &'static str;
}

/// Uniform random pick
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPolicy;

impl SelectionPolicy for RandomPolicy {
    fn choose(&self, safe: &[Direction], _state: &GameState, rng: &mut dyn RngCore) -> Direction {
        pick(safe, rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Heads for the nearest food once health drops to the threshold
#[derive(Debug, Clone, Copy)]
pub struct FoodSeekingPolicy {
    pub hunger_threshold: i32,
}

impl FoodSeekingPolicy {
    pub fn new(hunger_threshold: i32) -> Self {
        FoodSeekingPolicy { hunger_threshold }
    }

    /// Safe moves that end closest to the nearest food, or None when there is no food
    fn closest_to_food(safe: &[Direction], state: &GameState) -> Option<Vec<Direction>> {
        let head = state.my_head();
        let distance_after = |dir: &Direction| {
            let next = dir.apply(&head);
            state.food().iter().map(|f| next.manhattan(f)).min()
        };

        let best = safe.iter().filter_map(distance_after).min()?;
        Some(
            safe.iter()
                .copied()
                .filter(|d| distance_after(d) == Some(best))
                .collect(),
        )
    }
}

impl SelectionPolicy for FoodSeekingPolicy {
    fn choose(&self, safe: &[Direction], state: &GameState, rng: &mut dyn RngCore) -> Direction {
        if state.you().health > self.hunger_threshold {
            return pick(safe, rng);
        }

        match Self::closest_to_food(safe, state) {
            Some(best) => pick(&best, rng),
            None => pick(safe, rng),
        }
    }

    fn name(&self) -> &'static str {
        "food_seeking"
    }
}

/// Builds the policy named in Snake.toml
pub fn from_config(config: &PolicyConfig) -> Box<dyn SelectionPolicy> {
    match config.kind {
        PolicyKind::Random => Box::new(RandomPolicy),
        PolicyKind::FoodSeeking => Box::new(FoodSeekingPolicy::new(config.hunger_threshold)),
    }
}

// Down is only reachable here if a caller breaks the non-empty contract
fn pick(moves: &[Direction], rng: &mut dyn RngCore) -> Direction {
    moves.choose(rng).copied().unwrap_or(Direction::Down)
}
