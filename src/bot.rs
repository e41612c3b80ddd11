// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Move decision for a single turn: run the safety filters, then let the
// selection policy pick among whatever survived. Nothing carries over between
// turns, so one Bot serves any number of concurrent games.

use log::{debug, info, log_enabled, warn, Level};
use rand::RngCore;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::policy::{self, SelectionPolicy};
use crate::render::render_board;
use crate::safety::apply_filters;
use crate::types::{Direction, GameState, InfoResponse, MoveResponse};

/// Move returned when every direction is unsafe
pub const FALLBACK_MOVE: Direction = Direction::Down;

/// Outcome of one move decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// Moves that survived every filter, in up, down, left, right order
    pub safe_moves: Vec<Direction>,
    /// True when no move was safe and the fallback was returned
    pub fallback: bool,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    policy: Box<dyn SelectionPolicy>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no debug file logging
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    /// Creates a Bot that records every decision through `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        let policy = policy::from_config(&config.policy);
        Bot { config, policy, debug_logger }
    }

    /// Replaces the selection policy
    pub fn with_policy(mut self, policy: Box<dyn SelectionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> InfoResponse {
        info!("INFO");

        let appearance = &self.config.appearance;
        InfoResponse {
            apiversion: appearance.apiversion.clone(),
            author: appearance.author.clone(),
            color: appearance.color.clone(),
            head: appearance.head.clone(),
            tail: appearance.tail.clone(),
            version: appearance.version.clone(),
        }
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!(
            "GAME START {} ({}x{}, {} snakes)",
            state.game.id,
            state.width(),
            state.height(),
            state.snakes().len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("GAME OVER {} after {} turns", state.game.id, state.turn);
    }

    /// Picks a move for this turn. Pure apart from drawing from `rng`.
    pub fn decide(&self, state: &GameState, rng: &mut dyn RngCore) -> Decision {
        let safe_moves = apply_filters(state, &self.config.safety).safe_moves();

        if safe_moves.is_empty() {
            return Decision {
                direction: FALLBACK_MOVE,
                safe_moves,
                fallback: true,
            };
        }

        let direction = self.policy.choose(&safe_moves, state, rng);
        Decision {
            direction,
            safe_moves,
            fallback: false,
        }
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    pub fn get_move(&self, state: &GameState) -> MoveResponse {
        if self.config.debug.render_board && log_enabled!(Level::Debug) {
            debug!("Board:\n{}", render_board(&state.board));
        }

        let mut rng = rand::rng();
        let decision = self.decide(state, &mut rng);

        if decision.fallback {
            warn!(
                "MOVE {}: No safe moves detected! Moving {}",
                state.turn, decision.direction
            );
        } else {
            info!(
                "MOVE {}: {} (safe: {:?}, policy: {})",
                state.turn,
                decision.direction,
                decision.safe_moves,
                self.policy.name()
            );
        }

        if self.debug_logger.is_enabled() {
            self.debug_logger.log_move(DebugLogger::entry_for(
                &state.game.id,
                state.turn,
                &state.you.id,
                &state.board,
                &decision,
            ));
        }

        MoveResponse::new(decision.direction)
    }
}
