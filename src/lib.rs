// Library exports for the Battlesnake bot
// This allows the replay tool and integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod handler;
pub mod policy;
pub mod render;
pub mod replay;
pub mod safety;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_support;
