// Configuration module for reading Snake.toml
// Holds the snake's appearance, safety rules, move selection policy, and debug switches

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub safety: SafetyConfig,
    pub policy: PolicyConfig,
    pub debug: DebugConfig,
}

/// Values returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Rules shared by the safety filters
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SafetyConfig {
    /// Treat a non-stacked tail as vacated on the next move
    pub tail_vacates: bool,
    /// Mark cells an opponent head can also reach as unsafe
    pub avoid_head_to_head: bool,
}

/// Which selection policy picks among safe moves
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Random,
    FoodSeeking,
}

/// Selection policy settings
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
    /// Health at or below which the food-seeking policy heads for food
    pub hunger_threshold: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
    pub render_board: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "Hisssteria".to_string(),
                color: "#d9a0e5".to_string(),
                head: "all-seeing".to_string(),
                tail: "curled".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            safety: SafetyConfig {
                tail_vacates: true,
                avoid_head_to_head: true,
            },
            policy: PolicyConfig {
                kind: PolicyKind::Random,
                hunger_threshold: 30,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
                render_board: true,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_toml_can_be_parsed() {
        // This test ensures Snake.toml is valid and can be parsed
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml")
            .expect("Snake.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.appearance.author, hardcoded_config.appearance.author);
        assert_eq!(file_config.appearance.color, hardcoded_config.appearance.color);
        assert_eq!(file_config.appearance.head, hardcoded_config.appearance.head);
        assert_eq!(file_config.appearance.tail, hardcoded_config.appearance.tail);
        assert_eq!(file_config.safety, hardcoded_config.safety);
        assert_eq!(file_config.policy.kind, hardcoded_config.policy.kind);
        assert_eq!(
            file_config.policy.hunger_threshold,
            hardcoded_config.policy.hunger_threshold
        );
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_policy_kind_parses_snake_case() {
        let text = r##"
            [appearance]
            apiversion = "1"
            author = "a"
            color = "#000000"
            head = "default"
            tail = "default"
            version = "0.0.1"

            [safety]
            tail_vacates = false
            avoid_head_to_head = true

            [policy]
            kind = "food_seeking"
            hunger_threshold = 50

            [debug]
            enabled = false
            log_file_path = "x.jsonl"
            render_board = false
        "##;

        let config = Config::from_toml_str(text).unwrap();
        assert_eq!(config.policy.kind, PolicyKind::FoodSeeking);
        assert!(!config.safety.tail_vacates);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let result = Config::from_toml_str("[safety]\ntail_vacates = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        // Test with a non-existent file
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
