//! Environment configuration
//!
//! Every selector is a closed enumeration parsed once, so a bad string fails
//! at construction time with `InvalidConfiguration`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use hex_core::{HexError, MovePolicy, Player, RandomPolicy};
use serde::Deserialize;

/// What to do when the mover targets an occupied cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IllegalMoveMode {
    /// Surface `HexError::IllegalMove` to the caller
    Raise,
    /// The mover loses immediately
    #[default]
    Lose,
}

impl FromStr for IllegalMoveMode {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(IllegalMoveMode::Raise),
            "lose" => Ok(IllegalMoveMode::Lose),
            other => Err(HexError::InvalidConfiguration(format!(
                "illegal move mode must be 'raise' or 'lose', not '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IllegalMoveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveMode::Raise => f.write_str("raise"),
            IllegalMoveMode::Lose => f.write_str("lose"),
        }
    }
}

/// Opponent policy selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpponentKind {
    /// Uniformly random legal placement
    #[default]
    Random,
}

impl OpponentKind {
    /// Instantiate the policy
    pub fn build(self, seed: u64) -> Box<dyn MovePolicy> {
        match self {
            OpponentKind::Random => Box::new(RandomPolicy::with_seed(seed)),
        }
    }
}

impl FromStr for OpponentKind {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(OpponentKind::Random),
            other => Err(HexError::InvalidConfiguration(format!(
                "unrecognized opponent policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentKind::Random => f.write_str("random"),
        }
    }
}

/// Observation encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObservationType {
    /// Three planes: first's stones, second's stones, empty cells
    #[default]
    Numpy3c,
}

impl FromStr for ObservationType {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numpy3c" => Ok(ObservationType::Numpy3c),
            other => Err(HexError::InvalidConfiguration(format!(
                "unsupported observation type '{}'",
                other
            ))),
        }
    }
}

/// Session configuration for [`crate::HexEnv`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    /// Board side length
    pub board_size: usize,
    /// Color the agent plays
    pub player_color: Player,
    pub opponent: OpponentKind,
    pub observation_type: ObservationType,
    pub illegal_move_mode: IllegalMoveMode,
    /// Opponent seed (None = random)
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            board_size: 11,
            player_color: Player::First,
            opponent: OpponentKind::Random,
            observation_type: ObservationType::Numpy3c,
            illegal_move_mode: IllegalMoveMode::Lose,
            seed: None,
        }
    }
}

impl EnvConfig {
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_player_color(mut self, player_color: Player) -> Self {
        self.player_color = player_color;
        self
    }

    pub fn with_opponent(mut self, opponent: OpponentKind) -> Self {
        self.opponent = opponent;
        self
    }

    pub fn with_illegal_move_mode(mut self, mode: IllegalMoveMode) -> Self {
        self.illegal_move_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check values the type system does not rule out
    pub fn validate(&self) -> hex_core::Result<()> {
        if self.board_size == 0 {
            return Err(HexError::InvalidConfiguration(
                "board size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON document with string-valued selectors
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let raw: RawEnvConfig = serde_json::from_str(content)?;
        Ok(EnvConfig::try_from(raw)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// On-disk form; absent fields keep their defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawEnvConfig {
    board_size: Option<i64>,
    player_color: Option<String>,
    opponent: Option<String>,
    observation_type: Option<String>,
    illegal_move_mode: Option<String>,
    seed: Option<u64>,
}

impl TryFrom<RawEnvConfig> for EnvConfig {
    type Error = HexError;

    fn try_from(raw: RawEnvConfig) -> Result<Self, Self::Error> {
        let mut config = EnvConfig::default();

        if let Some(size) = raw.board_size {
            config.board_size = usize::try_from(size)
                .ok()
                .filter(|&s| s >= 1)
                .ok_or_else(|| {
                    HexError::InvalidConfiguration(format!("invalid board size: {}", size))
                })?;
        }
        if let Some(color) = raw.player_color {
            config.player_color = color.parse()?;
        }
        if let Some(opponent) = raw.opponent {
            config.opponent = opponent.parse()?;
        }
        if let Some(observation_type) = raw.observation_type {
            config.observation_type = observation_type.parse()?;
        }
        if let Some(mode) = raw.illegal_move_mode {
            config.illegal_move_mode = mode.parse()?;
        }
        config.seed = raw.seed;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.board_size, 11);
        assert_eq!(config.player_color, Player::First);
        assert_eq!(config.illegal_move_mode, IllegalMoveMode::Lose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_selectors_parse() {
        assert_eq!("raise".parse::<IllegalMoveMode>().unwrap(), IllegalMoveMode::Raise);
        assert_eq!("random".parse::<OpponentKind>().unwrap(), OpponentKind::Random);
        assert_eq!("numpy3c".parse::<ObservationType>().unwrap(), ObservationType::Numpy3c);
    }

    #[test]
    fn test_unknown_selectors_rejected() {
        assert!(matches!(
            "ignore".parse::<IllegalMoveMode>(),
            Err(HexError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            "minimax".parse::<OpponentKind>(),
            Err(HexError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            "rgb".parse::<ObservationType>(),
            Err(HexError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_size_invalid() {
        let config = EnvConfig::default().with_board_size(0);
        assert!(matches!(
            config.validate(),
            Err(HexError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let config = EnvConfig::from_json(
            r#"{"board_size": 7, "player_color": "white", "illegal_move_mode": "raise", "seed": 9}"#,
        )
        .unwrap();
        assert_eq!(config.board_size, 7);
        assert_eq!(config.player_color, Player::Second);
        assert_eq!(config.illegal_move_mode, IllegalMoveMode::Raise);
        assert_eq!(config.opponent, OpponentKind::Random);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_from_json_bad_values() {
        let err = EnvConfig::from_json(r#"{"player_color": "green"}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HexError>(),
            Some(HexError::InvalidConfiguration(_))
        ));

        let err = EnvConfig::from_json(r#"{"board_size": -3}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HexError>(),
            Some(HexError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.json");
        std::fs::write(&path, r#"{"board_size": 6, "opponent": "random", "seed": 21}"#).unwrap();

        let config = EnvConfig::load(&path).unwrap();
        assert_eq!(config.board_size, 6);
        assert_eq!(config.seed, Some(21));
        assert_eq!(config.player_color, Player::First);

        let missing = dir.path().join("missing.json");
        let err = EnvConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
