//! HEX Env - Game driver around the core engine
//!
//! This crate provides:
//! - A single-agent environment against a fixed opponent policy
//!   (reset/step, rewards, illegal-move handling)
//! - Typed session configuration, loadable from JSON
//! - Three-plane board observations
//! - Match play between two policies (sequential or parallel)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: HexEnv::step, play_match (orchestration)
//! - Level 2: opponent turns, game loops (phases)
//! - Level 3: validate/apply/evaluate via hex-core (steps)
//! - Level 4: configuration, observation encoding

mod config;
mod env;
mod match_play;
mod observation;

pub use config::{EnvConfig, IllegalMoveMode, ObservationType, OpponentKind};
pub use env::{HexEnv, Step};
pub use match_play::{
    play_match, play_match_parallel, GameRecord, MatchConfig, MatchResult, PolicyFactory, Side,
};
pub use observation::{Observation, CHANNELS};
