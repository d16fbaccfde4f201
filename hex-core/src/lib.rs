//! HEX Core - Board, rules and win detection
//!
//! This crate provides the game engine for Hex:
//! - Square board with hex adjacency (four grid neighbors plus two
//!   anti-diagonal neighbors)
//! - Move validation and application
//! - Flood-fill win detection for both players' edge pairs
//! - Discrete action encoding (cells, pass, resign)
//! - Move sources, starting with a uniformly random policy

pub mod action;
pub mod board;
pub mod error;
pub mod game;
pub mod policy;
pub mod rules;
pub mod win;

// Re-exports for convenient access
pub use action::action_space;
pub use board::{Board, Cell, Occupant, NEIGHBOR_OFFSETS};
pub use error::{HexError, Result};
pub use game::{Game, GameResult, Move, Player};
pub use policy::{MovePolicy, RandomPolicy};
pub use rules::{apply, is_legal};
pub use win::{evaluate, has_connection};
