#![warn(clippy::all, missing_docs)]

//! Core game logic for WonkyTracks.
//!
//! This crate hosts the board and track models, the movement and
//! track-network engine, the turn controller with its CPU opponent, and
//! configuration handling used by the terminal UI.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod models;
pub mod tracks;

pub use board::{Board, BoardGenerator, TileKind};
pub use config::AppConfig;
pub use engine::{compute_highlights, find_scoot_path, Highlight, HighlightSet};
pub use error::{BoardError, GameError};
pub use game::{GameController, GameEvent, GameMode, Phase};
pub use models::{PlayerId, Position, ResourceType, Stockpile, Track, Truck};
pub use tracks::TrackRegistry;
