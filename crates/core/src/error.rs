//! Error types surfaced by the core.

use thiserror::Error;

use crate::models::{PlayerId, Position};

/// Reasons a player action is rejected by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The action belongs to another phase of the game.
    #[error("not available during the {0} phase")]
    WrongPhase(&'static str),
    /// A scoot animation is still running.
    #[error("a move is already in progress")]
    Busy,
    /// The destination is not one of the current highlights.
    #[error("{0} is not a legal destination")]
    NotHighlighted(Position),
    /// The dice budget for this turn is spent.
    #[error("no moves left this turn")]
    NoMovesLeft,
    /// Only one track may be placed per turn.
    #[error("a track was already placed this turn")]
    TrackAlreadyPlaced,
    /// The player's track budget is exhausted.
    #[error("{0} has no tracks left to place")]
    NoTrackBudget(PlayerId),
    /// Tracks only go on plain land outside the home base.
    #[error("cannot build a track on {0}")]
    TileNotBuildable(Position),
    /// A track already occupies the tile.
    #[error("{0} already holds a track")]
    TileOccupied(Position),
    /// Coordinates outside the board.
    #[error("{0} is outside the board")]
    OutOfBounds(Position),
    /// All draft tracks for this player are down.
    #[error("{0} has placed every draft track")]
    DraftQuotaReached(PlayerId),
    /// Silo does not cover the active contract.
    #[error("{0} cannot fulfil the current contract yet")]
    ContractUnmet(PlayerId),
}

/// Problems parsing a textual board layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// No rows, or rows with no columns.
    #[error("board layout is empty")]
    Empty,
    /// A row whose width differs from the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A character with no tile meaning.
    #[error("unknown tile '{symbol}' at ({x}, {y})")]
    UnknownTile {
        /// Offending character.
        symbol: char,
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
}
