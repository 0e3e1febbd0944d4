//! Movement and track-network resolution.
//!
//! Everything here is a pure query over a borrowed [`Board`] and
//! [`TrackRegistry`]: which tiles a truck may enter, what a single step
//! costs, which destinations a dice budget reaches ([`compute_highlights`])
//! and which tiles a scoot actually rides through ([`find_scoot_path`]).

mod grid;
mod movement;
mod reachability;
mod scoot;

pub use movement::{SCOOT_EXIT_COST, STEP_COST};
pub use reachability::{Highlight, HighlightSet};

use crate::{
    board::{Board, TileKind},
    models::{Position, Track, Truck},
    tracks::TrackRegistry,
};

/// Read-only pairing of board and tracks that the engine queries run on.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    tracks: &'a TrackRegistry,
}

impl<'a> BoardView<'a> {
    /// View over `board` with `tracks` laid on it.
    pub fn new(board: &'a Board, tracks: &'a TrackRegistry) -> Self {
        Self { board, tracks }
    }

    /// The underlying board.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Tracks placed on the board.
    pub fn tracks(&self) -> &'a TrackRegistry {
        self.tracks
    }

    /// Tile kind; obstacle outside the board.
    pub fn tile_kind_at(&self, pos: Position) -> TileKind {
        self.board.tile_kind_at(pos)
    }

    /// Track on the tile, if any.
    pub fn track_at(&self, pos: Position) -> Option<Track> {
        self.tracks.track_at(pos)
    }
}

/// Legal destinations for `truck` with `dice_budget` movement points left.
pub fn compute_highlights(
    board: &Board,
    tracks: &TrackRegistry,
    truck: &Truck,
    dice_budget: u32,
) -> HighlightSet {
    BoardView::new(board, tracks).highlights(truck, dice_budget)
}

/// Tile-by-tile route of a scoot to `target`, starting at the truck's tile
/// and ending on `target`. `None` when no owned track touches the target.
pub fn find_scoot_path(
    board: &Board,
    tracks: &TrackRegistry,
    truck: &Truck,
    target: Position,
) -> Option<Vec<Position>> {
    BoardView::new(board, tracks).scoot_path(truck, target)
}

/// Whether `truck` may stand on `pos`.
pub fn can_enter_tile(board: &Board, tracks: &TrackRegistry, truck: &Truck, pos: Position) -> bool {
    BoardView::new(board, tracks).can_enter(truck, pos)
}

/// Cost of one orthogonal step; `None` when the tiles are not adjacent.
pub fn movement_cost(
    board: &Board,
    tracks: &TrackRegistry,
    truck: &Truck,
    from: Position,
    to: Position,
) -> Option<u32> {
    BoardView::new(board, tracks).movement_cost(truck, from, to)
}
