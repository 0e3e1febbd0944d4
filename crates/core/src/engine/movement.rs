use super::BoardView;
use crate::{
    board::TileKind,
    models::{PlayerId, Position, Truck},
};

/// Cost of any step that is not entirely within the mover's own network.
pub const STEP_COST: u32 = 1;
/// Flat cost of stepping off the network at the end of a scoot.
pub const SCOOT_EXIT_COST: u32 = 1;

impl BoardView<'_> {
    /// True when `owner` has a track on the tile.
    pub fn is_own_track(&self, owner: PlayerId, pos: Position) -> bool {
        self.tracks().is_owned_by(pos, owner)
    }

    /// Obstacles and other players' tracks block; everything else is open.
    pub fn can_enter(&self, truck: &Truck, pos: Position) -> bool {
        if self.tile_kind_at(pos) == TileKind::Obstacle {
            return false;
        }
        match self.tracks().owner_at(pos) {
            Some(owner) => owner == truck.owner,
            None => true,
        }
    }

    /// Cost of a single orthogonal step. Landing on your own track is free,
    /// any other step costs [`STEP_COST`]. Non-adjacent pairs have no cost.
    pub fn movement_cost(&self, truck: &Truck, from: Position, to: Position) -> Option<u32> {
        if !from.is_adjacent(to) {
            return None;
        }
        if self.is_own_track(truck.owner, to) {
            Some(0)
        } else {
            Some(STEP_COST)
        }
    }
}
