use std::ops::ControlFlow;

use super::{grid::TileGrid, BoardView};
use crate::models::{Position, Truck};

impl BoardView<'_> {
    /// Reconstruct the tiles a scoot to `target` passes through.
    ///
    /// The walk uses the same seeds and order as the highlight search and
    /// leaves the network at the shallowest track tile bordering `target`.
    /// The path starts on the truck's tile, rides owned track, and ends with
    /// the single paid step onto `target`.
    pub fn scoot_path(&self, truck: &Truck, target: Position) -> Option<Vec<Position>> {
        let board = self.board();
        let mut parents: TileGrid<Option<Position>> =
            TileGrid::new(board.width(), board.height(), None);

        let exit = self.walk_network(truck, |tile, parent| {
            parents.set(tile, parent);
            if tile.is_adjacent(target) {
                ControlFlow::Break(tile)
            } else {
                ControlFlow::Continue(())
            }
        })?;

        let mut ridden = vec![exit];
        let mut cursor = exit;
        while let Some(&Some(parent)) = parents.get(cursor) {
            ridden.push(parent);
            cursor = parent;
        }
        ridden.reverse();

        let mut path = Vec::with_capacity(ridden.len() + 2);
        if ridden.first() != Some(&truck.position) {
            path.push(truck.position);
        }
        path.extend(ridden);
        path.push(target);
        Some(path)
    }
}
