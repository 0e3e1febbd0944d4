use rand::Rng;
use tracing::{debug, warn};

use super::{Board, TileKind};
use crate::{
    config::BoardConfig,
    models::{Position, ResourceType},
};

/// Procedural peninsula generator: ragged coasts, scattered rocks, the home
/// base in the middle and one 2x2 hub per resource type.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    config: BoardConfig,
}

impl BoardGenerator {
    /// Generator for boards shaped by `config`.
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// Generate a board. Identical RNG state yields an identical board.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Board {
        let mut board = Board::new(self.config.width, self.config.height);
        self.carve_coasts(&mut board, rng);
        self.scatter_rocks(&mut board, rng);
        board.stamp_communal_area();

        for (slot, resource) in ResourceType::ALL.into_iter().enumerate() {
            let placed = match self.config.hub_anchors.get(slot) {
                Some(&anchor) => self.try_stamp_hub(&mut board, anchor, resource, false),
                None => self.scatter_hub(&mut board, resource, rng),
            };
            if !placed {
                warn!(%resource, "No room for resource hub");
            }
        }

        debug!(
            width = board.width(),
            height = board.height(),
            resources = board.resource_tiles().len(),
            "Board generated"
        );
        board
    }

    fn carve_coasts<R: Rng + ?Sized>(&self, board: &mut Board, rng: &mut R) {
        let noise = self.config.coast_noise.clamp(0.0, 1.0);
        let width = board.width();
        for y in 0..board.height() {
            let left = if y % 5 == 0 {
                2
            } else if y % 3 == 0 || rng.gen_bool(noise) {
                1
            } else {
                0
            };
            let right = if y % 7 == 0 {
                2
            } else if y % 4 == 0 || rng.gen_bool(noise) {
                1
            } else {
                0
            };

            let columns = (0..left.min(width)).chain(width.saturating_sub(right)..width);
            for x in columns {
                let pos = Position::new(x as i32, y as i32);
                if !board.is_in_communal_area(pos) {
                    board.set(pos, TileKind::Obstacle, None);
                }
            }
        }
    }

    fn scatter_rocks<R: Rng + ?Sized>(&self, board: &mut Board, rng: &mut R) {
        let density = self.config.rock_density.clamp(0.0, 1.0);
        for y in 1..board.height().saturating_sub(1) {
            for x in 1..board.width().saturating_sub(1) {
                let pos = Position::new(x as i32, y as i32);
                if board.is_in_communal_area(pos) || board.tile_kind_at(pos) != TileKind::Land {
                    continue;
                }
                if rng.gen_bool(density) {
                    board.set(pos, TileKind::Obstacle, None);
                }
            }
        }
    }

    fn scatter_hub<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        resource: ResourceType,
        rng: &mut R,
    ) -> bool {
        let max_x = board.width().saturating_sub(1).max(1);
        let max_y = board.height().saturating_sub(1).max(1);
        for _ in 0..self.config.hub_attempts {
            let anchor = Position::new(
                rng.gen_range(0..max_x) as i32,
                rng.gen_range(0..max_y) as i32,
            );
            if self.try_stamp_hub(board, anchor, resource, true) {
                return true;
            }
        }
        false
    }

    fn try_stamp_hub(
        &self,
        board: &mut Board,
        anchor: Position,
        resource: ResourceType,
        keep_apart: bool,
    ) -> bool {
        let footprint = hub_footprint(anchor);
        let fits = footprint.iter().all(|&pos| {
            board.tile_kind_at(pos) == TileKind::Land && !board.is_in_communal_area(pos)
        });
        if !fits {
            return false;
        }
        if keep_apart
            && board
                .resource_tiles()
                .into_iter()
                .any(|existing| existing.manhattan(anchor) < self.config.hub_min_spacing)
        {
            return false;
        }

        for pos in footprint {
            board.set(pos, TileKind::Resource, Some(resource));
        }
        true
    }
}

fn hub_footprint(anchor: Position) -> [Position; 4] {
    [
        anchor,
        anchor.offset(1, 0),
        anchor.offset(0, 1),
        anchor.offset(1, 1),
    ]
}
