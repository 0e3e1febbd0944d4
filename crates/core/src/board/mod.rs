//! The static tile grid.
//!
//! A board is generated once per game and read-only afterwards. Tiles are
//! stored row-major (`y * width + x`). Coordinates outside the grid read as
//! [`TileKind::Obstacle`] so callers never special-case the edge.

mod generator;

pub use generator::BoardGenerator;

use crate::{
    error::BoardError,
    models::{Position, ResourceType},
};

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Open ground; the only kind that accepts tracks.
    Land,
    /// Water, rock, or anything beyond the edge.
    Obstacle,
    /// Part of a resource hub; see [`Board::resource_at`].
    Resource,
    /// The shared home base where cargo is delivered.
    CommunalBase,
}

impl TileKind {
    /// Character used by [`Board::parse`] and debug dumps.
    pub fn symbol(self, resource: Option<ResourceType>) -> char {
        match self {
            TileKind::Land => '.',
            TileKind::Obstacle => '#',
            TileKind::Resource => resource.map(ResourceType::symbol).unwrap_or('S'),
            TileKind::CommunalBase => 'H',
        }
    }
}

/// Rectangular grid of tiles plus the resource carried by hub tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    resources: Vec<Option<ResourceType>>,
    communal_center: Position,
}

impl Board {
    /// All-land board with the communal area stamped around its centre.
    pub fn new(width: usize, height: usize) -> Self {
        let mut board = Self {
            width,
            height,
            tiles: vec![TileKind::Land; width * height],
            resources: vec![None; width * height],
            communal_center: Position::new((width / 2) as i32, (height / 2) as i32),
        };
        board.stamp_communal_area();
        board
    }

    /// Build a board from text rows: `.` land, `#` obstacle, `H` home base,
    /// `C`/`W`/`S` concrete, wood and steel hubs. The communal centre is the
    /// middle of the grid; the text decides which tiles are base tiles.
    pub fn parse(rows: &[&str]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        let mut resources = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(BoardError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let (kind, resource) = match symbol {
                    '.' => (TileKind::Land, None),
                    '#' => (TileKind::Obstacle, None),
                    'H' => (TileKind::CommunalBase, None),
                    'C' => (TileKind::Resource, Some(ResourceType::Concrete)),
                    'W' => (TileKind::Resource, Some(ResourceType::Wood)),
                    'S' => (TileKind::Resource, Some(ResourceType::Steel)),
                    _ => return Err(BoardError::UnknownTile { symbol, x, y }),
                };
                tiles.push(kind);
                resources.push(resource);
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
            resources,
            communal_center: Position::new((width / 2) as i32, (height / 2) as i32),
        })
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Centre tile of the home base; trucks start here.
    pub fn communal_center(&self) -> Position {
        self.communal_center
    }

    /// Flat index for in-bounds positions.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// True for tiles on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Tile kind, with everything off the grid reading as an obstacle.
    pub fn tile_kind_at(&self, pos: Position) -> TileKind {
        self.index(pos)
            .map(|idx| self.tiles[idx])
            .unwrap_or(TileKind::Obstacle)
    }

    /// Resource produced by a hub tile.
    pub fn resource_at(&self, pos: Position) -> Option<ResourceType> {
        self.index(pos).and_then(|idx| self.resources[idx])
    }

    /// The plus-shaped home base footprint: a 3x3 square around the centre
    /// with one extra tile on each arm.
    pub fn is_in_communal_area(&self, pos: Position) -> bool {
        let dx = pos.x.abs_diff(self.communal_center.x);
        let dy = pos.y.abs_diff(self.communal_center.y);
        (dx <= 1 && dy <= 1) || (dx == 0 && dy <= 2) || (dy == 0 && dx <= 2)
    }

    /// Every in-bounds position, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// Positions of all resource hub tiles.
    pub fn resource_tiles(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.tile_kind_at(pos) == TileKind::Resource)
            .collect()
    }

    /// Render back to the [`Board::parse`] format.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);
                        self.tile_kind_at(pos).symbol(self.resource_at(pos))
                    })
                    .collect()
            })
            .collect()
    }

    pub(crate) fn set(&mut self, pos: Position, kind: TileKind, resource: Option<ResourceType>) {
        if let Some(idx) = self.index(pos) {
            self.tiles[idx] = kind;
            self.resources[idx] = resource;
        }
    }

    pub(crate) fn stamp_communal_area(&mut self) {
        let positions: Vec<Position> = self
            .positions()
            .filter(|&pos| self.is_in_communal_area(pos))
            .collect();
        for pos in positions {
            self.set(pos, TileKind::CommunalBase, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_obstacle() {
        let board = Board::new(11, 26);
        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(11, 3),
            Position::new(3, 26),
            Position::new(i32::MIN, i32::MAX),
        ] {
            assert_eq!(board.tile_kind_at(pos), TileKind::Obstacle, "{pos}");
            assert_eq!(board.resource_at(pos), None);
        }
        assert_eq!(board.tile_kind_at(Position::new(0, 0)), TileKind::Land);
    }

    #[test]
    fn communal_area_is_a_plus_around_the_center() {
        let board = Board::new(11, 26);
        let center = board.communal_center();
        assert_eq!(center, Position::new(5, 13));

        let base: Vec<Position> = board
            .positions()
            .filter(|&pos| board.tile_kind_at(pos) == TileKind::CommunalBase)
            .collect();
        assert_eq!(base.len(), 13);
        assert!(board.is_in_communal_area(center.offset(0, 2)));
        assert!(board.is_in_communal_area(center.offset(-2, 0)));
        assert!(board.is_in_communal_area(center.offset(1, -1)));
        assert!(!board.is_in_communal_area(center.offset(1, 2)));
        assert!(!board.is_in_communal_area(center.offset(0, 3)));
    }

    #[test]
    fn parse_round_trips_layout() -> Result<(), BoardError> {
        let rows = ["..#..", ".CWS.", "..H..", "#...#"];
        let board = Board::parse(&rows)?;
        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 4);
        assert_eq!(board.tile_kind_at(Position::new(2, 0)), TileKind::Obstacle);
        assert_eq!(
            board.resource_at(Position::new(2, 1)),
            Some(ResourceType::Wood)
        );
        assert_eq!(board.to_rows(), rows.map(String::from).to_vec());
        Ok(())
    }

    #[test]
    fn parse_rejects_bad_layouts() {
        assert_eq!(Board::parse(&[]), Err(BoardError::Empty));
        assert_eq!(
            Board::parse(&["...", ".."]),
            Err(BoardError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Board::parse(&["..x"]),
            Err(BoardError::UnknownTile {
                symbol: 'x',
                x: 2,
                y: 0
            })
        );
    }
}
