//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate. Signed so that neighbours of edge tiles can be named;
/// anything outside the board reads as an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Position {
    /// Orthogonal offsets in the fixed order used by every traversal.
    pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

    /// Build a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by the given offset.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours, in [`Position::DIRECTIONS`] order.
    pub fn neighbors(self) -> [Position; 4] {
        Self::DIRECTIONS.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// First player (red).
    One,
    /// Second player (blue); the CPU seat in single-player games.
    Two,
}

impl PlayerId {
    /// Both players in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Index into per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// The opponent.
    pub const fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Human-facing seat number.
    pub const fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Raw material produced by resource hubs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// Grey hub, `C`.
    Concrete,
    /// Brown hub, `W`.
    Wood,
    /// Blue hub, `S`. Delivering steel also grants extra track budget.
    Steel,
}

impl ResourceType {
    /// Every resource type, in hub generation order.
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Steel,
        ResourceType::Wood,
        ResourceType::Concrete,
    ];

    /// Single-letter label used on the board.
    pub const fn symbol(self) -> char {
        match self {
            ResourceType::Concrete => 'C',
            ResourceType::Wood => 'W',
            ResourceType::Steel => 'S',
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceType::Concrete => "concrete",
            ResourceType::Wood => "wood",
            ResourceType::Steel => "steel",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-resource counter, used both for silos and for contract requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stockpile {
    /// Concrete units.
    pub concrete: u32,
    /// Wood units.
    pub wood: u32,
    /// Steel units.
    pub steel: u32,
}

impl Stockpile {
    /// Stockpile with the given counts.
    pub const fn new(concrete: u32, wood: u32, steel: u32) -> Self {
        Self {
            concrete,
            wood,
            steel,
        }
    }

    /// Count for `resource`.
    pub fn get(&self, resource: ResourceType) -> u32 {
        match resource {
            ResourceType::Concrete => self.concrete,
            ResourceType::Wood => self.wood,
            ResourceType::Steel => self.steel,
        }
    }

    /// Add `amount` units of `resource`.
    pub fn add(&mut self, resource: ResourceType, amount: u32) {
        match resource {
            ResourceType::Concrete => self.concrete += amount,
            ResourceType::Wood => self.wood += amount,
            ResourceType::Steel => self.steel += amount,
        }
    }

    /// True when every counter is at least the one in `required`.
    pub fn covers(&self, required: &Stockpile) -> bool {
        ResourceType::ALL
            .iter()
            .all(|&resource| self.get(resource) >= required.get(resource))
    }

    /// Remove `required` from this stockpile. Returns `false` and leaves the
    /// counters untouched when it does not cover the requirement.
    pub fn withdraw(&mut self, required: &Stockpile) -> bool {
        if !self.covers(required) {
            return false;
        }
        self.concrete -= required.concrete;
        self.wood -= required.wood;
        self.steel -= required.steel;
        true
    }

    /// How many units of `resource` are still missing to reach `required`.
    pub fn deficit(&self, required: &Stockpile, resource: ResourceType) -> u32 {
        required.get(resource).saturating_sub(self.get(resource))
    }
}

/// A player-owned track segment occupying one land tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    /// Tile the track sits on.
    pub position: Position,
    /// Player who built it.
    pub owner: PlayerId,
}

/// A player's truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truck {
    /// Player driving it.
    pub owner: PlayerId,
    /// Tile the truck stands on.
    pub position: Position,
    /// Resource currently loaded, if any.
    pub cargo: Option<ResourceType>,
}

impl Truck {
    /// Empty truck parked at `position`.
    pub fn new(owner: PlayerId, position: Position) -> Self {
        Self {
            owner,
            position,
            cargo: None,
        }
    }
}

/// Per-player economy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Seat.
    pub id: PlayerId,
    /// Cash earned from contracts.
    pub cash: u32,
    /// Delivered resources not yet spent.
    pub stockpile: Stockpile,
    /// Tracks this player may still place during play.
    pub track_budget: u32,
}

impl Player {
    /// Player with no cash or stock.
    pub fn new(id: PlayerId, track_budget: u32) -> Self {
        Self {
            id,
            cash: 0,
            stockpile: Stockpile::default(),
            track_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_direction_order() {
        let origin = Position::new(3, 4);
        assert_eq!(
            origin.neighbors(),
            [
                Position::new(4, 4),
                Position::new(2, 4),
                Position::new(3, 5),
                Position::new(3, 3),
            ]
        );
        assert!(origin.neighbors().iter().all(|n| n.is_adjacent(origin)));
        assert!(!origin.is_adjacent(origin));
        assert!(!origin.is_adjacent(Position::new(4, 5)));
    }

    #[test]
    fn stockpile_withdraw_is_all_or_nothing() {
        let mut silo = Stockpile::new(3, 1, 2);
        let contract = Stockpile::new(2, 2, 1);
        assert!(!silo.withdraw(&contract));
        assert_eq!(silo, Stockpile::new(3, 1, 2));
        assert_eq!(silo.deficit(&contract, ResourceType::Wood), 1);

        silo.add(ResourceType::Wood, 1);
        assert!(silo.withdraw(&contract));
        assert_eq!(silo, Stockpile::new(1, 0, 1));
    }

    #[test]
    fn player_ids_index_and_alternate() {
        assert_eq!(PlayerId::One.index(), 0);
        assert_eq!(PlayerId::Two.index(), 1);
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.to_string(), "Player 2");
    }
}
