//! Registry of placed tracks.

use crate::{
    error::GameError,
    models::{PlayerId, Position, Track},
};

/// Every track on the board, indexed by tile for constant-time lookups.
///
/// Tracks are never removed or reassigned; a tile holds at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRegistry {
    width: usize,
    height: usize,
    owners: Vec<Option<PlayerId>>,
    placed: Vec<Track>,
}

impl TrackRegistry {
    /// Empty registry for a board of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            owners: vec![None; width * height],
            placed: Vec::new(),
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Record a new track. Fails on occupied or off-board tiles.
    pub fn place(&mut self, position: Position, owner: PlayerId) -> Result<Track, GameError> {
        let idx = self
            .index(position)
            .ok_or(GameError::OutOfBounds(position))?;
        if self.owners[idx].is_some() {
            return Err(GameError::TileOccupied(position));
        }
        self.owners[idx] = Some(owner);
        let track = Track { position, owner };
        self.placed.push(track);
        Ok(track)
    }

    /// Owner of the track on a tile, if any.
    pub fn owner_at(&self, pos: Position) -> Option<PlayerId> {
        self.index(pos).and_then(|idx| self.owners[idx])
    }

    /// The track on a tile, if any.
    pub fn track_at(&self, pos: Position) -> Option<Track> {
        self.owner_at(pos).map(|owner| Track {
            position: pos,
            owner,
        })
    }

    /// True when `owner` has a track on the tile.
    pub fn is_owned_by(&self, pos: Position, owner: PlayerId) -> bool {
        self.owner_at(pos) == Some(owner)
    }

    /// Number of tracks belonging to `owner`.
    pub fn count_owned(&self, owner: PlayerId) -> usize {
        self.placed.iter().filter(|track| track.owner == owner).count()
    }

    /// Tracks in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.placed.iter()
    }

    /// Number of placed tracks.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// True before any track is placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}
