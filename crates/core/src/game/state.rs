use std::fmt;

use crate::{
    board::{Board, TileKind},
    engine::BoardView,
    models::{Player, PlayerId, Position, Truck},
    tracks::TrackRegistry,
};

use super::contracts::ContractBook;

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans sharing the keyboard.
    TwoPlayer,
    /// Player two is driven by the CPU.
    VsCpu,
}

impl GameMode {
    /// True when `player` is computer-controlled in this mode.
    pub fn is_cpu(self, player: PlayerId) -> bool {
        self == GameMode::VsCpu && player == PlayerId::Two
    }
}

/// Coarse game progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Players alternate placing their starting tracks.
    Draft,
    /// Regular turns.
    Play,
    /// Someone reached the cash target.
    GameOver {
        /// The player who got there.
        winner: PlayerId,
    },
}

impl Phase {
    /// Lower-case label for status lines.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Draft => "draft",
            Phase::Play => "play",
            Phase::GameOver { .. } => "game over",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of the opening track draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    /// Player due to place next.
    pub current: PlayerId,
    /// Tracks placed so far, per player.
    pub placed: [u32; 2],
    /// Tracks each player places.
    pub quota: u32,
}

impl DraftState {
    /// Fresh draft with player one to place.
    pub fn new(quota: u32) -> Self {
        Self {
            current: PlayerId::One,
            placed: [0; 2],
            quota,
        }
    }

    /// Draft tracks `player` still has to place.
    pub fn remaining(&self, player: PlayerId) -> u32 {
        self.quota.saturating_sub(self.placed[player.index()])
    }

    /// True once both players met the quota.
    pub fn is_complete(&self) -> bool {
        PlayerId::ALL
            .iter()
            .all(|&player| self.remaining(player) == 0)
    }
}

/// Per-turn bookkeeping, reset whenever a turn begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    /// Player whose turn it is.
    pub active: PlayerId,
    /// Die result at the start of the turn.
    pub rolled: u32,
    /// Movement points still available.
    pub remaining: u32,
    /// The one in-turn track placement has been used.
    pub has_placed_track: bool,
}

impl TurnState {
    /// Turn for `active` with the full roll available.
    pub fn new(active: PlayerId, rolled: u32) -> Self {
        Self {
            active,
            rolled,
            remaining: rolled,
            has_placed_track: false,
        }
    }
}

/// Everything the game knows, owned by the controller and lent out to the
/// engine and renderers.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Who controls player two.
    pub mode: GameMode,
    /// Current phase.
    pub phase: Phase,
    /// Static tiles.
    pub board: Board,
    /// Every placed track.
    pub tracks: TrackRegistry,
    /// Player economies, indexed by [`PlayerId::index`].
    pub players: [Player; 2],
    /// One truck per player, indexed by [`PlayerId::index`]; empty until
    /// the draft completes.
    pub trucks: Vec<Truck>,
    /// Draft progress.
    pub draft: DraftState,
    /// The running turn.
    pub turn: TurnState,
    /// Contract on offer and those after it.
    pub contracts: ContractBook,
}

impl GameState {
    /// Economy of `id`.
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Mutable economy of `id`.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Truck of `id`, once the draft is over.
    pub fn truck(&self, id: PlayerId) -> Option<&Truck> {
        self.trucks.get(id.index())
    }

    /// Mutable truck of `id`.
    pub fn truck_mut(&mut self, id: PlayerId) -> Option<&mut Truck> {
        self.trucks.get_mut(id.index())
    }

    /// Truck of the player whose turn it is.
    pub fn active_truck(&self) -> Option<&Truck> {
        self.truck(self.turn.active)
    }

    /// Engine view over the current board and tracks.
    pub fn view(&self) -> BoardView<'_> {
        BoardView::new(&self.board, &self.tracks)
    }

    /// Plain land outside the home base: the only tiles that take tracks.
    pub fn is_buildable(&self, pos: Position) -> bool {
        self.board.tile_kind_at(pos) == TileKind::Land && !self.board.is_in_communal_area(pos)
    }

    /// Buildable and not yet claimed.
    pub fn is_free_for_track(&self, pos: Position) -> bool {
        self.is_buildable(pos) && self.tracks.track_at(pos).is_none()
    }

    /// Player currently expected to act.
    pub fn acting_player(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Draft => Some(self.draft.current),
            Phase::Play => Some(self.turn.active),
            Phase::GameOver { .. } => None,
        }
    }
}
