use std::fmt;

use crate::models::{PlayerId, Position, ResourceType};

/// Something that happened in the game, queued for front-ends to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A starting track went down during the draft.
    DraftTrackPlaced {
        /// Drafting player.
        player: PlayerId,
        /// Tile of the new track.
        position: Position,
    },
    /// Both players finished drafting and play begins.
    DraftComplete,
    /// A turn began with a fresh roll.
    TurnStarted {
        /// Player to move.
        player: PlayerId,
        /// Movement points rolled.
        roll: u32,
    },
    /// A track was built under the active truck.
    TrackPlaced {
        /// Builder.
        player: PlayerId,
        /// Tile of the new track.
        position: Position,
    },
    /// A move settled.
    Moved {
        /// Mover.
        player: PlayerId,
        /// Destination tile.
        to: Position,
        /// Points spent.
        cost: u32,
        /// The move rode the track network.
        scoot: bool,
    },
    /// An empty truck loaded at a hub.
    PickedUp {
        /// Truck owner.
        player: PlayerId,
        /// Loaded resource.
        resource: ResourceType,
    },
    /// Cargo reached the home base.
    Delivered {
        /// Truck owner.
        player: PlayerId,
        /// Delivered resource.
        resource: ResourceType,
        /// Track budget granted by the delivery.
        track_bonus: u32,
    },
    /// The player's stockpile now covers the contract on offer.
    ContractAvailable {
        /// Player who can fulfil it.
        player: PlayerId,
        /// One-based contract number.
        number: usize,
    },
    /// A contract was paid out.
    ContractFulfilled {
        /// Recipient.
        player: PlayerId,
        /// Cash paid.
        reward: u32,
        /// Cash after payment.
        cash: u32,
    },
    /// The active player's turn is over.
    TurnEnded {
        /// Player whose turn ended.
        player: PlayerId,
    },
    /// Someone reached the cash target.
    GameWon {
        /// Winner.
        player: PlayerId,
        /// Winning cash total.
        cash: u32,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::DraftTrackPlaced { player, position } => {
                write!(f, "{player} drafted a track at {position}")
            }
            GameEvent::DraftComplete => f.write_str("Draft complete, trucks roll out"),
            GameEvent::TurnStarted { player, roll } => write!(f, "{player} rolled {roll}"),
            GameEvent::TrackPlaced { player, position } => {
                write!(f, "{player} built a track at {position}")
            }
            GameEvent::Moved {
                player,
                to,
                cost,
                scoot,
            } => {
                let how = if *scoot { "scooted" } else { "moved" };
                write!(f, "{player} {how} to {to} (cost {cost})")
            }
            GameEvent::PickedUp { player, resource } => {
                write!(f, "{player} loaded {resource}")
            }
            GameEvent::Delivered {
                player,
                resource,
                track_bonus,
            } => {
                write!(f, "{player} delivered {resource}")?;
                if *track_bonus > 0 {
                    write!(f, " (+{track_bonus} tracks)")?;
                }
                Ok(())
            }
            GameEvent::ContractAvailable { player, number } => {
                write!(f, "{player} can fulfil contract #{number}")
            }
            GameEvent::ContractFulfilled {
                player,
                reward,
                cash,
            } => write!(f, "{player} earned ${reward} (now ${cash})"),
            GameEvent::TurnEnded { player } => write!(f, "{player} ended the turn"),
            GameEvent::GameWon { player, cash } => write!(f, "{player} wins with ${cash}!"),
        }
    }
}
