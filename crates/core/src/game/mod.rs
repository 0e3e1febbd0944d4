//! Turn flow on top of the engine: draft, dice, moves, cargo, contracts
//! and the CPU opponent.

mod contracts;
mod controller;
pub mod cpu;
mod events;
mod state;

pub use contracts::{Contract, ContractBook};
pub use controller::{AnimationStep, GameController, MoveKind, ScootAnimation};
pub use events::GameEvent;
pub use state::{DraftState, GameMode, GameState, Phase, TurnState};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{GameController, GameMode};
    use crate::{board::Board, config::RulesConfig};

    /// 9x9 board: steel top-left, wood top-right, concrete bottom-left,
    /// a rock at (7, 7) and the home base around (4, 4).
    pub fn board() -> Board {
        Board::parse(&[
            "SS.....WW",
            "SS.....WW",
            "....H....",
            "...HHH...",
            "..HHHHH..",
            "...HHH...",
            "....H....",
            "CC.....#.",
            "CC.......",
        ])
        .expect("valid fixture board")
    }

    pub fn rules(draft_tracks: u32) -> RulesConfig {
        RulesConfig {
            draft_tracks,
            ..RulesConfig::default()
        }
    }

    pub fn controller(draft_tracks: u32, mode: GameMode) -> GameController {
        GameController::with_board(board(), rules(draft_tracks), mode, 7)
    }
}
