//! Heuristic opponent.
//!
//! Scores are deliberately simple; a little random jitter keeps two CPU
//! decisions on the same board from being identical.

use rand::Rng;

use crate::{
    board::TileKind,
    engine::{Highlight, HighlightSet},
    models::{Position, Stockpile, Truck},
};

use super::{contracts::Contract, state::GameState};

const TRACK_CHANCE: f64 = 0.45;
const JITTER: f64 = 0.5;
const DRAFT_JITTER: f64 = 0.2;
const DRAFT_FALLBACK_ATTEMPTS: usize = 200;

/// Whether the CPU builds a track under its truck this step.
pub fn wants_track<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> bool {
    let turn = &state.turn;
    let Some(truck) = state.truck(turn.active) else {
        return false;
    };
    !turn.has_placed_track
        && state.player(turn.active).track_budget > 0
        && state.tracks.track_at(truck.position).is_none()
        && rng.gen_bool(TRACK_CHANCE)
}

/// Draft tile close to both home and a resource hub. Boards without hubs
/// fall back to a random free tile.
pub fn choose_draft_track<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Position> {
    let home = state.board.communal_center();
    let resources = state.board.resource_tiles();
    let best = state
        .board
        .positions()
        .filter(|&pos| state.is_free_for_track(pos))
        .filter_map(|pos| {
            let distance = pos.manhattan(home) + nearest(&resources, pos)?;
            Some((pos, -f64::from(distance) + rng.gen::<f64>() * DRAFT_JITTER))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| pos);

    best.or_else(|| {
        let (width, height) = (state.board.width() as i32, state.board.height() as i32);
        (0..DRAFT_FALLBACK_ATTEMPTS)
            .map(|_| Position::new(rng.gen_range(0..width), rng.gen_range(0..height)))
            .find(|&pos| state.is_free_for_track(pos))
    })
}

/// Highlight the active truck should head for.
pub fn choose_move<R: Rng + ?Sized>(
    state: &GameState,
    highlights: &HighlightSet,
    rng: &mut R,
) -> Option<Position> {
    let truck = state.active_truck()?;
    let scorer = MoveScorer {
        state,
        truck,
        stockpile: &state.player(truck.owner).stockpile,
        contract: state.contracts.current(),
        resources: state.board.resource_tiles(),
        home: state.board.communal_center(),
    };
    highlights
        .iter()
        .map(|highlight| {
            let score = scorer.score(highlight) + rng.gen::<f64>() * JITTER;
            (highlight.position, score)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(pos, _)| pos)
}

struct MoveScorer<'a> {
    state: &'a GameState,
    truck: &'a Truck,
    stockpile: &'a Stockpile,
    contract: Option<&'a Contract>,
    resources: Vec<Position>,
    home: Position,
}

impl MoveScorer<'_> {
    fn score(&self, highlight: &Highlight) -> f64 {
        let pos = highlight.position;
        let kind = self.state.board.tile_kind_at(pos);
        let mut score = -0.1 * f64::from(highlight.cost);

        if self.state.tracks.is_owned_by(pos, self.truck.owner) {
            score += 2.0;
        }
        match (kind, self.truck.cargo) {
            (TileKind::Resource, None) => score += 120.0,
            (TileKind::CommunalBase, Some(_)) => score += 100.0,
            _ => {}
        }

        if self.truck.cargo.is_none() {
            if kind == TileKind::Resource {
                let need = match (self.contract, self.state.board.resource_at(pos)) {
                    (Some(contract), Some(resource)) => {
                        self.stockpile.deficit(&contract.require, resource)
                    }
                    _ => 0,
                };
                score += if need > 0 { 50.0 * f64::from(need) } else { 8.0 };
            }
            if let Some(distance) = nearest(&self.resources, pos) {
                score += 30.0 - f64::from(distance);
            }
        } else {
            score += 30.0 - f64::from(pos.manhattan(self.home));
        }
        score
    }
}

fn nearest(targets: &[Position], from: Position) -> Option<u32> {
    targets.iter().map(|&target| from.manhattan(target)).min()
}
