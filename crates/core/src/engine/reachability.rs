use std::{collections::VecDeque, ops::ControlFlow};

use super::{grid::TileGrid, movement::SCOOT_EXIT_COST, BoardView};
use crate::models::{Position, Truck};

/// A destination the active truck may move to this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    /// Destination tile.
    pub position: Position,
    /// Movement points consumed on arrival.
    pub cost: u32,
    /// Reached by riding the track network and stepping off it.
    pub is_scoot: bool,
}

/// Highlights in discovery order, at most one per tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    entries: Vec<Highlight>,
}

impl HighlightSet {
    /// Add a highlight unless its tile is already present. The earlier entry
    /// always wins.
    pub fn insert(&mut self, highlight: Highlight) -> bool {
        if self.contains(highlight.position) {
            return false;
        }
        self.entries.push(highlight);
        true
    }

    /// Entry for `pos`, if highlighted.
    pub fn get(&self, pos: Position) -> Option<&Highlight> {
        self.entries.iter().find(|entry| entry.position == pos)
    }

    /// True when `pos` is highlighted.
    pub fn contains(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Highlight> {
        self.entries.iter()
    }

    /// Number of highlighted tiles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is reachable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a Highlight;
    type IntoIter = std::slice::Iter<'a, Highlight>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl BoardView<'_> {
    /// Destinations reachable with `budget` points: plain single steps first,
    /// then every tile bordering the owner's track network around the truck
    /// at the flat [`SCOOT_EXIT_COST`]. A truck parked beside its network may
    /// scoot out and back onto its own tile.
    pub fn highlights(&self, truck: &Truck, budget: u32) -> HighlightSet {
        let mut highlights = HighlightSet::default();
        if budget == 0 {
            return highlights;
        }

        let mut offer = |position: Position, cost: u32, is_scoot: bool| {
            if cost > budget || !self.can_enter(truck, position) {
                return;
            }
            highlights.insert(Highlight {
                position,
                cost,
                is_scoot,
            });
        };

        let origin = truck.position;
        for next in origin.neighbors() {
            if let Some(cost) = self.movement_cost(truck, origin, next) {
                offer(next, cost, false);
            }
        }

        for tile in self.scoot_network(truck) {
            for next in tile.neighbors() {
                if self.is_own_track(truck.owner, next) {
                    continue;
                }
                offer(next, SCOOT_EXIT_COST, true);
            }
        }

        highlights
    }

    /// Owned-track tiles connected to the truck's tile or its neighbours, in
    /// breadth-first order.
    pub fn scoot_network(&self, truck: &Truck) -> Vec<Position> {
        let mut tiles = Vec::new();
        self.walk_network(truck, |tile, _| {
            tiles.push(tile);
            ControlFlow::<()>::Continue(())
        });
        tiles
    }

    /// Entry points of the network: the truck's tile if it sits on its own
    /// track, then each owned-track neighbour.
    pub(crate) fn network_seeds(&self, truck: &Truck) -> Vec<Position> {
        let origin = truck.position;
        std::iter::once(origin)
            .chain(origin.neighbors())
            .filter(|&pos| self.is_own_track(truck.owner, pos))
            .collect()
    }

    /// Breadth-first walk over the owner's track tiles starting from
    /// [`network_seeds`](Self::network_seeds). `visit` sees each tile once,
    /// in dequeue order, together with the tile it was reached from (`None`
    /// for seeds). Stops early when `visit` breaks.
    pub(crate) fn walk_network<B>(
        &self,
        truck: &Truck,
        mut visit: impl FnMut(Position, Option<Position>) -> ControlFlow<B>,
    ) -> Option<B> {
        let board = self.board();
        let mut seen = TileGrid::new(board.width(), board.height(), false);
        let mut queue = VecDeque::new();
        for seed in self.network_seeds(truck) {
            if seen.insert(seed) {
                queue.push_back((seed, None));
            }
        }

        while let Some((tile, parent)) = queue.pop_front() {
            if let ControlFlow::Break(value) = visit(tile, parent) {
                return Some(value);
            }
            for next in tile.neighbors() {
                if self.is_own_track(truck.owner, next) && seen.insert(next) {
                    queue.push_back((next, Some(tile)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{
            compute_highlights, find_scoot_path,
            fixtures::{layout, open, truck},
        },
        models::PlayerId,
    };

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn step(x: i32, y: i32, cost: u32) -> Highlight {
        Highlight {
            position: p(x, y),
            cost,
            is_scoot: false,
        }
    }

    fn scoot(x: i32, y: i32) -> Highlight {
        Highlight {
            position: p(x, y),
            cost: 1,
            is_scoot: true,
        }
    }

    #[test]
    fn open_ground_offers_four_single_steps() {
        let (board, tracks) = open(5, 5);
        let red = truck(PlayerId::One, 2, 2);
        let highlights = compute_highlights(&board, &tracks, &red, 3);
        let entries: Vec<Highlight> = highlights.iter().copied().collect();
        assert_eq!(
            entries,
            vec![step(3, 2, 1), step(1, 2, 1), step(2, 3, 1), step(2, 1, 1)]
        );
    }

    #[test]
    fn zero_budget_offers_nothing() {
        let (board, tracks) = layout(
            &[".....", ".....", "....."],
            &["111..", ".1...", "....."],
        );
        let red = truck(PlayerId::One, 1, 1);
        assert!(compute_highlights(&board, &tracks, &red, 0).is_empty());
    }

    #[test]
    fn boxed_in_truck_has_no_moves() {
        let (board, tracks) = layout(&[".#.", "#.#", ".#."], &[]);
        let red = truck(PlayerId::One, 1, 1);
        assert!(compute_highlights(&board, &tracks, &red, 6).is_empty());
    }

    #[test]
    fn enemy_tracks_block_like_walls() {
        let (board, tracks) = layout(&["...", "...", "..."], &[".2.", "2.2", ".2."]);
        let red = truck(PlayerId::One, 1, 1);
        assert!(compute_highlights(&board, &tracks, &red, 6).is_empty());

        let blue = truck(PlayerId::Two, 1, 1);
        let highlights = compute_highlights(&board, &tracks, &blue, 6);
        assert_eq!(highlights.get(p(2, 1)), Some(&step(2, 1, 0)));
    }

    #[test]
    fn single_track_neighbour_wins_as_free_step() {
        let tiles = [".........."; 10];
        let (board, tracks) = layout(&tiles, &["", "", "", "", "", "", ".....1"]);
        let red = truck(PlayerId::One, 5, 5);
        let highlights = compute_highlights(&board, &tracks, &red, 3);

        assert_eq!(highlights.get(p(5, 6)), Some(&step(5, 6, 0)));
        assert_eq!(highlights.get(p(5, 7)), Some(&scoot(5, 7)));
        assert_eq!(highlights.get(p(4, 6)), Some(&scoot(4, 6)));
        assert_eq!(highlights.get(p(6, 6)), Some(&scoot(6, 6)));
        assert_eq!(highlights.get(p(4, 5)), Some(&step(4, 5, 1)));
        assert_eq!(highlights.len(), 8);
    }

    #[test]
    fn truck_beside_its_network_can_scoot_back_to_its_own_tile() {
        let tiles = [".........."; 10];
        let (board, tracks) = layout(&tiles, &["", "", "", "", "", "", ".....1"]);
        let red = truck(PlayerId::One, 5, 5);
        let highlights = compute_highlights(&board, &tracks, &red, 3);
        assert_eq!(highlights.get(p(5, 5)), Some(&scoot(5, 5)));
        assert_eq!(
            find_scoot_path(&board, &tracks, &red, p(5, 5)),
            Some(vec![p(5, 5), p(5, 6), p(5, 5)])
        );
    }

    #[test]
    fn truck_standing_on_its_track_never_exits_onto_itself() {
        let (board, tracks) = layout(&["....", "....", "...."], &["....", ".11.", "...."]);
        let red = truck(PlayerId::One, 1, 1);
        let highlights = compute_highlights(&board, &tracks, &red, 3);
        assert!(!highlights.contains(p(1, 1)));
    }

    #[test]
    fn single_step_beats_scoot_exit_on_same_tile() {
        let (board, tracks) = layout(&["....", "....", "...."], &[".11.", "....", "...."]);
        let red = truck(PlayerId::One, 1, 1);
        let highlights = compute_highlights(&board, &tracks, &red, 2);
        // (2, 1) borders the truck and the track at (2, 0).
        assert_eq!(highlights.get(p(2, 1)), Some(&step(2, 1, 1)));
        assert_eq!(highlights.get(p(3, 0)), Some(&scoot(3, 0)));
        assert_eq!(highlights.iter().filter(|h| h.position == p(2, 1)).count(), 1);
    }

    #[test]
    fn scoot_reaches_the_far_end_of_the_network() {
        let (board, tracks) = layout(
            &["......", "......", "......", "......"],
            &["......", ".1111.", "......", "......"],
        );
        let red = truck(PlayerId::One, 1, 2);
        let highlights = compute_highlights(&board, &tracks, &red, 1);

        assert_eq!(highlights.get(p(1, 1)), Some(&step(1, 1, 0)));
        assert_eq!(highlights.get(p(5, 1)), Some(&scoot(5, 1)));
        assert_eq!(highlights.get(p(4, 0)), Some(&scoot(4, 0)));
        assert_eq!(highlights.get(p(4, 2)), Some(&scoot(4, 2)));
        // Interior track tiles are ridden through, not stopped on.
        assert!(!highlights.contains(p(3, 1)));
    }

    #[test]
    fn isolated_truck_gets_no_scoot_exits() {
        let (board, tracks) = layout(
            &["......", "......", "......", "......"],
            &["....11", "....1.", "......", "......"],
        );
        let red = truck(PlayerId::One, 1, 2);
        let highlights = compute_highlights(&board, &tracks, &red, 6);
        assert_eq!(highlights.len(), 4);
        assert!(highlights.iter().all(|h| !h.is_scoot));
        assert!(BoardView::new(&board, &tracks).scoot_network(&red).is_empty());
    }

    #[test]
    fn network_includes_truck_tile_and_is_breadth_first() {
        let (board, tracks) = layout(
            &[".....", ".....", "....."],
            &[".111.", "...1.", "....."],
        );
        let red = truck(PlayerId::One, 1, 0);
        let view = BoardView::new(&board, &tracks);
        assert_eq!(
            view.scoot_network(&red),
            vec![p(1, 0), p(2, 0), p(3, 0), p(3, 1)]
        );
    }

    #[test]
    fn exits_respect_obstacles_and_enemy_tracks() {
        let (board, tracks) = layout(
            &[".....", "..#..", "....."],
            &[".....", ".1.1.", "..1.2"],
        );
        let red = truck(PlayerId::One, 0, 1);
        let highlights = compute_highlights(&board, &tracks, &red, 2);
        assert!(!highlights.contains(p(2, 1)), "rock");
        assert!(!highlights.contains(p(4, 2)), "enemy track");
        assert_eq!(highlights.get(p(1, 0)), Some(&scoot(1, 0)));
    }

    #[test]
    fn recomputation_is_stable() {
        let (board, tracks) = layout(
            &["......", "......", "......", "......"],
            &["......", ".1111.", ".1..1.", "......"],
        );
        let red = truck(PlayerId::One, 0, 1);
        let first = compute_highlights(&board, &tracks, &red, 4);
        let second = compute_highlights(&board, &tracks, &red, 4);
        assert_eq!(first, second);
    }
}
