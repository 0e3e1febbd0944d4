use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use crate::{
    board::{Board, BoardGenerator, TileKind},
    config::{AppConfig, RulesConfig},
    engine::{compute_highlights, find_scoot_path, Highlight, HighlightSet},
    error::GameError,
    models::{Player, PlayerId, Position, ResourceType, Truck},
    tracks::TrackRegistry,
};

use super::{
    contracts::ContractBook,
    cpu,
    events::GameEvent,
    state::{DraftState, GameMode, GameState, Phase, TurnState},
};

/// Moves the CPU makes in one turn before it passes. Steps along its own
/// track are free, so without a cap it could shuttle forever.
const CPU_MOVE_LIMIT: u32 = 12;

/// How an accepted move request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Applied immediately.
    Step,
    /// Animated; call [`GameController::advance_animation`] until it arrives.
    Scoot {
        /// Tiles still to travel.
        steps: usize,
    },
}

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// The truck moved to an intermediate tile.
    Moved(Position),
    /// The truck reached the destination and the move has been settled.
    Arrived(Position),
}

/// A scoot in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScootAnimation {
    path: Vec<Position>,
    next: usize,
    highlight: Highlight,
}

impl ScootAnimation {
    /// Tiles not yet travelled.
    pub fn remaining(&self) -> &[Position] {
        self.path.get(self.next..).unwrap_or_default()
    }

    /// Tile the scoot settles on.
    pub fn destination(&self) -> Position {
        self.highlight.position
    }
}

/// Owns the game state and serialises every mutation: draft placements,
/// dice, track building, moves with their side effects, and contracts.
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    rules: RulesConfig,
    rng: ChaCha8Rng,
    highlights: HighlightSet,
    animation: Option<ScootAnimation>,
    events: Vec<GameEvent>,
    cpu_moves: u32,
}

impl GameController {
    /// Generate a board from the configuration and open the draft.
    pub fn new(config: &AppConfig, mode: GameMode) -> Self {
        let seed = config.board.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = BoardGenerator::new(config.board.clone()).generate(&mut rng);
        info!(
            seed,
            width = board.width(),
            height = board.height(),
            ?mode,
            "New game"
        );
        Self::from_parts(board, config.rules.clone(), mode, rng)
    }

    /// Start a game on a prepared board. `seed` drives dice and the CPU.
    pub fn with_board(board: Board, rules: RulesConfig, mode: GameMode, seed: u64) -> Self {
        Self::from_parts(board, rules, mode, ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_parts(board: Board, rules: RulesConfig, mode: GameMode, rng: ChaCha8Rng) -> Self {
        let tracks = TrackRegistry::new(board.width(), board.height());
        let players = PlayerId::ALL.map(|id| Player::new(id, rules.initial_track_budget));
        let state = GameState {
            mode,
            phase: Phase::Draft,
            board,
            tracks,
            players,
            trucks: Vec::new(),
            draft: DraftState::new(rules.draft_tracks),
            turn: TurnState::new(PlayerId::One, 0),
            contracts: ContractBook::new(rules.contracts.clone()),
        };
        let mut controller = Self {
            state,
            rules,
            rng,
            highlights: HighlightSet::default(),
            animation: None,
            events: Vec::new(),
            cpu_moves: 0,
        };
        if controller.state.draft.is_complete() {
            controller.start_play();
        }
        controller
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Rules this game was started with.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Legal destinations for the active truck. Empty outside regular play.
    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    /// The scoot in progress, if any.
    pub fn animation(&self) -> Option<&ScootAnimation> {
        self.animation.as_ref()
    }

    /// True while a scoot animation runs; moves and turn changes wait.
    pub fn is_busy(&self) -> bool {
        self.animation.is_some()
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True when the player expected to act is computer-controlled.
    pub fn is_cpu_turn(&self) -> bool {
        self.state
            .acting_player()
            .is_some_and(|player| self.state.mode.is_cpu(player))
    }

    /// True when `player` can pay for the contract on offer.
    pub fn can_fulfill_contract(&self, player: PlayerId) -> bool {
        self.state
            .contracts
            .current()
            .is_some_and(|contract| contract.is_met_by(&self.state.player(player).stockpile))
    }

    /// Place the drafting player's next starting track.
    pub fn place_draft_track(&mut self, pos: Position) -> Result<(), GameError> {
        if self.state.phase != Phase::Draft {
            return Err(GameError::WrongPhase(self.state.phase.name()));
        }
        let player = self.state.draft.current;
        if !self.state.board.in_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        if !self.state.is_buildable(pos) {
            return Err(GameError::TileNotBuildable(pos));
        }
        if self.state.draft.remaining(player) == 0 {
            return Err(GameError::DraftQuotaReached(player));
        }
        self.state.tracks.place(pos, player)?;
        self.state.draft.placed[player.index()] += 1;
        debug!(%player, %pos, remaining = self.state.draft.remaining(player), "Draft track placed");
        self.events.push(GameEvent::DraftTrackPlaced {
            player,
            position: pos,
        });

        if self.state.draft.is_complete() {
            self.start_play();
        } else if self.state.draft.remaining(player.other()) > 0 {
            self.state.draft.current = player.other();
        }
        Ok(())
    }

    /// Build a track under the active truck. Once per turn, paid from the
    /// player's track budget.
    pub fn place_track_here(&mut self) -> Result<Position, GameError> {
        self.require_idle_play()?;
        let player = self.state.turn.active;
        if self.state.turn.has_placed_track {
            return Err(GameError::TrackAlreadyPlaced);
        }
        if self.state.player(player).track_budget == 0 {
            return Err(GameError::NoTrackBudget(player));
        }
        let pos = self
            .state
            .active_truck()
            .map(|truck| truck.position)
            .ok_or(GameError::WrongPhase(self.state.phase.name()))?;
        if !self.state.is_buildable(pos) {
            return Err(GameError::TileNotBuildable(pos));
        }
        self.state.tracks.place(pos, player)?;
        self.state.player_mut(player).track_budget -= 1;
        self.state.turn.has_placed_track = true;
        info!(%player, %pos, "Track built");
        self.events.push(GameEvent::TrackPlaced {
            player,
            position: pos,
        });
        self.recompute_highlights();
        Ok(pos)
    }

    /// Move the active truck to a highlighted tile. Steps settle at once;
    /// scoots start an animation and settle when it arrives.
    pub fn request_move(&mut self, target: Position) -> Result<MoveKind, GameError> {
        self.require_idle_play()?;
        if self.state.turn.remaining == 0 {
            return Err(GameError::NoMovesLeft);
        }
        let highlight = *self
            .highlights
            .get(target)
            .ok_or(GameError::NotHighlighted(target))?;
        let player = self.state.turn.active;

        if !highlight.is_scoot {
            self.set_truck_position(player, target);
            self.finish_move(highlight);
            return Ok(MoveKind::Step);
        }

        let path = self.state.active_truck().and_then(|truck| {
            find_scoot_path(&self.state.board, &self.state.tracks, truck, target)
        });
        match path {
            Some(path) if path.len() >= 2 => {
                let steps = path.len() - 1;
                debug!(%player, %target, steps, "Scoot started");
                self.animation = Some(ScootAnimation {
                    path,
                    next: 1,
                    highlight,
                });
                Ok(MoveKind::Scoot { steps })
            }
            _ => {
                error!(
                    %player,
                    %target,
                    "No scoot path for a highlighted tile, relocating directly"
                );
                self.set_truck_position(player, target);
                self.finish_move(highlight);
                Ok(MoveKind::Step)
            }
        }
    }

    /// Advance a running scoot by one tile. Returns `None` when idle.
    pub fn advance_animation(&mut self) -> Option<AnimationStep> {
        let player = self.state.turn.active;
        let animation = self.animation.as_mut()?;
        let Some(&pos) = animation.path.get(animation.next) else {
            let highlight = animation.highlight;
            self.animation = None;
            self.finish_move(highlight);
            return None;
        };
        animation.next += 1;
        let arrived = animation.next >= animation.path.len();
        let highlight = animation.highlight;

        self.set_truck_position(player, pos);
        if arrived {
            self.animation = None;
            self.finish_move(highlight);
            Some(AnimationStep::Arrived(pos))
        } else {
            Some(AnimationStep::Moved(pos))
        }
    }

    /// End the active turn early.
    pub fn pass_turn(&mut self) -> Result<(), GameError> {
        self.require_idle_play()?;
        self.end_turn();
        Ok(())
    }

    /// Trade the active player's stockpile for the current contract's reward.
    pub fn fulfill_contract(&mut self) -> Result<u32, GameError> {
        self.require_idle_play()?;
        self.fulfill_for(self.state.turn.active)
    }

    /// Let the CPU take one action if it is its turn. Returns whether
    /// anything happened.
    pub fn cpu_step(&mut self) -> Result<bool, GameError> {
        if !self.is_cpu_turn() || self.is_busy() {
            return Ok(false);
        }
        self.act_as_cpu()
    }

    fn act_as_cpu(&mut self) -> Result<bool, GameError> {
        match self.state.phase {
            Phase::Draft => {
                let Some(pos) = cpu::choose_draft_track(&self.state, &mut self.rng) else {
                    warn!(player = %self.state.draft.current, "CPU found no draft tile");
                    return Ok(false);
                };
                self.place_draft_track(pos)?;
                Ok(true)
            }
            Phase::Play => {
                let player = self.state.turn.active;
                if self.can_fulfill_contract(player) {
                    self.fulfill_contract()?;
                    if self.state.phase != Phase::Play {
                        return Ok(true);
                    }
                }
                if cpu::wants_track(&self.state, &mut self.rng) {
                    if let Err(err) = self.place_track_here() {
                        debug!(%player, %err, "CPU skipped building");
                    }
                }
                if self.cpu_moves >= CPU_MOVE_LIMIT {
                    self.pass_turn()?;
                    return Ok(true);
                }
                match cpu::choose_move(&self.state, &self.highlights, &mut self.rng) {
                    Some(target) => {
                        self.cpu_moves += 1;
                        self.request_move(target)?;
                    }
                    None => self.pass_turn()?,
                }
                Ok(true)
            }
            Phase::GameOver { .. } => Ok(false),
        }
    }

    fn require_idle_play(&self) -> Result<(), GameError> {
        if self.state.phase != Phase::Play {
            return Err(GameError::WrongPhase(self.state.phase.name()));
        }
        if self.is_busy() {
            return Err(GameError::Busy);
        }
        Ok(())
    }

    fn start_play(&mut self) {
        let home = self.state.board.communal_center();
        self.state.trucks = PlayerId::ALL
            .iter()
            .map(|&id| Truck::new(id, home))
            .collect();
        for player in &mut self.state.players {
            player.track_budget = self.rules.initial_track_budget;
        }
        self.state.phase = Phase::Play;
        info!(tracks = self.state.tracks.len(), "Draft complete");
        self.events.push(GameEvent::DraftComplete);
        self.begin_turn(PlayerId::One);
    }

    fn begin_turn(&mut self, player: PlayerId) {
        let roll = self.rng.gen_range(1..=self.rules.dice_sides.max(1));
        self.state.turn = TurnState::new(player, roll);
        self.cpu_moves = 0;
        info!(%player, roll, "Turn started");
        self.events.push(GameEvent::TurnStarted { player, roll });
        self.recompute_highlights();
    }

    fn end_turn(&mut self) {
        let player = self.state.turn.active;
        self.events.push(GameEvent::TurnEnded { player });
        self.begin_turn(player.other());
    }

    fn recompute_highlights(&mut self) {
        self.highlights = match (self.state.phase, self.state.active_truck()) {
            (Phase::Play, Some(truck)) => compute_highlights(
                &self.state.board,
                &self.state.tracks,
                truck,
                self.state.turn.remaining,
            ),
            _ => HighlightSet::default(),
        };
        debug!(
            count = self.highlights.len(),
            remaining = self.state.turn.remaining,
            "Highlights recomputed"
        );
    }

    fn set_truck_position(&mut self, player: PlayerId, pos: Position) {
        if let Some(truck) = self.state.truck_mut(player) {
            truck.position = pos;
        }
    }

    fn finish_move(&mut self, highlight: Highlight) {
        let player = self.state.turn.active;
        self.state.turn.remaining = self.state.turn.remaining.saturating_sub(highlight.cost);
        debug!(
            %player,
            to = %highlight.position,
            cost = highlight.cost,
            scoot = highlight.is_scoot,
            "Move settled"
        );
        self.events.push(GameEvent::Moved {
            player,
            to: highlight.position,
            cost: highlight.cost,
            scoot: highlight.is_scoot,
        });
        self.handle_cargo(player);

        if self.state.phase != Phase::Play {
            return;
        }
        if self.state.turn.remaining == 0 {
            self.end_turn();
            return;
        }
        self.recompute_highlights();
        if self.highlights.is_empty() {
            self.end_turn();
        }
    }

    fn handle_cargo(&mut self, player: PlayerId) {
        let Some(truck) = self.state.truck(player).copied() else {
            return;
        };
        match (self.state.board.tile_kind_at(truck.position), truck.cargo) {
            (TileKind::Resource, None) => {
                let resource = self
                    .state
                    .board
                    .resource_at(truck.position)
                    .unwrap_or(ResourceType::Steel);
                if let Some(truck) = self.state.truck_mut(player) {
                    truck.cargo = Some(resource);
                }
                info!(%player, %resource, "Picked up");
                self.events.push(GameEvent::PickedUp { player, resource });
            }
            (TileKind::CommunalBase, Some(resource)) => {
                if let Some(truck) = self.state.truck_mut(player) {
                    truck.cargo = None;
                }
                let track_bonus = if resource == ResourceType::Steel {
                    self.rules.steel_track_bonus
                } else {
                    0
                };
                let owner = self.state.player_mut(player);
                owner.stockpile.add(resource, 1);
                owner.track_budget += track_bonus;
                info!(%player, %resource, track_bonus, "Delivered");
                self.events.push(GameEvent::Delivered {
                    player,
                    resource,
                    track_bonus,
                });

                if self.can_fulfill_contract(player) {
                    self.events.push(GameEvent::ContractAvailable {
                        player,
                        number: self.state.contracts.number(),
                    });
                    if self.state.mode.is_cpu(player) {
                        if let Err(err) = self.fulfill_for(player) {
                            warn!(%player, %err, "CPU could not fulfil contract");
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn fulfill_for(&mut self, player: PlayerId) -> Result<u32, GameError> {
        let state = &mut self.state;
        let reward = state
            .contracts
            .fulfil(&mut state.players[player.index()].stockpile)
            .ok_or(GameError::ContractUnmet(player))?;
        let owner = &mut state.players[player.index()];
        owner.cash += reward;
        let cash = owner.cash;
        info!(%player, reward, cash, "Contract fulfilled");
        self.events.push(GameEvent::ContractFulfilled {
            player,
            reward,
            cash,
        });

        if cash >= self.rules.win_cash {
            self.state.phase = Phase::GameOver { winner: player };
            self.highlights.clear();
            self.animation = None;
            info!(%player, cash, "Game won");
            self.events.push(GameEvent::GameWon { player, cash });
        }
        Ok(reward)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run any scoot in progress to its end.
    #[cfg(test)]
    pub(crate) fn finish_animation(&mut self) {
        while self.advance_animation().is_some() {}
    }

    #[cfg(test)]
    pub(crate) fn force_roll(&mut self, roll: u32) {
        self.state.turn = TurnState::new(self.state.turn.active, roll);
        self.recompute_highlights();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        game::fixtures::{board, controller, rules},
        models::Stockpile,
    };

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn playing() -> GameController {
        controller(0, GameMode::TwoPlayer)
    }

    fn put_truck(game: &mut GameController, player: PlayerId, pos: Position) {
        game.state.trucks[player.index()].position = pos;
    }

    #[test]
    fn draft_validates_tiles_and_alternates() {
        let mut game = controller(2, GameMode::TwoPlayer);
        assert_eq!(game.state().phase, Phase::Draft);
        assert!(game.highlights().is_empty());

        assert_eq!(
            game.place_draft_track(p(0, 0)),
            Err(GameError::TileNotBuildable(p(0, 0)))
        );
        assert_eq!(
            game.place_draft_track(p(7, 7)),
            Err(GameError::TileNotBuildable(p(7, 7)))
        );
        assert_eq!(
            game.place_draft_track(p(4, 2)),
            Err(GameError::TileNotBuildable(p(4, 2)))
        );
        assert_eq!(
            game.place_draft_track(p(9, 0)),
            Err(GameError::OutOfBounds(p(9, 0)))
        );

        game.place_draft_track(p(2, 2)).unwrap();
        assert_eq!(game.state().draft.current, PlayerId::Two);
        assert_eq!(
            game.place_draft_track(p(2, 2)),
            Err(GameError::TileOccupied(p(2, 2)))
        );
        game.place_draft_track(p(6, 2)).unwrap();
        game.place_draft_track(p(2, 1)).unwrap();
        assert_eq!(game.state().phase, Phase::Draft);
        game.place_draft_track(p(6, 1)).unwrap();

        let state = game.state();
        assert_eq!(state.phase, Phase::Play);
        assert_eq!(state.tracks.count_owned(PlayerId::One), 2);
        assert_eq!(state.tracks.count_owned(PlayerId::Two), 2);
        for id in PlayerId::ALL {
            assert_eq!(state.truck(id).map(|t| t.position), Some(p(4, 4)));
            assert_eq!(state.player(id).track_budget, 4);
        }
        assert_eq!(state.turn.active, PlayerId::One);
        assert!((1..=6).contains(&state.turn.rolled));
        assert_eq!(state.turn.remaining, state.turn.rolled);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::DraftComplete));
        assert!(matches!(
            events.last(),
            Some(GameEvent::TurnStarted {
                player: PlayerId::One,
                ..
            })
        ));
        assert_eq!(
            game.place_draft_track(p(1, 2)),
            Err(GameError::WrongPhase("play"))
        );
    }

    #[test]
    fn draft_rejects_tracks_beyond_quota() {
        let mut game = controller(1, GameMode::TwoPlayer);
        game.state_mut().draft.placed = [1, 0];
        assert_eq!(
            game.place_draft_track(p(2, 2)),
            Err(GameError::DraftQuotaReached(PlayerId::One))
        );
    }

    #[test]
    fn empty_draft_starts_play_immediately() {
        let game = playing();
        assert_eq!(game.state().phase, Phase::Play);
        assert_eq!(game.state().trucks.len(), 2);
        assert!(!game.highlights().is_empty());
    }

    #[test]
    fn dice_stay_within_configured_sides() {
        for seed in 0..50 {
            let game = GameController::with_board(board(), rules(0), GameMode::TwoPlayer, seed);
            assert!((1..=6).contains(&game.state().turn.rolled), "seed {seed}");
        }
    }

    #[test]
    fn single_step_settles_immediately() {
        let mut game = playing();
        game.force_roll(3);

        assert_eq!(game.request_move(p(5, 4)), Ok(MoveKind::Step));
        assert_eq!(game.state().truck(PlayerId::One).map(|t| t.position), Some(p(5, 4)));
        assert_eq!(game.state().turn.remaining, 2);
        assert!(!game.is_busy());
        assert_eq!(
            game.request_move(p(8, 8)),
            Err(GameError::NotHighlighted(p(8, 8)))
        );
    }

    #[test]
    fn spending_the_roll_ends_the_turn() {
        let mut game = playing();
        game.force_roll(1);
        game.drain_events();

        game.request_move(p(3, 4)).unwrap();
        assert_eq!(game.state().turn.active, PlayerId::Two);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::TurnEnded {
            player: PlayerId::One
        }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnStarted { player: PlayerId::Two, .. })));
    }

    #[test]
    fn scoot_animates_and_blocks_until_arrival() {
        let mut game = playing();
        put_truck(&mut game, PlayerId::One, p(6, 4));
        for pos in [p(7, 4), p(7, 3), p(7, 2)] {
            game.state_mut().tracks.place(pos, PlayerId::One).unwrap();
        }
        game.force_roll(3);
        assert!(game.highlights().get(p(7, 1)).is_some_and(|h| h.is_scoot));

        assert_eq!(game.request_move(p(7, 1)), Ok(MoveKind::Scoot { steps: 4 }));
        assert!(game.is_busy());
        assert_eq!(game.request_move(p(5, 4)), Err(GameError::Busy));
        assert_eq!(game.pass_turn(), Err(GameError::Busy));
        assert_eq!(game.place_track_here(), Err(GameError::Busy));
        assert_eq!(game.state().turn.remaining, 3);

        assert_eq!(game.advance_animation(), Some(AnimationStep::Moved(p(7, 4))));
        assert_eq!(game.advance_animation(), Some(AnimationStep::Moved(p(7, 3))));
        assert_eq!(game.advance_animation(), Some(AnimationStep::Moved(p(7, 2))));
        assert_eq!(game.state().turn.remaining, 3);
        assert_eq!(game.advance_animation(), Some(AnimationStep::Arrived(p(7, 1))));
        assert_eq!(game.advance_animation(), None);

        assert!(!game.is_busy());
        assert_eq!(game.state().turn.remaining, 2);
        let truck = game.state().truck(PlayerId::One).copied().unwrap();
        assert_eq!(truck.position, p(7, 1));
        assert_eq!(truck.cargo, Some(ResourceType::Wood));
        assert!(game.drain_events().contains(&GameEvent::PickedUp {
            player: PlayerId::One,
            resource: ResourceType::Wood
        }));
    }

    #[test]
    fn scoot_can_loop_back_to_the_starting_tile() {
        let mut game = playing();
        put_truck(&mut game, PlayerId::One, p(2, 2));
        game.state_mut().tracks.place(p(2, 1), PlayerId::One).unwrap();
        game.force_roll(2);
        assert!(game.highlights().get(p(2, 2)).is_some_and(|h| h.is_scoot && h.cost == 1));

        assert_eq!(game.request_move(p(2, 2)), Ok(MoveKind::Scoot { steps: 2 }));
        let animation = game.animation().unwrap();
        assert_eq!(animation.destination(), p(2, 2));
        assert_eq!(animation.remaining(), &[p(2, 1), p(2, 2)]);

        game.finish_animation();
        assert!(!game.is_busy());
        assert_eq!(game.state().truck(PlayerId::One).unwrap().position, p(2, 2));
        assert_eq!(game.state().turn.remaining, 1);
    }

    #[test]
    fn steel_delivery_grants_track_budget() {
        let mut game = playing();
        put_truck(&mut game, PlayerId::One, p(4, 1));
        game.state_mut().trucks[0].cargo = Some(ResourceType::Steel);
        game.force_roll(2);

        game.request_move(p(4, 2)).unwrap();
        let player = game.state().player(PlayerId::One);
        assert_eq!(player.stockpile, Stockpile::new(0, 0, 1));
        assert_eq!(player.track_budget, 8);
        assert_eq!(game.state().truck(PlayerId::One).unwrap().cargo, None);
        assert!(game.drain_events().contains(&GameEvent::Delivered {
            player: PlayerId::One,
            resource: ResourceType::Steel,
            track_bonus: 4
        }));
    }

    #[test]
    fn delivery_announces_and_fulfils_contract() {
        let mut game = playing();
        put_truck(&mut game, PlayerId::One, p(4, 1));
        game.state_mut().trucks[0].cargo = Some(ResourceType::Steel);
        game.state_mut().players[0].stockpile = Stockpile::new(3, 2, 0);
        game.force_roll(2);

        game.request_move(p(4, 2)).unwrap();
        assert!(game.drain_events().contains(&GameEvent::ContractAvailable {
            player: PlayerId::One,
            number: 1
        }));

        assert_eq!(game.fulfill_contract(), Ok(500));
        let player = game.state().player(PlayerId::One);
        assert_eq!(player.cash, 500);
        assert_eq!(player.stockpile, Stockpile::default());
        assert_eq!(game.state().contracts.number(), 2);
        assert_eq!(
            game.fulfill_contract(),
            Err(GameError::ContractUnmet(PlayerId::One))
        );
    }

    #[test]
    fn reaching_the_cash_target_ends_the_game() {
        let mut game = playing();
        let player = &mut game.state_mut().players[0];
        player.cash = 1400;
        player.stockpile = Stockpile::new(3, 2, 1);

        game.fulfill_contract().unwrap();
        assert_eq!(
            game.state().phase,
            Phase::GameOver {
                winner: PlayerId::One
            }
        );
        assert!(game.highlights().is_empty());
        assert!(!game.is_cpu_turn());
        assert_eq!(
            game.request_move(p(5, 4)),
            Err(GameError::WrongPhase("game over"))
        );
        assert_eq!(game.pass_turn(), Err(GameError::WrongPhase("game over")));
        assert!(game.drain_events().contains(&GameEvent::GameWon {
            player: PlayerId::One,
            cash: 1900
        }));
    }

    #[test]
    fn track_placement_rules() {
        let mut game = playing();
        assert_eq!(
            game.place_track_here(),
            Err(GameError::TileNotBuildable(p(4, 4)))
        );

        put_truck(&mut game, PlayerId::One, p(2, 2));
        game.force_roll(2);
        assert_eq!(game.place_track_here(), Ok(p(2, 2)));
        assert_eq!(game.state().player(PlayerId::One).track_budget, 3);
        assert!(game.state().tracks.is_owned_by(p(2, 2), PlayerId::One));
        assert_eq!(game.place_track_here(), Err(GameError::TrackAlreadyPlaced));

        game.state_mut().turn.has_placed_track = false;
        assert_eq!(game.place_track_here(), Err(GameError::TileOccupied(p(2, 2))));

        game.state_mut().players[0].track_budget = 0;
        assert_eq!(
            game.place_track_here(),
            Err(GameError::NoTrackBudget(PlayerId::One))
        );
    }

    #[test]
    fn passing_hands_over_the_turn() {
        let mut game = playing();
        game.pass_turn().unwrap();
        assert_eq!(game.state().turn.active, PlayerId::Two);
        assert!(!game.state().turn.has_placed_track);
        game.pass_turn().unwrap();
        assert_eq!(game.state().turn.active, PlayerId::One);
    }

    #[test]
    fn cpu_only_acts_on_its_own_turn() {
        let mut game = controller(0, GameMode::VsCpu);
        assert!(!game.is_cpu_turn());
        assert_eq!(game.cpu_step(), Ok(false));

        game.pass_turn().unwrap();
        assert!(game.is_cpu_turn());
        assert_eq!(game.cpu_step(), Ok(true));
    }

    #[test]
    fn cpu_drafts_for_player_two() {
        let mut game = controller(2, GameMode::VsCpu);
        game.place_draft_track(p(2, 2)).unwrap();
        assert!(game.is_cpu_turn());
        assert_eq!(game.cpu_step(), Ok(true));
        assert_eq!(game.state().tracks.count_owned(PlayerId::Two), 1);
        assert_eq!(game.state().draft.current, PlayerId::One);
    }

    #[test]
    fn self_play_keeps_trucks_on_legal_tiles() {
        for seed in 0..8 {
            let config = AppConfig {
                board: crate::config::BoardConfig {
                    seed: Some(seed),
                    ..Default::default()
                },
                ..Default::default()
            };
            let mut game = GameController::new(&config, GameMode::TwoPlayer);
            for _ in 0..1500 {
                if game.is_busy() {
                    game.finish_animation();
                    continue;
                }
                if matches!(game.state().phase, Phase::GameOver { .. }) {
                    break;
                }
                game.act_as_cpu().expect("cpu action is legal");

                let view = game.state().view();
                for truck in &game.state().trucks {
                    assert!(view.can_enter(truck, truck.position), "seed {seed}");
                }
            }
            assert_ne!(game.state().phase, Phase::Draft, "seed {seed}");
        }
    }
}
