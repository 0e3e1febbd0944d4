use std::{collections::VecDeque, io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc, time::sleep};
use tracing::{debug, info, warn};
use wonkytracks_core::{
    board::TileKind,
    config::{AppConfig, TuiConfig},
    error::GameError,
    game::{AnimationStep, GameController, GameMode, MoveKind, Phase},
    models::{PlayerId, Position, ResourceType},
};

use crate::block_font;

const TICK_RATE: Duration = Duration::from_millis(250);
const EVENT_LOG_LIMIT: usize = 200;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    land: Color,
    water: Color,
    base: Color,
    step: Color,
    scoot: Color,
    concrete: Color,
    wood: Color,
    steel: Color,
    players: [Color; 2],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            land: Color::Rgb(46, 82, 46),
            water: Color::Rgb(24, 44, 88),
            base: Color::Rgb(150, 120, 40),
            step: Color::Rgb(70, 140, 70),
            scoot: Color::Rgb(40, 130, 150),
            concrete: Color::Rgb(170, 170, 170),
            wood: Color::Rgb(160, 110, 60),
            steel: Color::Rgb(120, 160, 200),
            players: [Color::Red, Color::Blue],
        }
    }
}

impl Theme {
    fn player(&self, id: PlayerId) -> Color {
        self.players[id.index()]
    }

    fn resource(&self, resource: Option<ResourceType>) -> Color {
        match resource {
            Some(ResourceType::Concrete) => self.concrete,
            Some(ResourceType::Wood) => self.wood,
            Some(ResourceType::Steel) | None => self.steel,
        }
    }
}

/// Theme with the configured player colours, plus a note when any of them
/// could not be parsed.
fn load_theme(config: &TuiConfig) -> (Theme, Option<String>) {
    let mut theme = Theme::default();
    let mut rejected = Vec::new();
    for (id, value) in [
        (PlayerId::One, &config.player_one_color),
        (PlayerId::Two, &config.player_two_color),
    ] {
        match parse_hex_color(value) {
            Some(color) => theme.players[id.index()] = color,
            None => {
                warn!(player = %id, value = %value, "Ignoring invalid player colour");
                rejected.push(value.clone());
            }
        }
    }
    let note = (!rejected.is_empty())
        .then(|| format!("Invalid colours ignored: {}", rejected.join(", ")));
    (theme, note)
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn contrast_color(color: &Color, fallback: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luminance =
                0.299 * f64::from(*r) + 0.587 * f64::from(*g) + 0.114 * f64::from(*b);
            if luminance > 186.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => fallback,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Play,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    NewGame(GameMode),
    Quit,
}

const MENU_ITEMS: [(&str, MenuAction); 3] = [
    ("New 2-player game", MenuAction::NewGame(GameMode::TwoPlayer)),
    ("New game vs CPU", MenuAction::NewGame(GameMode::VsCpu)),
    ("Quit", MenuAction::Quit),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Animation,
    Cpu,
}

enum AppEvent {
    Input(Event),
    Tick,
    /// A delayed game step; stale when `generation` belongs to an older game.
    Timer { generation: u64, kind: TimerKind },
}

/// Terminal front-end: menu, board, HUD and the pacing of scoots and CPU turns.
pub struct WonkyApp {
    config: AppConfig,
    state: UiState,
    screen: Screen,
    play: Option<PlayState>,
    theme: Theme,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    timer_generation: u64,
    timer_pending: bool,
}

impl WonkyApp {
    pub fn new(config: AppConfig) -> Self {
        let (theme, theme_note) = load_theme(&config.tui);
        let mut state = UiState::default();
        if let Some(note) = theme_note {
            state.set_status(note);
        }
        Self {
            config,
            state,
            screen: Screen::Menu,
            play: None,
            theme,
            event_tx: None,
            timer_generation: 0,
            timer_pending: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        let result = self.event_loop(&mut terminal, &mut event_rx).await;

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.state.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => true,
            Some(AppEvent::Timer { generation, kind }) => {
                if generation == self.timer_generation {
                    self.timer_pending = false;
                    self.handle_timer(kind);
                }
                true
            }
            None => false,
        }
    }

    fn handle_timer(&mut self, kind: TimerKind) {
        let Some(play) = self.play.as_mut() else {
            return;
        };
        match kind {
            TimerKind::Animation => {
                if let Some(AnimationStep::Arrived(pos)) = play.game.advance_animation() {
                    debug!(%pos, "Scoot arrived");
                }
            }
            TimerKind::Cpu => {
                if let Err(err) = play.game.cpu_step() {
                    warn!(%err, "CPU action rejected");
                    self.state.set_status(format!("CPU: {err}"));
                }
            }
        }
        self.after_action();
    }

    /// Log new game events and queue the next animation or CPU step.
    fn after_action(&mut self) {
        if let Some(play) = self.play.as_mut() {
            play.record_events();
            if let Phase::GameOver { winner } = play.game.state().phase {
                let label = player_label(play.game.state().mode, winner);
                self.state.set_status(format!("{label} wins! Press n for the menu"));
            }
        }
        self.schedule_timer();
    }

    fn schedule_timer(&mut self) {
        if self.timer_pending {
            return;
        }
        let Some(play) = self.play.as_ref() else {
            return;
        };
        let (kind, delay_ms) = if play.game.is_busy() {
            (TimerKind::Animation, self.config.tui.scoot_step_ms)
        } else if play.game.is_cpu_turn() {
            (TimerKind::Cpu, self.config.tui.cpu_step_ms)
        } else {
            return;
        };
        let Some(sender) = self.event_tx.clone() else {
            return;
        };
        let generation = self.timer_generation;
        self.timer_pending = true;
        spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            let _ = sender.send(AppEvent::Timer { generation, kind }).await;
        });
    }

    fn start_game(&mut self, mode: GameMode) {
        let game = GameController::new(&self.config, mode);
        self.timer_generation += 1;
        self.timer_pending = false;
        let mut play = PlayState::new(game);
        play.push_log(match mode {
            GameMode::TwoPlayer => "New 2-player game".to_string(),
            GameMode::VsCpu => "New game vs CPU".to_string(),
        });
        info!(?mode, "Game started");
        self.play = Some(play);
        self.screen = Screen::Play;
        self.state
            .set_status("Draft: move the cursor and press Enter to place tracks".to_string());
        self.after_action();
    }

    fn leave_game(&mut self) {
        self.play = None;
        self.timer_generation += 1;
        self.timer_pending = false;
        self.screen = Screen::Menu;
        self.state.set_status("Ready".to_string());
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return Ok(());
        }
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Play => self.handle_play_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_menu_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_menu_cursor(1),
            KeyCode::Char('1') => self.start_game(GameMode::TwoPlayer),
            KeyCode::Char('2') => self.start_game(GameMode::VsCpu),
            KeyCode::Enter | KeyCode::Char(' ') => match MENU_ITEMS[self.state.menu_cursor].1 {
                MenuAction::NewGame(mode) => self.start_game(mode),
                MenuAction::Quit => self.state.should_quit = true,
            },
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_play_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => {
                self.state.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.leave_game();
                return Ok(());
            }
            _ => {}
        }
        let Some(play) = self.play.as_mut() else {
            self.screen = Screen::Menu;
            return Ok(());
        };

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => play.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => play.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => play.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => play.move_cursor(0, 1),
            KeyCode::Tab => play.cycle_highlight(),
            _ => {}
        }

        let wants_action = matches!(
            key.code,
            KeyCode::Enter
                | KeyCode::Char(' ')
                | KeyCode::Char('t')
                | KeyCode::Char('f')
                | KeyCode::Char('p')
        );
        if !wants_action {
            return Ok(());
        }
        if play.game.is_busy() || play.game.is_cpu_turn() {
            self.state.set_status("Wait for the current move to finish".to_string());
            return Ok(());
        }

        let cursor = play.cursor;
        let game = &mut play.game;
        let outcome: Result<String, GameError> = match key.code {
            KeyCode::Char('t') => game
                .place_track_here()
                .map(|pos| format!("Track built at {pos}")),
            KeyCode::Char('f') => game
                .fulfill_contract()
                .map(|reward| format!("Contract paid ${reward}")),
            KeyCode::Char('p') => game.pass_turn().map(|()| "Turn passed".to_string()),
            _ if game.state().phase == Phase::Draft => game
                .place_draft_track(cursor)
                .map(|()| format!("Track drafted at {cursor}")),
            _ => game.request_move(cursor).map(|kind| match kind {
                MoveKind::Step => format!("Moved to {cursor}"),
                MoveKind::Scoot { steps } => format!("Scooting {steps} tiles to {cursor}"),
            }),
        };
        match outcome {
            Ok(message) => self.state.set_status(message),
            Err(err) => {
                debug!(%err, "Action rejected");
                self.state.set_status(err.to_string());
            }
        }
        self.after_action();
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match (self.screen, self.play.as_ref()) {
            (Screen::Play, Some(play)) => self.draw_play(frame, play),
            _ => self.draw_menu(frame),
        }
    }

    fn draw_menu(&self, frame: &mut Frame) {
        let area = frame.size();
        let banner_lines = block_font::render_words(&["WONKY", "TRACKS"]);
        let banner_height = banner_lines.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((banner_height + 2).min(area.height)),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let banner_content: Vec<Line> = banner_lines
            .into_iter()
            .map(|line| {
                Line::from(Span::styled(
                    line,
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        let banner = Paragraph::new(banner_content).alignment(Alignment::Center);
        frame.render_widget(banner, layout[0]);

        let menu_height = (MENU_ITEMS.len() as u16)
            .saturating_add(2)
            .min(layout[1].height);
        let menu_width = 30.min(layout[1].width.max(1));
        let menu_area = centered_rect(menu_width, menu_height, layout[1]);
        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, (label, _))| {
                if idx == self.state.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {label}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();
        let menu = Paragraph::new(menu_lines)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .alignment(Alignment::Left);
        frame.render_widget(menu, menu_area);

        self.render_status(frame, layout[2]);
    }

    fn draw_play(&self, frame: &mut Frame, play: &PlayState) {
        let area = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        let board = &play.game.state().board;
        let board_width = (board.width() as u16).saturating_mul(2).saturating_add(2);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(board_width), Constraint::Min(30)])
            .split(rows[0]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(11),
                Constraint::Min(4),
                Constraint::Length(5),
            ])
            .split(columns[1]);

        self.render_board(frame, columns[0], play);
        self.render_hud(frame, side[0], play);
        self.render_log(frame, side[1], play);
        self.render_help(frame, side[2]);
        self.render_status(frame, rows[1]);
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, play: &PlayState) {
        let board = &play.game.state().board;
        let lines: Vec<Line> = (0..board.height())
            .map(|y| {
                let spans: Vec<Span> = (0..board.width())
                    .map(|x| self.tile_span(play, Position::new(x as i32, y as i32)))
                    .collect();
                Line::from(spans)
            })
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Board"));
        frame.render_widget(paragraph, area);
    }

    fn tile_span(&self, play: &PlayState, pos: Position) -> Span<'static> {
        let game = &play.game;
        let state = game.state();
        let board = &state.board;
        let theme = &self.theme;

        let (mut text, mut style) = match board.tile_kind_at(pos) {
            TileKind::Land => ("  ".to_string(), Style::default().bg(theme.land)),
            TileKind::Obstacle => (
                "▓▓".to_string(),
                Style::default().fg(theme.muted).bg(theme.water),
            ),
            TileKind::Resource => {
                let resource = board.resource_at(pos);
                let symbol = resource.map(ResourceType::symbol).unwrap_or('?');
                (
                    format!("{symbol} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(theme.resource(resource)),
                )
            }
            TileKind::CommunalBase => (
                "░░".to_string(),
                Style::default().fg(theme.warning).bg(theme.base),
            ),
        };

        if let Some(track) = state.tracks.track_at(pos) {
            text = "══".to_string();
            style = style
                .fg(theme.player(track.owner))
                .add_modifier(Modifier::BOLD);
        }
        if let Some(highlight) = game.highlights().get(pos) {
            style = style.bg(if highlight.is_scoot {
                theme.scoot
            } else {
                theme.step
            });
        }
        if let Some(animation) = game.animation() {
            if animation.destination() == pos {
                style = style.bg(theme.scoot).add_modifier(Modifier::UNDERLINED);
            } else if animation.remaining().contains(&pos) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
        }

        let mut trucks = state.trucks.iter().filter(|truck| truck.position == pos);
        match (trucks.next(), trucks.next()) {
            (Some(truck), None) => {
                let color = theme.player(truck.owner);
                let cargo = truck
                    .cargo
                    .map(|resource| resource.symbol().to_ascii_lowercase())
                    .unwrap_or(' ');
                text = format!("{}{cargo}", truck.owner.number());
                style = style
                    .bg(color)
                    .fg(contrast_color(&color, Color::White))
                    .add_modifier(Modifier::BOLD);
            }
            (Some(_), Some(_)) => {
                text = "12".to_string();
                style = style
                    .bg(theme.accent)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD);
            }
            _ => {}
        }

        if pos == play.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(text, style)
    }

    fn render_hud(&self, frame: &mut Frame, area: Rect, play: &PlayState) {
        let game = &play.game;
        let state = game.state();
        let theme = &self.theme;
        let label = |id: PlayerId| player_label(state.mode, id);
        let accent = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        match state.phase {
            Phase::Draft => {
                let current = state.draft.current;
                lines.push(Line::from(vec![
                    Span::styled("Draft  ", accent),
                    Span::styled(label(current), Style::default().fg(theme.player(current))),
                    Span::raw(format!(
                        " places ({} left)",
                        state.draft.remaining(current)
                    )),
                ]));
            }
            Phase::Play => {
                let turn = &state.turn;
                lines.push(Line::from(vec![
                    Span::styled("Turn   ", accent),
                    Span::styled(
                        label(turn.active),
                        Style::default().fg(theme.player(turn.active)),
                    ),
                ]));
                lines.push(Line::from(format!(
                    "Roll {}  moves left {}  track built {}",
                    turn.rolled,
                    turn.remaining,
                    if turn.has_placed_track { "yes" } else { "no" }
                )));
            }
            Phase::GameOver { winner } => {
                lines.push(Line::from(vec![
                    Span::styled("Game over  ", accent),
                    Span::styled(
                        format!("{} wins", label(winner)),
                        Style::default()
                            .fg(theme.player(winner))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
        }

        if let Some(contract) = state.contracts.current() {
            lines.push(Line::from(format!(
                "Contract #{}: {contract}",
                state.contracts.number()
            )));
        }
        lines.push(Line::from(format!(
            "Win at ${}",
            play.game.rules().win_cash
        )));
        lines.push(Line::from(""));

        for id in PlayerId::ALL {
            let player = state.player(id);
            let cargo = state
                .truck(id)
                .and_then(|truck| truck.cargo)
                .map(|resource| resource.name())
                .unwrap_or("-");
            let ready = game.can_fulfill_contract(id);
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<16}", label(id)),
                    Style::default().fg(theme.player(id)).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("${:<5} tracks {}", player.cash, player.track_budget)),
            ]));
            let stock = player.stockpile;
            lines.push(Line::from(vec![
                Span::raw(format!(
                    "  C{} W{} S{}  cargo {cargo}",
                    stock.concrete, stock.wood, stock.steel
                )),
                if ready {
                    Span::styled("  contract ready (f)", Style::default().fg(theme.success))
                } else {
                    Span::raw("")
                },
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Game"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect, play: &PlayState) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = play.log.len().saturating_sub(visible);
        let lines: Vec<Line> = play
            .log
            .iter()
            .skip(skip)
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.time),
                        Style::default().fg(self.theme.muted),
                    ),
                    Span::raw(entry.message.clone()),
                ])
            })
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Events"));
        frame.render_widget(paragraph, area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let key = Style::default().fg(self.theme.accent);
        let lines = vec![
            Line::from(vec![
                Span::styled("←↑↓→/hjkl", key),
                Span::raw(" cursor  "),
                Span::styled("Tab", key),
                Span::raw(" next highlight"),
            ]),
            Line::from(vec![
                Span::styled("Enter", key),
                Span::raw(" draft/move  "),
                Span::styled("t", key),
                Span::raw(" build  "),
                Span::styled("f", key),
                Span::raw(" contract  "),
                Span::styled("p", key),
                Span::raw(" pass"),
            ]),
            Line::from(vec![
                Span::styled("n", key),
                Span::raw(" menu  "),
                Span::styled("q", key),
                Span::raw(" quit"),
            ]),
        ];
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Keys"));
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let paragraph = Paragraph::new(Line::from(self.state.status.clone()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn player_label(mode: GameMode, id: PlayerId) -> String {
    if mode.is_cpu(id) {
        format!("{id} (CPU)")
    } else {
        id.to_string()
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

struct UiState {
    status: String,
    should_quit: bool,
    menu_cursor: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            should_quit: false,
            menu_cursor: 0,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn move_menu_cursor(&mut self, delta: isize) {
        let len = MENU_ITEMS.len() as isize;
        self.menu_cursor = (self.menu_cursor as isize + delta).rem_euclid(len) as usize;
    }
}

struct LogEntry {
    time: String,
    message: String,
}

/// A game in progress plus its cursor and event log.
struct PlayState {
    game: GameController,
    cursor: Position,
    log: VecDeque<LogEntry>,
}

impl PlayState {
    fn new(game: GameController) -> Self {
        let cursor = game.state().board.communal_center();
        Self {
            game,
            cursor,
            log: VecDeque::new(),
        }
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let board = &self.game.state().board;
        let next = self.cursor.offset(dx, dy);
        if board.in_bounds(next) {
            self.cursor = next;
        }
    }

    /// Jump to the highlight after the one under the cursor.
    fn cycle_highlight(&mut self) {
        let targets: Vec<Position> = self
            .game
            .highlights()
            .iter()
            .map(|highlight| highlight.position)
            .collect();
        if targets.is_empty() {
            return;
        }
        let next = targets
            .iter()
            .position(|&pos| pos == self.cursor)
            .map_or(0, |idx| (idx + 1) % targets.len());
        self.cursor = targets[next];
    }

    fn record_events(&mut self) {
        for event in self.game.drain_events() {
            self.push_log(event.to_string());
        }
    }

    fn push_log(&mut self, message: String) {
        self.log.push_back(LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            message,
        });
        while self.log.len() > EVENT_LOG_LIMIT {
            self.log.pop_front();
        }
    }
}
