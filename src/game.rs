//! The game controller.
//!
//! [`Game`] owns the current screen, the in-progress [`Session`], the
//! [`Stats`] of the play-through and the [`ParticleField`]. The frame loop
//! feeds it input events and elapsed time through [`Game::step`] and draws
//! whatever [`Game::snapshot`] returns. Nothing here touches a terminal.

use tracing::{debug, info, warn};

use crate::buttons::{
    difficulty_buttons, game_over_buttons, menu_buttons, Bounds, Button, ButtonAction, Viewport,
};
use crate::config::GameConfig;
use crate::palette::{Palette, Rgb};
use crate::particles::{BurstKind, ParticleField};
use crate::scrambler::Scrambler;
use crate::session::Session;
use crate::stats::Stats;
use crate::words::Difficulty;

/// Cursor blink period in seconds
const BLINK_PERIOD: f64 = 1.0;

/// Peak height of a tile jump, in rows
const JUMP_HEIGHT: f64 = 1.0;

/// Ticks between neighbouring tiles taking off
const JUMP_STAGGER: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Menu,
    /// Also reached through the Settings button
    DifficultySelect,
    Playing,
    GameOver,
}

/// Discrete input delivered by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Up,
    Down,
    Tab,
    PointerMove { x: u16, y: u16 },
    Click { x: u16, y: u16 },
    Resize { width: u16, height: u16 },
}

/// Whether the frame loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// What remains of a session once its pool is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedRound {
    pub difficulty: Difficulty,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
    pub color: Rgb,
    pub glyph: char,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView<'a> {
    pub label: &'a str,
    pub bounds: Bounds,
    pub action: ButtonAction,
    pub hovered: bool,
    pub focused: bool,
    /// Blurb rendered on the row above the button
    pub caption: Option<String>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub difficulty: Option<Difficulty>,
    pub scrambled: Option<&'a str>,
    pub input: &'a str,
    pub progress: Option<Progress>,
    pub stats: Stats,
    pub particles: Vec<ParticleView>,
    pub buttons: Vec<ButtonView<'a>>,
    pub shake_offset: i16,
    pub feedback: Option<Feedback>,
    /// Rows each letter tile is lifted by, one entry per scrambled letter
    pub tile_offsets: Vec<u16>,
    /// Darkness of the screen-change overlay in `[0, 1]`
    pub fade: f64,
    pub cursor_visible: bool,
    pub palette: &'a Palette,
}

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    session: Option<Session>,
    finished: Option<FinishedRound>,
    stats: Stats,
    particles: ParticleField,
    buttons: Vec<Button>,
    focus: usize,
    hovered: Option<usize>,
    shake_ticks: u32,
    feedback: Option<(Feedback, u32)>,
    transition_ticks: u32,
    jump_elapsed: Option<u32>,
    viewport: Viewport,
    scrambler: Scrambler,
    clock: f64,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let viewport = Viewport::default();
        let scrambler = Scrambler::new(config.seed);
        Self {
            config,
            state: GameState::Menu,
            session: None,
            finished: None,
            stats: Stats::default(),
            particles: ParticleField::new(),
            buttons: menu_buttons(viewport),
            focus: 0,
            hovered: None,
            shake_ticks: 0,
            feedback: None,
            transition_ticks: 0,
            jump_elapsed: None,
            viewport,
            scrambler,
            clock: 0.0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn finished(&self) -> Option<FinishedRound> {
        self.finished
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn shake_ticks(&self) -> u32 {
        self.shake_ticks
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// One tick: handle every event in order, then advance time by `dt` seconds
    pub fn step<I>(&mut self, events: I, dt: f64) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.handle(event) == Flow::Exit {
                return Flow::Exit;
            }
        }
        self.update(dt);
        Flow::Continue
    }

    pub fn handle(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                Flow::Continue
            }
            InputEvent::PointerMove { x, y } => {
                self.hovered = self.buttons.iter().position(|b| b.hit(x, y));
                if let Some(idx) = self.hovered {
                    self.focus = idx;
                }
                Flow::Continue
            }
            InputEvent::Click { x, y } => {
                let action = self.buttons.iter().find(|b| b.hit(x, y)).map(|b| b.action);
                match action {
                    Some(action) => self.apply(action),
                    None => Flow::Continue,
                }
            }
            _ => match self.state {
                GameState::Playing => self.handle_playing(event),
                GameState::Menu => self.handle_navigation(event),
                GameState::DifficultySelect => {
                    let tier = match event {
                        InputEvent::Char('1') => Some(Difficulty::Easy),
                        InputEvent::Char('2') => Some(Difficulty::Medium),
                        InputEvent::Char('3') => Some(Difficulty::Hard),
                        _ => None,
                    };
                    match tier {
                        Some(tier) => self.apply(ButtonAction::ChooseDifficulty(tier)),
                        None => self.handle_navigation(event),
                    }
                }
                GameState::GameOver => self.handle_navigation(event),
            },
        }
    }

    /// Focus movement and activation on the button screens. Escape leaves the
    /// program from the menu and returns to the menu everywhere else.
    fn handle_navigation(&mut self, event: InputEvent) -> Flow {
        let count = self.buttons.len();
        match event {
            InputEvent::Up if count > 0 => {
                self.focus = (self.focus + count - 1) % count;
                Flow::Continue
            }
            InputEvent::Down | InputEvent::Tab if count > 0 => {
                self.focus = (self.focus + 1) % count;
                Flow::Continue
            }
            InputEvent::Enter => match self.buttons.get(self.focus).map(|b| b.action) {
                Some(action) => self.apply(action),
                None => Flow::Continue,
            },
            InputEvent::Escape if self.state == GameState::Menu => {
                info!("escape pressed in menu");
                Flow::Exit
            }
            InputEvent::Escape => {
                self.enter(GameState::Menu);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn handle_playing(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Escape => {
                if let Some(session) = &self.session {
                    info!(
                        difficulty = %session.difficulty,
                        word_index = session.word_index,
                        "session abandoned"
                    );
                }
                self.enter(GameState::Menu);
            }
            InputEvent::Enter => self.submit(),
            InputEvent::Backspace => {
                if let Some(session) = self.session.as_mut() {
                    session.pop_char();
                }
            }
            InputEvent::Char(c) => {
                let max_len = self.config.max_input_len;
                if let Some(session) = self.session.as_mut() {
                    session.push_char(c, max_len);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Single dispatch point for button actions
    pub fn apply(&mut self, action: ButtonAction) -> Flow {
        match (self.state, action) {
            (GameState::Menu, ButtonAction::StartGame | ButtonAction::OpenSettings) => {
                self.enter(GameState::DifficultySelect);
            }
            (GameState::Menu, ButtonAction::Exit) => {
                info!("exit requested from menu");
                return Flow::Exit;
            }
            (GameState::DifficultySelect, ButtonAction::ChooseDifficulty(tier)) => {
                self.start(tier);
            }
            (GameState::DifficultySelect, ButtonAction::Back)
            | (GameState::GameOver, ButtonAction::Continue | ButtonAction::Back) => {
                self.enter(GameState::Menu);
            }
            (GameState::GameOver, ButtonAction::PlayAgain) => {
                self.enter(GameState::DifficultySelect);
            }
            (state, action) => {
                debug!(%state, ?action, "ignoring action for current screen");
            }
        }
        Flow::Continue
    }

    fn start(&mut self, difficulty: Difficulty) {
        let pool = &self.config.pools.get(difficulty).words;
        let Some(session) = Session::new(
            difficulty,
            pool,
            self.config.shuffle_words,
            &mut self.scrambler,
        ) else {
            warn!(%difficulty, "word pool is empty, staying on difficulty screen");
            return;
        };

        info!(%difficulty, words = session.total(), "session started");
        self.enter(GameState::Playing);
        self.stats = Stats::default();
        self.finished = None;
        self.session = Some(session);
    }

    fn submit(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let guess = session.take_input();
        let correct = session.is_match(&guess);
        debug!(
            word_index = session.word_index,
            guess = %guess,
            correct,
            "answer submitted"
        );

        self.stats.record(correct);
        let origin = self.viewport.center();
        let palette = &self.config.palette;

        if correct {
            self.feedback = Some((Feedback::Correct, self.config.feedback_ticks));
            self.jump_elapsed = Some(0);
            self.particles.spawn_burst(
                origin,
                self.config.correct_burst,
                palette.success,
                BurstKind::Correct,
                self.scrambler.rng(),
            );
            if !session.advance(&mut self.scrambler) {
                self.finish();
            }
        } else {
            self.feedback = Some((Feedback::Incorrect, self.config.feedback_ticks));
            self.shake_ticks = self.config.shake_ticks;
            self.particles.spawn_burst(
                origin,
                self.config.incorrect_burst,
                palette.error,
                BurstKind::Incorrect,
                self.scrambler.rng(),
            );
        }
    }

    fn finish(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.finished = Some(FinishedRound {
            difficulty: session.difficulty,
            total: session.total(),
        });
        info!(
            difficulty = %session.difficulty,
            correct = self.stats.correct,
            incorrect = self.stats.incorrect,
            best_streak = self.stats.best_streak,
            "session finished"
        );
        self.enter(GameState::GameOver);

        if self.stats.is_perfect() {
            self.particles.spawn_burst(
                self.viewport.center(),
                self.config.celebration_burst,
                self.config.palette.accent,
                BurstKind::Celebration,
                self.scrambler.rng(),
            );
        }
    }

    /// Switch screens; particles, buttons and transient animation state never
    /// carry over. The switch itself is immediate, only the picture fades in.
    fn enter(&mut self, next: GameState) {
        debug!(from = %self.state, to = %next, "screen transition");
        self.state = next;
        self.particles.clear();
        self.buttons = layout(next, self.viewport);
        self.focus = 0;
        self.hovered = None;
        self.shake_ticks = 0;
        self.feedback = None;
        self.jump_elapsed = None;
        self.transition_ticks = self.config.transition_ticks;

        if matches!(next, GameState::Menu | GameState::DifficultySelect) {
            self.session = None;
            self.finished = None;
            self.stats = Stats::default();
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.buttons = layout(self.state, self.viewport);
        self.focus = self.focus.min(self.buttons.len().saturating_sub(1));
        self.hovered = None;
    }

    /// Advance time-driven state by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        self.clock += dt;
        self.particles.advance(dt);
        self.particles
            .cull_outside(self.viewport.width as f64, self.viewport.height as f64);
        self.shake_ticks = self.shake_ticks.saturating_sub(1);
        self.feedback = match self.feedback {
            Some((kind, ticks)) if ticks > 1 => Some((kind, ticks - 1)),
            _ => None,
        };
        self.transition_ticks = self.transition_ticks.saturating_sub(1);
        self.jump_elapsed = match (self.jump_elapsed, &self.session) {
            (Some(elapsed), Some(session)) if elapsed + 1 < self.jump_span(session) => {
                Some(elapsed + 1)
            }
            _ => None,
        };
    }

    /// Ticks until the last tile of the current word has landed
    fn jump_span(&self, session: &Session) -> u32 {
        let tiles = session.scrambled_word.chars().count() as u32;
        self.config.jump_ticks + JUMP_STAGGER * tiles.saturating_sub(1)
    }

    /// Parabolic lift per tile; later tiles take off `JUMP_STAGGER` ticks after
    /// their left neighbour.
    fn tile_offsets(&self) -> Vec<u16> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let tiles = session.scrambled_word.chars().count() as u32;
        let duration = self.config.jump_ticks.max(1) as f64;

        (0..tiles)
            .map(|i| {
                let Some(elapsed) = self.jump_elapsed else {
                    return 0;
                };
                let Some(local) = elapsed.checked_sub(i * JUMP_STAGGER) else {
                    return 0;
                };
                let t = local as f64 / duration;
                if t >= 1.0 {
                    return 0;
                }
                (4.0 * JUMP_HEIGHT * t * (1.0 - t)).round() as u16
            })
            .collect()
    }

    fn fade(&self) -> f64 {
        if self.config.transition_ticks == 0 {
            return 0.0;
        }
        self.transition_ticks as f64 / self.config.transition_ticks as f64
    }

    fn shake_offset(&self) -> i16 {
        if self.shake_ticks == 0 {
            return 0;
        }
        let amplitude = 1 + (self.shake_ticks / 5) as i16;
        if self.shake_ticks % 2 == 0 {
            amplitude
        } else {
            -amplitude
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let progress = match (&self.session, self.finished) {
            (Some(session), _) => Some(Progress {
                completed: session.word_index,
                total: session.total(),
            }),
            (None, Some(round)) => Some(Progress {
                completed: round.total,
                total: round.total,
            }),
            _ => None,
        };

        let buttons = self
            .buttons
            .iter()
            .enumerate()
            .map(|(i, b)| ButtonView {
                label: &b.label,
                bounds: b.bounds,
                action: b.action,
                hovered: self.hovered == Some(i),
                focused: self.focus == i,
                caption: match b.action {
                    ButtonAction::ChooseDifficulty(tier) => {
                        Some(tier.description(self.config.pools.get(tier).len()))
                    }
                    _ => None,
                },
            })
            .collect();

        let particles = self
            .particles
            .particles()
            .iter()
            .map(|p| ParticleView {
                x: p.x,
                y: p.y,
                alpha: p.alpha(),
                color: p.color,
                glyph: p.glyph,
            })
            .collect();

        Snapshot {
            state: self.state,
            difficulty: self
                .session
                .as_ref()
                .map(|s| s.difficulty)
                .or(self.finished.map(|f| f.difficulty)),
            scrambled: self.session.as_ref().map(|s| s.scrambled_word.as_str()),
            input: self.session.as_ref().map(|s| s.input.as_str()).unwrap_or(""),
            progress,
            stats: self.stats,
            particles,
            buttons,
            shake_offset: self.shake_offset(),
            feedback: self.feedback.map(|(kind, _)| kind),
            tile_offsets: self.tile_offsets(),
            fade: self.fade(),
            cursor_visible: self.clock.rem_euclid(BLINK_PERIOD) < BLINK_PERIOD / 2.0,
            palette: &self.config.palette,
        }
    }
}

fn layout(state: GameState, viewport: Viewport) -> Vec<Button> {
    match state {
        GameState::Menu => menu_buttons(viewport),
        GameState::DifficultySelect => difficulty_buttons(viewport),
        GameState::Playing => Vec::new(),
        GameState::GameOver => game_over_buttons(viewport),
    }
}
