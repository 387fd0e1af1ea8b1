use crate::backdrop::Backdrop;
use crate::game::{Flow, Game, InputEvent};

/// The game plus the presentation-only state the renderer needs
#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub backdrop: Backdrop,
}

impl App {
    pub fn new(game: Game, backdrop: Backdrop) -> Self {
        Self { game, backdrop }
    }

    /// Advance one frame with `dt` in seconds
    pub fn tick<I>(&mut self, events: I, dt: f64) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.game.step(events, dt)
    }
}
