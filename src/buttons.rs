use crate::particles::Point;
use crate::words::Difficulty;

pub const BUTTON_WIDTH: u16 = 24;
pub const BUTTON_HEIGHT: u16 = 3;

/// Drawable area in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && (x as u32) < self.x as u32 + self.width as u32
            && (y as u32) < self.y as u32 + self.height as u32
    }
}

/// What a button does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    StartGame,
    OpenSettings,
    Exit,
    ChooseDifficulty(Difficulty),
    Back,
    PlayAgain,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub bounds: Bounds,
    pub action: ButtonAction,
}

impl Button {
    pub fn hit(&self, x: u16, y: u16) -> bool {
        self.bounds.contains(x, y)
    }
}

/// Stack buttons vertically, centred horizontally, starting at row `top`
fn column(entries: &[(&str, ButtonAction)], viewport: Viewport, top: u16, gap: u16) -> Vec<Button> {
    let width = BUTTON_WIDTH.min(viewport.width);
    let x = (viewport.width - width) / 2;

    entries
        .iter()
        .enumerate()
        .map(|(i, (label, action))| Button {
            label: label.to_string(),
            bounds: Bounds {
                x,
                y: top.saturating_add(i as u16 * (BUTTON_HEIGHT + gap)),
                width,
                height: BUTTON_HEIGHT,
            },
            action: *action,
        })
        .collect()
}

pub fn menu_buttons(viewport: Viewport) -> Vec<Button> {
    column(
        &[
            ("Start Game", ButtonAction::StartGame),
            ("Settings", ButtonAction::OpenSettings),
            ("Exit Game", ButtonAction::Exit),
        ],
        viewport,
        8,
        1,
    )
}

pub fn difficulty_buttons(viewport: Viewport) -> Vec<Button> {
    let mut buttons = column(
        &[
            ("Easy", ButtonAction::ChooseDifficulty(Difficulty::Easy)),
            ("Medium", ButtonAction::ChooseDifficulty(Difficulty::Medium)),
            ("Hard", ButtonAction::ChooseDifficulty(Difficulty::Hard)),
        ],
        viewport,
        5,
        2,
    );
    // Back sits a row lower than the tier stack
    let last = buttons.last().map(|b| b.bounds).unwrap_or(Bounds {
        x: 0,
        y: 5,
        width: 0,
        height: 0,
    });
    buttons.extend(column(
        &[("Back", ButtonAction::Back)],
        viewport,
        last.y.saturating_add(last.height + 2),
        0,
    ));
    buttons
}

pub fn game_over_buttons(viewport: Viewport) -> Vec<Button> {
    column(
        &[
            ("Play Again", ButtonAction::PlayAgain),
            ("Main Menu", ButtonAction::Continue),
        ],
        viewport,
        viewport.height / 2 + 2,
        1,
    )
}
