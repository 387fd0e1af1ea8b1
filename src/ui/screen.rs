use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Padding, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    game::{Feedback, GameState, Snapshot},
    ui::{centered_text, color, row},
};

const TILE_WIDTH: u16 = 5;
const TILE_GAP: u16 = 1;
const INPUT_WIDTH: u16 = 40;

/// A UI Screen boundary: draws the state-specific text of one frame.
/// Buttons and particles are drawn on top by the caller.
pub trait Screen {
    fn render(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer);
}

pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        let palette = view.palette;
        let bold = Style::default().add_modifier(Modifier::BOLD);

        centered_text(
            area,
            2,
            Span::styled("WORD SCRABBLE", bold.fg(color(palette.accent))),
            buf,
        );
        centered_text(
            area,
            3,
            Span::styled("ARENA", bold.fg(color(palette.secondary))),
            buf,
        );
        centered_text(
            area,
            5,
            Span::styled(
                "Test your word unscrambling skills!",
                Style::default().fg(color(palette.text)),
            ),
            buf,
        );
    }
}

/// Difficulty selection, also reached through Settings
pub struct DifficultyScreen;

impl Screen for DifficultyScreen {
    fn render(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        centered_text(
            area,
            2,
            Span::styled(
                "Select Difficulty",
                Style::default()
                    .fg(color(view.palette.primary))
                    .add_modifier(Modifier::BOLD),
            ),
            buf,
        );
    }
}

pub struct PlayingScreen;

impl PlayingScreen {
    fn render_header(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        let palette = view.palette;
        let Some(strip) = row(area, 0) else {
            return;
        };
        buf.set_style(strip, Style::default().bg(color(palette.primary)));

        let label_style = Style::default()
            .fg(color(palette.text))
            .add_modifier(Modifier::BOLD);
        let score = format!(" Score: {}", view.stats.correct);
        Paragraph::new(Span::styled(score.as_str(), label_style)).render(strip, buf);

        let Some(progress) = view.progress else {
            return;
        };
        let counter = format!("{}/{} ", progress.completed, progress.total);
        if score.width() + counter.width() < strip.width as usize {
            Paragraph::new(Span::styled(counter, label_style))
                .alignment(Alignment::Right)
                .render(strip, buf);
        }

        if let Some(bar) = row(area, 1) {
            let bar = Rect {
                x: bar.x + 2.min(bar.width),
                width: bar.width.saturating_sub(4),
                ..bar
            };
            if !bar.is_empty() {
                LineGauge::default()
                    .ratio(progress.ratio())
                    .label("")
                    .filled_style(Style::default().fg(color(palette.success)))
                    .unfilled_style(Style::default().fg(color(palette.disabled)))
                    .render(bar, buf);
            }
        }
    }

    fn render_tiles(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        let Some(scrambled) = view.scrambled else {
            return;
        };
        let palette = view.palette;
        let mid = area.height / 2;

        centered_text(
            area,
            mid.saturating_sub(5),
            Span::styled(
                "Unscramble this word:",
                Style::default().fg(color(palette.light_bg)),
            ),
            buf,
        );

        let tile_color = color(match view.feedback {
            Some(Feedback::Correct) => palette.success,
            Some(Feedback::Incorrect) => palette.error,
            None => palette.primary,
        });
        let letter_style = Style::default()
            .fg(color(palette.text))
            .add_modifier(Modifier::BOLD);

        let count = scrambled.chars().count() as u16;
        let needed = count * (TILE_WIDTH + TILE_GAP) - TILE_GAP.min(count);
        let top = mid.saturating_sub(3);

        if needed > area.width || top + 3 > area.height {
            // not enough room for boxed tiles
            let letters = scrambled.chars().map(|c| c.to_ascii_uppercase()).join(" ");
            centered_text(
                area,
                mid.saturating_sub(2),
                Span::styled(letters, letter_style.fg(tile_color)),
                buf,
            );
            return;
        }

        let left = area.x + (area.width - needed) / 2;
        for (i, letter) in scrambled.chars().enumerate() {
            let lift = view.tile_offsets.get(i).copied().unwrap_or(0);
            let tile = Rect::new(
                left + i as u16 * (TILE_WIDTH + TILE_GAP),
                area.y + top.saturating_sub(lift),
                TILE_WIDTH,
                3,
            );
            Paragraph::new(Span::styled(
                letter.to_ascii_uppercase().to_string(),
                letter_style,
            ))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().fg(tile_color).bg(tile_color)),
            )
            .render(tile, buf);
        }
    }

    fn render_input(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        let palette = view.palette;
        let width = INPUT_WIDTH.min(area.width);
        let centered = ((area.width - width) / 2) as i32;
        let x = (centered + view.shake_offset as i32).clamp(0, (area.width - width) as i32) as u16;
        let y = area.height / 2 + 1;
        let rect = Rect::new(area.x + x, area.y + y, width, 3).intersection(area);

        if !rect.is_empty() {
            let border = if view.shake_offset != 0 {
                palette.error
            } else {
                palette.accent
            };
            let mut spans = vec![Span::styled(
                view.input.to_uppercase(),
                Style::default()
                    .fg(color(palette.text))
                    .add_modifier(Modifier::BOLD),
            )];
            if view.cursor_visible {
                spans.push(Span::styled("▏", Style::default().fg(color(palette.text))));
            }

            Paragraph::new(Line::from(spans))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(color(border))),
                )
                .render(rect, buf);
        }

        centered_text(
            area,
            y + 4,
            Span::styled(
                "Press ENTER to submit | ESC to go back",
                Style::default()
                    .fg(color(palette.light_bg))
                    .add_modifier(Modifier::ITALIC),
            ),
            buf,
        );
    }

    fn render_footer(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        let palette = view.palette;
        let Some(strip) = row(area, area.height.saturating_sub(1)) else {
            return;
        };
        let stats = view.stats;

        Paragraph::new(Span::styled(
            format!(" Streak: {} (Best: {})", stats.streak, stats.best_streak),
            Style::default().fg(color(palette.success)),
        ))
        .render(strip, buf);

        Paragraph::new(Span::styled(
            format!("Accuracy: {:.1}%", stats.accuracy_percent()),
            Style::default().fg(color(palette.secondary)),
        ))
        .alignment(Alignment::Center)
        .render(strip, buf);

        if let Some(difficulty) = view.difficulty {
            Paragraph::new(Span::styled(
                format!("Difficulty: {difficulty} "),
                Style::default().fg(color(palette.accent)),
            ))
            .alignment(Alignment::Right)
            .render(strip, buf);
        }
    }
}

impl Screen for PlayingScreen {
    fn render(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        self.render_header(view, area, buf);
        self.render_tiles(view, area, buf);
        self.render_input(view, area, buf);
        self.render_footer(view, area, buf);
    }
}

pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, view: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
        let palette = view.palette;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mid = area.height / 2;
        let total = view.progress.map(|p| p.total).unwrap_or_default();

        centered_text(
            area,
            mid.saturating_sub(6),
            Span::styled("GAME OVER", bold.fg(color(palette.accent))),
            buf,
        );
        centered_text(
            area,
            mid.saturating_sub(3),
            Span::styled(
                format!("Final Score: {}/{}", view.stats.correct, total),
                bold.fg(color(palette.success)),
            ),
            buf,
        );
        centered_text(
            area,
            mid.saturating_sub(1),
            Span::styled(
                format!(
                    "Accuracy: {:.1}% | Best Streak: {}",
                    view.stats.accuracy_percent(),
                    view.stats.best_streak
                ),
                Style::default().fg(color(palette.text)),
            ),
            buf,
        );
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: GameState) -> Box<dyn Screen> {
    match state {
        GameState::Menu => Box::new(MenuScreen),
        GameState::DifficultySelect => Box::new(DifficultyScreen),
        GameState::Playing => Box::new(PlayingScreen),
        GameState::GameOver => Box::new(GameOverScreen),
    }
}
