pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    backdrop::Backdrop,
    buttons::{Bounds, ButtonAction},
    game::{ButtonView, ParticleView},
    palette::{Palette, Rgb},
    ui::screen::current_screen,
    App,
};

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// A one-row strip at `y`, or None when it falls outside `area`
pub(crate) fn row(area: Rect, y: u16) -> Option<Rect> {
    (y < area.height).then(|| Rect::new(area.x, area.y + y, area.width, 1))
}

/// Place `bounds` (viewport coordinates) inside `area`, clipped
pub(crate) fn place(area: Rect, bounds: Bounds) -> Rect {
    Rect::new(
        area.x.saturating_add(bounds.x),
        area.y.saturating_add(bounds.y),
        bounds.width,
        bounds.height,
    )
    .intersection(area)
}

pub(crate) fn centered_text<'a>(
    area: Rect,
    y: u16,
    line: impl Into<Line<'a>>,
    buf: &mut Buffer,
) {
    if let Some(strip) = row(area, y) {
        Paragraph::new(line.into())
            .alignment(Alignment::Center)
            .render(strip, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.game.snapshot();

        render_backdrop(&self.backdrop, view.palette, area, buf);
        current_screen(view.state).render(&view, area, buf);
        render_buttons(&view.buttons, view.palette, area, buf);
        render_particles(&view.particles, area, buf);
        render_fade(view.fade, view.palette.dark_bg, area, buf);
    }
}

fn render_backdrop(backdrop: &Backdrop, palette: &Palette, area: Rect, buf: &mut Buffer) {
    match backdrop {
        Backdrop::Solid(fill) => {
            buf.set_style(area, Style::default().bg(color(*fill)));
        }
        Backdrop::Art(lines) => {
            buf.set_style(area, Style::default().bg(color(palette.dark_bg)));
            if lines.is_empty() {
                return;
            }
            let art_style = Style::default()
                .fg(color(palette.disabled))
                .add_modifier(Modifier::DIM);
            for y in 0..area.height {
                let line = &lines[y as usize % lines.len()];
                buf.set_stringn(area.x, area.y + y, line, area.width as usize, art_style);
            }
        }
    }
}

fn button_color(action: ButtonAction, palette: &Palette) -> Rgb {
    match action {
        ButtonAction::Exit | ButtonAction::Back => palette.error,
        ButtonAction::OpenSettings => palette.accent,
        ButtonAction::PlayAgain => palette.success,
        _ => palette.primary,
    }
}

fn render_buttons(buttons: &[ButtonView<'_>], palette: &Palette, area: Rect, buf: &mut Buffer) {
    for button in buttons {
        let rect = place(area, button.bounds);
        if rect.is_empty() {
            continue;
        }

        let base = color(button_color(button.action, palette));
        let (border_style, label_style) = if button.hovered || button.focused {
            (
                Style::default().fg(color(palette.text)).bg(base),
                Style::default()
                    .fg(color(palette.text))
                    .bg(base)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(base),
                Style::default().fg(color(palette.text)),
            )
        };

        if let Some(caption) = &button.caption {
            if button.bounds.y > 0 {
                centered_text(
                    area,
                    button.bounds.y - 1,
                    Span::styled(caption.clone(), Style::default().fg(color(palette.light_bg))),
                    buf,
                );
            }
        }

        Paragraph::new(Span::styled(button.label, label_style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).style(border_style))
            .render(rect, buf);
    }
}

/// Render particles on top of whatever screen is showing
fn render_particles(particles: &[ParticleView], area: Rect, buf: &mut Buffer) {
    for particle in particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;

        if x < area.width && y < area.height {
            let fg = color(particle.color);
            let style = if particle.alpha > 0.7 {
                Style::default().fg(fg).add_modifier(Modifier::BOLD)
            } else if particle.alpha > 0.3 {
                Style::default().fg(fg)
            } else {
                Style::default().fg(fg).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&particle.glyph.to_string());
                cell.set_style(style);
            }
        }
    }
}

/// Mix `from` towards `to`; only true-colour cells can be mixed
fn blend(from: Color, to: Rgb, t: f64) -> Color {
    match from {
        Color::Rgb(r, g, b) => {
            let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(mix(r, to.0), mix(g, to.1), mix(b, to.2))
        }
        other => other,
    }
}

/// Darken the whole frame while a new screen fades in
fn render_fade(fade: f64, dark: Rgb, area: Rect, buf: &mut Buffer) {
    if fade <= 0.0 {
        return;
    }
    let t = fade.min(1.0);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.fg = blend(cell.fg, dark, t);
                cell.bg = blend(cell.bg, dark, t);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GameConfig,
        game::{Game, InputEvent},
        words::Difficulty,
    };

    fn create_test_app(width: u16, height: u16) -> App {
        let mut game = Game::new(
            GameConfig::standard()
                .unwrap()
                .with_seed(Some(5))
                .with_shuffle(false),
        );
        game.resize(width, height);
        App::new(game, Backdrop::Solid(Palette::default().dark_bg))
    }

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn rendered(app: &App, width: u16, height: u16) -> String {
        render(app, width, height)
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn start(app: &mut App, tier: Difficulty) {
        app.game.apply(ButtonAction::StartGame);
        app.game.apply(ButtonAction::ChooseDifficulty(tier));
    }

    /// Let the screen fade-in finish
    fn settle(app: &mut App) {
        while app.game.snapshot().fade > 0.0 {
            app.game.update(1.0 / 60.0);
        }
    }

    fn answer(app: &mut App, word: &str) {
        for c in word.chars() {
            app.game.handle(InputEvent::Char(c));
        }
        app.game.handle(InputEvent::Enter);
    }

    #[test]
    fn test_menu_screen() {
        let app = create_test_app(80, 24);
        let rendered = rendered(&app, 80, 24);

        assert!(rendered.contains("WORD SCRABBLE"));
        assert!(rendered.contains("ARENA"));
        assert!(rendered.contains("Start Game"));
        assert!(rendered.contains("Settings"));
        assert!(rendered.contains("Exit Game"));
    }

    #[test]
    fn test_difficulty_screen_shows_captions() {
        let mut app = create_test_app(80, 24);
        app.game.apply(ButtonAction::OpenSettings);
        let rendered = rendered(&app, 80, 24);

        assert!(rendered.contains("Select Difficulty"));
        assert!(rendered.contains("Easy - 10 simple words"));
        assert!(rendered.contains("Medium - 10 intermediate words"));
        assert!(rendered.contains("Hard - 10 challenging words"));
        assert!(rendered.contains("Back"));
    }

    #[test]
    fn test_playing_screen() {
        let mut app = create_test_app(80, 24);
        start(&mut app, Difficulty::Easy);
        app.game.handle(InputEvent::Char('p'));
        app.game.handle(InputEvent::Char('y'));
        let rendered = rendered(&app, 80, 24);

        assert!(rendered.contains("Score: 0"));
        assert!(rendered.contains("0/10"));
        assert!(rendered.contains("Unscramble this word:"));
        assert!(rendered.contains("PY"));
        assert!(rendered.contains("Press ENTER to submit | ESC to go back"));
        assert!(rendered.contains("Streak: 0 (Best: 0)"));
        assert!(rendered.contains("Accuracy: 0.0%"));
        assert!(rendered.contains("Difficulty: Easy"));
    }

    #[test]
    fn test_playing_screen_shows_scrambled_letters() {
        let mut app = create_test_app(80, 24);
        start(&mut app, Difficulty::Easy);
        let scrambled = app.game.session().unwrap().scrambled_word.to_uppercase();
        let rendered = rendered(&app, 80, 24);

        for letter in scrambled.chars() {
            assert!(rendered.contains(letter));
        }
    }

    #[test]
    fn test_footer_tracks_streak_after_correct_answer() {
        let mut app = create_test_app(80, 24);
        start(&mut app, Difficulty::Easy);
        let word = app.game.session().unwrap().current_word.clone();
        answer(&mut app, &word);
        let rendered = rendered(&app, 80, 24);

        assert!(rendered.contains("Score: 1"));
        assert!(rendered.contains("1/10"));
        assert!(rendered.contains("Streak: 1 (Best: 1)"));
        assert!(rendered.contains("Accuracy: 100.0%"));
    }

    #[test]
    fn test_wrong_answer_paints_error_particles() {
        let mut app = create_test_app(80, 24);
        start(&mut app, Difficulty::Easy);
        settle(&mut app);
        answer(&mut app, "zzz");
        let buffer = render(&app, 80, 24);

        let error = color(Palette::default().error);
        let particle_cells = buffer
            .content()
            .iter()
            .filter(|c| c.fg == error && ["x", "×", "·"].contains(&c.symbol()))
            .count();
        assert!(particle_cells > 0);
    }

    #[test]
    fn test_game_over_screen() {
        let mut app = create_test_app(80, 24);
        start(&mut app, Difficulty::Easy);
        for _ in 0..10 {
            let word = app.game.session().unwrap().current_word.clone();
            answer(&mut app, &word);
        }
        let rendered = rendered(&app, 80, 24);

        assert!(rendered.contains("GAME OVER"));
        assert!(rendered.contains("Final Score: 10/10"));
        assert!(rendered.contains("Accuracy: 100.0% | Best Streak: 10"));
        assert!(rendered.contains("Play Again"));
        assert!(rendered.contains("Main Menu"));
    }

    #[test]
    fn test_focused_button_is_highlighted() {
        let app = create_test_app(80, 24);
        let buffer = render(&app, 80, 24);
        let start = app.game.buttons()[0].bounds;
        let exit = app.game.buttons()[2].bounds;
        let primary = color(Palette::default().primary);

        let focused = &buffer[(start.x + 1, start.y + 1)];
        assert_eq!(focused.bg, primary);
        let unfocused = &buffer[(exit.x + 1, exit.y + 1)];
        assert_ne!(unfocused.bg, color(Palette::default().error));
    }

    #[test]
    fn test_art_backdrop_is_tiled() {
        let mut app = create_test_app(20, 6);
        app.backdrop = Backdrop::Art(vec!["~~~~".to_string()]);
        let buffer = render(&app, 20, 6);

        // rows 0 and 1 carry no menu text
        assert_eq!(buffer[(0, 0)].symbol(), "~");
        assert_eq!(buffer[(3, 1)].symbol(), "~");
        assert_eq!(buffer[(4, 0)].symbol(), " ");
    }

    #[test]
    fn test_small_areas_do_not_panic() {
        for (w, h) in [(10, 5), (1, 1), (200, 5), (20, 50)] {
            let mut app = create_test_app(w, h);
            render(&app, w, h);

            app.game.apply(ButtonAction::StartGame);
            render(&app, w, h);

            app.game.apply(ButtonAction::ChooseDifficulty(Difficulty::Hard));
            answer(&mut app, "nope");
            let buffer = render(&app, w, h);
            assert_eq!(*buffer.area(), Rect::new(0, 0, w, h));
        }
    }

    #[test]
    fn test_row_and_place_clip_to_area() {
        let area = Rect::new(2, 3, 10, 4);
        assert_eq!(row(area, 0), Some(Rect::new(2, 3, 10, 1)));
        assert_eq!(row(area, 4), None);

        let clipped = place(
            area,
            Bounds {
                x: 8,
                y: 2,
                width: 6,
                height: 3,
            },
        );
        assert_eq!(clipped, Rect::new(10, 5, 2, 2));
    }

    #[test]
    fn test_new_screen_fades_in_from_dark() {
        let mut app = create_test_app(40, 12);
        let palette = Palette::default();
        app.game.apply(ButtonAction::StartGame);

        let dark = render(&app, 40, 12);
        let dark_bg = color(palette.dark_bg);
        assert!(dark.content().iter().all(|c| c.bg == dark_bg));
        assert!(dark
            .content()
            .iter()
            .filter(|c| matches!(c.fg, Color::Rgb(..)))
            .all(|c| c.fg == dark_bg));
        // the screen itself switched at once
        assert!(rendered(&app, 40, 12).contains("Select Difficulty"));

        settle(&mut app);
        let lit = render(&app, 40, 12);
        assert!(lit
            .content()
            .iter()
            .any(|c| c.symbol() != " " && c.fg != dark_bg));
    }

    #[test]
    fn test_tiles_lift_after_correct_answer() {
        let mut app = create_test_app(80, 24);
        let dark_bg = color(Palette::default().dark_bg);
        start(&mut app, Difficulty::Easy);
        settle(&mut app);

        // particles only recolour glyphs, so tile backgrounds tell where tiles are
        let first_tile = |app: &App| {
            let count = app.game.session().unwrap().scrambled_word.len() as u16;
            (80 - (count * 6 - 1)) / 2 + 2
        };
        let x = first_tile(&app);
        let resting = render(&app, 80, 24);
        assert_ne!(resting[(x, 9)].bg, dark_bg);
        assert_eq!(resting[(x, 8)].bg, dark_bg);

        let word = app.game.session().unwrap().current_word.clone();
        answer(&mut app, &word);
        for _ in 0..12 {
            app.game.update(1.0 / 60.0);
        }
        let x = first_tile(&app);
        assert_ne!(render(&app, 80, 24)[(x, 8)].bg, dark_bg);

        for _ in 0..60 {
            app.game.update(1.0 / 60.0);
        }
        assert_eq!(render(&app, 80, 24)[(x, 8)].bg, dark_bg);
    }

    #[test]
    fn test_blend_moves_towards_target() {
        let target = Rgb(0, 0, 0);
        assert_eq!(blend(Color::Rgb(200, 100, 50), target, 0.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend(Color::Rgb(200, 100, 50), target, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(blend(Color::Rgb(200, 100, 50), target, 1.0), Color::Rgb(0, 0, 0));
        assert_eq!(blend(Color::Reset, target, 1.0), Color::Reset);
    }
}
