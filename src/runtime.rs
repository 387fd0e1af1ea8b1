use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::game::InputEvent;

/// Raw terminal event forwarded to the frame loop
#[derive(Clone, Debug)]
pub enum TermEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TermEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => Some(TermEvent::Key(key)),
                Ok(CtEvent::Mouse(mouse)) => Some(TermEvent::Mouse(mouse)),
                Ok(CtEvent::Resize(w, h)) => Some(TermEvent::Resize(w, h)),
                Ok(_) => None,
                Err(_) => break,
            };
            if let Some(ev) = forwarded {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms.max(1)))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TermEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TermEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TermEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Events collected during one tick and the time the tick took
#[derive(Debug)]
pub struct Frame {
    pub events: Vec<TermEvent>,
    pub dt: Duration,
}

/// Runner that advances the application one tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    last_frame: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
            last_frame: Instant::now(),
        }
    }

    /// Collects events until the next tick deadline, then reports them together
    /// with the time elapsed since the previous frame.
    pub fn next_frame(&mut self) -> Frame {
        let deadline = self.last_frame + self.ticker.interval();
        let mut events = Vec::new();

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.event_source.recv_timeout(deadline - now) {
                Ok(ev) => events.push(ev),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    // keep the cadence even when no more input can arrive
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    break;
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        Frame { events, dt }
    }
}

/// Ctrl+C, handled by the binary regardless of the current screen
pub fn is_interrupt(event: &TermEvent) -> bool {
    matches!(
        event,
        TermEvent::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) if modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Map a terminal event onto the game's input vocabulary
pub fn translate(event: &TermEvent) -> Option<InputEvent> {
    match event {
        TermEvent::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            match key.code {
                KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Char(c) => Some(InputEvent::Char(c)),
                KeyCode::Backspace => Some(InputEvent::Backspace),
                KeyCode::Enter => Some(InputEvent::Enter),
                KeyCode::Esc => Some(InputEvent::Escape),
                KeyCode::Up | KeyCode::BackTab => Some(InputEvent::Up),
                KeyCode::Down => Some(InputEvent::Down),
                KeyCode::Tab => Some(InputEvent::Tab),
                _ => None,
            }
        }
        TermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click {
                x: mouse.column,
                y: mouse.row,
            }),
            MouseEventKind::Moved => Some(InputEvent::PointerMove {
                x: mouse.column,
                y: mouse.row,
            }),
            _ => None,
        },
        TermEvent::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
    }
}
