// Library surface for headless/integration tests and reuse.
// The binary only owns terminal setup and the frame loop.
pub mod app;
pub mod app_dirs;
pub mod backdrop;
pub mod buttons;
pub mod config;
pub mod game;
pub mod logging;
pub mod palette;
pub mod particles;
pub mod runtime;
pub mod scrambler;
pub mod session;
pub mod stats;
pub mod ui;
pub mod words;

pub use app::App;
