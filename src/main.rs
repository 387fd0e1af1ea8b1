use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io::{self, stdin, Stdout},
    path::PathBuf,
};
use tracing::{info, Level};

use unscramble::{
    app_dirs::AppDirs,
    backdrop::Backdrop,
    buttons::ButtonAction,
    config::{Config, ConfigStore, FileConfigStore, GameConfig},
    game::{Flow, Game, InputEvent},
    logging,
    runtime::{is_interrupt, translate, CrosstermEventSource, FixedTicker, Runner},
    words::Difficulty,
    App,
};

/// unscramble words against the clock of your own streak
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal word scramble game: pick a difficulty, unscramble ten words, \
                  and keep your streak alive."
)]
pub struct Cli {
    /// skip the menus and start straight away at this difficulty
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// seed for word order and scrambling (random when omitted)
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// play each pool in its listed order instead of shuffling it
    #[clap(long)]
    in_order: bool,

    /// text file drawn behind every screen
    #[clap(short = 'b', long)]
    background: Option<PathBuf>,

    /// milliseconds per frame
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// where to write the log (defaults to the XDG state directory)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// most verbose level written to the log
    #[clap(long, default_value_t = Level::INFO)]
    log_level: Level,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line values over the stored config
    fn merge(&self, mut config: Config) -> Config {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.in_order {
            config.shuffle_words = false;
        }
        if let Some(background) = &self.background {
            config.background = Some(background.clone());
        }
        if let Some(tick_rate_ms) = self.tick_rate_ms {
            config.tick_rate_ms = tick_rate_ms;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    match cli.log_file.clone().or_else(AppDirs::log_path) {
        Some(path) => {
            if let Err(err) = logging::init(&path, cli.log_level) {
                eprintln!("logging disabled: {err:#}");
            }
        }
        None => eprintln!("logging disabled: no log directory available"),
    }

    let store = FileConfigStore::new();
    let config = cli.merge(store.load());
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("saving config to {}", store.path().display()))?;
        info!(path = %store.path().display(), "config saved");
    }

    let game_config = GameConfig::standard()
        .context("loading word pools")?
        .with_seed(config.seed)
        .with_shuffle(config.shuffle_words);
    let backdrop = Backdrop::load(config.background.as_deref(), game_config.palette.dark_bg);

    let mut game = Game::new(game_config);
    if let Some(difficulty) = cli.difficulty {
        game.apply(ButtonAction::StartGame);
        game.apply(ButtonAction::ChooseDifficulty(difficulty));
    }
    let mut app = App::new(game, backdrop);

    let mut terminal = setup_terminal()?;
    let result = start_tui(&mut terminal, &mut app, config.tick_rate_ms);
    restore_terminal(&mut terminal)?;

    result
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;

    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(err).context("entering alternate screen");
    }
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("creating terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate_ms: u64,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    app.game.resize(size.width, size.height);

    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::from_millis(tick_rate_ms),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let frame = runner.next_frame();
        // ctrl+c to quit from any screen
        if frame.events.iter().any(is_interrupt) {
            info!("interrupted");
            break;
        }

        let inputs: Vec<InputEvent> = frame.events.iter().filter_map(translate).collect();
        if app.tick(inputs, frame.dt.as_secs_f64()) == Flow::Exit {
            break;
        }
    }

    Ok(())
}
