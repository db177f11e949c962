use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ghosttype::{
    app::{App, KeyOutcome},
    config::{Config, ConfigStore, FileConfigStore},
    controller::SessionController,
    logging,
    profile::ProfileTable,
    runtime::{AppEvent, Clock, CrosstermEventSource, FixedTicker, MonotonicClock, Runner},
    words::WordList,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info, warn};

/// typing test that races you against a ghost replaying a real typist's keystroke latencies
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// latency profile the ghost replays
    #[clap(long)]
    profile: Option<String>,

    /// number of words in the sentence (1-100)
    #[clap(short = 'w', long = "words")]
    word_count: Option<usize>,

    /// newline separated word list to draw sentences from
    #[clap(long = "word-list")]
    word_list: Option<PathBuf>,

    /// json file of latency profiles keyed by id
    #[clap(long)]
    profiles: Option<PathBuf>,

    /// config file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// file to write logs to
    #[clap(long = "log-file")]
    log_file: Option<PathBuf>,

    /// print the available profile ids and exit
    #[clap(long)]
    list_profiles: bool,
}

impl Cli {
    /// Flags win over the config file
    fn merge(&self, mut config: Config) -> Config {
        if let Some(profile) = &self.profile {
            config.profile = profile.clone();
        }
        if let Some(count) = self.word_count {
            config.word_count = count;
        }
        if let Some(path) = &self.word_list {
            config.words_path = Some(path.clone());
        }
        if let Some(path) = &self.profiles {
            config.profiles_path = Some(path.clone());
        }
        config
    }
}

fn load_inputs(config: &Config) -> ghosttype::Result<(WordList, ProfileTable)> {
    let words = match &config.words_path {
        Some(path) => WordList::load(path)?,
        None => WordList::embedded()?,
    };
    let profiles = match &config.profiles_path {
        Some(path) => ProfileTable::load(path)?,
        None => ProfileTable::builtin()?,
    };
    Ok((words, profiles))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };

    let log_path = match logging::init(cli.log_file.as_deref()) {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("logging disabled: {err}");
            None
        }
    };

    let config = cli.merge(store.load());
    let (words, profiles) = match load_inputs(&config) {
        Ok(inputs) => inputs,
        Err(err) => {
            error!(%err, "failed to load inputs");
            Cli::command().error(ErrorKind::Io, err).exit();
        }
    };

    if cli.list_profiles {
        for id in profiles.ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let controller = match SessionController::new(
        words,
        profiles,
        &config.profile,
        config.word_count,
        StdRng::from_entropy(),
    ) {
        Ok(controller) => controller,
        Err(err) => Cli::command().error(ErrorKind::InvalidValue, err).exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    info!(
        profile = %config.profile,
        words = config.word_count,
        log = ?log_path,
        "starting"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);
    let result = start_tui(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms.max(1)),
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(%err, "terminal loop failed");
    }
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));
    let clock = MonotonicClock::new();

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let until_due = app
            .next_due()
            .map(|due| due.saturating_sub(clock.now()));

        let redraw = match runner.step(until_due) {
            AppEvent::Tick => app.on_tick(clock.now()) > 0,
            AppEvent::Resize => true,
            AppEvent::Closed => {
                warn!("terminal event source closed");
                break;
            }
            AppEvent::Key(key) => {
                let now = clock.now();
                if app.on_key(key, now) == KeyOutcome::Quit {
                    break;
                }
                app.on_tick(now);
                true
            }
        };

        if redraw {
            terminal.draw(|f| f.render_widget(&*app, f.area()))?;
        }
    }

    Ok(())
}
