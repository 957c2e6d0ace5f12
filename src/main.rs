use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;
use wordmatch::{
    app::{App, AppState},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    loader,
    pair::Side,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
};

/// timed vocabulary matching in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pair source terms with their translations against the clock. Word lists are .txt (whitespace separated) or .csv (comma separated) files with one pair per line."
)]
pub struct Cli {
    /// word list to practice (.txt or .csv)
    file: PathBuf,

    /// number of seconds per session
    #[clap(short = 's', long)]
    number_of_secs: Option<u32>,

    /// how long a wrong pair stays highlighted, in milliseconds
    #[clap(long)]
    feedback_ms: Option<u64>,

    /// path of the preferences file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// store the given options as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command-line values override the stored preferences
    fn apply_to(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.number_of_secs {
            cfg.number_of_secs = secs;
        }
        if let Some(ms) = self.feedback_ms {
            cfg.feedback_ms = ms;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let list = match loader::load_file(&cli.file) {
        Ok(list) => list,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                format!("{}: {e}", cli.file.display()),
            )
            .exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(e) = init_logging() {
        eprintln!("wordmatch: logging disabled: {e}");
    }

    let store = cli.config_store();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
    }

    tracing::info!(
        file = %cli.file.display(),
        pairs = list.pairs.len(),
        dropped = list.dropped,
        "word list ready"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(list.pairs, &config);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

/// Logs go to a file; the terminal belongs to the UI
fn init_logging() -> io::Result<()> {
    let path = AppDirs::log_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no log directory"))?;
    let file = open_log_file(&path)?;

    let filter =
        EnvFilter::try_from_env("WORDMATCH_LOG").unwrap_or_else(|_| EnvFilter::new("wordmatch=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn start_tui<B: Backend, E: GameEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            GameEvent::Tick => app.on_tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }

    // ctrl+c to quit
    if key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
    {
        return Flow::Quit;
    }

    match app.state {
        AppState::Playing => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_focus(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_focus(1),
            KeyCode::Left | KeyCode::Char('h') => app.focus_column(Side::Source),
            KeyCode::Right | KeyCode::Char('l') => app.focus_column(Side::Target),
            KeyCode::Tab => app.switch_column(),
            KeyCode::Enter | KeyCode::Char(' ') => app.select_focused(),
            _ => {}
        },
        AppState::Results => {
            if key.code == KeyCode::Char('r') {
                app.restart();
            }
        }
        AppState::Waiting => {}
    }

    Flow::Continue
}
