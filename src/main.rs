use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, WriteLogger};

use connect_four::config::AppConfig;
use connect_four::game::{GameState, COLS};
use connect_four::replay::{render_report, validate};
use connect_four::storage::GameStore;
use connect_four::ui::App;

/// Two-player Connect Four with saved games and move history.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four and audit move history")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default)
    Play,
    /// Replay a list of columns (1-based) and print every step
    Replay {
        /// Columns in play order, e.g. `4 4 3 5`
        #[arg(required = true)]
        columns: Vec<usize>,

        /// Print the step records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the history of the saved game
    History {
        /// Print the step records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a config file with every default value
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    init_logging(&config)?;
    if !cli.config.exists() {
        warn!("config file '{}' not found, using defaults", cli.config.display());
    }

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&config),
        Command::Replay { columns, json } => {
            let moves = parse_columns(&columns)?;
            print_history(&moves, json)
        }
        Command::History { json } => {
            let store = GameStore::new(&config.storage);
            let state = store
                .load()
                .with_context(|| format!("loading saved game from {}", store.path().display()))?;
            match state {
                Some(state) => print_history(state.moves(), json),
                None => bail!("no saved game at {}", store.path().display()),
            }
        }
        Command::InitConfig => {
            print!("{}", AppConfig::default_toml());
            Ok(())
        }
    }
}

/// Log to a file so output never lands on the game screen. The file is
/// appended to, so short CLI runs keep the last game session's log.
fn init_logging(config: &AppConfig) -> Result<()> {
    let level = config.logging.level_filter()?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .with_context(|| format!("opening log file {}", config.logging.file.display()))?;
    WriteLogger::init(level, log_config, file).context("installing file logger")?;
    Ok(())
}

/// Convert 1-based columns from the command line into board columns.
fn parse_columns(columns: &[usize]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|&col| {
            if (1..=COLS).contains(&col) {
                Ok(col - 1)
            } else {
                bail!("column {col} is out of range (expected 1..={COLS})")
            }
        })
        .collect()
}

fn print_history(moves: &[usize], json: bool) -> Result<()> {
    let output = validate(moves);
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_report(&output, moves));
    }
    Ok(())
}

fn play(config: &AppConfig) -> Result<()> {
    let store = GameStore::new(&config.storage);
    let state = match store.load() {
        Ok(Some(state)) => state,
        Ok(None) => GameState::initial(),
        Err(e) => {
            warn!("ignoring unreadable saved game: {e}");
            GameState::initial()
        }
    };
    info!("starting game with {} moves played", state.moves().len());

    let mut app = App::new(state, store, config.storage.autosave, config.ui.clone());
    run_terminal(&mut app).context("running terminal UI")
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
