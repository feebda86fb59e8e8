use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tangocho::app::App;
use tangocho::config::{Config, data_dir};
use tangocho::event::{AppEvent, EventHandler};
use tangocho::handler::handle_key;
use tangocho::store::{RecordStore, snapshot};
use tangocho::ui::render::render;
use tangocho::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "tangocho", version, about = "Terminal vocabulary notebook with genres and self-quizzes")]
struct Cli {
    #[arg(long, help = "Path to the SQLite database")]
    db: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, value_name = "PATH", conflicts_with = "import", help = "Write a JSON snapshot of the notebook and exit")]
    export: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Append the genres and words of a JSON snapshot and exit")]
    import: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if !Config::exists() {
        // First run: write the defaults out so there is a file to edit.
        let _ = config.save();
    }
    if let Some(db) = &cli.db {
        config.database_path = db.to_string_lossy().to_string();
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    config.validate(&Theme::available_themes());

    init_logging(&config)?;
    tracing::info!(db = %config.database_path, theme = %config.theme, "starting tangocho");

    let store = RecordStore::open(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path))?;

    if let Some(path) = &cli.export {
        return export(store, path);
    }
    if let Some(path) = &cli.import {
        return import(store, path);
    }

    let mut app = App::new(config, store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    app.shutdown()?;
    tracing::info!("shut down");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Log to a file under the data directory; the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    let dir = data_dir();
    fs::create_dir_all(&dir)?;
    let log_path = dir.join("tangocho.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("tangocho={}", config.log_level))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn export(store: RecordStore, path: &Path) -> Result<()> {
    let snap = store.export_snapshot()?;
    snapshot::write(path, &snap)?;
    let words: usize = snap.genres.iter().map(|g| g.words.len()).sum();
    println!(
        "Exported {} genres and {} words to {}",
        snap.genres.len(),
        words,
        path.display()
    );
    store.close()?;
    Ok(())
}

fn import(store: RecordStore, path: &Path) -> Result<()> {
    let snap = snapshot::read(path)?;
    store.import_snapshot(&snap)?;
    println!("Imported {} genres from {}", snap.genres.len(), path.display());
    store.close()?;
    Ok(())
}
