// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::App;
use data::Board;
use settings::{Overrides, Settings};
use source::{DataSource, Fetch, PollingSource};

#[derive(Parser, Debug)]
#[command(name = "bordertraffic")]
#[command(about = "Terminal dashboard for Niagara border crossing wait times")]
struct Args {
    /// Config file (defaults to ./bordertraffic.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL or directory the data file is published under
    #[arg(short, long)]
    base_path: Option<String>,

    /// Name of the data file under the base path
    #[arg(short, long)]
    data_file: Option<String>,

    /// Refresh interval in seconds (0 fetches once)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Table layout
    #[arg(long, value_parser = ["by-vehicle", "by-bridge"])]
    layout: Option<String>,

    /// What to show when a fetch fails
    #[arg(long, value_parser = ["panel", "retain"])]
    on_error: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Fetch once, export the tables to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        base_path: args.base_path,
        data_file: args.data_file,
        refresh_secs: args.refresh,
        layout: args.layout,
        on_error: args.on_error,
        log_file: args.log_file.map(|p| p.display().to_string()),
    };
    let settings = Settings::load(args.config.as_deref(), overrides)?;

    init_logging(&settings)?;

    let location = settings.location()?;
    let fetcher: Arc<dyn Fetch> = Arc::from(location.fetcher(settings.request_timeout())?);
    info!(%location, refresh_secs = settings.refresh_secs, "Starting");

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&rt, fetcher.as_ref(), &settings, &export_path);
    }

    let source = {
        let _guard = rt.enter();
        PollingSource::spawn(fetcher, settings.refresh_interval())
    };

    run_tui(Box::new(source), &settings)
}

/// Install a file-backed subscriber when `log_file` is set.
///
/// The terminal belongs to the TUI, so nothing is ever logged to stdout or
/// stderr.
fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, settings: &Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, settings.layout, settings.on_error);
    app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse, ui::TAB_ROW),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // The poller pushes updates on its own schedule; pick up whatever arrived.
        app.reload_data();
    }

    info!("Exiting");
    Ok(())
}

/// Fetch the document once and write its tables to a JSON file
fn export_to_file(
    rt: &tokio::runtime::Runtime,
    fetcher: &dyn Fetch,
    settings: &Settings,
    export_path: &Path,
) -> Result<()> {
    let document = rt
        .block_on(fetcher.fetch())
        .with_context(|| format!("fetching {}", fetcher.describe()))?;

    let board = Board::from_document(&document, settings.layout);
    app::export_board(&board, export_path)?;

    println!("Exported wait times to: {}", export_path.display());
    Ok(())
}
