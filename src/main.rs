mod app;
mod calendar;
mod clock;
mod config;
mod event;
mod gift;
mod reveal;
mod ui;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use clock::{Clock, FixedClock, SystemClock};
use config::Config;
use gift::{GeminiGifts, GiftReply};

#[derive(Parser, Debug)]
#[command(name = "advent")]
#[command(about = "Advent calendar TUI with AI-generated daily gifts")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value_t = default_config_path())]
    config: String,

    /// Override the calendar start date (day 1), YYYY-MM-DD
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Pin "today" to a fixed date instead of the system clock
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Theme preset: dark or light
    #[arg(long)]
    theme: Option<String>,
}

fn default_config_path() -> String {
    dirs::config_dir()
        .map(|dir| dir.join("advent-tui/config.toml").display().to_string())
        .unwrap_or_else(|| "~/.config/advent-tui/config.toml".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config, then apply CLI overrides
    let mut config = Config::load(&cli.config)?;
    if let Some(start_date) = cli.start_date {
        config.start_date = start_date;
    }
    if let Some(theme) = cli.theme {
        config.appearance.theme = theme;
    }
    tracing::info!("Calendar starts {}", config.start_date);

    let clock: Arc<dyn Clock> = match cli.today {
        Some(date) => Arc::new(FixedClock(date)),
        None => Arc::new(SystemClock),
    };
    let gifts = Arc::new(GeminiGifts::from_env(config.gift.clone()));
    let (reply_tx, mut reply_rx) = mpsc::channel(32);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, clock, gifts, reply_tx);

    // Run main loop
    let result = run_app(&mut terminal, &mut app, &mut reply_rx).await;

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

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    reply_rx: &mut mpsc::Receiver<GiftReply>,
) -> Result<()> {
    loop {
        // Apply gift replies that arrived since the last frame. Stale ones
        // (dismissed or superseded panels) are discarded inside apply_gift.
        while let Ok(reply) = reply_rx.try_recv() {
            app.apply_gift(reply);
        }
        app.tick();

        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            return Ok(());
        }

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let panel_open = app.panel().is_some();
                if let Some(app_event) = event::from_key(key, app.selected_day(), panel_open) {
                    app.handle(app_event);
                }
            }
        }
    }
}
