//! SiteUp TUI - terminal dashboard for the SiteUp uptime monitor
//!
//! Polls the monitoring service for site and agent status and lets you add,
//! delete and re-check sites from the terminal.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use siteup_tui::app::{App, AppConfig, DEFAULT_API_URL};
use siteup_tui::event::EventHandler;
use siteup_tui::state::{SelectionPolicy, StalePolicy};

#[derive(Debug, Parser)]
#[command(name = "siteup-tui", version, about)]
struct Cli {
    /// Base URL of the monitoring service API
    #[arg(long, env = "SITEUP_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds between background refreshes
    #[arg(long, env = "SITEUP_REFRESH_SECS", default_value_t = 30)]
    refresh_secs: u64,

    /// Per-request timeout in seconds (no timeout if unset)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Event polling interval in milliseconds
    #[arg(long, default_value_t = 250)]
    tick_rate_ms: u64,

    /// File to write logs to
    #[arg(long, default_value = "siteup-tui.log")]
    log_file: PathBuf,

    /// Keep the same site selected across refreshes, by id
    #[arg(long)]
    follow_selection: bool,

    /// Ignore refresh results that finish after a newer one
    #[arg(long)]
    discard_stale: bool,
}

impl Cli {
    fn config(&self) -> AppConfig {
        AppConfig {
            api_url: self.api_url.clone(),
            refresh_interval: Duration::from_secs(self.refresh_secs.max(1)),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
            tick_rate: Duration::from_millis(self.tick_rate_ms),
            selection_policy: if self.follow_selection {
                SelectionPolicy::FollowId
            } else {
                SelectionPolicy::Snapshot
            },
            stale_results: if self.discard_stale {
                StalePolicy::DiscardOutOfOrder
            } else {
                StalePolicy::ApplyLatestCompleted
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.config();
    let tick_rate = config.tick_rate;
    let mut app = App::new(config)?;

    setup_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut events = EventHandler::new(tick_rate);

    let result = app.run(&mut terminal, &mut events).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file
    let file = File::create(&cli.log_file)
        .wrap_err_with(|| format!("cannot open log file {}", cli.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("siteup_tui=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn setup_terminal() -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}
