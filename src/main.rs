//! fxtiers - View currency exchange rates grouped into tiers
//!
//! A terminal UI application that shows the selected base currency's rates
//! against a fixed set of currencies, split into three tables by value.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use fxtiers::app::{build_rate_cache, load_rates, App, FAILURE_MESSAGE};
use fxtiers::cli::{Cli, StartupConfig};
use fxtiers::data::CurrencyRegistry;
use fxtiers::report::render_plain;
use fxtiers::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Initializes env_logger; `RUST_LOG` overrides the default level
fn init_logging(print_mode: bool) {
    // The TUI owns the terminal, so stay quiet there unless asked
    let default_filter = if print_mode { "warn" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Loads once, prints the tables and exits
async fn run_print(config: &StartupConfig, registry: &CurrencyRegistry) -> ExitCode {
    let Some(cache) = build_rate_cache(config) else {
        log::error!("No cache directory available; pass --cache-dir");
        eprintln!("{}", FAILURE_MESSAGE);
        return ExitCode::FAILURE;
    };

    match load_rates(&cache, &config.base, registry).await {
        Ok(loaded) => {
            let Some(base) = registry.get(&loaded.base) else {
                eprintln!("{}", FAILURE_MESSAGE);
                return ExitCode::FAILURE;
            };
            print!(
                "{}",
                render_plain(&loaded.classification, base, loaded.date.as_deref())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Loading rates for {} failed: {}", config.base, e);
            eprintln!("{}", FAILURE_MESSAGE);
            ExitCode::FAILURE
        }
    }
}

/// Interactive terminal UI
async fn run_tui(config: &StartupConfig, registry: CurrencyRegistry) -> io::Result<()> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, registry);

    loop {
        if app.reload_requested {
            // Draw the loading indicator before suspending on the fetch
            app.begin_load();
            terminal.draw(|f| ui::render(f, &app))?;
            app.load().await;
        }

        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let registry = CurrencyRegistry::default();

    let config = match StartupConfig::from_cli(&cli, &registry) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    init_logging(config.print);

    if config.print {
        return run_print(&config, &registry).await;
    }

    match run_tui(&config, registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
