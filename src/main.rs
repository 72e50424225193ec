use std::io;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use recipe_book::app::App;
use recipe_book::config::Config;
use recipe_book::error::Result;
use recipe_book::models::join_ingredients;
use recipe_book::server;
use recipe_book::services::RecipeClient;
use recipe_book::tui::{draw, handle_key_event};

/// `RUST_LOG` wins when set; `default_level` applies otherwise.
fn log_filter(rust_log: Option<&str>, default_level: tracing::Level) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(default_level.into()))
}

fn init_tracing(default_level: tracing::Level) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), default_level))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    // Run the API server
    if matches!(command, Some("serve") | Some("--serve")) {
        init_tracing(tracing::Level::INFO);
        let config = Config::load()?;
        return server::start_server(&config).await;
    }

    // Only show warnings and errors in client mode
    init_tracing(tracing::Level::WARN);
    let config = Config::load()?;
    let client = RecipeClient::new(&config.api_url)?;

    // Headless listing
    if matches!(command, Some("list") | Some("--list")) {
        let recipes = client.list_recipes().await?;
        if recipes.is_empty() {
            println!("No recipes yet.");
        }
        for recipe in recipes {
            println!(
                "#{} {} [{}]",
                recipe.id,
                recipe.title,
                join_ingredients(&recipe.ingredients)
            );
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The initial load runs in the background while the first frame shows it
    let mut app = App::new(client);

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Check for a finished list reload
        app.poll_reload_result();

        terminal.draw(|frame| draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(key, &app.mode, app.show_help) {
                        // Show the saving indicator while the request runs
                        if app.begin_action(&action) {
                            terminal.draw(|frame| draw(frame, app))?;
                        }
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn rust_log_overrides_default_level() {
        let filter = log_filter(Some("debug"), tracing::Level::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn default_level_applies_without_rust_log() {
        let filter = log_filter(None, tracing::Level::WARN);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let blank = log_filter(Some("  "), tracing::Level::INFO);
        assert_eq!(blank.max_level_hint(), Some(LevelFilter::INFO));
    }
}
