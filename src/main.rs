//! Signup form - terminal user registration form
//!
//! A Ratatui front end for the registration form: renders the form state
//! and forwards key events to the submission controller.

mod app;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use signup_form::config::AppConfig;
use signup_form::form::SubmissionController;
use signup_form::transport::HttpTransport;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signup_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::load()?;
    let transport = HttpTransport::from_config(&config)?;
    tracing::info!(endpoint = %transport.endpoint(), "starting signup form");

    let controller = SubmissionController::registration()?;
    let mut app = App::new(controller, Arc::new(transport));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply finished submissions before drawing
        app.poll_events();
        app.on_tick();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll faster while a submission animates
        let poll_duration = if app.controller.is_submitting() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }

        // Let the submission task make progress
        tokio::task::yield_now().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
