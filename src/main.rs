mod aws;
mod cli;
mod regions;
#[cfg(test)]
mod tests;
mod types;
mod ui;
mod utils;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::IsTerminal;
use tokio::sync::mpsc;
use tracing::info;

use cli::Cli;
use ui::{App, AppEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        anyhow::bail!("ecs-console is interactive and needs a terminal on stdout");
    }

    // The alternate screen owns stdout, so logs go to a file
    let filter = if cli.verbose { "debug" } else { "info" };
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/ecs-console.log")
        .unwrap_or_else(|_| {
            eprintln!("Warning: Could not open /tmp/ecs-console.log for logging");
            std::fs::File::create("/dev/null").expect("Failed to open /dev/null")
        });

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    let region_index = regions::region_index(&cli.region)
        .with_context(|| format!("unknown region code '{}'", cli.region))?;

    // Credential resolution happens once; every region rebind derives its
    // clients from this shared config.
    let mut config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(profile) = &cli.profile {
        config_loader = config_loader.profile_name(profile);
    }
    let shared_config = config_loader.load().await;
    info!("starting in region {}", cli.region);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(100);

    // Keyboard event loop
    let key_tx = event_tx.clone();
    tokio::spawn(async move {
        ui::events::event_loop(key_tx).await;
    });

    let mut app = App::new(shared_config, &regions::AWS_REGIONS[region_index]);
    tokio::spawn(aws::perform(app.reload_clusters(), event_tx.clone()));

    // Main event loop with render throttling
    let mut render_interval = tokio::time::interval(std::time::Duration::from_millis(16));
    render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while !app.should_quit {
        tokio::select! {
            _ = render_interval.tick() => {
                ui::renderer::render(&mut terminal, &mut app)?;
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                match event {
                    AppEvent::Key(key) => {
                        if let Some(request) = ui::events::handle_key_event(&mut app, key) {
                            tokio::spawn(aws::perform(request, event_tx.clone()));
                        }
                        // Render immediately after keyboard input for responsiveness
                        ui::renderer::render(&mut terminal, &mut app)?;
                    }
                    completed => app.apply(completed),
                }
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
