//! Catalog Browser - terminal front end

use std::io::Write;

use anyhow::Result;
use catalog_browser::config::BrowserConfig;
use catalog_browser::view::{parse_command, Command, View, HELP};
use catalog_browser::{AppState, CatalogLoader, HttpCatalogSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = BrowserConfig::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(url = %config.api_url, "catalog browser starting");
    let loader = CatalogLoader::new(HttpCatalogSource::new(config.api_url.clone())?);
    let mut state = AppState::mount();
    let fetch = loader.fetch_once(state.liveness());
    tokio::pin!(fetch);
    let mut fetch_pending = true;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render(&state)?;

    loop {
        tokio::select! {
            outcome = &mut fetch, if fetch_pending => {
                fetch_pending = false;
                if let Some(outcome) = outcome {
                    state.load_settled(outcome);
                }
                render(&state)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => say(HELP)?,
                    Ok(Command::Show) => render(&state)?,
                    Ok(Command::Intent(intent)) => match state.apply(intent) {
                        Ok(()) => render(&state)?,
                        Err(e) => say(&e.to_string())?,
                    },
                    Err(e) => say(&e.to_string())?,
                }
            }
        }
    }

    state.unmount();
    tracing::info!(cart = state.cart().size(), "catalog browser stopped");
    Ok(())
}

fn render(state: &AppState) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", View(state))?;
    out.flush()
}

fn say(message: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{message}")?;
    out.flush()
}
