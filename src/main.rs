// Operadoras CLI entry point
//
// Resolves the command to a route and prints the rendered view on stdout.
// Logs go to stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use operadoras::api::HttpClient;
use operadoras::config::Config;
use operadoras::logging;
use operadoras::router::Router;
use operadoras::views;

#[tokio::main]
async fn main() -> Result<()> {
    let command = Cli::parse().command.unwrap_or_default();

    // Config commands run before logging and never hit the network
    if let Commands::Config { show, reset, path } = command {
        return cli::handle_config(show, reset, path);
    }

    let config = Config::from_env()?;
    Config::ensure_config_exists();

    // Keep the guard alive so file logs are flushed on exit
    let _log_guard = logging::init(&config.logging);

    tracing::debug!("Using API at {}", config.api_url);

    let router = Router::default();
    let Some(route) = command.route(&router) else {
        match &command {
            Commands::Open { path } => anyhow::bail!("Página não encontrada: {}", path),
            _ => anyhow::bail!("Página não encontrada"),
        }
    };

    let client = HttpClient::new(&config.api_url, config.timeout())
        .with_context(|| format!("Invalid api_url {:?}", config.api_url))?;

    let output = views::render(&route, &client, &command.list_options(&config)).await?;
    print!("{}", output);
    Ok(())
}
