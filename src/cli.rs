// CLI module - command-line argument parsing and handlers
//
// Every view subcommand ends up as a router `Route`:
// - list:  /                      (operator list, current or legacy loader)
// - show:  /operadoras/:cnpj      (operator detail)
// - stats: /estatisticas          (global statistics)
// - open:  any path, resolved through the router
//
// `config` manages the config file and never touches the network.

use std::collections::HashMap;
use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use operadoras::config::{Config, VERSION};
use operadoras::router::{Route, Router};
use operadoras::views::ListOptions;

/// Browse health plan operators (operadoras) and their expenses
#[derive(Parser, Debug)]
#[command(name = "operadoras")]
#[command(version = VERSION)]
#[command(about = "Browse health plan operators and their expenses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List operators
    List {
        /// Search by name or CNPJ
        #[arg(long, default_value = "")]
        q: String,

        /// Include operators without expense records
        #[arg(long)]
        include_sem_despesas: bool,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Check expenses per row instead of filtering on the server
        #[arg(long)]
        legacy: bool,
    },

    /// Show one operator with its expenses
    Show {
        /// CNPJ, with or without punctuation
        cnpj: String,
    },

    /// Show global expense statistics
    Stats,

    /// Render the view for a path (e.g. /operadoras/11222333000181)
    Open {
        path: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Open {
            path: "/".to_string(),
        }
    }
}

impl Commands {
    /// Route for a view command, `None` for `config` or an unknown path
    pub fn route(&self, router: &Router) -> Option<Route> {
        match self {
            Commands::List { .. } => Some(Route::OperadorasList),
            Commands::Show { cnpj } => {
                // Built by name: a formatted CNPJ contains '/' and would not
                // survive path matching
                let params = HashMap::from([("cnpj".to_string(), cnpj.clone())]);
                Route::by_name("operadora-detalhe", &params)
            }
            Commands::Stats => Some(Route::Estatisticas),
            Commands::Open { path } => router.resolve(path),
            Commands::Config { .. } => None,
        }
    }

    /// List inputs: command flags over config defaults
    pub fn list_options(&self, config: &Config) -> ListOptions {
        let mut options = ListOptions {
            include_sem_despesas: config.include_sem_despesas,
            page_size: config.page_size,
            legacy_page_size: config.legacy_page_size,
            ..ListOptions::default()
        };

        if let Commands::List {
            q,
            include_sem_despesas,
            pages,
            legacy,
        } = self
        {
            options.query = q.clone();
            options.include_sem_despesas |= *include_sem_despesas;
            options.pages = (*pages).max(1);
            options.legacy = *legacy;
        }
        options
    }
}

/// Handle `config`
pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: operadoras config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
