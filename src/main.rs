//! `pkg-licenses` — group installed package licenses and export them.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and merge it into [`provider::ResolveFlags`].
//! 3. Resolve installed manifests once ([`provider`]).
//! 4. For `list`: sort, filter and group by license ([`license`]), then render a
//!    tree or a table ([`report`]).
//! 5. For `generate-disclaimer`: render the raw manifest list as a JSON array.

mod cli;
mod commands;
mod config;
mod license;
mod models;
mod provider;
mod report;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use commands::OutputOptions;
use config::load_config;
use provider::node::NodeModulesProvider;
use provider::ResolveFlags;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let path = cli
        .project_path()
        .canonicalize()
        .unwrap_or_else(|_| cli.project_path().to_path_buf());

    let config = load_config(&path, cli.config.as_deref())?;
    let flags = ResolveFlags::new(cli.production, &config);

    let provider = NodeModulesProvider::new(&path).with_progress(!cli.quiet);
    let command = cli.command.clone().unwrap_or_default();
    let output = OutputOptions {
        json: cli.json,
        quiet: cli.quiet,
    };

    let rendered = commands::run(&command, &provider, &flags, output).await?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }

    Ok(())
}
