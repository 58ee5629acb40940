use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pkg-licenses",
    about = "List installed package licenses and generate legal disclaimers",
    version
)]
pub struct Cli {
    /// Project path containing package-lock.json
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Project path, usable after a subcommand; takes precedence over PATH
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Emit the license table as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Leave out dev-only packages
    #[arg(long, global = true)]
    pub production: bool,

    /// Config file [default: ./.pkg-licenses/config.toml, fallback ~/.config/pkg-licenses/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress and status output on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The project directory from `--cwd` or the positional path.
    pub fn project_path(&self) -> &Path {
        self.cwd.as_deref().unwrap_or(&self.path)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List licenses grouped by license identifier (default)
    List(ListArgs),
    /// Deprecated alias of `list`
    #[command(hide = true)]
    Ls(ListArgs),
    /// Print a JSON array of license details for every non-private package
    GenerateDisclaimer,
}

impl Default for Command {
    fn default() -> Self {
        Command::List(ListArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ListArgs {
    /// Render a table instead of a tree
    #[arg(long)]
    pub table: bool,
}
