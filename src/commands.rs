use anyhow::Result;
use colored::Colorize;

use crate::cli::{Command, ListArgs};
use crate::license::{collect, group};
use crate::provider::{ManifestProvider, ResolveFlags};
use crate::report;

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// Resolve manifests once, then render the requested report to a string.
pub async fn run<P: ManifestProvider>(
    command: &Command,
    provider: &P,
    flags: &ResolveFlags,
    output: OutputOptions,
) -> Result<String> {
    match command {
        Command::List(args) => list(provider, flags, args, output).await,
        Command::Ls(args) => {
            eprintln!(
                "{} `ls` is deprecated and will be removed, use `list` instead",
                "warning:".yellow().bold()
            );
            list(provider, flags, args, output).await
        }
        Command::GenerateDisclaimer => generate_disclaimer(provider, flags).await,
    }
}

async fn list<P: ManifestProvider>(
    provider: &P,
    flags: &ResolveFlags,
    args: &ListArgs,
    output: OutputOptions,
) -> Result<String> {
    let manifests = collect(provider.resolve(flags).await?);
    let groups = group(&manifests);

    if !output.quiet {
        if groups.is_empty() {
            eprintln!("  {} no packages to report", "→".cyan());
        } else {
            eprintln!(
                "  {} {} packages under {} licenses",
                "→".cyan(),
                groups.package_count(),
                groups.iter().count()
            );
        }
    }

    if output.json {
        report::table::render_json(&groups)
    } else if args.table {
        Ok(report::table::render_text(&groups))
    } else {
        Ok(report::tree::render(&groups))
    }
}

async fn generate_disclaimer<P: ManifestProvider>(provider: &P, flags: &ResolveFlags) -> Result<String> {
    let manifests = provider.resolve(flags).await?;
    report::disclaimer::render(&manifests)
}
