//! Sources of resolved package manifests.
//!
//! A provider returns the flat list of installed manifests, each carrying the
//! reference that decides whether it takes part in license aggregation.
//! Resolution errors are fatal and reach the caller unchanged.

use std::future::Future;

use anyhow::Result;

use crate::config::Config;
use crate::models::PackageManifest;

pub mod node;

/// Options forwarded from the command line and config to resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveFlags {
    /// Mark dev-only packages as ignored.
    pub production: bool,
    /// Package names to mark as ignored.
    pub ignore: Vec<String>,
}

impl ResolveFlags {
    pub fn new(production: bool, config: &Config) -> Self {
        Self {
            production: production || config.production,
            ignore: config.ignore.clone(),
        }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|i| i == name)
    }
}

/// Implementations may write `async fn resolve`.
pub trait ManifestProvider {
    fn resolve(&self, flags: &ResolveFlags) -> impl Future<Output = Result<Vec<PackageManifest>>>;
}
