use anyhow::Result;

use crate::models::{DisclaimerEntry, PackageManifest};

/// One entry per non-private manifest, in provider order. No sorting, no
/// reference filtering.
pub fn entries(manifests: &[PackageManifest]) -> Vec<DisclaimerEntry> {
    manifests
        .iter()
        .filter(|m| !m.is_private())
        .map(|m| DisclaimerEntry {
            name: m.name.clone(),
            version: m.version.clone(),
            license_text: m.license_text.as_deref().map(|t| t.trim().to_string()),
            license: m.license.clone(),
            homepage: m.homepage.clone(),
        })
        .collect()
}

/// The disclaimer as a single compact JSON array.
pub fn render(manifests: &[PackageManifest]) -> Result<String> {
    Ok(serde_json::to_string(&entries(manifests))?)
}
