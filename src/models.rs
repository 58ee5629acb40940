use serde::{Deserialize, Serialize};

/// License key used for packages whose manifest has no `license` field.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// A single resolved package, as handed over by a [`ManifestProvider`](crate::provider::ManifestProvider).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: String,
    pub license: Option<String>,
    pub repository: Option<Repository>,
    pub homepage: Option<String>,
    pub author: Option<Author>,
    pub license_text: Option<String>,
    pub private: Option<bool>,
    /// Resolver bookkeeping; never part of a `package.json`.
    #[serde(skip)]
    pub reference: Option<PackageReference>,
}

impl PackageManifest {
    pub fn is_private(&self) -> bool {
        self.private.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// The resolver's record for a manifest. Manifests without one, or with
/// `ignore` set, are left out of license aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageReference {
    pub ignore: bool,
}

/// Per-package view stored in a license bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageLicenseInfo {
    pub name: String,
    pub version: String,
    pub url: Option<String>,
    pub vendor_url: Option<String>,
    pub vendor_name: Option<String>,
}

impl PackageLicenseInfo {
    /// `name@version`, unique within a bucket.
    pub fn key(&self) -> String {
        package_key(&self.name, &self.version)
    }
}

pub fn package_key(name: &str, version: &str) -> String {
    format!("{}@{}", name, version)
}

/// Flattened record written by `generate-disclaimer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclaimerEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}
