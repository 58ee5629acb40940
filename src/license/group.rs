use std::collections::HashMap;

use crate::models::{PackageLicenseInfo, PackageManifest, UNKNOWN_LICENSE};

/// Packages sharing one license key, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseGroup {
    license: String,
    packages: Vec<PackageLicenseInfo>,
    index: HashMap<String, usize>,
}

impl LicenseGroup {
    fn new(license: String) -> Self {
        Self {
            license,
            packages: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn packages(&self) -> &[PackageLicenseInfo] {
        &self.packages
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&PackageLicenseInfo> {
        self.index.get(key).map(|&i| &self.packages[i])
    }

    /// Last write wins; an overwritten entry keeps its original position.
    fn insert(&mut self, info: PackageLicenseInfo) {
        match self.index.get(&info.key()) {
            Some(&i) => self.packages[i] = info,
            None => {
                self.index.insert(info.key(), self.packages.len());
                self.packages.push(info);
            }
        }
    }
}

/// License buckets in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseGroups {
    groups: Vec<LicenseGroup>,
    index: HashMap<String, usize>,
}

impl LicenseGroups {
    pub fn iter(&self) -> impl Iterator<Item = &LicenseGroup> {
        self.groups.iter()
    }

    #[cfg(test)]
    pub fn get(&self, license: &str) -> Option<&LicenseGroup> {
        self.index.get(license).map(|&i| &self.groups[i])
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of packages across every bucket.
    pub fn package_count(&self) -> usize {
        self.groups.iter().map(LicenseGroup::len).sum()
    }

    fn bucket(&mut self, license: &str) -> &mut LicenseGroup {
        let i = match self.index.get(license) {
            Some(&i) => i,
            None => {
                self.groups.push(LicenseGroup::new(license.to_string()));
                self.index.insert(license.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[i]
    }
}

/// Bucket already-collected manifests by license key.
pub fn group(manifests: &[PackageManifest]) -> LicenseGroups {
    let mut groups = LicenseGroups::default();

    for manifest in manifests {
        groups.bucket(license_key(manifest)).insert(license_info(manifest));
    }

    groups
}

pub fn license_key(manifest: &PackageManifest) -> &str {
    manifest.license.as_deref().unwrap_or(UNKNOWN_LICENSE)
}

fn license_info(manifest: &PackageManifest) -> PackageLicenseInfo {
    PackageLicenseInfo {
        name: manifest.name.clone().unwrap_or_default(),
        version: manifest.version.clone(),
        url: project_url(manifest),
        vendor_url: vendor_url(manifest),
        vendor_name: vendor_name(manifest),
    }
}

/// Repository URL, else homepage.
fn project_url(manifest: &PackageManifest) -> Option<String> {
    manifest
        .repository
        .as_ref()
        .and_then(|r| r.url.clone())
        .or_else(|| manifest.homepage.clone())
}

/// Homepage, else the author's URL.
fn vendor_url(manifest: &PackageManifest) -> Option<String> {
    manifest
        .homepage
        .clone()
        .or_else(|| manifest.author.as_ref().and_then(|a| a.url.clone()))
}

fn vendor_name(manifest: &PackageManifest) -> Option<String> {
    manifest.author.as_ref().and_then(|a| a.name.clone())
}
