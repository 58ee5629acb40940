use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ManifestProvider, ResolveFlags};
use crate::models::{Author, PackageManifest, PackageReference, Repository};

const BATCH_SIZE: usize = 64;

/// Resolves manifests from `package-lock.json` and the installed `node_modules/` tree.
pub struct NodeModulesProvider {
    root: PathBuf,
    progress: bool,
}

impl NodeModulesProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            progress: false,
        }
    }

    /// Show a progress bar on stderr while hydrating.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    async fn hydrate_all(
        &self,
        entries: &[(String, LockEntry)],
        flags: &ResolveFlags,
        pb: Option<&ProgressBar>,
    ) -> Result<Vec<PackageManifest>> {
        let mut manifests = Vec::with_capacity(entries.len());
        for batch in entries.chunks(BATCH_SIZE) {
            let futures: Vec<_> = batch
                .iter()
                .map(|(key, entry)| hydrate(&self.root, key, entry, flags))
                .collect();

            for manifest in join_all(futures).await {
                manifests.push(manifest?);
                if let Some(pb) = pb {
                    pb.inc(1);
                }
            }
        }
        Ok(manifests)
    }
}

impl ManifestProvider for NodeModulesProvider {
    async fn resolve(&self, flags: &ResolveFlags) -> Result<Vec<PackageManifest>> {
        let lock_path = self.root.join("package-lock.json");
        let content = tokio::fs::read_to_string(&lock_path)
            .await
            .with_context(|| format!("Failed to read {}", lock_path.display()))?;
        let lock: PackageLock = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", lock_path.display()))?;

        // v1 lockfiles only carry the nested `dependencies` tree
        let Some(packages) = lock.packages else {
            bail!(
                "{} has no `packages` map (lockfileVersion {}); lockfile v1 is not supported, run `npm install` with npm >= 7 to upgrade it",
                lock_path.display(),
                lock.lockfile_version
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            );
        };

        let mut entries = Vec::new();
        for (key, value) in packages {
            // Skip the root entry (empty string key)
            if key.is_empty() {
                continue;
            }
            let entry: LockEntry = serde_json::from_value(value)
                .with_context(|| format!("Invalid lock entry \"{}\" in {}", key, lock_path.display()))?;
            if entry.link {
                continue;
            }
            entries.push((key, entry));
        }

        let pb = if self.progress {
            let pb = ProgressBar::new(entries.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let manifests = self.hydrate_all(&entries, flags, pb.as_ref()).await;

        // Clear before returning so an error is not printed under a stale bar
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        manifests
    }
}


#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageLock {
    lockfile_version: Option<u64>,
    packages: Option<Map<String, Value>>,
}

/// One value of the lockfile `packages` map.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LockEntry {
    name: Option<String>,
    version: Option<String>,
    license: Option<LicenseField>,
    dev: bool,
    extraneous: bool,
    link: bool,
}

/// The subset of `package.json` used for license reports.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    license: Option<LicenseField>,
    licenses: Option<LicensesField>,
    repository: Option<RepositoryField>,
    homepage: Option<String>,
    author: Option<PersonField>,
    private: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseField {
    Id(String),
    Legacy {
        #[serde(rename = "type")]
        kind: Option<String>,
    },
}

/// Legacy `licenses`: a single id or object, or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicensesField {
    One(LicenseField),
    Many(Vec<LicenseField>),
}

impl LicenseField {
    fn into_id(self) -> Option<String> {
        match self {
            LicenseField::Id(id) => Some(id),
            LicenseField::Legacy { kind } => kind,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Url(String),
    Object { url: Option<String> },
}

impl From<RepositoryField> for Repository {
    fn from(field: RepositoryField) -> Self {
        match field {
            RepositoryField::Url(url) => Repository { url: Some(url) },
            RepositoryField::Object { url } => Repository { url },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersonField {
    Text(String),
    Object {
        name: Option<String>,
        url: Option<String>,
    },
}

impl From<PersonField> for Author {
    fn from(field: PersonField) -> Self {
        match field {
            PersonField::Text(text) => parse_person(&text),
            PersonField::Object { name, url } => Author { name, url },
        }
    }
}

/// Parse the `"Name <email> (url)"` shorthand; email and url are optional.
fn parse_person(text: &str) -> Author {
    let mut name_end = text.len();

    let url = match (text.find('('), text.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            name_end = open;
            non_empty(&text[open + 1..close])
        }
        _ => None,
    };

    if let Some(lt) = text.find('<') {
        name_end = name_end.min(lt);
    }

    Author {
        name: non_empty(&text[..name_end]),
        url,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Derive a package name from its lockfile key:
/// `node_modules/a/node_modules/@scope/b` → `@scope/b`.
fn name_from_key(key: &str) -> String {
    match key.rfind("node_modules/") {
        Some(i) => key[i + "node_modules/".len()..].to_string(),
        None => key.rsplit('/').next().unwrap_or(key).to_string(),
    }
}

async fn hydrate(
    root: &Path,
    key: &str,
    entry: &LockEntry,
    flags: &ResolveFlags,
) -> Result<PackageManifest> {
    let dir = root.join(key);
    let pkg_json_path = dir.join("package.json");

    let has_pkg_json = tokio::fs::try_exists(&pkg_json_path)
        .await
        .with_context(|| format!("Failed to access {}", pkg_json_path.display()))?;

    let pkg = if has_pkg_json {
        let content = tokio::fs::read_to_string(&pkg_json_path)
            .await
            .with_context(|| format!("Failed to read {}", pkg_json_path.display()))?;
        let pkg: PackageJson = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", pkg_json_path.display()))?;
        Some(pkg)
    } else {
        None
    };

    let manifest = match pkg {
        Some(pkg) => {
            let license = pkg
                .license
                .and_then(LicenseField::into_id)
                .or_else(|| pkg.licenses.and_then(legacy_licenses))
                .or_else(|| lock_license(entry));
            PackageManifest {
                name: pkg.name.or_else(|| entry.name.clone()),
                version: pkg.version.or_else(|| entry.version.clone()).unwrap_or_default(),
                license,
                repository: pkg.repository.map(Repository::from),
                homepage: pkg.homepage,
                author: pkg.author.map(Author::from),
                license_text: read_license_text(&dir).await,
                private: pkg.private,
                reference: None,
            }
        }
        None => PackageManifest {
            name: entry.name.clone().or_else(|| Some(name_from_key(key))),
            version: entry.version.clone().unwrap_or_default(),
            license: lock_license(entry),
            ..Default::default()
        },
    };

    let reference = reference(entry, manifest.name.as_deref(), flags);
    Ok(PackageManifest {
        reference,
        ..manifest
    })
}

fn lock_license(entry: &LockEntry) -> Option<String> {
    match &entry.license {
        Some(LicenseField::Id(id)) => Some(id.clone()),
        Some(LicenseField::Legacy { kind }) => kind.clone(),
        None => None,
    }
}

/// Join a legacy `licenses` value into `A OR B`.
fn legacy_licenses(licenses: LicensesField) -> Option<String> {
    let licenses = match licenses {
        LicensesField::One(license) => vec![license],
        LicensesField::Many(licenses) => licenses,
    };
    let ids: Vec<String> = licenses.into_iter().filter_map(LicenseField::into_id).collect();
    (!ids.is_empty()).then(|| ids.join(" OR "))
}

fn reference(entry: &LockEntry, name: Option<&str>, flags: &ResolveFlags) -> Option<PackageReference> {
    if entry.extraneous {
        return None;
    }
    let ignore = (flags.production && entry.dev) || name.is_some_and(|n| flags.is_ignored(n));
    Some(PackageReference { ignore })
}

/// Contents of the first `LICENSE*`/`LICENCE*` file in `dir`, by name.
async fn read_license_text(dir: &Path) -> Option<String> {
    let mut read_dir = tokio::fs::read_dir(dir).await.ok()?;
    let mut candidates = Vec::new();

    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let file_name = entry.file_name().to_string_lossy().to_string();
        let lower = file_name.to_lowercase();
        if lower.starts_with("license") || lower.starts_with("licence") {
            candidates.push(entry.path());
        }
    }

    candidates.sort();
    for path in candidates {
        if let Ok(text) = tokio::fs::read_to_string(&path).await {
            return Some(text);
        }
    }
    None
}
