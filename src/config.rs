use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.pkg-licenses/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Leave dev-only packages out of `list`, as `--production` does.
    pub production: bool,
    /// Package names always left out of `list`.
    pub ignore: Vec<String>,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.pkg-licenses/config.toml`
/// 3. `~/.config/pkg-licenses/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".pkg-licenses").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("pkg-licenses").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_override_path() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "production = true\nignore = [\"internal-ui\"]\n").unwrap();

        let cfg = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();
        assert!(cfg.production);
        assert_eq!(cfg.ignore, vec!["internal-ui".to_string()]);
    }

    #[test]
    fn test_project_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".pkg-licenses")).unwrap();
        std::fs::write(
            dir.path().join(".pkg-licenses").join("config.toml"),
            "ignore = [\"a\", \"b\"]\n",
        )
        .unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert!(!cfg.production);
        assert_eq!(cfg.ignore.len(), 2);
    }

    #[test]
    fn test_empty_file_is_default() {
        let f = NamedTempFile::new().unwrap();
        let cfg = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "productoin = true\n").unwrap();
        assert!(load_config(Path::new("/nonexistent"), Some(f.path())).is_err());
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let err = load_config(Path::new("."), Some(Path::new("/nonexistent/config.toml")))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
