//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use catalog_core::CatalogSnapshot;

use crate::config::{CatalogConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file values with CLI overrides applied).
    pub config: CatalogConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Discovered config files that failed to load, nearest first.
    pub skipped_configs: Vec<SkippedConfig>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// walking up from the working directory, or defaults.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut skipped_configs = Vec::new();
        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CatalogConfig::load(&path)?, Some(path))
            }
            None => {
                let discovered = find_config(&cwd);
                for skipped in &discovered.skipped {
                    output.warn(&format!(
                        "Ignoring {}: {}",
                        skipped.path.display(),
                        skipped.reason
                    ));
                }
                skipped_configs = discovered.skipped;
                match discovered.found {
                    Some((config, path)) => (config, Some(path)),
                    None => (CatalogConfig::default(), None),
                }
            }
        };

        Ok(Self {
            config,
            config_path,
            skipped_configs,
            output,
            cwd,
        })
    }

    /// Directory that relative `data.dir` values are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolved catalog data directory.
    pub fn data_dir(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.data.dir)
    }

    /// Load the catalog snapshot from the data directory.
    pub fn load_snapshot(&self) -> Result<CatalogSnapshot> {
        let dir = self.data_dir();
        self.output
            .debug(&format!("Loading catalog from {}", dir.display()));
        CatalogSnapshot::load_dir(&dir)
            .with_context(|| format!("Failed to load catalog from {}", dir.display()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

/// A config file found during discovery that could not be loaded.
#[derive(Debug)]
pub struct SkippedConfig {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of [`find_config`].
#[derive(Debug, Default)]
pub struct Discovered {
    pub found: Option<(CatalogConfig, PathBuf)>,
    pub skipped: Vec<SkippedConfig>,
}

/// Find the nearest loadable config file in `start` or its ancestors.
///
/// Files that exist but fail to load are passed over and reported in
/// [`Discovered::skipped`].
pub fn find_config(start: &Path) -> Discovered {
    let mut discovered = Discovered::default();
    for dir in start.ancestors() {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            match CatalogConfig::load(&path) {
                Ok(config) => {
                    discovered.found = Some((config, path));
                    return discovered;
                }
                Err(e) => discovered.skipped.push(SkippedConfig {
                    path,
                    reason: format!("{:#}", e),
                }),
            }
        }
    }
    discovered
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join("catalog.toml"),
            "[data]\ndir = \"fixtures\"\n",
        )
        .unwrap();

        let (config, path) = find_config(&nested).found.unwrap();
        assert_eq!(config.data.dir, "fixtures");
        assert_eq!(path, root.path().join("catalog.toml"));
    }

    #[test]
    fn test_nearest_config_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("catalog.toml"), "[data]\ndir = \"outer\"\n").unwrap();
        std::fs::write(nested.join(".catalog.toml"), "[data]\ndir = \"inner\"\n").unwrap();

        let (config, _) = find_config(&nested).found.unwrap();
        assert_eq!(config.data.dir, "inner");
    }

    #[test]
    fn test_malformed_config_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("catalog.toml"), "[data]\ndir = \"outer\"\n").unwrap();
        std::fs::write(nested.join("catalog.toml"), "[data\ndir = ").unwrap();

        let discovered = find_config(&nested);
        assert_eq!(discovered.skipped.len(), 1);
        assert_eq!(discovered.skipped[0].path, nested.join("catalog.toml"));
        assert!(discovered.skipped[0].reason.contains("Failed to parse TOML config"));
        assert_eq!(discovered.found.unwrap().0.data.dir, "outer");
    }

    #[test]
    fn test_data_dir_relative_to_config() {
        let root = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CatalogConfig::default(),
            config_path: Some(root.path().join("catalog.toml")),
            skipped_configs: Vec::new(),
            output: Output::new(false, false),
            cwd: PathBuf::from("/somewhere/else"),
        };
        assert_eq!(ctx.data_dir(), root.path().join("data"));
    }
}
