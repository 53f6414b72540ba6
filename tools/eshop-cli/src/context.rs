//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use eshop_core::{ShopConfig, Storefront, Surface};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: ShopConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// Without an explicit path, the nearest `eshop.toml`, `.eshop.toml` or
    /// `eshop.json` in the working directory or its parents is used.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, Path::new(path))),
            None => ShopConfig::discover(&cwd),
        };

        let mut config = match &config_path {
            Some(path) => ShopConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => ShopConfig::default(),
        };

        // Storage paths are relative to the config file, or to the working directory.
        let base = config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(cwd.as_path())
            .to_path_buf();
        config.storage.dir = resolve(&base, &config.storage.dir);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Build a storefront that mounts pages on `surface`.
    pub fn storefront(&self, surface: Arc<dyn Surface>) -> Result<Storefront> {
        Storefront::from_config(&self.config, surface).context("Failed to open the storefront")
    }

    /// Where `config init` writes.
    pub fn default_config_path(&self) -> PathBuf {
        self.cwd.join("eshop.toml")
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let base = Path::new("/srv/shop");
        assert_eq!(resolve(base, Path::new(".eshop")), PathBuf::from("/srv/shop/.eshop"));
        assert_eq!(resolve(base, Path::new("/var/eshop")), PathBuf::from("/var/eshop"));
    }

    #[test]
    fn test_load_explicit_config_resolves_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[storage]\ndir = \"state\"\n").unwrap();

        let ctx = Context::load(path.to_str(), Output::new(false, true)).unwrap();
        assert_eq!(ctx.config.storage.dir, dir.path().join("state"));
        assert_eq!(ctx.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Context::load(path.to_str(), Output::new(false, true)).is_err());
    }
}
