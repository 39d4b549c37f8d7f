//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocket_cache::FileStore;
use rocket_cart::{CartError, CartStore, ChannelNotifier};
use rocket_data::HttpCatalog;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::RocketConfig;
use crate::output::Output;

/// Config file names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 3] = ["rocket.toml", ".rocket.toml", "rocket.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: RocketConfig,
    /// Where the configuration came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (RocketConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (RocketConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(RocketConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = RocketConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Build a cart store from the configuration.
    ///
    /// Failed operations arrive on the returned receiver.
    pub fn open_store(&self) -> Result<(CartStore, UnboundedReceiver<CartError>)> {
        let catalog = HttpCatalog::new(&self.config.api.base_url, self.config.api.timeouts())
            .context("Failed to create catalog client")?;

        let path = self.resolve_path(&self.config.storage.path);
        let storage = FileStore::open(&path)
            .with_context(|| format!("Failed to open cart store: {}", path.display()))?;

        self.output.debug(&format!(
            "catalog {} | store {} | key {}",
            catalog.base_url(),
            path.display(),
            self.config.storage.key
        ));

        let (notifier, notices) = ChannelNotifier::new();
        let store = CartStore::load(
            Arc::new(catalog),
            Arc::new(storage),
            Arc::new(notifier),
            self.config.storage.key.clone(),
        );
        Ok((store, notices))
    }
}
