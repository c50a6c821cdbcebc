//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shop_commerce::catalog::HttpCatalogApi;
use shop_commerce::repository::{CartRepository, CatalogRepository};
use shop_commerce::store::Store;

use crate::config::{ShopConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShopConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

/// Repositories shared by the screen controllers of one command.
pub struct Services {
    pub catalog: CatalogRepository,
    pub cart: Arc<CartRepository>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (ShopConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(ShopConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ShopConfig::load(config_path.to_str()?) {
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

    /// Open the local store, creating its directory on first use.
    pub fn store(&self) -> Result<Store> {
        let path = self.resolve_path(&self.config.store.resolved_path()?);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        self.output.debug(&format!("Store: {}", path.display()));
        Store::open(&path).with_context(|| format!("Failed to open store: {}", path.display()))
    }

    /// Wire the catalog client, the store and both repositories.
    pub async fn services(&self) -> Result<Services> {
        let api = HttpCatalogApi::new(self.config.api.base_url.clone(), self.config.api.timeout())
            .context("Failed to create catalog client")?;
        self.output.debug(&format!("Catalog: {}", self.config.api.base_url));

        let store = self.store()?;
        let catalog = CatalogRepository::new(Arc::new(api), store.clone())
            .with_page_size(self.config.catalog.page_size);

        let cart = Arc::new(CartRepository::new(store));
        if let Err(e) = cart.init().await {
            tracing::warn!(error = %e, "could not read cart item count");
        }

        Ok(Services { catalog, cart })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
