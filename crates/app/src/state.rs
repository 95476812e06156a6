//! Application state management

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use studiospace_core::{CatalogFile, Error, Result, StudioRegistry};

const CATALOG_FILE: &str = "studios.toml";

/// Main application state: the loaded studio catalog
pub struct AppState {
    catalog_path: PathBuf,
    registry: StudioRegistry,
}

impl AppState {
    /// Load state from an explicit catalog path, or the default config location
    pub fn load(catalog_path: Option<PathBuf>) -> Result<Self> {
        let catalog_path = match catalog_path {
            Some(path) => path,
            None => Self::default_catalog_path()?,
        };

        let catalog = CatalogFile::load(&catalog_path)?;
        let registry = StudioRegistry::from_catalog(catalog);
        tracing::debug!(path = %catalog_path.display(), studios = registry.len(), "Studio registry ready");

        Ok(Self {
            catalog_path,
            registry,
        })
    }

    /// `<config dir>/studios.toml` for the current platform
    pub fn default_catalog_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "onyx", "studiospace").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        Ok(dirs.config_dir().join(CATALOG_FILE))
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn registry(&self) -> &StudioRegistry {
        &self.registry
    }
}
