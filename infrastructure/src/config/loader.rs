//! Configuration file loader with multi-source merging.

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Configuration loader that handles file discovery and merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `WAYPOST_` environment variables (e.g. `WAYPOST_STORE__SEED_DEMO_DATA`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./waypost.toml` or `./.waypost.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/waypost/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("WAYPOST_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config).
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/waypost/config.toml if set,
    /// otherwise falls back to ~/.config/waypost/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("waypost").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists).
    pub fn project_config_path() -> Option<PathBuf> {
        for filename in &["waypost.toml", ".waypost.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                return Some(path);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.assistant.max_history_turns, 20);
        assert!(config.store.seed_demo_data);
    }

    #[test]
    fn global_config_path_returns_some() {
        // Should return a path (even if the file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("waypost"));
    }
}
