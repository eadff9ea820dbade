//! Configuration loader and path helpers.
//!
//! Uses Figment to merge defaults + `config.toml` + `config.<env>.toml` +
//! `APP_*` env vars (`APP_SEARCH__PAGE_SIZE=50`). `Settings` is the typed
//! projection every binary works from.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Merge `config.toml`, `config.<env>.toml` and `APP_*` variables found
    /// under `dir`, on top of the built-in defaults.
    pub fn load_from(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Typed view of the whole configuration, validated.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub reindex: ReindexSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    pub index_dir: String,
    pub store_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { index_dir: "../dev_data/indexes/tantivy".to_string(), store_path: "../dev_data/catalog.sqlite".to_string() }
    }
}

/// Page-size budgets of the two resolution entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub page_size: usize,
    pub narrow_page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self { Self { page_size: 150, narrow_page_size: 10 } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexSettings {
    pub interval_secs: u64,
    pub batch_size: usize,
    pub writer_heap_bytes: usize,
}

impl Default for ReindexSettings {
    fn default() -> Self { Self { interval_secs: 43_200, batch_size: 1_000, writer_heap_bytes: 50_000_000 } }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.search.page_size == 0 || self.search.narrow_page_size == 0 {
            return Err(Error::InvalidConfig("search page sizes must be positive".to_string()));
        }
        if self.search.narrow_page_size > self.search.page_size {
            return Err(Error::InvalidConfig(format!(
                "search.narrow_page_size ({}) exceeds search.page_size ({})",
                self.search.narrow_page_size, self.search.page_size
            )));
        }
        if self.reindex.batch_size == 0 {
            return Err(Error::InvalidConfig("reindex.batch_size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
