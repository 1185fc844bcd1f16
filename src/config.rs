use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{FilterConfig, SortKey};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_chef_profiles_table")]
    pub chef_profiles_table: String,
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
}

fn default_chef_profiles_table() -> String { "chef_profiles".to_string() }
fn default_profiles_table() -> String { "profiles".to_string() }
fn default_storage_bucket() -> String { "avatars".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
        }
    }
}

fn default_cache_ttl() -> u64 { 60 }
fn default_cache_entries() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_radius_options")]
    pub radius_options_km: Vec<f64>,
    #[serde(default)]
    pub default_sort: SortKey,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            radius_options_km: default_radius_options(),
            default_sort: SortKey::default(),
        }
    }
}

impl DiscoverySettings {
    pub fn default_filter(&self) -> FilterConfig {
        FilterConfig::within(self.default_radius_km)
    }

    /// Configured presets followed by the unbounded "All" choice
    pub fn radius_presets(&self) -> Vec<FilterConfig> {
        self.radius_options_km
            .iter()
            .copied()
            .map(FilterConfig::within)
            .chain(std::iter::once(FilterConfig::unbounded()))
            .collect()
    }
}

fn default_radius_km() -> f64 { 10.0 }
fn default_radius_options() -> Vec<f64> { vec![5.0, 10.0, 20.0] }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with KITCHEN_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., KITCHEN__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("KITCHEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_supabase_env(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KITCHEN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Let the conventional Supabase variables override the file values
fn apply_supabase_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Ok(api_key) = env::var("SUPABASE_KEY") {
        builder = builder.set_override("supabase.api_key", api_key)?;
    }

    builder.build()
}
