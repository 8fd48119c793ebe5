//! Configuration loading for Brandkit.
//!
//! Reads `config.toml` from the data directory (`~/.brandkit/` by default)
//! into [`AppConfig`], falling back to defaults when the file is missing or
//! malformed. API keys never live in the file; they come from the
//! environment.

use std::path::{Path, PathBuf};

use brandkit_types::config::AppConfig;
use secrecy::SecretString;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BRANDKIT_DATA_DIR";

/// Resolve the data directory: `BRANDKIT_DATA_DIR`, else `~/.brandkit`.
pub fn resolve_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".brandkit")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: logs a warning, defaults.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// API keys for every hosted service, read from the environment.
///
/// Does not derive Debug. A missing key leaves that service unconfigured.
#[derive(Default)]
pub struct ApiKeys {
    /// Completion, image generation and transcription.
    pub openai: Option<SecretString>,
    pub unsplash: Option<SecretString>,
    pub elevenlabs: Option<SecretString>,
    pub cloudinary_key: Option<SecretString>,
    pub cloudinary_secret: Option<SecretString>,
}

impl ApiKeys {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any lookup; blank values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(SecretString::from)
        };
        Self {
            openai: get("OPENAI_API_KEY"),
            unsplash: get("UNSPLASH_ACCESS_KEY"),
            elevenlabs: get("ELEVENLABS_API_KEY"),
            cloudinary_key: get("CLOUDINARY_API_KEY"),
            cloudinary_secret: get("CLOUDINARY_API_SECRET"),
        }
    }

    /// Names of the variables that are set, for status output.
    pub fn configured(&self) -> Vec<&'static str> {
        [
            ("OPENAI_API_KEY", self.openai.is_some()),
            ("UNSPLASH_ACCESS_KEY", self.unsplash.is_some()),
            ("ELEVENLABS_API_KEY", self.elevenlabs.is_some()),
            ("CLOUDINARY_API_KEY", self.cloudinary_key.is_some()),
            ("CLOUDINARY_API_SECRET", self.cloudinary_secret.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}
