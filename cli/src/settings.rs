use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://fakestoreapi.com".into(),
            log_filter: "info".into(),
        }
    }
}

/// Keys accepted in `catalog.toml`. Everything is optional.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    log: Option<String>,
}

impl Settings {
    /// Layers defaults, then the optional file contents, then the environment.
    pub fn resolve(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut settings = Settings::default();

        if let Some(raw) = file {
            let file_cfg: FileSettings = toml::from_str(raw).context("invalid settings file")?;
            if let Some(v) = file_cfg.base_url {
                settings.base_url = v;
            }
            if let Some(v) = file_cfg.log {
                settings.log_filter = v;
            }
        }

        if let Some(v) = env("CATALOG_BASE_URL") {
            settings.base_url = v;
        }
        if let Some(v) = env("CATALOG_LOG") {
            settings.log_filter = v;
        }

        Ok(settings)
    }
}

/// Reads `path` if it exists and resolves against the process environment.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => return Err(err).with_context(|| format!("failed to read {}", path.display())),
    };
    Settings::resolve(raw.as_deref(), |key| std::env::var(key).ok())
        .with_context(|| format!("failed to load {}", path.display()))
}
