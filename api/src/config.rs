//! Server settings, read once from the environment at startup.

use std::path::{Path, PathBuf};

pub const APP_TITLE: &str = "Javelink Lite";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_VIDEO_MB: u64 = 100;

/// Extensions accepted for uploaded clips (lowercase, with the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".webm"];

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_video_mb: u64,
    /// Built web bundle to serve at `/`. Nothing is served there when unset.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_video_mb: DEFAULT_MAX_VIDEO_MB,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unparsable values fall
    /// back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("JAVELINK_HOST")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or("JAVELINK_PORT", lookup("JAVELINK_PORT"), defaults.port);
        let max_video_mb = parse_or(
            "JAVELINK_MAX_VIDEO_MB",
            lookup("JAVELINK_MAX_VIDEO_MB"),
            defaults.max_video_mb,
        );
        let static_dir = lookup("JAVELINK_STATIC_DIR")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            max_video_mb,
            static_dir,
        }
    }

    pub fn max_video_bytes(&self) -> u64 {
        self.max_video_mb.saturating_mul(1024 * 1024)
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }
}

fn parse_or<T: std::str::FromStr + Copy + std::fmt::Display>(
    key: &str,
    raw: Option<String>,
    fallback: T,
) -> T {
    match raw {
        None => fallback,
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("ignoring {key}={value:?}; using {fallback}");
                fallback
            }
        },
    }
}

/// Whether `filename` ends with one of [`ALLOWED_EXTENSIONS`] (case-insensitive).
pub fn extension_allowed(filename: &str) -> bool {
    let Some(dot) = filename.rfind('.') else {
        return false;
    };
    let ext = filename[dot..].to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}
