//! Host configuration: `config.toml` in the data dir, overridden by CLI
//! flags and environment variables. Every section is optional and falls
//! back to defaults, so a missing or partial file never blocks launch.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::backend::BackendConfig;

const DEFAULT_PORT: u16 = 4600;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── SplashConfig ────────────────────────────────────────────────────────────

/// Splash presentation (`[splash]` in config.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Minimum splash display time in milliseconds. Routing never happens
    /// earlier than this, even when the local uid lookup is instant.
    pub duration_ms: u64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self { duration_ms: 5000 }
    }
}

// ─── IntroConfig ─────────────────────────────────────────────────────────────

/// Intro carousel (`[intro]` in config.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Delay between revealed words in the typing animation, milliseconds.
    pub typing_interval_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: 300,
        }
    }
}

// ─── AudioConfig ─────────────────────────────────────────────────────────────

/// Audio asset names (`[audio]` in config.toml). The shell resolves these
/// to bundled files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub background_track: String,
    pub click_sound: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            background_track: "gamebackground1".to_string(),
            click_sound: "buttonclick".to_string(),
        }
    }
}

// ─── AppConfig ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON-RPC WebSocket port.
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Data directory for the SQLite database and logs.
    pub data_dir: PathBuf,
    pub backend: BackendConfig,
    pub splash: SplashConfig,
    pub intro: IntroConfig,
    pub audio: AudioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: default_bind_address(),
            data_dir: default_data_dir(),
            backend: BackendConfig::default(),
            splash: SplashConfig::default(),
            intro: IntroConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".zynkod"),
        None => PathBuf::from(".zynkod"),
    }
}

impl AppConfig {
    /// Build the effective config: file (if any) under `data_dir`, then
    /// CLI/env overrides on top.
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let mut config = Self::load_file(&data_dir);
        config.data_dir = data_dir;
        if let Some(port) = port {
            config.port = port;
        }
        if let Some(bind) = bind_address {
            config.bind_address = bind;
        }
        config
    }

    fn load_file(data_dir: &Path) -> Self {
        let path = data_dir.join("config.toml");
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "config.toml unreadable, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn splash_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.splash.duration_ms)
    }

    pub fn typing_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.intro.typing_interval_ms)
    }
}
