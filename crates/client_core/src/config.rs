use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "adlib.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            request_timeout_seconds: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    fn set_request_timeout(&mut self, seconds: u64) {
        // 0 disables the timeout, same as leaving it unset.
        self.request_timeout_seconds = (seconds > 0).then_some(seconds);
    }

    /// Layers file values over the defaults, then environment values over both.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(raw) = file {
            match toml::from_str::<FileSettings>(raw) {
                Ok(file_cfg) => {
                    if let Some(v) = file_cfg.server_url {
                        settings.server_url = v;
                    }
                    if let Some(v) = file_cfg.request_timeout_seconds {
                        settings.set_request_timeout(v);
                    }
                }
                Err(err) => warn!("ignoring malformed {CONFIG_FILE_NAME}: {err}"),
            }
        }

        if let Some(v) = env("ADLIB_SERVER_URL") {
            settings.server_url = v;
        }
        if let Some(v) = env("APP__SERVER_URL") {
            settings.server_url = v;
        }

        if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
            match v.parse::<u64>() {
                Ok(parsed) => settings.set_request_timeout(parsed),
                Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECONDS"),
            }
        }

        settings
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_seconds: Option<u64>,
}

/// `adlib.toml` in the working directory wins over the per-user config dir.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("adlib").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

pub fn load_settings(explicit_path: Option<&Path>) -> Settings {
    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);
    let raw = path.as_ref().and_then(|path| match fs::read_to_string(path) {
        Ok(raw) => {
            debug!(path = %path.display(), "loaded settings file");
            Some(raw)
        }
        Err(err) => {
            warn!(path = %path.display(), "could not read settings file: {err}");
            None
        }
    });

    Settings::from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}
