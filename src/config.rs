//! Runtime configuration: base URL defaults and on-disk locations.

use std::path::PathBuf;

use directories::BaseDirs;

pub use crate::api::DEFAULT_BASE_URL;

pub const BASE_URL_ENV: &str = "XBE_BASE_URL";
pub const TOKEN_ENVS: [&str; 2] = ["XBE_TOKEN", "XBE_API_TOKEN"];

const APP_DIR: &str = "xbe";
const CONFIG_FILE: &str = "config.json";

/// `$XDG_CONFIG_HOME/xbe`, else `~/.config/xbe`, on every platform.
pub fn config_dir() -> Option<PathBuf> {
    let root = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => BaseDirs::new()?.home_dir().join(".config"),
    };
    Some(root.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Canonical form used as the token store key: trimmed, no trailing slash.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
