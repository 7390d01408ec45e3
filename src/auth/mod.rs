/*!
Token resolution and the file-backed token store.

Resolution order for a base URL:
  1. explicit hint (the `--token` flag)
  2. `XBE_TOKEN`, then `XBE_API_TOKEN`
  3. the stored token for the normalized base URL in `<config dir>/config.json`

Nothing found is reported as `AuthError::NotFound`, which callers branch on:
read commands proceed unauthenticated, write commands refuse to run.
*/

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{self, TOKEN_ENVS};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no API token found")]
    NotFound,

    #[error("Authentication required. Run 'xbe auth login' first.")]
    LoginRequired,

    #[error("could not determine config directory (set XDG_CONFIG_HOME or HOME)")]
    NoConfigDir,

    #[error("failed to access token store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("token store {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where a resolved token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Env(&'static str),
    Store(PathBuf),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "--token flag"),
            TokenSource::Env(name) => write!(f, "{name} environment variable"),
            TokenSource::Store(path) => write!(f, "token store ({})", path.display()),
        }
    }
}

/* ---- Token Store ---- */

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    tokens: BTreeMap<String, String>,
}

/// `{"tokens": {"<base url>": "<token>"}}` on disk.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self, AuthError> {
        config::config_file()
            .map(Self::at)
            .ok_or(AuthError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile, AuthError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(source) => {
                return Err(AuthError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoreFile::default());
        }
        serde_json::from_slice(&raw).map_err(|source| AuthError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, file: &StoreFile) -> Result<(), AuthError> {
        let io_err = |source| AuthError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_vec_pretty(file).map_err(|source| AuthError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(io_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }
        Ok(())
    }

    pub fn get(&self, base_url: &str) -> Result<Option<String>, AuthError> {
        let key = config::normalize_base_url(base_url);
        Ok(self
            .load()?
            .tokens
            .remove(&key)
            .filter(|t| !t.trim().is_empty()))
    }

    pub fn set(&self, base_url: &str, token: &str) -> Result<(), AuthError> {
        let mut file = self.load()?;
        file.tokens
            .insert(config::normalize_base_url(base_url), token.trim().to_string());
        self.save(&file)
    }

    /// Returns whether a token was present.
    pub fn remove(&self, base_url: &str) -> Result<bool, AuthError> {
        let mut file = self.load()?;
        let removed = file
            .tokens
            .remove(&config::normalize_base_url(base_url))
            .is_some();
        if removed {
            self.save(&file)?;
        }
        Ok(removed)
    }
}

/* ---- Resolution ---- */

pub fn resolve_token(base_url: &str, hint: &str) -> Result<(String, TokenSource), AuthError> {
    let store = TokenStore::default_location().ok();
    resolve_with(base_url, hint, |name| std::env::var(name).ok(), store.as_ref())
}

/// Resolution with injectable environment and store.
pub fn resolve_with(
    base_url: &str,
    hint: &str,
    env: impl Fn(&str) -> Option<String>,
    store: Option<&TokenStore>,
) -> Result<(String, TokenSource), AuthError> {
    if !hint.trim().is_empty() {
        debug!(source = "flag", "resolved API token");
        return Ok((hint.trim().to_string(), TokenSource::Flag));
    }
    for name in TOKEN_ENVS {
        if let Some(token) = env(name).filter(|t| !t.trim().is_empty()) {
            debug!(source = name, "resolved API token");
            return Ok((token.trim().to_string(), TokenSource::Env(name)));
        }
    }
    if let Some(store) = store
        && let Some(token) = store.get(base_url)?
    {
        debug!(source = %store.path().display(), "resolved API token");
        return Ok((token, TokenSource::Store(store.path().to_path_buf())));
    }
    debug!(base_url, "no API token found");
    Err(AuthError::NotFound)
}

/// Masks all but the last four characters.
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::at(dir.path().join("xbe").join("config.json"))
    }

    #[test]
    fn hint_wins_over_everything() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("https://app.x-b-e.com", "stored").unwrap();
        let env = |_: &str| Some("from-env".to_string());
        let (token, source) =
            resolve_with("https://app.x-b-e.com", " flag ", env, Some(&store)).unwrap();
        assert_eq!(token, "flag");
        assert_eq!(source, TokenSource::Flag);
    }

    #[test]
    fn env_precedes_store_in_declared_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("https://app.x-b-e.com", "stored").unwrap();
        let env = |name: &str| match name {
            "XBE_API_TOKEN" => Some("api".to_string()),
            "XBE_TOKEN" => Some("  ".to_string()),
            _ => None,
        };
        let (token, source) =
            resolve_with("https://app.x-b-e.com", "", env, Some(&store)).unwrap();
        assert_eq!(token, "api");
        assert_eq!(source, TokenSource::Env("XBE_API_TOKEN"));
    }

    #[test]
    fn store_lookup_normalizes_base_url() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("http://localhost:3000/", "abc").unwrap();
        let (token, source) =
            resolve_with("http://localhost:3000", "", no_env, Some(&store)).unwrap();
        assert_eq!(token, "abc");
        assert!(matches!(source, TokenSource::Store(_)));
    }

    #[test]
    fn missing_everything_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let err = resolve_with("https://app.x-b-e.com", "", no_env, Some(&store)).unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
        let err = resolve_with("https://app.x-b-e.com", "", no_env, None).unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }

    #[test]
    fn corrupt_store_is_not_confused_with_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        let err = resolve_with("https://app.x-b-e.com", "", no_env, Some(&store)).unwrap_err();
        assert!(matches!(err, AuthError::Parse { .. }));
    }

    #[test]
    fn remove_reports_presence() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("https://a.example", "1").unwrap();
        store.set("https://b.example", "2").unwrap();
        assert!(store.remove("https://a.example/").unwrap());
        assert!(!store.remove("https://a.example").unwrap());
        assert_eq!(store.get("https://b.example").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn masks_tokens() {
        assert_eq!(mask_token("abcdefgh"), "****efgh");
        assert_eq!(mask_token("abc"), "***");
    }
}
