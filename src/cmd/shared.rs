/*!
shared.rs - shared helpers for the resource and auth commands.

Focus:
  - GlobalArgs: flags accepted by every command (derive, attached to the root)
  - ValidationError: user input problems detected before any request
  - TokenPolicy: how a command obtains its API token
  - api_client / block_on: client construction + Ctrl-C aware runtime
  - given_values: flags explicitly set on the command line
  - print_json: machine output
*/

use std::collections::BTreeMap;
use std::future::Future;

use anyhow::{Context, Result, anyhow};
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Args};
use serde::Serialize;
use tracing::debug;

use crate::api::Client;
use crate::auth::{self, AuthError, TokenSource};
use crate::config::{self, BASE_URL_ENV, DEFAULT_BASE_URL};

/* ---- Errors ---- */

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("--{0} is required")]
    Required(String),

    #[error("invalid value {value:?} for --{flag} (allowed: {allowed})")]
    InvalidChoice {
        flag: String,
        value: String,
        allowed: String,
    },

    #[error("invalid value {value:?} for --{flag} (expected true or false)")]
    InvalidBool { flag: String, value: String },

    #[error("invalid value {value:?} for --{flag} (expected a number)")]
    InvalidNumber { flag: String, value: String },

    #[error("invalid JSON for --{flag}: {reason}")]
    InvalidJson { flag: String, reason: String },

    #[error("--{first} and --{second} must be provided together")]
    Paired { first: String, second: String },

    #[error("no fields to update; specify at least one flag")]
    NoChanges,

    #[error("--confirm flag is required to delete")]
    ConfirmRequired,

    #[error("{0} id is required")]
    MissingId(String),

    #[error("invalid {singular} id '{id}'")]
    InvalidId { singular: String, id: String },
}

/* ---- Global Flags ---- */

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Drop null members from JSON output
    #[arg(long = "omit-null", global = true)]
    pub omit_null: bool,

    /// API base URL
    #[arg(
        long = "base-url",
        env = BASE_URL_ENV,
        default_value = DEFAULT_BASE_URL,
        value_name = "URL",
        global = true
    )]
    pub base_url: String,

    /// API token (overrides XBE_TOKEN / XBE_API_TOKEN and the stored token)
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Trimmed base URL without a trailing slash; the store key for tokens.
    pub fn base_url(&self) -> String {
        config::normalize_base_url(&self.base_url)
    }

    fn token_hint(&self) -> &str {
        self.token.as_deref().unwrap_or("")
    }
}

/* ---- Token Policy ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Read commands: send a token when one is found.
    Optional,
    /// Write commands: refuse to run without a token.
    Required,
    /// `--no-auth`: never send a token.
    Disabled,
}

impl TokenPolicy {
    /// Maps a resolution outcome to the token to send.
    pub fn apply(
        self,
        resolved: Result<(String, TokenSource), AuthError>,
    ) -> Result<Option<String>, AuthError> {
        match (self, resolved) {
            (TokenPolicy::Disabled, _) => Ok(None),
            (_, Ok((token, _))) => Ok(Some(token)),
            (TokenPolicy::Optional, Err(AuthError::NotFound)) => Ok(None),
            (TokenPolicy::Required, Err(AuthError::NotFound)) => Err(AuthError::LoginRequired),
            (_, Err(err)) => Err(err),
        }
    }
}

/// Builds a client for `globals.base_url()` with the token `policy` allows.
pub fn api_client(globals: &GlobalArgs, policy: TokenPolicy) -> Result<Client> {
    let base_url = globals.base_url();
    let token = match policy {
        TokenPolicy::Disabled => None,
        _ => policy.apply(auth::resolve_token(&base_url, globals.token_hint()))?,
    };
    debug!(%base_url, ?policy, authenticated = token.is_some(), "building API client");
    Client::new(&base_url, token).context("Failed to build API client")
}

/* ---- Runtime ---- */

/// Runs `future` on a fresh current-thread runtime; Ctrl-C aborts it.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    rt.block_on(async {
        tokio::select! {
            result = future => result,
            _ = tokio::signal::ctrl_c() => Err(anyhow!("interrupted")),
        }
    })
}

/* ---- Argument Helpers ---- */

/// Values of `ids` that were set explicitly on the command line. Defaults
/// and env fallbacks are not included.
pub fn given_values<I>(matches: &ArgMatches, ids: I) -> BTreeMap<&'static str, String>
where
    I: IntoIterator<Item = &'static str>,
{
    ids.into_iter()
        .filter(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .filter_map(|id| matches.get_one::<String>(id).map(|v| (id, v.clone())))
        .collect()
}

/// The trimmed positional resource id, rejecting blanks.
pub fn resource_id(raw: &str, singular: &str) -> Result<String, ValidationError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationError::MissingId(singular.to_string()));
    }
    // Dot segments are resolved by URL parsing even when escaped.
    if matches!(id, "." | "..") {
        return Err(ValidationError::InvalidId {
            singular: singular.to_string(),
            id: id.to_string(),
        });
    }
    Ok(id.to_string())
}

/* ---- Output ---- */

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{text}");
    Ok(())
}
