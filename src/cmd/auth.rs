/*!
`auth.rs`

`xbe auth login|status|logout`: manage the per-base-URL token store.

  login   stores `--token`, or the first line of stdin when the flag is absent
  status  shows which token a command would use and where it comes from
  logout  removes the stored token (env vars are left alone)
*/

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use serde_json::json;

use crate::auth::{self, AuthError, TokenStore, mask_token};
use crate::cmd::shared::{GlobalArgs, print_json};

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store an API token for the base URL (from --token or stdin)
    Login,

    /// Show the token that commands would use
    Status,

    /// Remove the stored token for the base URL
    Logout,
}

pub fn execute_auth(command: AuthCommand, globals: &GlobalArgs) -> Result<()> {
    match command {
        AuthCommand::Login => login(globals),
        AuthCommand::Status => status(globals),
        AuthCommand::Logout => logout(globals),
    }
}

fn login(globals: &GlobalArgs) -> Result<()> {
    let base_url = globals.base_url();
    let token = match globals.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => read_token_from_stdin()?,
    };
    if token.is_empty() {
        bail!("no token provided; pass --token or pipe it on stdin");
    }

    let store = TokenStore::default_location()?;
    store.set(&base_url, &token)?;
    tracing::info!(path = %store.path().display(), "token saved");

    if globals.json {
        return print_json(&json!({
            "base_url": base_url,
            "token": mask_token(&token),
            "path": store.path(),
        }));
    }
    println!("Logged in to {base_url} (token {})", mask_token(&token));
    Ok(())
}

fn read_token_from_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("API token: ");
        std::io::stderr().flush().ok();
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from stdin")?;
    Ok(line.trim().to_string())
}

fn status(globals: &GlobalArgs) -> Result<()> {
    let base_url = globals.base_url();
    let hint = globals.token.as_deref().unwrap_or("");
    match auth::resolve_token(&base_url, hint) {
        Ok((token, source)) => {
            if globals.json {
                return print_json(&json!({
                    "base_url": base_url,
                    "authenticated": true,
                    "token": mask_token(&token),
                    "source": source.to_string(),
                }));
            }
            println!("Base URL: {base_url}");
            println!("Token:    {}", mask_token(&token));
            println!("Source:   {source}");
        }
        Err(AuthError::NotFound) => {
            if globals.json {
                return print_json(&json!({"base_url": base_url, "authenticated": false}));
            }
            println!("Not logged in to {base_url}. Run 'xbe auth login' first.");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn logout(globals: &GlobalArgs) -> Result<()> {
    let base_url = globals.base_url();
    let store = TokenStore::default_location()?;
    let removed = store.remove(&base_url)?;

    if globals.json {
        return print_json(&json!({"base_url": base_url, "removed": removed}));
    }
    if removed {
        println!("Logged out of {base_url}");
    } else {
        println!("No stored token for {base_url}");
    }
    Ok(())
}
