//! Utilities: logging setup (level derived from -v / -q, RUST_LOG override)
//! and small string helpers shared by the command modules.
//!
//! Key items:
//!   init_logging / derive_level
//!   humanize_key

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/* ---- Logging ---- */

/// quiet -> ERROR, default -> WARN, -v -> INFO, -vv -> DEBUG, -vvv -> TRACE
pub fn derive_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. Events go to stderr only; stdout carries
/// table / JSON output. `RUST_LOG`, when set, replaces the derived level.
pub fn init_logging(level: Level) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => default_filter(level),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn default_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());
    // Transport internals stay at info even under -vvv.
    for noisy in ["hyper", "hyper_util", "reqwest", "rustls", "h2"] {
        if let Ok(directive) = format!("{noisy}=info").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/* ---- Text ---- */

/// `broker_name` -> `Broker Name`, `job_id` -> `Job ID`.
pub fn humanize_key(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| match part {
            "id" => "ID".to_string(),
            "ids" => "IDs".to_string(),
            _ => {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
