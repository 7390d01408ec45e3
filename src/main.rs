use std::process::ExitCode;

use clap::FromArgMatches;

mod api;
mod auth;
mod cmd;
mod config;
mod jsonapi;
mod resources;
mod utils;

use api::ApiError;
use cmd::GlobalArgs;

/// xbe - command-line client for the XBE platform JSON:API.
///
/// Command layout (generated from the resource catalog):
///   xbe view <resource> list [filters] [--limit N] [--offset N] [--sort S]
///   xbe view <resource> show <id>
///   xbe do   <resource> create [flags]
///   xbe do   <resource> update <id> [flags]
///   xbe do   <resource> delete <id> --confirm
///   xbe auth login|status|logout
///
/// Global flags / env:
///   --json / --omit-null   Machine output
///   --base-url             API base URL (or XBE_BASE_URL)
///   --token                API token (or XBE_TOKEN / XBE_API_TOKEN, or `xbe auth login`)
///   -v / -vv / -vvv        Increase verbosity (RUST_LOG overrides)
///   -q / --quiet           Errors only
///
/// Examples:
///   xbe view broker-memberships list --broker 123 --q Jane --json
///   xbe do job-sites update 5 --name "North Quarry"
///   xbe do customer-tenders delete 42 --confirm
fn main() -> ExitCode {
    // Usage errors exit with status 2 inside clap.
    let matches = cmd::build_cli().get_matches();
    let globals = match GlobalArgs::from_arg_matches(&matches) {
        Ok(globals) => globals,
        Err(e) => e.exit(),
    };

    let level = utils::derive_level(globals.verbose, globals.quiet);
    utils::init_logging(level);

    match cmd::dispatch(&matches, &globals) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The server's own diagnostics first, verbatim.
            if let Some(body) = err
                .chain()
                .find_map(|e| e.downcast_ref::<ApiError>())
                .and_then(ApiError::body)
            {
                eprintln!("{body}");
            }
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
