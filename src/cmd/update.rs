/*!
`update.rs`

Implements `xbe do <resource> update <id>` as a partial PATCH: only flags
given on the command line are sent, a blank value clears the field, and an
invocation without any input flag is rejected before any request.
*/

use anyhow::{Context, Result};
use clap::{ArgMatches, Args, Command, FromArgMatches};

use crate::cmd::body::{WriteMode, build_write_document};
use crate::cmd::create::{input_args, input_values, report_written};
use crate::cmd::shared::{GlobalArgs, TokenPolicy, api_client, block_on, resource_id};
use crate::resources::ResourceSpec;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Resource ID
    pub id: String,
}

pub fn command(spec: &'static ResourceSpec) -> Command {
    UpdateArgs::augment_args(Command::new("update").about(format!("Update a {}", spec.singular)))
        .args(input_args(spec))
}

pub fn execute_update(spec: &'static ResourceSpec, globals: &GlobalArgs, matches: &ArgMatches) -> Result<()> {
    let args = UpdateArgs::from_arg_matches(matches)?;
    let id = resource_id(&args.id, spec.singular)?;

    let values = input_values(spec, matches);
    let doc = build_write_document(spec, WriteMode::Update, Some(&id), &values)?;
    let body = doc.to_vec().context("Failed to encode request body")?;

    let client = api_client(globals, TokenPolicy::Required)?;
    let response = block_on(async {
        client
            .patch(&spec.item_path(&id), body)
            .await
            .with_context(|| format!("Failed to update {} {id}", spec.singular))
    })?;

    report_written(spec, globals, "Updated", &response.body)
}
