/*!
`delete.rs`

Implements `xbe do <resource> delete <id> --confirm`. Without `--confirm`
nothing is sent. With it, the resource is fetched first (so a wrong id fails
with the server's 404 before anything is removed), then deleted.
*/

use anyhow::{Context, Result};
use clap::{ArgMatches, Args, Command, FromArgMatches};
use serde_json::json;
use tracing::info;

use crate::api::Query;
use crate::cmd::format::{Role, StyleOptions, color};
use crate::cmd::shared::{
    GlobalArgs, TokenPolicy, ValidationError, api_client, block_on, print_json, resource_id,
};
use crate::cmd::show::single_row;
use crate::resources::ResourceSpec;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource ID
    pub id: String,

    /// Confirm deletion
    #[arg(long)]
    pub confirm: bool,
}

pub fn command(spec: &'static ResourceSpec) -> Command {
    DeleteArgs::augment_args(Command::new("delete").about(format!("Delete a {}", spec.singular)))
}

pub fn execute_delete(spec: &'static ResourceSpec, globals: &GlobalArgs, matches: &ArgMatches) -> Result<()> {
    let args = DeleteArgs::from_arg_matches(matches)?;
    if !args.confirm {
        return Err(ValidationError::ConfirmRequired.into());
    }
    let id = resource_id(&args.id, spec.singular)?;

    let client = api_client(globals, TokenPolicy::Required)?;
    let path = spec.item_path(&id);

    // One runtime for both requests; pooled connections are tied to it.
    block_on(async {
        let existing = client
            .get(&path, &Query::new())
            .await
            .with_context(|| format!("Failed to get {} {id}", spec.singular))?;
        let row = single_row(spec, &existing.body)?;
        info!(resource = spec.name, %id, fields = row.len(), "deleting resource");

        client
            .delete(&path)
            .await
            .with_context(|| format!("Failed to delete {} {id}", spec.singular))?;
        Ok::<_, anyhow::Error>(())
    })?;

    if globals.json {
        return print_json(&json!({"id": id, "type": spec.name, "deleted": true}));
    }
    let line = format!("Deleted {} {id}", spec.singular);
    println!("{}", color(Role::Success, line, &StyleOptions::detect()));
    Ok(())
}
