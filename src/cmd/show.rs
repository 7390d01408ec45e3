/*!
`show.rs`

Implements `xbe view <resource> show <id>`: `GET <path>/<id>` with the same
include / sparse fieldsets as list, rendered as a `Label: value` detail view
or, with `--json`, a single row object.
*/

use anyhow::{Context, Result, anyhow};
use clap::{ArgMatches, Args, Command, FromArgMatches};

use crate::api::Query;
use crate::cmd::format::{StyleOptions, row_detail};
use crate::cmd::list::add_projection;
use crate::cmd::row::{Row, omit_nulls, project_rows};
use crate::cmd::shared::{
    GlobalArgs, TokenPolicy, api_client, block_on, print_json, resource_id,
};
use crate::jsonapi::SingleDocument;
use crate::resources::ResourceSpec;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Resource ID
    pub id: String,

    /// Do not send an API token
    #[arg(long = "no-auth")]
    pub no_auth: bool,
}

pub fn command(spec: &'static ResourceSpec) -> Command {
    ShowArgs::augment_args(
        Command::new("show").about(format!("Show {} details", spec.singular)),
    )
}

/// Decodes a single-resource body into its display row.
pub fn single_row(spec: &ResourceSpec, body: &[u8]) -> Result<Row> {
    let doc = SingleDocument::from_slice(body)
        .with_context(|| format!("Failed to decode {} response", spec.singular))?;
    project_rows(spec, &doc.into_list())
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("empty {} response", spec.singular))
}

/// Prints a row as a JSON object (`--json`) or a detail view.
pub fn print_row(spec: &ResourceSpec, globals: &GlobalArgs, mut row: Row) -> Result<()> {
    if globals.json {
        if globals.omit_null {
            omit_nulls(&mut row);
        }
        return print_json(&row);
    }
    println!("{}", row_detail(spec, &row, &StyleOptions::detect()));
    Ok(())
}

pub fn execute_show(spec: &'static ResourceSpec, globals: &GlobalArgs, matches: &ArgMatches) -> Result<()> {
    let args = ShowArgs::from_arg_matches(matches)?;
    let id = resource_id(&args.id, spec.singular)?;

    let mut query = Query::new();
    add_projection(spec, &mut query);

    let policy = if args.no_auth {
        TokenPolicy::Disabled
    } else {
        TokenPolicy::Optional
    };
    let client = api_client(globals, policy)?;

    let response = block_on(async {
        client
            .get(&spec.item_path(&id), &query)
            .await
            .with_context(|| format!("Failed to get {} {id}", spec.singular))
    })?;

    print_row(spec, globals, single_row(spec, &response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::registry;
    use serde_json::json;

    #[test]
    fn single_row_projects_included_labels() {
        let spec = registry::find("job-sites").unwrap();
        let body = json!({
            "data": {"type": "job-sites", "id": "5",
                     "attributes": {"name": "Quarry", "is-active": true},
                     "relationships": {"customer": {"data": {"type": "customers", "id": "2"}}}},
            "included": [{"type": "customers", "id": "2", "attributes": {"company-name": "Acme"}}]
        });
        let row = single_row(spec, body.to_string().as_bytes()).unwrap();
        assert_eq!(row["id"], json!("5"));
        assert_eq!(row["customer"], json!("Acme"));
        assert_eq!(row["is_active"], json!(true));
    }

    #[test]
    fn single_row_rejects_collection_body() {
        let spec = registry::find("job-sites").unwrap();
        assert!(single_row(spec, br#"{"data": []}"#).is_err());
    }

    #[test]
    fn blank_id_is_rejected_before_any_request() {
        let spec = registry::find("brokers").unwrap();
        let matches = command(spec).try_get_matches_from(["show", " "]).unwrap();
        let args = ShowArgs::from_arg_matches(&matches).unwrap();
        let err = resource_id(&args.id, spec.singular).unwrap_err();
        assert_eq!(err.to_string(), "broker id is required");
    }
}
