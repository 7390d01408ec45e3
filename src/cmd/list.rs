/*!
`list.rs`

Implements `xbe view <resource> list`.

Query parameters, in order:
  - page[limit] / page[offset]  only when > 0
  - sort                        --sort, else the resource's default sort
  - include / fields[type]      from the resource descriptor
  - filter[param]               one per filter flag given with a non-blank value

Output:
  - table of the descriptor's columns, or "No <plural> found."
  - `--json`: array of row objects (keys in field order)
*/

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches};

use crate::api::Query;
use crate::cmd::format::{StyleOptions, rows_table};
use crate::cmd::row::{omit_nulls, project_rows};
use crate::cmd::shared::{GlobalArgs, TokenPolicy, api_client, block_on, print_json};
use crate::jsonapi::ListDocument;
use crate::resources::{Filter, FilterKind, ResourceSpec};

/// Fixed flags of every list command; filter flags are added per resource.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page size (0 = server default)
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub limit: u32,

    /// Page offset
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub offset: u32,

    /// Sort order (e.g. -created-at)
    #[arg(long, value_name = "FIELDS", allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Do not send an API token
    #[arg(long = "no-auth")]
    pub no_auth: bool,
}

pub fn command(spec: &'static ResourceSpec) -> Command {
    let cmd = Command::new("list").about(format!("List {}", spec.plural));
    let cmd = ListArgs::augment_args(cmd);
    spec.filters
        .iter()
        .fold(cmd, |cmd, filter| cmd.arg(filter_arg(filter)))
}

fn filter_arg(filter: &'static Filter) -> Arg {
    let arg = Arg::new(filter.flag)
        .long(filter.flag)
        .help(filter.help)
        .help_heading("Filters");
    match filter.kind {
        FilterKind::Value => arg.value_name("VALUE"),
        FilterKind::Switch => arg.action(ArgAction::SetTrue),
    }
}

/// `include` and `fields[type]` for the resource's joined labels.
pub fn add_projection(spec: &ResourceSpec, query: &mut Query) {
    if !spec.include.is_empty() {
        query.set("include", spec.include.join(","));
    }
    for (kind, fields) in spec.fieldsets {
        query.set(format!("fields[{kind}]"), *fields);
    }
}

pub fn build_query(spec: &ResourceSpec, args: &ListArgs, matches: &ArgMatches) -> Query {
    let mut query = Query::new();
    if args.limit > 0 {
        query.set("page[limit]", args.limit.to_string());
    }
    if args.offset > 0 {
        query.set("page[offset]", args.offset.to_string());
    }
    query.set_if_present("sort", args.sort.as_deref().unwrap_or(""));
    if !query.contains("sort")
        && let Some(sort) = spec.default_sort
    {
        query.set("sort", sort);
    }
    add_projection(spec, &mut query);

    for filter in spec.filters {
        match filter.kind {
            FilterKind::Value => {
                if let Some(value) = matches.get_one::<String>(filter.flag) {
                    query.set_if_present(filter.query_key(), value);
                }
            }
            FilterKind::Switch => {
                if matches.get_flag(filter.flag) {
                    query.set(filter.query_key(), "true");
                }
            }
        }
    }
    query
}

pub fn execute_list(spec: &'static ResourceSpec, globals: &GlobalArgs, matches: &ArgMatches) -> Result<()> {
    let args = ListArgs::from_arg_matches(matches)?;
    let query = build_query(spec, &args, matches);

    let policy = if args.no_auth {
        TokenPolicy::Disabled
    } else {
        TokenPolicy::Optional
    };
    let client = api_client(globals, policy)?;

    let response = block_on(async {
        client
            .get(spec.path, &query)
            .await
            .with_context(|| format!("Failed to list {}", spec.plural))
    })?;
    let doc = ListDocument::from_slice(&response.body)
        .with_context(|| format!("Failed to decode {} response", spec.plural))?;

    let mut rows = project_rows(spec, &doc);
    tracing::info!(
        resource = spec.name,
        status = response.status.as_u16(),
        count = rows.len(),
        "listed resources"
    );

    if globals.json {
        if globals.omit_null {
            rows.iter_mut().for_each(omit_nulls);
        }
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No {} found.", spec.plural);
        return Ok(());
    }
    println!("{}", rows_table(spec, &rows, &StyleOptions::detect()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::registry;

    fn query_for(name: &str, argv: &[&str]) -> Query {
        let spec = registry::find(name).unwrap();
        let matches = command(spec)
            .try_get_matches_from(std::iter::once("list").chain(argv.iter().copied()))
            .unwrap();
        let args = ListArgs::from_arg_matches(&matches).unwrap();
        build_query(spec, &args, &matches)
    }

    #[test]
    fn zero_limit_and_offset_are_not_sent() {
        let q = query_for("brokers", &["--limit", "0"]);
        assert!(!q.contains("page[limit]"));
        assert!(!q.contains("page[offset]"));

        let q = query_for("brokers", &["--limit", "25", "--offset", "50"]);
        assert_eq!(q.get("page[limit]"), Some("25"));
        assert_eq!(q.get("page[offset]"), Some("50"));
    }

    #[test]
    fn sort_flag_overrides_default() {
        assert_eq!(query_for("brokers", &[]).get("sort"), Some("company-name"));
        assert_eq!(
            query_for("brokers", &["--sort", "-created-at"]).get("sort"),
            Some("-created-at")
        );
        assert!(!query_for("time-cards", &[]).contains("sort"));
    }

    #[test]
    fn filters_and_projection() {
        let q = query_for("broker-memberships", &["--broker", "123", "--q", "Jane", "--user", " "]);
        assert_eq!(q.get("filter[broker]"), Some("123"));
        assert_eq!(q.get("filter[q]"), Some("Jane"));
        assert!(!q.contains("filter[user]"));
        assert_eq!(q.get("include"), Some("user,organization,broker"));
        assert_eq!(q.get("fields[users]"), Some("name,email-address,mobile-number"));
    }

    #[test]
    fn renamed_and_switch_filters() {
        let q = query_for("broker-memberships", &["--project-office", "4"]);
        assert_eq!(q.get("filter[project_office]"), Some("4"));

        assert!(!query_for("job-sites", &[]).contains("filter[is-active]"));
        let q = query_for("job-sites", &["--active"]);
        assert_eq!(q.get("filter[is-active]"), Some("true"));
    }
}
