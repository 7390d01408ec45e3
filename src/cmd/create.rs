/*!
`create.rs`

Implements `xbe do <resource> create`. Every write input of the resource
becomes a flag; only the flags given on the command line end up in the POST
body (see `body.rs`). Required flags are checked before any request.
*/

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

use crate::cmd::body::{InputValues, WriteMode, build_write_document};
use crate::cmd::format::{Role, StyleOptions, color};
use crate::cmd::shared::{GlobalArgs, TokenPolicy, api_client, block_on, given_values};
use crate::cmd::show::{print_row, single_row};
use crate::resources::{Input, InputKind, ResourceSpec, Target};

pub fn command(spec: &'static ResourceSpec) -> Command {
    Command::new("create")
        .about(format!("Create a {}", spec.singular))
        .args(input_args(spec))
}

/// One flag per write input.
pub fn input_args(spec: &'static ResourceSpec) -> Vec<Arg> {
    spec.inputs.iter().map(input_arg).collect()
}

fn input_arg(input: &'static Input) -> Arg {
    let mut help = input.help.to_string();
    if input.required {
        help.push_str(" [required on create]");
    }
    if !input.choices.is_empty() {
        help.push_str(&format!(" [one of: {}]", input.choices.join(", ")));
    }

    let mut arg = Arg::new(input.flag)
        .long(input.flag)
        .help(help)
        .value_name(value_name(input.target));
    if matches!(
        input.target,
        Target::Attr(_, InputKind::Integer | InputKind::Number)
    ) {
        arg = arg.allow_negative_numbers(true);
    }
    if let Some(default) = input.default {
        arg = arg.default_value(default);
    }
    arg
}

fn value_name(target: Target) -> &'static str {
    match target {
        Target::Attr(_, InputKind::Bool) => "BOOL",
        Target::Attr(_, InputKind::Integer | InputKind::Number) => "NUMBER",
        Target::Attr(_, InputKind::List) | Target::ToMany { .. } => "LIST",
        Target::Attr(_, InputKind::Json) => "JSON",
        Target::Attr(_, InputKind::Text) => "VALUE",
        Target::ToOne { .. } | Target::PolyId { .. } => "ID",
        Target::PolyType { .. } => "TYPE",
    }
}

pub fn input_values(spec: &ResourceSpec, matches: &ArgMatches) -> InputValues {
    given_values(matches, spec.inputs.iter().map(|input| input.flag))
}

/// "Created customer tender 123" / "Updated ..." on the success path.
pub fn report_written(
    spec: &ResourceSpec,
    globals: &GlobalArgs,
    verb: &str,
    body: &[u8],
) -> Result<()> {
    let row = single_row(spec, body)?;
    if globals.json {
        return print_row(spec, globals, row);
    }
    let id = row.get("id").and_then(|v| v.as_str()).unwrap_or_default();
    let line = format!("{verb} {} {id}", spec.singular);
    println!("{}", color(Role::Success, line, &StyleOptions::detect()));
    Ok(())
}

pub fn execute_create(spec: &'static ResourceSpec, globals: &GlobalArgs, matches: &ArgMatches) -> Result<()> {
    let values = input_values(spec, matches);
    let doc = build_write_document(spec, WriteMode::Create, None, &values)?;
    let body = doc.to_vec().context("Failed to encode request body")?;

    let client = api_client(globals, TokenPolicy::Required)?;
    let response = block_on(async {
        client
            .post(spec.path, body)
            .await
            .with_context(|| format!("Failed to create {}", spec.singular))
    })?;

    report_written(spec, globals, "Created", &response.body)
}
