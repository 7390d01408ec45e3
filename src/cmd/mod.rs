/*!
Command tree and dispatcher.

The resource part of the tree is generated from the catalog:

  xbe view <resource> list|show            (read verbs)
  xbe do   <resource> create|update|delete (write verbs)
  xbe auth login|status|logout

A resource appears under `view` / `do` only when its descriptor declares at
least one verb of that group, and only with the verbs it declares.

Layout:
  src/cmd/
    mod.rs      (this file: tree + dispatch)
    shared.rs   (GlobalArgs, ValidationError, token policy, runtime)
    list.rs / show.rs / create.rs / update.rs / delete.rs
    auth.rs     (token store commands)
    body.rs     (write documents from flags)
    row.rs      (resource -> display row)
    format.rs   (tables / detail views)

Conventions:
  - Each verb module exposes `command(spec)` and one `execute_*` function
    returning `anyhow::Result<()>`.
  - Fixed flags are `clap::Args` structs; catalog flags are built at runtime.
*/

pub mod auth;
pub mod body;
pub mod create;
pub mod delete;
pub mod format;
pub mod list;
pub mod row;
pub mod shared;
pub mod show;
pub mod update;

use anyhow::{Context, Result, bail};
use clap::{ArgMatches, Args, Command, FromArgMatches, Subcommand};

use crate::resources::{ResourceSpec, Verb, registry};
use auth::AuthCommand;
pub use shared::GlobalArgs;

pub fn build_cli() -> Command {
    let root = Command::new("xbe")
        .version(env!("CARGO_PKG_VERSION"))
        .about("xbe - command-line client for the XBE platform API")
        .propagate_version(true)
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true);
    GlobalArgs::augment_args(root)
        .subcommand(group_command("view", "Browse and inspect resources", false))
        .subcommand(group_command("do", "Create, update and delete resources", true))
        .subcommand(AuthCommand::augment_subcommands(
            Command::new("auth")
                .about("Manage API tokens")
                .subcommand_required(true),
        ))
}

/// `view` holds the read verbs, `do` the write verbs.
fn group_command(name: &'static str, about: &'static str, write: bool) -> Command {
    let group = Command::new(name).about(about).subcommand_required(true);
    registry::all()
        .iter()
        .copied()
        .filter_map(|spec| resource_command(spec, write))
        .fold(group, |group, cmd| group.subcommand(cmd))
}

fn resource_command(spec: &'static ResourceSpec, write: bool) -> Option<Command> {
    let supported: Vec<Verb> = Verb::ALL
        .iter()
        .copied()
        .filter(|verb| verb.is_write() == write && spec.supports(*verb))
        .collect();
    if supported.is_empty() {
        return None;
    }
    let cmd = Command::new(spec.name)
        .about(spec.about)
        .aliases(spec.aliases.iter().copied())
        .subcommand_required(true);
    Some(supported.into_iter().fold(cmd, |cmd, verb| {
        cmd.subcommand(match verb {
            Verb::List => list::command(spec),
            Verb::Show => show::command(spec),
            Verb::Create => create::command(spec),
            Verb::Update => update::command(spec),
            Verb::Delete => delete::command(spec),
        })
    }))
}

pub fn dispatch(matches: &ArgMatches, globals: &GlobalArgs) -> Result<()> {
    match matches.subcommand() {
        Some(("view", sub)) | Some(("do", sub)) => dispatch_resource(sub, globals),
        Some(("auth", sub)) => {
            let command = AuthCommand::from_arg_matches(sub)?;
            auth::execute_auth(command, globals)
        }
        _ => bail!("no command given; run 'xbe --help'"),
    }
}

fn dispatch_resource(matches: &ArgMatches, globals: &GlobalArgs) -> Result<()> {
    let Some((name, resource_matches)) = matches.subcommand() else {
        bail!("no resource given");
    };
    let spec = registry::find(name).with_context(|| format!("unknown resource '{name}'"))?;
    let Some((action, m)) = resource_matches.subcommand() else {
        bail!("no action given for {}", spec.name);
    };
    let verb = spec
        .verbs
        .iter()
        .copied()
        .find(|verb| verb.name() == action)
        .with_context(|| format!("{} does not support '{action}'", spec.name))?;
    match verb {
        Verb::List => list::execute_list(spec, globals, m),
        Verb::Show => show::execute_show(spec, globals, m),
        Verb::Create => create::execute_create(spec, globals, m),
        Verb::Update => update::execute_update(spec, globals, m),
        Verb::Delete => delete::execute_delete(spec, globals, m),
    }
}
