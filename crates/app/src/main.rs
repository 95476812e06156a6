//! Studiospace - studio allocation notation tool
//!
//! Parses, combines and normalizes studio space notation against a studio
//! catalog, and recomputes hourly availability from event snapshots.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use studiospace_core::{AggregateOptions, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod state;

fn notation_pair(
    name: &'static str,
    about: &'static str,
    first: &'static str,
    second: &'static str,
) -> Command {
    Command::new(name)
        .about(about)
        .arg(Arg::new(first).required(true).help("First notation"))
        .arg(Arg::new(second).required(true).help("Second notation"))
}

fn cli() -> Command {
    Command::new("studiospace")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Studio space notation and allocation tool")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Studio catalog file (defaults to studios.toml in the config directory)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Validate notation and print it in normalized form")
                .arg(Arg::new("notation").required(true).help("Studio notation"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the parsed allocations as JSON"),
                ),
        )
        .subcommand(notation_pair("merge", "Union of two allocations", "a", "b"))
        .subcommand(notation_pair(
            "remove",
            "Space left in AVAILABLE once CLAIMED is taken out",
            "claimed",
            "available",
        ))
        .subcommand(notation_pair(
            "conflict",
            "Whether two allocations share any studio",
            "a",
            "b",
        ))
        .subcommand(Command::new("standard").about("Print the full-capacity notation"))
        .subcommand(
            Command::new("aggregate")
                .about("Recompute availability records from a JSON snapshot")
                .arg(
                    Arg::new("snapshot")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Snapshot with availability, offAir and onAir records"),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .help("Event to apply to every record regardless of time"),
                )
                .arg(
                    Arg::new("merge")
                        .long("merge")
                        .action(ArgAction::SetTrue)
                        .help("Merge the target event back instead of removing it"),
                )
                .arg(
                    Arg::new("base")
                        .long("base")
                        .help("Starting notation (defaults to the standard notation)"),
                ),
        )
}

fn arg<'a>(args: &'a ArgMatches, name: &str) -> &'a str {
    args.get_one::<String>(name).map(String::as_str).unwrap_or_default()
}

fn run(matches: &ArgMatches) -> Result<String> {
    let catalog = matches
        .subcommand()
        .and_then(|(_, args)| args.get_one::<PathBuf>("catalog"))
        .or_else(|| matches.get_one::<PathBuf>("catalog"))
        .cloned();
    let state = state::AppState::load(catalog)?;
    tracing::debug!(catalog = %state.catalog_path().display(), "Using studio catalog");

    match matches.subcommand() {
        Some(("parse", args)) => {
            commands::parse(&state, arg(args, "notation"), args.get_flag("json"))
        }
        Some(("merge", args)) => commands::merge(&state, arg(args, "a"), arg(args, "b")),
        Some(("remove", args)) => {
            commands::remove(&state, arg(args, "claimed"), arg(args, "available"))
        }
        Some(("conflict", args)) => commands::conflict(&state, arg(args, "a"), arg(args, "b")),
        Some(("standard", _)) => Ok(commands::standard(&state)),
        Some(("aggregate", args)) => {
            let options = AggregateOptions {
                target_event_id: args.get_one::<String>("target").cloned(),
                merge_mode: args.get_flag("merge"),
            };
            let snapshot = args
                .get_one::<PathBuf>("snapshot")
                .cloned()
                .unwrap_or_default();
            let base = args.get_one::<String>("base").map(String::as_str);
            commands::aggregate_snapshot(&state, &snapshot, base, &options)
        }
        _ => Ok(String::new()),
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = cli().get_matches();

    match run(&matches) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn test_global_catalog_flag() {
        let matches = cli()
            .try_get_matches_from(["studiospace", "merge", "A1", "B", "--catalog", "studios.toml"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "merge");
        assert_eq!(
            args.get_one::<PathBuf>("catalog"),
            Some(&PathBuf::from("studios.toml"))
        );
        assert_eq!(arg(args, "a"), "A1");
        assert_eq!(arg(args, "b"), "B");
    }

    #[test]
    fn test_aggregate_flags() {
        let matches = cli()
            .try_get_matches_from([
                "studiospace",
                "aggregate",
                "snap.json",
                "--target",
                "ev1",
                "--merge",
            ])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(args.get_one::<String>("target").map(String::as_str), Some("ev1"));
        assert!(args.get_flag("merge"));
        assert!(args.get_one::<String>("base").is_none());
    }
}
