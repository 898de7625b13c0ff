use clap::{
    crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::{ColoredString, Colorize};
use std::path::PathBuf;
use trellis::{Event, LogObserver, Observer, Outcome, Severity, TemplateData, TrellisError};

// Errors reach the user as the miette report returned from `main`.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("ensure")
                .about("Creates the folders and files a blueprint declares")
                .arg(
                    Arg::new("base")
                        .help("Directory the blueprint paths are relative to")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("blueprint")
                        .help("Path to the blueprint TOML file")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("set")
                        .help("Template value overriding the blueprint, as KEY=VALUE")
                        .short('s')
                        .long("set")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Deletes the contents of a directory, optionally only matching entries")
                .arg(
                    Arg::new("dir")
                        .help("Directory whose contents are deleted")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                )
                .arg(
                    Arg::new("patterns")
                        .help("Glob patterns selecting what to delete (default: everything)")
                        .num_args(0..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    init_logger(is_verbose);

    match matches.subcommand() {
        Some(("ensure", args)) => handle_ensure(args),
        Some(("clear", args)) => handle_clear(args),
        _ => unreachable!(),
    }
}

fn init_logger(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn handle_ensure(args: &ArgMatches) -> miette::Result<()> {
    let base = args.get_one::<PathBuf>("base").expect("base required");
    let blueprint = args
        .get_one::<PathBuf>("blueprint")
        .expect("blueprint required");

    let given = parse_assignments(args.get_many::<String>("set").unwrap_or_default())?;

    let outcome = trellis::ensure_from_file(base, blueprint, &given, &forward_to_log)?;

    report(outcome, "create".green())
}

fn handle_clear(args: &ArgMatches) -> miette::Result<()> {
    let dir = args.get_one::<PathBuf>("dir").expect("dir required");
    let patterns: Vec<&String> = args
        .get_many::<String>("patterns")
        .unwrap_or_default()
        .collect();

    let outcome = trellis::remove_folder_contents(dir, &patterns, &forward_to_log);

    report(outcome, "remove".red())
}

/// Logs every event except errors, which `main` already reports.
fn forward_to_log(event: &Event) {
    if event.severity != Severity::Error {
        LogObserver.notify(event);
    }
}

/// Prints the touched paths, including those of a call that stopped early, then its error.
fn report<E>(outcome: Outcome<E>, verb: ColoredString) -> miette::Result<()>
where
    TrellisError: From<E>,
{
    for path in &outcome.paths {
        println!("{} {}", verb, path.display());
    }

    match outcome.error {
        None => Ok(()),
        Some(error) => Err(TrellisError::from(error).into()),
    }
}

fn parse_assignments<'a>(
    raw: impl Iterator<Item = &'a String>,
) -> miette::Result<TemplateData> {
    let mut given = TemplateData::new();

    for pair in raw {
        let Some((key, value)) = pair.split_once('=') else {
            miette::bail!(
                code = "trellis::cli::set",
                help = "Pass template values as KEY=VALUE",
                "invalid --set value '{}'",
                pair
            );
        };
        given.insert(key.trim().to_string(), value.to_string());
    }

    Ok(given)
}
