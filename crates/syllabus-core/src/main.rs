//! `syllabus` command line: menus, player views and checks over course documents

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use syllabus_core::{ActivityService, CourseDocument, CourseIndex, SyllabusConfig};
use syllabus_store::InMemoryStore;
use syllabus_tree::NavigationEntry;
use tracing_subscriber::EnvFilter;

fn course_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("course")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Course document (.json or .toml)"),
        )
        .arg(
            Arg::new("activity")
                .required(true)
                .help("Key of the activity in the course document"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
}

fn cli() -> Command {
    Command::new("syllabus")
        .version(syllabus_core::VERSION)
        .about("Activity trees and sequencing for course documents")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter used when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(course_args(
            Command::new("menu").about("Print the left menu of an activity"),
        ))
        .subcommand(course_args(
            Command::new("player").about("Print the resource an activity opens on"),
        ))
        .subcommand(course_args(
            Command::new("instructions").about("Print the instructions of an activity"),
        ))
        .subcommand(
            Command::new("check")
                .about("Load a course document and print totals for every root activity")
                .arg(
                    Arg::new("course")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Course document (.json or .toml)"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<SyllabusConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SyllabusConfig::from_path(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => SyllabusConfig::default(),
    };
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log.level.clone_from(level);
    }
    if matches.get_flag("json-logs") {
        config.log.json = true;
    }
    Ok(config)
}

fn init_tracing(config: &SyllabusConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .with_context(|| format!("invalid log level {:?}", config.log.level))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if config.log.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn open_course(
    args: &ArgMatches,
    config: &SyllabusConfig,
) -> Result<(ActivityService<InMemoryStore>, CourseIndex, CourseDocument)> {
    let path = args
        .get_one::<PathBuf>("course")
        .context("missing course document")?;
    let document = CourseDocument::from_path(path)
        .with_context(|| format!("reading course {}", path.display()))?;
    let store = InMemoryStore::new();
    let index = document
        .load_into(&store, config.sequence)
        .with_context(|| format!("loading course {}", path.display()))?;
    Ok((ActivityService::new(store, config.clone()), index, document))
}

fn print_entry(entry: &NavigationEntry, depth: usize) {
    println!(
        "{:>4}  {}{} [{}]",
        entry.step,
        "  ".repeat(depth),
        entry.resource.name,
        entry.resource.kind
    );
    for child in entry.children() {
        print_entry(child, depth + 1);
    }
}

fn run(command: &str, args: &ArgMatches, config: &SyllabusConfig) -> Result<()> {
    let (service, index, document) = open_course(args, config)?;

    if command == "check" {
        let roots = document.root_keys();
        println!("Resources: {}", index.len());
        println!("Links: {}", document.links.len());
        for key in roots {
            let menu = service.left_menu(index.require(key)?)?;
            println!(
                "  {key}: {} steps, {} items",
                menu.total_steps, menu.total_items
            );
        }
        return Ok(());
    }

    let key = args
        .get_one::<String>("activity")
        .context("missing activity key")?;
    let activity = index.require(key)?;
    let json = args.get_flag("json");

    match command {
        "menu" => {
            let menu = service.left_menu(activity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&menu)?);
            } else {
                println!("{}", menu.activity.name);
                println!("Steps: {}", menu.total_steps);
                println!("Items: {}", menu.total_items);
                println!();
                print_entry(&menu.root, 0);
            }
        }
        "player" => {
            let view = service.player(activity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("Activity: {}", view.activity.name);
                match view.first_resource {
                    Some(node) => println!("Opens on: {} [{}]", node.name(), node.kind()),
                    None => println!("Opens on: nothing, the activity is empty"),
                }
            }
        }
        "instructions" => {
            let view = service.instructions(activity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", view.activity.name);
                println!();
                println!("{}", view.instructions.as_deref().unwrap_or("No instructions."));
            }
        }
        other => anyhow::bail!("unknown command {other}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let Some((command, args)) = matches.subcommand() else {
        return Ok(());
    };
    // global flags are propagated into the subcommand's matches
    let config = load_config(args)?;
    init_tracing(&config)?;
    run(command, args, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_override_config() {
        let matches = cli()
            .try_get_matches_from([
                "syllabus",
                "menu",
                "course.json",
                "week1",
                "--log-level",
                "debug",
                "--json-logs",
            ])
            .unwrap();
        let (command, args) = matches.subcommand().unwrap();
        let config = load_config(args).unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(command, "menu");
        assert_eq!(args.get_one::<String>("activity").unwrap(), "week1");
        assert!(!args.get_flag("json"));
    }
}
