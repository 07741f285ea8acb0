use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use serde::Serialize;

use infra_pages::{
    infrastructure::resource_pool::remove_action_label,
    navigation::{default_registry, Prerequisite},
    utils::ConsoleConfig,
};

#[derive(Serialize)]
struct StepSummary {
    target: String,
    step: String,
    view: &'static str,
    prerequisite: Prerequisite,
    chain: Vec<String>,
}

fn print_steps(as_json: bool) -> Result<()> {
    let registry = default_registry()?;
    let steps = registry
        .iter()
        .map(|(key, step)| {
            Ok(StepSummary {
                target: key.target.clone(),
                step: key.step.clone(),
                view: step.view_name(),
                prerequisite: step.prerequisite(),
                chain: registry
                    .chain(&key.target, &key.step)?
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }
    for summary in &steps {
        println!(
            "{:<24} {:<10} -> {:<26} {}",
            summary.target,
            summary.step,
            summary.view,
            summary.chain.join(" > ")
        );
    }
    Ok(())
}

fn print_config(path: Option<&String>) -> Result<()> {
    let config = match path {
        Some(path) => ConsoleConfig::load(path)?,
        None => {
            log::info!("No config file given, showing defaults");
            ConsoleConfig::default()
        }
    };
    print!("{}", config.to_toml_string()?);
    println!(
        "# resource pool remove action: {}",
        remove_action_label(&config.version()?)
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let matches = Command::new("infra_pages")
        .about("Inspect the resource pool page objects and their navigation graph")
        .subcommand_required(true)
        .subcommand(
            Command::new("steps")
                .about("List registered navigation steps with their prerequisite chains")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective console configuration")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .value_name("PATH")
                        .help("TOML configuration file"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("steps", sub)) => print_steps(sub.get_flag("json")),
        Some(("config", sub)) => print_config(sub.get_one::<String>("file")),
        _ => Ok(()),
    }
}
