use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use template_vars::config::Config;
use template_vars::logging::init_tracing;
use template_vars::registry::{self, KindRegistry};
use template_vars::replay::{load_script, load_variables, replay};
use template_vars::variables::{
    TemplatingState, VariableId, VariableModel, VariableState, VariablesReducer,
};

#[derive(Parser, Debug)]
#[command(name = "template-vars", version, about = "Replay template variable editor actions")]
struct Cli {
    /// Config file (default: the per-user config path).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered variable kinds.
    Kinds,

    /// Apply an action script to a persisted variable list.
    Replay {
        /// JSON array of variables.
        #[arg(long)]
        variables: PathBuf,

        /// JSON-lines action script.
        #[arg(long)]
        script: PathBuf,

        /// Include editor state and the editor slot in the output.
        #[arg(long)]
        with_editor: bool,
    },
}

#[derive(Serialize)]
struct ReplayOutput<'a> {
    variables: Vec<&'a VariableModel>,
    applied: usize,
    rejected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id_in_editor: Option<&'a VariableId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    editor: Option<Vec<&'a VariableState>>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading default config")?,
    };
    init_tracing(&config.logging);

    let registry = registry::install(KindRegistry::from_config(&config)?)?;

    match cli.command {
        Command::Kinds => {
            for adapter in registry.adapters() {
                println!(
                    "{:<11} {:<15} {}",
                    adapter.kind(),
                    adapter.name(),
                    adapter.description()
                );
            }
        }
        Command::Replay {
            variables,
            script,
            with_editor,
        } => {
            let list = load_variables(&variables)?;
            let intents = load_script(&script)?;
            let state = TemplatingState::from_variables(list, registry)
                .context("seeding variables")?;

            let reducer = VariablesReducer::new(registry);
            let report = replay(&reducer, state, intents);

            let output = ReplayOutput {
                variables: report.state.variables_in_order(),
                applied: report.applied,
                rejected: report.rejected,
                id_in_editor: with_editor
                    .then_some(report.state.id_in_editor.as_ref())
                    .flatten(),
                editor: with_editor
                    .then(|| report.state.variables.values().map(|entry| &**entry).collect()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
