//! `aoc`: runs the registered Advent of Code solvers against personal inputs

mod aggregator;
mod cache;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logging;
mod output;

// linking the puzzle crate submits its solver plugins
use aoc_2022 as _;

use aggregator::ResultAggregator;
use aoc_http_client::AocClient;
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use cache::InputCache;
use clap::Parser;
use cli::Args;
use config::{Config, Selection};
use error::CliError;
use executor::{Executor, WorkItem};
use input::{InputSource, Remote};
use itertools::Itertools;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.selection)?;

    let items = executor::collect_work_items(&registry, &config.selection);
    if items.is_empty() {
        tracing::warn!("no solvers match the selection");
        return Ok(());
    }
    if config.input_file.is_some() && items.len() != 1 {
        return Err(CliError::Config(format!(
            "--input applies to one puzzle but {} match; add --year",
            items.len()
        )));
    }

    let inputs = input_source(&config, &items)?;
    let executor = Executor::new(registry, inputs, config.parallelize_by, config.thread_count)
        .map_err(|e| CliError::Executor(e.into()))?;
    run_executor(executor, items, config.quiet)
}

fn build_registry(selection: &Selection) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| selection.matches_tags(plugin.tags))?;
    let registry = builder.build();
    tracing::debug!(solvers = registry.len(), "registry built");
    Ok(registry)
}

/// Pick the input source, asking for a session when inputs must be downloaded
fn input_source(config: &Config, items: &[WorkItem]) -> Result<InputSource, CliError> {
    if let Some(path) = &config.input_file {
        return Ok(InputSource::File(path.clone()));
    }

    let cache = InputCache::new(&config.cache_dir);
    let missing: Vec<&WorkItem> = items.iter().filter(|w| !cache.contains(w.year, w.day)).collect();
    if missing.is_empty() {
        return Ok(InputSource::Cached { cache, remote: None });
    }
    tracing::info!(
        "{} input(s) not cached: {}",
        missing.len(),
        missing.iter().map(|w| format!("{}/day{:02}", w.year, w.day)).join(", ")
    );

    let session = match &config.session {
        Some(session) => session.clone(),
        None => config::prompt_session("A session token is needed to download missing inputs")?,
    };
    let client = AocClient::new()?;
    config::verify_session(&client, &session)?;

    Ok(InputSource::Cached {
        cache,
        remote: Some(Remote { client, session }),
    })
}

fn run_executor(executor: Executor, items: Vec<WorkItem>, quiet: bool) -> Result<(), CliError> {
    tracing::info!("running {} solver(s)", items.len());

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::for_items(&items);
    let mut results = Vec::new();
    let (tx, rx) = std::sync::mpsc::channel();

    let outcome = std::thread::scope(|s| {
        let worker = s.spawn(|| executor.execute(&items, tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready);
                results.push(ready);
            }
        }
        worker.join()
    });

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        tracing::warn!("some results never arrived");
    }
    formatter.print_summary(&results);

    outcome
        .map_err(|_| CliError::Config("executor thread panicked".to_string()))?
        .map_err(CliError::Executor)
}
