use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use stockroom_business::AppSettings;
use stockroom_cli::cli::{Cli, Command, MutationArgs};
use stockroom_cli::commands::{self, Movement};
use stockroom_cli::store;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = AppSettings::from_env().context("failed reading settings from the environment")?;
    stockroom_observability::init_with_filter(&settings.log_filter);

    let path = cli.inventory.clone().unwrap_or_else(|| settings.inventory_path.clone());
    let usage_path = cli.usage.clone().unwrap_or_else(|| store::usage_path(&path));

    let output = match cli.command {
        Command::List(args) => commands::list(&store::load(&path)?, &args)?,
        Command::Metrics(args) => commands::metrics(&store::load(&path)?, args.json)?,
        Command::Alerts(args) => commands::alerts(&store::load(&path)?, &args)?,
        Command::Restock(args) => run_movement(&path, &usage_path, Movement::Restock, &args, &settings)?,
        Command::Consume(args) => run_movement(&path, &usage_path, Movement::Consume, &args, &settings)?,
        Command::Report(args) => commands::report(&store::load_usage(&usage_path)?, &args)?,
        Command::Seed(args) => {
            let records = commands::seed(&args.industry, args.count);
            store::save(&path, &records, args.overwrite)?;
            format!("wrote {} {} items to {}\n", records.len(), args.industry, path.display())
        }
    };

    print!("{output}");
    Ok(())
}

fn run_movement(
    path: &Path,
    usage_path: &Path,
    movement: Movement,
    args: &MutationArgs,
    settings: &AppSettings,
) -> Result<String> {
    let records = store::load(path)?;
    let outcome = commands::mutate(&records, movement, args, settings, Utc::now())?;
    store::save(path, &outcome.records, true)?;
    store::append_usage(usage_path, &outcome.usage())?;
    serde_json::to_string_pretty(&outcome.facts)
        .map(|json| json + "\n")
        .context("failed serializing stock movement")
}
