use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stockroom_inventory::{ReportPeriod, SortField, SortOrder};

/// stockroom: inventory queries and verified stock movements from the shell.
///
/// Reads the inventory JSON the web client exports (an array of records).
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Inventory file; defaults to `STOCKROOM_INVENTORY` or `inventory.json`.
    #[arg(long, global = true)]
    pub inventory: Option<PathBuf>,

    /// Usage log; defaults to `usage.json` next to the inventory file.
    #[arg(long, global = true)]
    pub usage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search, filter and sort the inventory.
    List(ListArgs),

    /// Dashboard totals.
    Metrics(OutputArgs),

    /// Items needing attention and suggested reorder quantities.
    Alerts(AlertsArgs),

    /// Receive stock for one item, behind scan + identity verification.
    Restock(MutationArgs),

    /// Record usage of one item, behind scan + identity verification.
    Consume(MutationArgs),

    /// Usage totals per day, ISO week or month.
    Report(ReportArgs),

    /// Write starter records for an industry.
    Seed(SeedArgs),
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive match on name, category, SKU or description.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub industry: Option<String>,

    /// `in-stock`, `low-stock`, `out-of-stock`, `overstock` or `all`.
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long, default_value = "name")]
    pub sort: SortField,

    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Print the spoken announcement as well.
    #[arg(long)]
    pub announce: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// `daily`, `weekly` or `monthly`.
    #[arg(long, default_value = "daily")]
    pub period: ReportPeriod,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct MutationArgs {
    /// Item id.
    #[arg(long)]
    pub item: String,

    #[arg(long)]
    pub amount: f64,

    /// Scanned code; must contain the item's barcode, SKU or id.
    #[arg(long)]
    pub scan: Option<String>,

    /// Confirm identity manually as this operator.
    #[arg(long, conflicts_with = "face_match")]
    pub operator: Option<String>,

    /// Confirm identity with a simulated face match.
    #[arg(long)]
    pub face_match: bool,

    /// Collected for the manual path; not checked.
    #[arg(long, requires = "operator")]
    pub pin: Option<String>,

    /// New storage location (restock only).
    #[arg(long)]
    pub location: Option<String>,

    /// Skip verification entirely.
    #[arg(long)]
    pub skip_verification: bool,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Industry id, e.g. `restaurant` or `healthcare`.
    #[arg(long)]
    pub industry: String,

    #[arg(long, default_value_t = 10)]
    pub count: usize,

    /// Replace an existing inventory file.
    #[arg(long)]
    pub overwrite: bool,
}
