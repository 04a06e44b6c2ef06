use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::Args, Debug)]
pub struct QuoteArgs {
    /// STL files to price together as one print job.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Material name from the catalog. Defaults to the first entry.
    #[arg(short, long)]
    pub material: Option<String>,

    /// JSON catalog of materials, replacing the built-in one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Material density in g/cm³, for a material outside the catalog.
    #[arg(long, requires = "price_per_gram")]
    pub density: Option<f64>,

    /// Price per gram, for a material outside the catalog.
    #[arg(long, requires = "density")]
    pub price_per_gram: Option<f64>,

    /// Infill percentage, 0-100.
    #[arg(short, long, default_value_t = i64::from(printquote::DEFAULT_INFILL_PERCENT), allow_negative_numbers = true)]
    pub infill: i64,

    /// Number of perimeter walls. Non-positive values use the default of 2.
    #[arg(short, long, allow_negative_numbers = true)]
    pub walls: Option<i64>,

    /// Fail unless exactly this many files are given.
    #[arg(long)]
    pub expect_files: Option<usize>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(clap::Args, Debug)]
pub struct MaterialsArgs {
    /// JSON catalog of materials, replacing the built-in one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price one or more STL files.
    Quote(QuoteArgs),
    /// List the materials that can be quoted.
    Materials(MaterialsArgs),
}
