pub mod formatter;
pub mod report;

pub use formatter::{
    format_average, format_level, format_ranking_table, format_ranking_tsv, format_summary_table,
    format_summary_tsv, should_use_colors,
};
pub use report::Report;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How report subcommands print their results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, colored table
    #[default]
    Table,
    /// Tab-separated values without headers
    Tsv,
    /// Pretty-printed JSON report
    Json,
}
