use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::ScoreSource;
use crate::output::OutputFormat;
use crate::scoring::GroupBy;

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// api:
///   base_url: "https://prompt.example.edu/api"
/// course_phase: "8c1d1f3e-3c4b-4e8a-9a43-2f0a6b1e7d11"
/// source: evaluation
/// report:
///   group_by: gender
///   format: table
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: Option<ApiConfig>,

    /// Course phase used when no `--phase` is given
    #[serde(default)]
    pub course_phase: Option<String>,

    /// Which kind of scores to fetch (default: assessment)
    #[serde(default)]
    pub source: Option<ScoreSource>,

    /// Snapshot directory used when no `--data` is given
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Backend base URL, e.g. "https://prompt.example.edu/api"
    pub base_url: String,

    /// Bearer token; the COMPETENCY_SCORES_TOKEN env var takes precedence
    #[serde(default)]
    pub token: Option<String>,
}

/// Defaults for report subcommands.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub group_by: Option<GroupBy>,

    #[serde(default)]
    pub format: Option<OutputFormat>,
}
