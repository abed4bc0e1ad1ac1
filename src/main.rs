use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use competency_scores::api::{ApiClient, ScoreSource};
use competency_scores::config::Config;
use competency_scores::exit::{exit_code_for, EXIT_CONFIG, EXIT_NETWORK, EXIT_SUCCESS};
use competency_scores::fetch::Dataset;
use competency_scores::output::{self, OutputFormat, Report};
use competency_scores::scoring::{self, GroupBy};

/// Where report data comes from
#[derive(Args, Debug)]
struct SourceArgs {
    /// Snapshot directory written by `fetch` (defaults to data_dir from config)
    #[arg(long, conflicts_with = "phase")]
    data: Option<PathBuf>,

    /// Fetch live data for this course phase instead of reading a snapshot
    #[arg(long)]
    phase: Option<String>,

    /// Kind of scores to fetch
    #[arg(long, value_enum)]
    source: Option<ScoreSource>,

    /// Backend base URL (overrides api.base_url from config)
    #[arg(long)]
    api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score distribution statistics per group
    Summarize {
        #[command(flatten)]
        input: SourceArgs,

        /// Attribute to group observations by
        #[arg(short, long, value_enum)]
        group_by: Option<GroupBy>,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Rank participants by weighted competency score (best first)
    Rank {
        #[command(flatten)]
        input: SourceArgs,

        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Only show the first N participants
        #[arg(short, long)]
        limit: Option<usize>,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Download a course phase into a local snapshot directory
    Fetch {
        /// Course phase id (defaults to course_phase from config)
        #[arg(long)]
        phase: Option<String>,

        #[arg(long, value_enum)]
        source: Option<ScoreSource>,

        /// Backend base URL (overrides api.base_url from config)
        #[arg(long)]
        api_url: Option<String>,

        /// Snapshot directory (defaults to data_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "competency-scores")]
#[command(about = "Competency score rollups and distribution statistics", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/competency-scores/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Dataset plus what it was loaded for, carried into reports
struct Loaded {
    dataset: Dataset,
    course_phase: Option<String>,
    source: Option<ScoreSource>,
}

fn fail(context: &str, err: anyhow::Error) -> ! {
    eprintln!("{}: {:#}", context, err);
    std::process::exit(exit_code_for(&err));
}

fn create_client(config: &Config, api_url: Option<&str>) -> Result<ApiClient> {
    let base_url = api_url
        .or_else(|| config.api.as_ref().map(|api| api.base_url.as_str()))
        .context("No backend configured. Pass --api-url or set api.base_url in the config file")?;
    let token = competency_scores::credentials::resolve_token(config);
    Ok(ApiClient::new(base_url, token))
}

fn data_dir(config: &Config, explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(competency_scores::config::get_default_data_dir)
}

async fn load_dataset(args: SourceArgs, config: &Config, verbose: bool) -> Result<Loaded> {
    let source = args.source.or(config.source).unwrap_or_default();

    // An explicit --data wins; otherwise a phase from flags or config means a live fetch
    let phase = if args.data.is_some() {
        None
    } else {
        let backend_known = args.api_url.is_some() || config.api.is_some();
        args.phase
            .clone()
            .or_else(|| config.course_phase.clone().filter(|_| backend_known))
    };

    match phase {
        Some(phase) => {
            let client = create_client(config, args.api_url.as_deref())?;
            let mut dataset =
                competency_scores::fetch::fetch_dataset(&client, &phase, source, verbose).await?;
            dataset.retain_phase(&phase);
            Ok(Loaded {
                dataset,
                course_phase: Some(phase),
                source: Some(source),
            })
        }
        None => {
            let dir = data_dir(config, args.data);
            if verbose {
                eprintln!("Reading snapshot from {}", dir.display());
            }
            let dataset = competency_scores::snapshot::load_snapshot(&dir)?;
            Ok(Loaded {
                dataset,
                course_phase: config.course_phase.clone(),
                source: None,
            })
        }
    }
}

fn check_categories(dataset: &Dataset) {
    if let Err(errors) = scoring::validate_categories(&dataset.categories) {
        eprintln!("Competency configuration errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
}

fn write_report(path: &Path, report: &Report, verbose: bool) {
    if let Err(e) = competency_scores::snapshot::write_json(path, report) {
        fail("Failed to write report", e);
    }
    if verbose {
        eprintln!("Report written to {}", path.display());
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(EXIT_NETWORK);
    }

    let cli = Cli::parse();
    let start_time = Instant::now();
    let verbose = cli.verbose;

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match competency_scores::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = competency_scores::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let report_config = config.report.clone().unwrap_or_default();
    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Summarize {
            input,
            group_by,
            format,
            out,
        } => {
            let loaded = match load_dataset(input, &config, verbose).await {
                Ok(l) => l,
                Err(e) => fail("Failed to load scores", e),
            };
            check_categories(&loaded.dataset);

            let group_by = group_by.or(report_config.group_by).unwrap_or(GroupBy::Category);
            let format = format.or(report_config.format).unwrap_or_default();
            let dataset = &loaded.dataset;

            if verbose {
                eprintln!(
                    "Summarizing {} scores by {} ({} participants)",
                    dataset.scores.len(),
                    group_by,
                    dataset.participants.len()
                );
            }

            let groups = scoring::summarize_groups(
                group_by,
                &dataset.scores,
                &dataset.categories,
                &dataset.participants,
            );
            let report = Report::new(loaded.course_phase, loaded.source).with_groups(group_by, groups);

            match format {
                OutputFormat::Table => println!("{}", output::format_summary_table(&report.groups, use_colors)),
                OutputFormat::Tsv => println!("{}", output::format_summary_tsv(&report.groups)),
                OutputFormat::Json => match report.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail("Failed to serialize report", e.into()),
                },
            }

            if let Some(ref path) = out {
                write_report(path, &report, verbose);
            }
        }
        Commands::Rank {
            input,
            format,
            limit,
            out,
        } => {
            let loaded = match load_dataset(input, &config, verbose).await {
                Ok(l) => l,
                Err(e) => fail("Failed to load scores", e),
            };
            check_categories(&loaded.dataset);

            let format = format.or(report_config.format).unwrap_or_default();
            let dataset = &loaded.dataset;

            let mut ranked = scoring::rank_participants(
                &dataset.scores,
                &dataset.categories,
                &dataset.participants,
            );

            if verbose {
                let with_data = ranked.iter().filter(|r| r.has_data()).count();
                eprintln!("Ranked {} participants ({} with scores)", ranked.len(), with_data);
            }

            if let Some(limit) = limit {
                ranked.truncate(limit);
            }

            let report = Report::new(loaded.course_phase, loaded.source).with_participants(ranked);

            match format {
                OutputFormat::Table => println!("{}", output::format_ranking_table(&report.participants, use_colors)),
                OutputFormat::Tsv => println!("{}", output::format_ranking_tsv(&report.participants)),
                OutputFormat::Json => match report.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail("Failed to serialize report", e.into()),
                },
            }

            if let Some(ref path) = out {
                write_report(path, &report, verbose);
            }
        }
        Commands::Fetch {
            phase,
            source,
            api_url,
            out,
        } => {
            let Some(phase) = phase.or_else(|| config.course_phase.clone()) else {
                eprintln!("No course phase given. Pass --phase or set course_phase in the config file.");
                std::process::exit(EXIT_CONFIG);
            };
            let source = source.or(config.source).unwrap_or_default();

            let client = match create_client(&config, api_url.as_deref()) {
                Ok(c) => c,
                Err(e) => fail("Failed to create API client", e),
            };

            let mut dataset =
                match competency_scores::fetch::fetch_dataset(&client, &phase, source, verbose).await {
                    Ok(d) => d,
                    Err(e) => fail("Fetch failed", e),
                };
            dataset.retain_phase(&phase);
            check_categories(&dataset);

            let dir = data_dir(&config, out);
            if let Err(e) = competency_scores::snapshot::save_snapshot(&dir, &dataset) {
                fail("Failed to save snapshot", e);
            }

            println!(
                "Saved {} scores, {} categories, {} participants to {}",
                dataset.scores.len(),
                dataset.categories.len(),
                dataset.participants.len(),
                dir.display()
            );
        }
    }

    if verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
