use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_classifier::{ClassificationResult, Priority};
use triage_core::{
    core_config_from_env, validation::validate_observation, ObservationInput, QueueEntry,
    TriageQuery, TriageRecord, TriageService,
};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Emergency department triage CLI")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an observation file (YAML or JSON) without storing it
    Classify {
        /// Path to the observation file
        file: PathBuf,
    },
    /// List stored triages, newest first
    List {
        /// Text to find in patient name or chief complaint
        #[arg(long)]
        search: Option<String>,
        /// Only this priority (e.g. URGENT)
        #[arg(long)]
        priority: Option<Priority>,
        /// First triage date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last triage date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one triage
    Show { id: String },
    /// Show the audit trail of a triage, newest first
    History { id: String },
    /// Dashboard statistics
    Stats,
    /// Waiting-room queue
    Queue {
        /// Only show the next patient to call
        #[arg(long)]
        next: bool,
    },
    /// Remove audit entries older than the retention window
    PruneHistory {
        /// Retention in days (defaults to TRIAGE_HISTORY_RETENTION_DAYS)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Print the active rule table as YAML
    Rules,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = Arc::new(core_config_from_env()?);
    let service = TriageService::new(cfg.clone());

    match cli.command {
        Some(Commands::Classify { file }) => {
            let observation = read_input(&file)?.into_observation()?;
            validate_observation(&observation)?;
            let result = cfg.classifier().classify(&observation);
            if cli.json {
                print_json(&result)?;
            } else {
                print_classification(&result);
            }
        }
        Some(Commands::List {
            search,
            priority,
            from,
            to,
            page,
            limit,
        }) => {
            let page = service.list(&TriageQuery {
                search,
                priority,
                from,
                to,
                page,
                limit,
            })?;
            if cli.json {
                print_json(&page)?;
            } else if page.records.is_empty() {
                println!("No triages found.");
            } else {
                for record in &page.records {
                    println!("{}", record_line(record));
                }
                println!(
                    "Page {} of {} ({} triages)",
                    page.page, page.pages, page.total
                );
            }
        }
        Some(Commands::Show { id }) => {
            let record = service.get(&id)?;
            if cli.json {
                print_json(&record)?;
            } else {
                println!("{}", record_line(&record));
                println!("Chief complaint: {}", record.observation.chief_complaint);
                println!("Last updated: {}", record.updated_at.to_rfc3339());
                print_classification(&record.classification);
            }
        }
        Some(Commands::History { id }) => {
            let entries = service.history(&id)?;
            if cli.json {
                print_json(&entries)?;
            } else if entries.is_empty() {
                println!("No history for {}.", id);
            } else {
                for entry in entries {
                    println!(
                        "{} {:?} by {}",
                        entry.recorded_at.to_rfc3339(),
                        entry.action,
                        entry.user
                    );
                }
            }
        }
        Some(Commands::Stats) => {
            let stats = service.stats()?;
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("Total triages: {}", stats.total);
                println!("Average score: {:.1}", stats.average_score);
                println!("Average age: {:.1}", stats.average_age);
                for count in &stats.by_priority {
                    println!("  {:<16} {}", count.priority.as_str(), count.count);
                }
                for day in &stats.daily {
                    println!("  {} {}", day.date, day.count);
                }
            }
        }
        Some(Commands::Queue { next }) => {
            let entries: Vec<QueueEntry> = if next {
                service.next_in_queue()?.into_iter().collect()
            } else {
                service.queue()?
            };
            if cli.json {
                print_json(&entries)?;
            } else if entries.is_empty() {
                println!("Nobody is waiting.");
            } else {
                for entry in &entries {
                    println!("{}", queue_line(entry));
                }
            }
        }
        Some(Commands::PruneHistory { days }) => {
            let removed = service.prune_history(days)?;
            println!("Removed {} history entries.", removed);
        }
        Some(Commands::Rules) => {
            print!("{}", cfg.rules().to_yaml()?);
        }
        None => {
            println!("No command given. Run `triage --help` for usage.");
        }
    }

    Ok(())
}

/// Reads an observation from `path`; `.json` files are parsed as JSON, everything else as YAML.
fn read_input(path: &Path) -> anyhow::Result<ObservationInput> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let input = if is_json {
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))?
    };
    Ok(input)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_classification(result: &ClassificationResult) {
    println!("Priority: {} (score {})", result.priority, result.score);
    println!("Recommendation: {}", result.priority.recommendation());
    if let Some(bmi) = result.body_mass_index {
        println!("BMI: {:.1}", bmi);
    }
    if !result.critical_factors.is_empty() {
        println!("Critical factors:");
        for factor in &result.critical_factors {
            println!("  - {}", factor);
        }
    }
    if !result.risk_factors.is_empty() {
        println!("Risk factors:");
        for factor in &result.risk_factors {
            println!("  - {}", factor);
        }
    }
}

fn record_line(record: &TriageRecord) -> String {
    format!(
        "ID: {}, Name: {}, Priority: {}, Score: {}, Triaged: {}",
        record.id,
        record.observation.name,
        record.classification.priority,
        record.classification.score,
        record.triaged_at.to_rfc3339()
    )
}

fn queue_line(entry: &QueueEntry) -> String {
    format!(
        "{:>3}. {:<16} {} ({} y) waiting {} min{}",
        entry.position,
        entry.priority.as_str(),
        entry.name,
        entry.age,
        entry.waiting_minutes,
        if entry.overdue { " OVERDUE" } else { "" }
    )
}
