//! ponder: capture thoughts and get a recommendation for each.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use ponder_engine::{
    init_tracing, render, CaptureRequest, LogSettings, NoteCriteria, PonderConfig,
    ThoughtService,
};

#[derive(Parser)]
#[command(name = "ponder")]
#[command(author, version, about = "Capture thoughts and decide what to do with them")]
#[command(propagate_version = true)]
struct Cli {
    /// Workspace root holding the .ponder directory
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Config file (default: <workspace>/.ponder/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the storage directory and index
    Init,

    /// Capture a thought and print the recommendation
    Capture {
        /// Thought text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Where the thought came from
        #[arg(long)]
        context: Option<String>,

        /// Restrict task matching to one repository
        #[arg(short, long)]
        repository: Option<String>,
    },

    /// List notes matching filters, newest first
    Find {
        /// Tag filter (repeatable, any match)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Case-insensitive text in content or context
        #[arg(short, long)]
        query: Option<String>,

        /// Created on or after (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        after: Option<String>,

        /// Created on or before (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        before: Option<String>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show corpus statistics
    Stats,

    /// Show aging and stale notes
    Aging {
        /// Age in days at which a note counts as aging
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Show a note and its related notes
    Show { id: Uuid },

    /// Append text to a note
    Append {
        id: Uuid,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Tag to add (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Delete a note
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing(&LogSettings::from_env());

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let service = ThoughtService::from_config(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::Init => {
            service.initialize().await?;
            println!(
                "Initialized ponder storage at {}",
                config.storage.storage_path().display()
            );
        }
        Commands::Capture {
            content,
            tag,
            context,
            repository,
        } => {
            service.initialize().await?;
            let request = CaptureRequest {
                content: content.join(" "),
                tags: tag,
                context,
                repository,
            };
            let outcome = service.capture(request).await?;
            if json {
                print_json(&outcome)?;
            } else {
                print!("{}", outcome.summary);
            }
        }
        Commands::Find {
            tag,
            query,
            after,
            before,
            limit,
        } => {
            let criteria = NoteCriteria {
                tags: (!tag.is_empty()).then_some(tag),
                content_substring: query,
                created_after: after.as_deref().map(|s| parse_date(s, false)).transpose()?,
                created_before: before.as_deref().map(|s| parse_date(s, true)).transpose()?,
                limit,
            };
            let notes = service.find_notes(&criteria).await?;
            if json {
                print_json(&notes)?;
            } else {
                print!("{}", render::note_list(&notes));
            }
        }
        Commands::Stats => {
            let stats = service.get_stats().await?;
            if json {
                print_json(&stats)?;
            } else {
                print!("{}", render::stats_report(&stats));
            }
        }
        Commands::Aging { days } => {
            let report = service.get_aging_report(days).await?;
            if json {
                print_json(&report)?;
            } else {
                print!("{}", render::aging_report(&report));
            }
        }
        Commands::Show { id } => {
            let note = service.get_note(id).await?;
            let related = service.related_notes(id).await?;
            if json {
                print_json(&serde_json::json!({ "note": note, "related": related }))?;
            } else {
                print!("{}", render::note_detail(&note, &related));
            }
        }
        Commands::Append { id, text, tag } => {
            let note = service.append_to_note(id, &text.join(" "), &tag).await?;
            if json {
                print_json(&note)?;
            } else {
                println!("Updated note {}", note.id);
            }
        }
        Commands::Delete { id } => {
            let deleted = service.delete_note(id).await?;
            if json {
                print_json(&serde_json::json!({ "id": id, "deleted": deleted }))?;
            } else if deleted {
                println!("Deleted note {}", id);
            } else {
                bail!("note {} not found", id);
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<PonderConfig> {
    match &cli.config {
        Some(path) => {
            let mut config = PonderConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?;
            if config.storage.workspace_root.is_none() {
                config.storage.workspace_root = Some(cli.workspace.clone());
            }
            Ok(config)
        }
        None => Ok(PonderConfig::load(&cli.workspace)?),
    }
}

/// Accepts RFC 3339 or a bare date; a bare upper bound covers the whole day.
fn parse_date(value: &str, end_of_day: bool) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", value))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    match time {
        Some(naive) => Ok(naive.and_utc()),
        None => bail!("invalid date '{}'", value),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
