//! Reminder Capture CLI tool
//!
//! A command-line tool for turning selected text into reminders.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reminder_capture::capture::{parse_due, preview, suggest, CaptureRecord, Source};
use reminder_capture::clock::{Clock, FixedClock, SystemClock};
use reminder_capture::date::format_detected;
use reminder_capture::export::{export_payload, ExportSettings, ExportTarget, DEFAULT_LIST_NAME};
use reminder_capture::store::{CaptureStore, DEFAULT_STORE_FILE};

/// Reminder Capture - Detect due dates in text and build reminders
#[derive(Parser)]
#[command(name = "reminder-capture")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show the detected date and suggested reminder
    reminder-capture extract \"Dentist tomorrow at 3:30 pm\"

    # Save a capture with the suggested due time
    reminder-capture capture --store reminders.json \"Dentist 09.01.2027 08:40 Uhr\"

    # Review and reschedule saved reminders
    reminder-capture list --store reminders.json
    reminder-capture set-due <ID> --due 2027-01-08T08:00 --store reminders.json

    # Build a calendar event from a saved reminder
    reminder-capture export reminders.json --id <ID> --target calendar")]
struct Cli {
    /// Pretend the current time is this RFC 3339 timestamp
    #[arg(long, global = true)]
    now: Option<String>,

    /// Log extraction decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect a date in text and suggest a reminder time
    Extract {
        /// Text to scan (multiple arguments are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Build a capture record from text
    Capture {
        /// Captured text (multiple arguments are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Due time, overriding the suggestion (RFC 3339 or "YYYY-MM-DDTHH:MM" local)
        #[arg(long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Store the capture without a due time
        #[arg(long)]
        no_due: bool,

        /// URL of the page the text came from
        #[arg(long, default_value = "")]
        source_url: String,

        /// Title of the page the text came from
        #[arg(long, default_value = "")]
        source_title: String,

        /// Write the record to this file instead of stdout
        #[arg(short, long, conflicts_with = "store")]
        output: Option<PathBuf>,

        /// Add the record to this reminders store instead of printing it
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Show saved reminders, newest first
    List {
        /// Reminders store file
        #[arg(long, default_value = DEFAULT_STORE_FILE)]
        store: PathBuf,
    },

    /// Delete a saved reminder
    Delete {
        /// Reminder id
        id: String,

        /// Reminders store file
        #[arg(long, default_value = DEFAULT_STORE_FILE)]
        store: PathBuf,
    },

    /// Change or clear the due time of a saved reminder
    SetDue {
        /// Reminder id
        id: String,

        /// New due time (RFC 3339 or "YYYY-MM-DDTHH:MM" local)
        #[arg(long, required_unless_present = "clear", conflicts_with = "clear")]
        due: Option<String>,

        /// Remove the due time
        #[arg(long)]
        clear: bool,

        /// Reminders store file
        #[arg(long, default_value = DEFAULT_STORE_FILE)]
        store: PathBuf,
    },

    /// Print the request body for sending a saved capture
    Export {
        /// Capture record file, or a reminders store when `--id` is given
        input: PathBuf,

        /// Id of the reminder to send from the store
        #[arg(long)]
        id: Option<String>,

        /// Destination
        #[arg(long, value_enum)]
        target: Target,

        /// Reminders list name (bridge only)
        #[arg(long, default_value = DEFAULT_LIST_NAME)]
        list_name: String,

        /// Event length in minutes (calendar only)
        #[arg(long, default_value_t = 60)]
        duration_minutes: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Calendar,
    Bridge,
}

impl From<Target> for ExportTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Calendar => ExportTarget::Calendar,
            Target::Bridge => ExportTarget::Bridge,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("reminder_capture=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Pick the clock, then run the command against it
fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.now.as_deref() {
        Some(now) => {
            let now = DateTime::parse_from_rfc3339(now)
                .with_context(|| format!("Invalid --now timestamp: {}", now))?;
            debug!("clock pinned to {}", now);
            dispatch(cli.command, &FixedClock::new(now))
        }
        None => dispatch(cli.command, &SystemClock),
    }
}

fn dispatch<C: Clock>(command: Commands, clock: &C) -> anyhow::Result<()>
where
    <C::Tz as TimeZone>::Offset: fmt::Display,
{
    match command {
        Commands::Extract { text } => cmd_extract(&text.join(" "), clock),
        Commands::Capture {
            text,
            due,
            no_due,
            source_url,
            source_title,
            output,
            store,
        } => {
            let source = Source {
                url: source_url,
                title: source_title,
            };
            let destination = match (store, output) {
                (Some(store), _) => Destination::Store(store),
                (None, Some(path)) => Destination::File(path),
                (None, None) => Destination::Stdout,
            };
            cmd_capture(&text.join(" "), due.as_deref(), no_due, source, destination, clock)
        }
        Commands::List { store } => cmd_list(&store),
        Commands::Delete { id, store } => cmd_delete(&id, &store),
        Commands::SetDue {
            id,
            due,
            clear: _,
            store,
        } => cmd_set_due(&id, due.as_deref(), &store, clock),
        Commands::Export {
            input,
            id,
            target,
            list_name,
            duration_minutes,
        } => cmd_export(input, id.as_deref(), target.into(), list_name, duration_minutes),
    }
}

/// Where `capture` puts the new record
enum Destination {
    Stdout,
    File(PathBuf),
    Store(PathBuf),
}

/// Show the detected date and suggested reminder
fn cmd_extract<C: Clock>(text: &str, clock: &C) -> anyhow::Result<()>
where
    <C::Tz as TimeZone>::Offset: fmt::Display,
{
    let suggestion = suggest(text, clock);

    println!("Text: \"{}\"", preview(text));
    println!("{}", suggestion);
    if let Some(detection) = &suggestion.detection {
        println!("Matched: \"{}\" ({})", detection.matched, detection.rule.as_str());
    }
    if let Some(remind_at) = &suggestion.remind_at {
        println!("Remind at: {}", remind_at.to_rfc3339());
    }

    Ok(())
}

/// Build a capture record, pre-filling the due time from the suggestion
fn cmd_capture<C: Clock>(
    text: &str,
    due: Option<&str>,
    no_due: bool,
    source: Source,
    destination: Destination,
    clock: &C,
) -> anyhow::Result<()> {
    let now = clock.now();

    let due_at = if no_due {
        None
    } else if let Some(value) = due {
        Some(parse_due(value, &now.timezone())?)
    } else {
        Some(suggest(text, clock).default_due(now.clone()))
    };

    let record = CaptureRecord::new(text, due_at, source, now)?;

    match destination {
        Destination::Stdout => println!("{}", serde_json::to_string_pretty(&record)?),
        Destination::File(path) => {
            record
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Saved to: {}", path.display());
        }
        Destination::Store(path) => {
            let mut store = CaptureStore::open(&path)
                .with_context(|| format!("Failed to read store {}", path.display()))?;
            let id = store.add(record)?.id.clone();
            store
                .save(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Saved to: {}", path.display());
            println!("{}", id);
        }
    }

    Ok(())
}

/// List saved reminders
fn cmd_list(path: &Path) -> anyhow::Result<()> {
    let store = CaptureStore::open(path)
        .with_context(|| format!("Failed to read store {}", path.display()))?;

    if store.is_empty() {
        println!("No saved reminders");
        return Ok(());
    }

    for record in store.records() {
        let due = match &record.due_at {
            Some(due) => format_detected(due),
            None => "No date set".to_string(),
        };
        println!("{}  {}  {}", record.id, due, preview(&record.text));
    }
    eprintln!("{} reminder(s)", store.len());

    Ok(())
}

/// Delete a saved reminder by id
fn cmd_delete(id: &str, path: &Path) -> anyhow::Result<()> {
    let mut store = CaptureStore::load(path)
        .with_context(|| format!("Failed to read store {}", path.display()))?;
    let removed = store.remove(id)?;
    store.save(path)?;

    println!("Deleted: \"{}\"", preview(&removed.text));
    Ok(())
}

/// Set or clear the due time of a saved reminder
fn cmd_set_due<C: Clock>(
    id: &str,
    due: Option<&str>,
    path: &Path,
    clock: &C,
) -> anyhow::Result<()> {
    let due_at = due
        .map(|value| parse_due(value, &clock.now().timezone()))
        .transpose()?;

    let mut store = CaptureStore::load(path)
        .with_context(|| format!("Failed to read store {}", path.display()))?;
    let updated = store.set_due(id, due_at)?.due_at;
    store.save(path)?;

    match updated {
        Some(due) => println!("Date/time updated: {}", due.to_rfc3339()),
        None => println!("Date/time cleared"),
    }
    Ok(())
}

/// Print the JSON body for the chosen destination
fn cmd_export(
    input: PathBuf,
    id: Option<&str>,
    target: ExportTarget,
    list_name: String,
    duration_minutes: i64,
) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let settings = ExportSettings::new(list_name, duration_minutes)?;

    let record = match id {
        Some(id) => {
            let store = CaptureStore::load(&input)
                .with_context(|| format!("Failed to read store {}", input.display()))?;
            store.find(id)?.clone()
        }
        None => CaptureRecord::load(&input)
            .with_context(|| format!("Failed to read capture {}", input.display()))?,
    };

    let payload = export_payload(&record, target, &settings)?;

    eprintln!("Payload for {}:", target.name());
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
