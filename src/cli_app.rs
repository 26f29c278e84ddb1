//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use friction_lab::catalog::registry::DemoCatalog;
use friction_lab::catalog::sample_data;
use friction_lab::core::config::Config;
use friction_lab::core::mode::Mode;
use friction_lab::filter::evaluate::{EvalContext, evaluate};
use friction_lab::filter::predicate::{FilterPredicate, FilterQuery, RecencyWindow, SizeBucket};
use friction_lab::filter::record::FieldValue;
use friction_lab::logger::jsonl::{EventType, JsonlWriter, LogEntry, Severity};
use friction_lab::scheduler::delay::DelayRange;
use friction_lab::session::autosave::{DraftEvent, DraftSession};
use friction_lab::session::interrupt::{InterruptEvent, InterruptSession, Interruption};

/// Friction Lab — bad-UX vs. good-UX interaction demos on the command line.
#[derive(Debug, Parser)]
#[command(
    name = "frl",
    author,
    version,
    about = "Friction Lab - UX friction demos",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List the demo catalog.
    List(ListArgs),
    /// Show one demo in detail.
    Show(ShowArgs),
    /// Run facet filters over the sample user table.
    Filter(FilterArgs),
    /// Drive an interrupt-trap session in real time.
    Trap(TrapArgs),
    /// Simulate the crash/autosave draft session on a virtual clock.
    Autosave(AutosaveArgs),
    /// View and validate configuration state.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct ListArgs {
    /// Narrow the listing with a free-text search.
    #[arg(long, value_name = "NEEDLE")]
    search: Option<String>,
}

#[derive(Debug, Clone, Args)]
struct ShowArgs {
    /// Demo slug (see `frl list`).
    #[arg(value_name = "SLUG")]
    slug: String,
}

#[derive(Debug, Clone, Args, Default)]
struct FilterArgs {
    /// Column filter, `COLUMN=TEXT` (repeatable, AND-composed).
    #[arg(long = "where", value_name = "COLUMN=TEXT")]
    wheres: Vec<String>,
    /// Global search across name, email, city, and address.
    #[arg(long, value_name = "TEXT")]
    search: Option<String>,
    /// Shoe-size bucket filter.
    #[arg(long, value_name = "small|medium|large")]
    size: Option<String>,
    /// Recency filter on last_updated.
    #[arg(long, value_name = "week|month|older")]
    updated: Option<String>,
    /// Reference date for recency windows (defaults to the sample set's
    /// pinned date).
    #[arg(long, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
struct TrapArgs {
    /// Rendition mode.
    #[arg(long, value_name = "bad|good|bad_v2")]
    mode: String,
    /// Fixed trap delay instead of the configured random range.
    #[arg(long, value_name = "MILLISECONDS")]
    delay_ms: Option<u64>,
    /// Cancel the trap this long after arming (demonstrates that a
    /// cancelled trap never fires).
    #[arg(long, value_name = "MILLISECONDS")]
    cancel_after_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
struct AutosaveArgs {
    /// Rendition mode.
    #[arg(long, value_name = "bad|good|bad_v2")]
    mode: String,
    /// Virtual seconds to simulate.
    #[arg(long, default_value_t = 90, value_name = "SECONDS")]
    seconds: u64,
}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    /// Print the resolved config file path only.
    #[arg(long)]
    path: bool,
    /// Validate the configuration and exit.
    #[arg(long)]
    validate: bool,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Json(_) => 3,
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::List(args) => run_list(cli, args),
        Command::Show(args) => run_show(cli, args),
        Command::Filter(args) => run_filter(cli, args),
        Command::Trap(args) => run_trap(cli, args),
        Command::Autosave(args) => run_autosave(cli, args),
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

fn run_list(cli: &Cli, args: &ListArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let catalog = DemoCatalog::standard();
    let ctx = eval_context(&config, None);

    let entries = match args.search.as_deref() {
        Some(needle) => catalog.search(needle, &ctx),
        None => catalog.entries().to_vec(),
    };

    match output_mode(cli) {
        OutputMode::Human => {
            for entry in &entries {
                println!(
                    "{:<22}  {}",
                    entry.slug.bold(),
                    entry.description.dimmed()
                );
            }
            if entries.is_empty() {
                println!("no demos match");
            }
        }
        OutputMode::Json => {
            write_json_line(&serde_json::to_value(&entries)?)?;
        }
    }
    Ok(())
}

fn run_show(cli: &Cli, args: &ShowArgs) -> Result<(), CliError> {
    let catalog = DemoCatalog::standard();
    let entry = catalog
        .by_slug(&args.slug)
        .map_err(|e| CliError::User(e.to_string()))?;

    match output_mode(cli) {
        OutputMode::Human => {
            println!("{}", entry.title.bold());
            println!("  Slug: {}", entry.slug);
            println!("  {}", entry.description);
            if entry.kind.uses_scheduler() {
                println!("  Mechanism: deferred action scheduler");
            }
            if entry.kind.uses_filter() {
                println!("  Mechanism: facet filter evaluator");
            }
        }
        OutputMode::Json => {
            let payload = json!({
                "slug": entry.slug,
                "title": entry.title,
                "description": entry.description,
                "uses_scheduler": entry.kind.uses_scheduler(),
                "uses_filter": entry.kind.uses_filter(),
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// filter
// ---------------------------------------------------------------------------

fn run_filter(cli: &Cli, args: &FilterArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let ctx = eval_context(&config, args.as_of);
    let query = build_query(args)?;

    let users = sample_data::sample_users();
    let matched = evaluate(&users, &query, &ctx);

    if let Some(mut telemetry) = telemetry_writer(&config) {
        let mut entry = LogEntry::new(EventType::FilterEvaluated, Severity::Info)
            .demo("filter-by-one");
        entry.matched = Some(matched.len());
        entry.total = Some(users.len());
        telemetry.write_entry(&entry);
    }

    match output_mode(cli) {
        OutputMode::Human => {
            println!(
                "  {:<16}  {:<26}  {:<14}  {:>5}  {:<12}",
                "Name", "Email", "City", "Size", "Updated"
            );
            println!("  {}", "-".repeat(80));
            for record in &matched {
                println!(
                    "  {:<16}  {:<26}  {:<14}  {:>5}  {:<12}",
                    field_text(record.get("name")),
                    field_text(record.get("email")),
                    field_text(record.get("city")),
                    field_text(record.get("shoe_size")),
                    field_text(record.get("last_updated")),
                );
            }
            println!("\n{} of {} users match", matched.len(), users.len());
        }
        OutputMode::Json => {
            let payload = json!({
                "matched": matched.len(),
                "total": users.len(),
                "query": serde_json::to_value(&query)?,
                "records": serde_json::to_value(&matched)?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn field_text(field: Option<&FieldValue>) -> String {
    field.map(FieldValue::search_text).unwrap_or_default()
}

fn build_query(args: &FilterArgs) -> Result<FilterQuery, CliError> {
    let mut query = FilterQuery::new();
    for raw in &args.wheres {
        let predicate =
            FilterPredicate::parse_column_filter(raw).map_err(|e| CliError::User(e.to_string()))?;
        // The evaluator treats unknown fields as non-matching; at the CLI
        // edge a typo'd column is a user error instead.
        if let FilterPredicate::ColumnContains { column, .. } = &predicate {
            if !sample_data::USER_FIELDS.contains(&column.as_str()) {
                return Err(CliError::User(
                    friction_lab::core::errors::FrlError::UnknownField {
                        field: column.clone(),
                    }
                    .to_string(),
                ));
            }
        }
        query.push(predicate);
    }
    if let Some(needle) = &args.search {
        query.push(FilterPredicate::GlobalContains {
            value: needle.clone(),
            fields: sample_data::user_search_fields(),
        });
    }
    if let Some(raw) = &args.size {
        let bucket: SizeBucket = raw.parse().map_err(|e: friction_lab::core::errors::FrlError| {
            CliError::User(e.to_string())
        })?;
        query.push(FilterPredicate::CategoricalRange {
            field: "shoe_size".to_string(),
            bucket,
        });
    }
    if let Some(raw) = &args.updated {
        let window: RecencyWindow =
            raw.parse().map_err(|e: friction_lab::core::errors::FrlError| {
                CliError::User(e.to_string())
            })?;
        query.push(FilterPredicate::RelativeTime {
            field: "last_updated".to_string(),
            window,
        });
    }
    Ok(query)
}

fn eval_context(config: &Config, as_of: Option<NaiveDate>) -> EvalContext {
    let fallback = as_of.unwrap_or_else(sample_data::reference_date);
    let mut ctx = EvalContext::from_config(config, fallback);
    // An explicit --as-of beats the config's pinned date.
    if let Some(date) = as_of {
        ctx.reference_date = date;
    }
    ctx
}

// ---------------------------------------------------------------------------
// trap
// ---------------------------------------------------------------------------

fn run_trap(cli: &Cli, args: &TrapArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mode: Mode = args
        .mode
        .parse()
        .map_err(|e: friction_lab::core::errors::FrlError| CliError::User(e.to_string()))?;

    let delay_range = match args.delay_ms {
        Some(ms) => DelayRange::fixed(Duration::from_millis(ms)),
        None => DelayRange::from_millis(
            config.scheduler.trap_delay_min_ms,
            config.scheduler.trap_delay_max_ms,
        ),
    };

    let mut telemetry = telemetry_writer(&config);
    let mut session = InterruptSession::new(mode, delay_range);
    let human = output_mode(cli) == OutputMode::Human;
    let mut timeline: Vec<Value> = Vec::new();

    let start = Instant::now();
    let armed = session.type_text(start, "An important draft the user is typing");
    if let Some(InterruptEvent::TrapArmed(id)) = armed {
        let remaining = session.trap_remaining(start).unwrap_or_default();
        if human {
            println!(
                "Typing in {} mode... trap armed, fires in {:.1}s",
                mode.label().bold(),
                remaining.as_secs_f64()
            );
        }
        timeline.push(json!({ "event": "armed", "at_ms": 0 }));
        if let Some(w) = telemetry.as_mut() {
            let mut entry = LogEntry::new(EventType::TimerArmed, Severity::Info)
                .demo("modal-from-nowhere")
                .mode(mode.label());
            entry.action_id = Some(id.value());
            entry.delay_ms = Some(u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX));
            w.write_entry(&entry);
        }
    }

    let cancel_at = args
        .cancel_after_ms
        .map(|ms| start + Duration::from_millis(ms));

    let ticks = crossbeam_channel::tick(Duration::from_millis(50));
    let fired = loop {
        let now = ticks
            .recv()
            .map_err(|e| CliError::Runtime(format!("tick channel closed: {e}")))?;

        if let Some(deadline) = cancel_at {
            if now >= deadline && session.cancel_trap().is_some() {
                if human {
                    println!("Trap cancelled at t+{:.1}s. Nothing will fire.", elapsed_s(start, now));
                }
                timeline.push(json!({ "event": "cancelled", "at_ms": elapsed_ms(start, now) }));
                if let Some(w) = telemetry.as_mut() {
                    w.write_entry(
                        &LogEntry::new(EventType::TimerCancelled, Severity::Info)
                            .demo("modal-from-nowhere")
                            .mode(mode.label()),
                    );
                }
                break None;
            }
        }

        if let Some(InterruptEvent::TrapFired(kind)) = session.poll(now) {
            timeline.push(json!({ "event": "fired", "at_ms": elapsed_ms(start, now) }));
            if let Some(w) = telemetry.as_mut() {
                w.write_entry(
                    &LogEntry::new(EventType::TimerFired, Severity::Info)
                        .demo("modal-from-nowhere")
                        .mode(mode.label()),
                );
            }
            break Some((kind, now));
        }
    };

    if let Some((kind, now)) = fired {
        match kind {
            Interruption::BlockingModal => {
                let draft_len = session.draft().len();
                if human {
                    println!(
                        "t+{:.1}s  {} A modal seized focus. Input is blocked.",
                        elapsed_s(start, now),
                        "BLOCKING MODAL:".red().bold()
                    );
                }
                // The destructive path the bad rendition railroads you into.
                if let Some(InterruptEvent::DraftDiscarded(lost)) = session.acknowledge_modal(true)
                {
                    if human {
                        println!("         [OK] pressed: {lost} draft characters discarded.");
                        if let Some(status) = session.status() {
                            println!("         {status}");
                        }
                    }
                    timeline.push(json!({ "event": "draft_discarded", "chars_lost": lost }));
                }
                debug_assert_eq!(session.draft().len(), 0, "modal OK clears {draft_len} chars");
            }
            Interruption::DismissableToast => {
                if human {
                    println!(
                        "t+{:.1}s  {} A toast slid in. Draft untouched.",
                        elapsed_s(start, now),
                        "toast:".green().bold()
                    );
                }
                session.dismiss_toast();
                timeline.push(json!({ "event": "toast_dismissed", "draft_chars": session.draft().len() }));
            }
        }
    }

    if output_mode(cli) == OutputMode::Json {
        write_json_line(&json!({
            "mode": mode.label(),
            "timeline": timeline,
            "draft_chars": session.draft().len(),
        }))?;
    }
    Ok(())
}

fn elapsed_s(start: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(start).as_secs_f64()
}

fn elapsed_ms(start: Instant, now: Instant) -> u64 {
    u64::try_from(now.saturating_duration_since(start).as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// autosave
// ---------------------------------------------------------------------------

fn run_autosave(cli: &Cli, args: &AutosaveArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mode: Mode = args
        .mode
        .parse()
        .map_err(|e: friction_lab::core::errors::FrlError| CliError::User(e.to_string()))?;

    let crash = Duration::from_secs(config.scheduler.crash_interval_secs);
    let autosave = Duration::from_secs(config.scheduler.autosave_interval_secs);

    let mut telemetry = telemetry_writer(&config);
    let start = Instant::now();
    let mut session = DraftSession::new(mode, start, crash, autosave);
    let human = output_mode(cli) == OutputMode::Human;
    let mut timeline: Vec<Value> = Vec::new();

    // Virtual clock: one simulated second per step, no sleeping. The user
    // types steadily; bad mode saves manually once mid-interval.
    for second in 1..=args.seconds {
        let now = start + Duration::from_secs(second);
        session.type_text("word ");
        if mode != Mode::Good && second % 20 == 0 && session.manual_save().is_some() {
            if human {
                println!("t+{second:>3}s  manual save ({} chars safe)", session.text().len());
            }
            timeline.push(json!({ "at_s": second, "event": "manual_save" }));
        }

        for event in session.poll(now) {
            match event {
                DraftEvent::AutoSaved => {
                    if human {
                        println!("t+{second:>3}s  autosave checkpoint");
                    }
                    timeline.push(json!({ "at_s": second, "event": "autosave" }));
                    if let Some(w) = telemetry.as_mut() {
                        w.write_entry(
                            &LogEntry::new(EventType::AutosaveCheckpoint, Severity::Info)
                                .demo("hit-save")
                                .mode(mode.label()),
                        );
                    }
                }
                DraftEvent::ManualSaved => {}
                DraftEvent::Crashed { chars_lost } => {
                    if human {
                        let marker = if chars_lost == 0 {
                            "crash: nothing lost".green().to_string()
                        } else {
                            format!("crash: {chars_lost} chars lost").red().to_string()
                        };
                        println!("t+{second:>3}s  {marker}");
                    }
                    timeline.push(json!({ "at_s": second, "event": "crash", "chars_lost": chars_lost }));
                    if let Some(w) = telemetry.as_mut() {
                        let mut entry = LogEntry::new(EventType::CrashRollback, Severity::Warning)
                            .demo("hit-save")
                            .mode(mode.label());
                        entry.chars_lost = Some(chars_lost);
                        w.write_entry(&entry);
                    }
                }
            }
        }
    }

    if human {
        println!(
            "\n{} crashes, {} characters lost in {}s of {} mode",
            session.crash_count(),
            session.total_chars_lost(),
            args.seconds,
            mode.label()
        );
    } else {
        write_json_line(&json!({
            "mode": mode.label(),
            "seconds": args.seconds,
            "crashes": session.crash_count(),
            "total_chars_lost": session.total_chars_lost(),
            "timeline": timeline,
        }))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    if args.path {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(Config::default_path);
        println!("{}", path.display());
        return Ok(());
    }

    let config = load_config(cli)?;

    if args.validate {
        config
            .validate()
            .map_err(|e| CliError::User(e.to_string()))?;
        match output_mode(cli) {
            OutputMode::Human => println!("configuration OK"),
            OutputMode::Json => write_json_line(&json!({ "valid": true }))?,
        }
        return Ok(());
    }

    match output_mode(cli) {
        OutputMode::Human => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| CliError::Runtime(e.to_string()))?;
            print!("{rendered}");
        }
        OutputMode::Json => {
            write_json_line(&serde_json::to_value(&config)?)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// shared helpers
// ---------------------------------------------------------------------------

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    Config::load(cli.config.as_deref()).map_err(|e| CliError::Runtime(e.to_string()))
}

fn telemetry_writer(config: &Config) -> Option<JsonlWriter> {
    config
        .telemetry
        .enabled
        .then(|| JsonlWriter::open(config.telemetry.jsonl_path.clone()))
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("FRL_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        Some("auto") | None => fallback,
        Some(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_filter_flags() {
        let cli = Cli::parse_from([
            "frl", "filter", "--where", "city=Boston", "--search", "sarah", "--size", "large",
            "--updated", "week",
        ]);
        let Command::Filter(args) = cli.command else {
            panic!("expected filter subcommand");
        };
        let query = build_query(&args).unwrap();
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn bad_column_filter_is_a_user_error() {
        let args = FilterArgs {
            wheres: vec!["no-equals-sign".to_string()],
            ..Default::default()
        };
        let err = build_query(&args).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_where_column_is_rejected() {
        let args = FilterArgs {
            wheres: vec!["hat_size=9".to_string()],
            ..Default::default()
        };
        let err = build_query(&args).unwrap_err();
        assert!(err.to_string().contains("FRL-2002"), "{err}");
    }

    #[test]
    fn output_mode_resolution_honors_precedence() {
        // --json beats everything.
        assert_eq!(resolve_output_mode(true, Some("human"), true), OutputMode::Json);
        // Env var beats TTY detection.
        assert_eq!(resolve_output_mode(false, Some("json"), true), OutputMode::Json);
        assert_eq!(resolve_output_mode(false, Some("human"), false), OutputMode::Human);
        // No hints: TTY decides.
        assert_eq!(resolve_output_mode(false, None, true), OutputMode::Human);
        assert_eq!(resolve_output_mode(false, None, false), OutputMode::Json);
    }

    #[test]
    fn explicit_as_of_beats_config_reference_date() {
        let mut config = Config::default();
        config.recency.reference_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 12);
        let ctx = eval_context(&config, as_of);
        assert_eq!(ctx.reference_date, as_of.unwrap());
    }
}
