//! CLI binary for study-pdf.
//!
//! A thin shim over the library crate: maps flags to `StudyConfig`, runs the
//! requested operations in one session and prints the resulting panels.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use study_pdf::present::{questions_panel_title, render_question_styled};
use study_pdf::{
    InvokeOutcome, Operation, OperationResult, Selection, SessionObserver, SharedObserver,
    SkipReason, StudyConfig, StudySession, ViewState, DEFAULT_BASE_URL,
};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: &str, s: &str) -> String {
    format!("\x1b[{code}m{s}\x1b[0m")
}
fn green(s: &str) -> String {
    paint("32", s)
}
fn red(s: &str) -> String {
    paint("31", s)
}
fn dim(s: &str) -> String {
    paint("2", s)
}
fn bold(s: &str) -> String {
    paint("1", s)
}
fn cyan(s: &str) -> String {
    paint("36", s)
}

// ── Session observer using indicatif ─────────────────────────────────────────

/// Terminal observer: a spinner while a request is in flight, a red alert
/// line when one fails.
struct CliObserver {
    show_progress: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl CliObserver {
    fn new(show_progress: bool) -> Arc<Self> {
        Arc::new(Self {
            show_progress,
            bar: Mutex::new(None),
        })
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

impl SessionObserver for CliObserver {
    fn on_request_start(&self, operation: Operation) {
        if !self.show_progress {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Processing");
        bar.set_message(operation.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        *self.bar.lock().unwrap() = Some(bar);
    }

    fn on_request_complete(&self, operation: Operation, result: &OperationResult) {
        self.clear_bar();
        if !self.show_progress {
            return;
        }
        let mut parts = Vec::new();
        if result.summary.is_some() {
            parts.push("summary".to_string());
        }
        if let Some(ref qs) = result.questions {
            parts.push(format!("{} questions", qs.len()));
        }
        if parts.is_empty() {
            eprintln!("{} {}  {}", cyan("⚠"), bold(&operation.to_string()), dim("no content produced"));
        } else {
            eprintln!("{} {}  {}", green("✓"), bold(&operation.to_string()), dim(&parts.join(" + ")));
        }
    }

    fn on_processing_changed(&self, processing: bool) {
        if !processing {
            self.clear_bar();
        }
    }

    fn on_alert(&self, message: &str) {
        self.clear_bar();
        eprintln!("{} {}", red("✗"), red(message));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarise a PDF
  study-pdf notes.pdf --user-id u-123

  # Quiz questions from a local backend
  study-pdf lecture.pdf -o questions --base-url http://localhost:8080

  # Summary first, then questions, in one session
  study-pdf chapter3.pdf -o summarize -o questions

  # Machine-readable view state
  study-pdf notes.pdf -o study-material --json > view.json

OPERATIONS:
  summarize        POST /api/study/summarize
  questions        POST /api/study/generate-questions       (numberOfQuestions=5)
  study-material   POST /api/study/generate-study-material  (numberOfQuestions=5)

ENVIRONMENT VARIABLES:
  STUDY_PDF_BASE_URL   Backend root (default http://localhost:8080)
  STUDY_PDF_USER_ID    User identifier sent as `userId`
  STUDY_PDF_TIMEOUT    Transport timeout in seconds (default: none)
  RUST_LOG             Override log filter (e.g. study_pdf=debug)
"#;

/// Turn a PDF into a summary and study questions via a study backend.
#[derive(Parser, Debug)]
#[command(
    name = "study-pdf",
    version,
    about = "Turn a PDF into a summary and study questions via a study backend",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to upload.
    input: PathBuf,

    /// Operation to run; repeat to run several in order.
    #[arg(short, long = "operation", value_enum)]
    operations: Vec<OperationArg>,

    /// Backend root URL.
    #[arg(long, env = "STUDY_PDF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// User identifier sent with every request.
    #[arg(long, env = "STUDY_PDF_USER_ID")]
    user_id: Option<String>,

    /// Transport timeout in seconds.
    #[arg(long, env = "STUDY_PDF_TIMEOUT")]
    timeout: Option<u64>,

    /// Print the final view state as JSON instead of panels.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OperationArg {
    #[value(alias = "summary")]
    Summarize,
    #[value(alias = "generate-questions")]
    Questions,
    #[value(alias = "generate-study-material")]
    StudyMaterial,
}

impl From<OperationArg> for Operation {
    fn from(v: OperationArg) -> Self {
        match v {
            OperationArg::Summarize => Operation::Summarize,
            OperationArg::Questions => Operation::GenerateQuestions,
            OperationArg::StudyMaterial => Operation::GenerateStudyMaterial,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build session ────────────────────────────────────────────────────
    let observer = CliObserver::new(show_progress);
    let mut builder = StudyConfig::builder()
        .base_url(&cli.base_url)
        .observer(observer as SharedObserver);
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout_secs(secs);
    }
    let config = builder.build().context("Invalid configuration")?;

    let session = StudySession::with_http(config, cli.user_id.clone())
        .context("Failed to create session")?;

    // ── Intake ───────────────────────────────────────────────────────────
    let selection = session
        .select_path(&cli.input)
        .await
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    if selection == Selection::Ignored && !cli.quiet {
        eprintln!(
            "{} {}",
            cyan("⚠"),
            dim(&format!("{} is not a PDF; nothing will be sent", cli.input.display()))
        );
    }

    // ── Run operations ───────────────────────────────────────────────────
    let operations: Vec<Operation> = if cli.operations.is_empty() {
        vec![Operation::Summarize]
    } else {
        cli.operations.iter().map(|&o| o.into()).collect()
    };

    let mut failures = 0usize;
    for operation in operations {
        match session.run(operation).await {
            Ok(InvokeOutcome::Skipped(reason)) => {
                if !cli.quiet {
                    eprintln!(
                        "{} {}  {}",
                        cyan("⚠"),
                        bold(&operation.to_string()),
                        dim(&format!("skipped: {}", describe_skip(reason)))
                    );
                }
            }
            Ok(InvokeOutcome::Completed(_)) => {}
            // The observer already printed the alert.
            Err(_) => failures += 1,
        }
    }

    // ── Output ───────────────────────────────────────────────────────────
    let view = session.view();
    if cli.json {
        let json = serde_json::to_string_pretty(&view).context("Failed to serialise view")?;
        println!("{json}");
    } else {
        print_view(&view, io::stdout().is_terminal());
    }

    if failures > 0 {
        anyhow::bail!("{failures} request(s) failed");
    }
    Ok(())
}

fn describe_skip(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NoFile => "no PDF selected",
        SkipReason::NoUser => "no user id (set --user-id or STUDY_PDF_USER_ID)",
        SkipReason::Busy => "another request is in flight",
    }
}

/// Print the results area: a summary panel and a question panel, each only
/// when it has data.
fn print_view(view: &ViewState, color: bool) {
    if !view.has_results() {
        return;
    }
    let style = |f: fn(&str) -> String, s: &str| if color { f(s) } else { s.to_string() };

    println!("{}", style(bold, "Generated Content"));

    if view.summary().is_some() {
        println!();
        match view.expanded_summary() {
            Some(text) => {
                println!("▾ {}", style(bold, "AI Summary"));
                println!("{text}");
            }
            None => println!("▸ {}", style(bold, "AI Summary")),
        }
    }

    let count = view.questions().len();
    if count > 0 {
        println!();
        let title = questions_panel_title(count);
        let Some(questions) = view.expanded_questions() else {
            println!("▸ {}", style(bold, &title));
            return;
        };
        println!("▾ {}", style(bold, &title));
        for (i, q) in questions.iter().enumerate() {
            println!();
            let lines = render_question_styled(i + 1, q, |indicator, difficulty| {
                if color {
                    paint(indicator.ansi_code(), difficulty)
                } else {
                    difficulty.to_string()
                }
            });
            for line in lines {
                println!("{line}");
            }
        }
    }
}
