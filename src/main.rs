//! CLI entry point for the student roster tool.
//!
//! Loads the master roster once and writes one grade-sorted CSV per course
//! prefix given on the command line.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_roster::config::{RosterConfig, WriteFailurePolicy};
use student_roster::output::{print_json, print_pretty, summarize};
use student_roster::transform::run;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_roster")]
#[command(about = "Split a student roster into per-course CSVs sorted by grade", long_about = None)]
struct Cli {
    /// Course prefixes, one output file per prefix in the order given
    #[arg(value_name = "COURSE", required = true)]
    courses: Vec<String>,

    /// JSON config file; other flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Master roster CSV to read
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the course files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Course file name, `{}` is replaced by the course position (e.g. "course{}.csv")
    #[arg(short, long)]
    template: Option<String>,

    /// Stop at the first course file that cannot be written
    #[arg(long, default_value_t = false)]
    fail_fast: bool,

    /// Print the run report as JSON on stdout (logs stay on stderr)
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn roster_config(&self) -> Result<RosterConfig> {
        let mut config = match &self.config {
            Some(path) => RosterConfig::load(path)?,
            None => RosterConfig::default(),
        };

        if let Some(input) = &self.input {
            config.master_path = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(template) = &self.template {
            config.file_template = template.clone();
        }
        if self.fail_fast {
            config.on_write_error = WriteFailurePolicy::Abort;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/student_roster.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_roster.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = cli.roster_config()?;
    info!(
        master = %config.master_path.display(),
        output_dir = %config.output_dir.display(),
        policy = ?config.on_write_error,
        "Starting roster run"
    );

    let report = run(&config, cli.courses.as_slice())?;

    print_pretty(&report);
    if cli.json {
        print_json(&report)?;
    } else {
        summarize(&report);
    }

    Ok(())
}
