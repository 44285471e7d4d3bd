//! CLI entry point for the course query service.
//!
//! Provides one subcommand per public query: course and instructor lookups,
//! the list-all queries, schedule search and grade distributions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_query::{
    catalog::JsonCatalog,
    config::Config,
    fetch::BasicClient,
    grades::GradeFilter,
    infra::{CsvGradeStore, WebSocClient},
    output::{append_distributions, write_json},
    query::QueryService,
    schedule::ScheduleQueryArgs,
};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "course_query")]
#[command(about = "Query courses, instructors, schedules and grade distributions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a course by id, e.g. COMPSCI161
    Course {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Look up an instructor by ucinetid
    Instructor {
        #[arg(value_name = "UCINETID")]
        ucinetid: String,
    },
    /// List every course in the catalog
    AllCourses,
    /// List every instructor in the catalog
    AllInstructors,
    /// Search the class schedule for a term
    Schedule {
        #[command(flatten)]
        args: ScheduleQueryArgs,
    },
    /// Grade distributions matching the given filters
    Grades {
        #[command(flatten)]
        filter: GradeFilter,

        /// Also append the distributions to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&config.log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&config.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("course_query.log"));

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
    let service = build_service(&config)?;
    let stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Course { id } => {
            let course = service.course(&id)?;
            if course.is_none() {
                warn!(id = %id, "Course not found");
            }
            write_json(stdout, &course)?;
        }
        Commands::Instructor { ucinetid } => {
            let instructor = service.instructor(&ucinetid)?;
            if instructor.is_none() {
                warn!(ucinetid = %ucinetid, "Instructor not found");
            }
            write_json(stdout, &instructor)?;
        }
        Commands::AllCourses => {
            write_json(stdout, &service.all_courses())?;
        }
        Commands::AllInstructors => {
            write_json(stdout, &service.all_instructors())?;
        }
        Commands::Schedule { args } => {
            let offerings = service.schedule(&args).await?;
            write_json(stdout, &offerings)?;
        }
        Commands::Grades { filter, csv } => {
            let result = service.grades(&filter).await?;
            if let Some(path) = csv {
                append_distributions(&path, &result)
                    .with_context(|| format!("Failed to write '{path}'"))?;
                info!(path = %path, rows = result.grade_distributions.len(), "Distributions written");
            }
            write_json(stdout, &result)?;
        }
    }

    Ok(())
}

/// Loads the catalog and grade store and wires the HTTP schedule feed.
#[tracing::instrument(skip(config), fields(websoc = %config.websoc_url))]
fn build_service(config: &Config) -> Result<QueryService> {
    let catalog = JsonCatalog::load(&config.courses_path, &config.instructors_path)?;
    let grades = CsvGradeStore::load(&config.grades_path)?;
    let http = BasicClient::new(config.http_timeout).context("Failed to build HTTP client")?;
    let feed = WebSocClient::new(http, config.websoc_url.clone());

    Ok(QueryService::new(
        Arc::new(catalog),
        Arc::new(feed),
        Arc::new(grades),
    ))
}
