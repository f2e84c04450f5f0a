//! Punchcard CLI - Command-line interface for the attendance engine
//!
//! Commands:
//! - report: Process a raw log table into a monthly attendance report
//! - validate: Check an export's shape without producing a report
//! - schema: Print the expected input document shape

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use punchcard::pipeline::AttendanceProcessor;
use punchcard::schema::{SchemaConfig, TableSchema};
use punchcard::types::{AttendanceReport, RawLogTable};
use punchcard::{reshape, ProcessError, Roster, PUNCHCARD_VERSION};

/// Punchcard - derive monthly attendance summaries from punch-log exports
#[derive(Parser)]
#[command(name = "punchcard")]
#[command(version = PUNCHCARD_VERSION)]
#[command(about = "Classify biometric attendance logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a raw log table into a monthly attendance report
    Report {
        /// Input table JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Target year (2000-2100)
        #[arg(short, long)]
        year: i32,

        /// Target month (1-12)
        #[arg(short, long)]
        month: u32,

        /// Trainer roster JSON file; everyone is a non-trainer without it
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Header of the employee-name column
        #[arg(long, default_value = "Name")]
        name_header: String,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },

    /// Check an export's shape without producing a report
    Validate {
        /// Input table JSON file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Header of the employee-name column
        #[arg(long, default_value = "Name")]
        name_header: String,
    },

    /// Print the expected input document shape
    Schema,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON report payload
    Json,
    /// Pretty-printed JSON report payload
    JsonPretty,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Process(#[from] ProcessError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Report {
            input,
            output,
            year,
            month,
            roster,
            name_header,
            format,
        } => cmd_report(
            &input,
            &output,
            year,
            month,
            roster.as_deref(),
            name_header,
            &format,
        ),
        Commands::Validate { input, name_header } => cmd_validate(&input, name_header),
        Commands::Schema => {
            print!("{}", input_schema_text());
            Ok(())
        }
    }
}

fn cmd_report(
    input: &Path,
    output: &Path,
    year: i32,
    month: u32,
    roster_path: Option<&Path>,
    name_header: String,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let table = RawLogTable::from_json(&read_input(input)?)?;

    let roster = match roster_path {
        Some(path) => Roster::from_json(&fs::read_to_string(path)?)?,
        None => Roster::new(),
    };

    let processor = AttendanceProcessor::with_roster(roster)
        .with_schema_config(SchemaConfig { name_header });
    let report = processor.process(&table, year, month)?;

    let rendered = match format {
        OutputFormat::Table => render_table(&report),
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };

    if output.to_string_lossy() == "-" {
        println!("{}", rendered.trim_end());
    } else {
        fs::write(output, rendered)?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, name_header: String) -> Result<(), CliError> {
    let table = RawLogTable::from_json(&read_input(input)?)?;
    let schema = TableSchema::resolve(&table, &SchemaConfig { name_header })?;
    let employees = reshape::reshape(&table, &schema)?;

    println!(
        "ok: {} rows, {} day columns, {} employees",
        table.rows.len(),
        schema.day_columns.len(),
        employees.len()
    );
    Ok(())
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Render the report as an aligned text table
fn render_table(report: &AttendanceReport) -> String {
    let name_width = report
        .employees
        .iter()
        .map(|e| e.name.len())
        .chain(std::iter::once("Emp Name".len()))
        .max()
        .unwrap_or(8);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Attendance report {}-{:02} ({} v{})",
        report.year, report.month, report.producer.name, report.producer.version
    );
    let header = &AttendanceReport::COLUMNS;
    let _ = write!(out, "{:<name_width$}", header[0]);
    for column in &header[1..] {
        let _ = write!(out, "  {:>13}", column);
    }
    let _ = writeln!(out);

    for employee in &report.employees {
        let _ = write!(out, "{:<name_width$}", employee.name);
        for value in [
            employee.sunday as i64,
            employee.full_day as i64,
            employee.late_in as i64,
            employee.half_day as i64,
            employee.early_out as i64,
            employee.leave as i64,
            employee.missed_in_out as i64,
        ] {
            let _ = write!(out, "  {:>13}", value);
        }
        let _ = writeln!(out);
    }

    out
}

fn input_schema_text() -> &'static str {
    r#"Input document (JSON):

{
  "columns": ["AC-No.", "Name", "1", "2", ..., "31"],
  "rows": [
    [<cell>, ...],   // IN row: employee name in the "Name" column
    [<cell>, ...],   // OUT row: packed "HH:MM...HH:MM" strings in day columns
    ...
  ]
}

Cells are strings, numbers, or null. Rows come in adjacent (IN, OUT) pairs
per employee; day columns are headers parsing as 1-31. The roster document
is {"trainers": ["name", ...]} with exact, case-sensitive names.
"#
}
