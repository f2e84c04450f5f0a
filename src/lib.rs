//! Punchcard - attendance classification engine for biometric punch-log exports
//!
//! Punchcard turns a raw biometric attendance export (paired IN/OUT log rows
//! per employee) into a per-employee monthly summary through a deterministic
//! pipeline: schema resolution → reshaping → rule-based day scoring → report
//! assembly.
//!
//! ## Modules
//!
//! - **schema/reshape**: Resolve the export's columns and pair IN/OUT rows
//!   into typed per-day entries
//! - **roster/rules**: Select the trainer or non-trainer rule set and score
//!   each day into the six monthly tallies
//! - **pipeline**: Orchestrate the full run and assemble the report

pub mod calendar;
pub mod error;
pub mod pipeline;
pub mod reshape;
pub mod roster;
pub mod rules;
pub mod schema;
pub mod types;

pub use calendar::Period;
pub use error::ProcessError;
pub use pipeline::{process_attendance, AttendanceProcessor};
pub use roster::Roster;
pub use rules::{RuleSet, TimeWindow};
pub use schema::{SchemaConfig, TableSchema};
pub use types::{
    AttendanceEntry, AttendanceReport, Cell, EmployeeCategory, EmployeeSummary, RawLogTable,
};

/// Punchcard version embedded in all report payloads
pub const PUNCHCARD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "punchcard";
