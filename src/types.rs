//! Core types for the Punchcard pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: the raw log table, reshaped per-employee day entries, per-day
//! tallies, and the final attendance report.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

/// A single cell of the raw log table
///
/// Biometric exports mix packed time strings, numeric device codes, and empty
/// cells in the same column, so the cell type is resolved per value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Returns the cell's text content, if it is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for cells with no value at all
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

/// Raw attendance log table as handed over by the file-parsing collaborator
///
/// Rows come in adjacent (IN, OUT) pairs per employee, in table order. The
/// IN row carries the employee name; the OUT row carries the packed
/// "INtime...OUTtime" string per day column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLogTable {
    /// Column headers, in table order
    pub columns: Vec<String>,
    /// Data rows; every row must have exactly one cell per column
    pub rows: Vec<Vec<Cell>>,
}

impl RawLogTable {
    /// Parse a table from its JSON document form and validate its shape
    pub fn from_json(json: &str) -> Result<Self, ProcessError> {
        let table: RawLogTable = serde_json::from_str(json)?;
        table.validate_shape()?;
        Ok(table)
    }

    /// Check that every row is as wide as the header
    pub fn validate_shape(&self) -> Result<(), ProcessError> {
        for (index, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(ProcessError::ShapeError(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }

    /// Index of the column with the given header, if present
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == header)
    }
}

/// Employee category selecting which rule set applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeCategory {
    Trainer,
    NonTrainer,
}

impl EmployeeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeCategory::Trainer => "trainer",
            EmployeeCategory::NonTrainer => "non_trainer",
        }
    }
}

/// One day's attendance for one employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceEntry {
    /// Both punches recorded for the day
    Present {
        clock_in: NaiveTime,
        clock_out: NaiveTime,
    },
    /// No punch data for the day
    Absent,
}

impl AttendanceEntry {
    pub fn is_absent(&self) -> bool {
        matches!(self, AttendanceEntry::Absent)
    }
}

/// Reshaped attendance data for one employee: one entry per day column
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDays {
    pub name: String,
    pub entries: Vec<AttendanceEntry>,
}

/// Running counters accumulated while scoring an employee's month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTally {
    pub full_day: u32,
    pub late_in: u32,
    pub half_day: u32,
    pub early_out: u32,
    pub leave: u32,
    pub missed: u32,
}

/// Monthly summary row for one employee
///
/// Serde renames produce the display column names used by the rendering
/// collaborator. `leave` is signed: the Sunday count is subtracted from the
/// raw leave tally and may exceed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    #[serde(rename = "Emp Name")]
    pub name: String,
    #[serde(rename = "Sunday")]
    pub sunday: u32,
    #[serde(rename = "Full Day")]
    pub full_day: u32,
    #[serde(rename = "Late In")]
    pub late_in: u32,
    #[serde(rename = "Half Day")]
    pub half_day: u32,
    #[serde(rename = "Early Out")]
    pub early_out: u32,
    #[serde(rename = "Leave")]
    pub leave: i32,
    #[serde(rename = "Missed In Out")]
    pub missed_in_out: u32,
}

/// Producer metadata embedded in every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete per-month attendance report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub producer: ReportProducer,
    pub year: i32,
    pub month: u32,
    pub generated_at: DateTime<Utc>,
    /// One row per surviving employee, in input table order
    pub employees: Vec<EmployeeSummary>,
}

impl AttendanceReport {
    /// Display column order for tabular rendering
    pub const COLUMNS: [&'static str; 8] = [
        "Emp Name",
        "Sunday",
        "Full Day",
        "Late In",
        "Half Day",
        "Early Out",
        "Leave",
        "Missed In Out",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_deserializes_untagged() {
        let cells: Vec<Cell> = serde_json::from_str(r#"["09:10-18:30", 42.0, null]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Text("09:10-18:30".to_string()),
                Cell::Number(42.0),
                Cell::Missing,
            ]
        );
    }

    #[test]
    fn test_table_shape_validation_rejects_ragged_rows() {
        let table = RawLogTable {
            columns: vec!["Name".to_string(), "1".to_string()],
            rows: vec![vec![Cell::Missing]],
        };
        assert!(table.validate_shape().is_err());
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{
            "columns": ["Name", "1", "2"],
            "rows": [
                ["Asha", null, null],
                [null, "09:10-18:30", null]
            ]
        }"#;
        let table = RawLogTable::from_json(json).unwrap();
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_index("Name"), Some(0));
        assert_eq!(table.column_index("31"), None);
    }

    #[test]
    fn test_summary_serializes_display_column_names() {
        let summary = EmployeeSummary {
            name: "Asha".to_string(),
            sunday: 4,
            full_day: 20,
            late_in: 2,
            half_day: 0,
            early_out: 1,
            leave: -1,
            missed_in_out: 3,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["Emp Name"], "Asha");
        assert_eq!(value["Full Day"], 20);
        assert_eq!(value["Missed In Out"], 3);
        assert_eq!(value["Leave"], -1);
    }
}
