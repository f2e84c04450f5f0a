//! Pipeline orchestration
//!
//! This module provides the public API for Punchcard. It runs the full
//! pipeline from a raw log table to the monthly attendance report:
//! period validation → schema resolution → reshaping → per-employee scoring
//! → report assembly.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calendar::Period;
use crate::error::ProcessError;
use crate::reshape::reshape;
use crate::roster::Roster;
use crate::rules::RuleSet;
use crate::schema::{SchemaConfig, TableSchema};
use crate::types::{
    AttendanceReport, DayTally, EmployeeDays, EmployeeSummary, RawLogTable, ReportProducer,
};
use crate::{PRODUCER_NAME, PUNCHCARD_VERSION};

/// Process one attendance export into a monthly report.
///
/// # Arguments
/// * `table` - Raw log table handed over by the file-parsing collaborator
/// * `year` - Target year (2000-2100)
/// * `month` - Target month (1-12)
/// * `roster` - Trainer roster selecting the rule set per employee
///
/// # Returns
/// One summary row per surviving employee, in input table order.
///
/// Any shape, entry, or period error aborts the whole run; no partial
/// report is ever returned.
pub fn process_attendance(
    table: &RawLogTable,
    year: i32,
    month: u32,
    roster: &Roster,
) -> Result<AttendanceReport, ProcessError> {
    AttendanceProcessor::with_roster(roster.clone()).process(table, year, month)
}

/// Configured processor for repeated runs with a fixed roster and schema.
///
/// The processor holds no mutable state; each [`process`](Self::process)
/// call is an independent, deterministic transformation.
pub struct AttendanceProcessor {
    roster: Roster,
    schema_config: SchemaConfig,
    trainer_rules: RuleSet,
    non_trainer_rules: RuleSet,
}

impl Default for AttendanceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceProcessor {
    /// Processor with an empty roster and the default schema
    pub fn new() -> Self {
        Self::with_roster(Roster::new())
    }

    /// Processor with the given trainer roster
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            schema_config: SchemaConfig::default(),
            trainer_rules: RuleSet::trainer(),
            non_trainer_rules: RuleSet::non_trainer(),
        }
    }

    /// Override the schema configuration (e.g. a different name header)
    pub fn with_schema_config(mut self, schema_config: SchemaConfig) -> Self {
        self.schema_config = schema_config;
        self
    }

    /// Run the full pipeline for one export
    pub fn process(
        &self,
        table: &RawLogTable,
        year: i32,
        month: u32,
    ) -> Result<AttendanceReport, ProcessError> {
        let period = Period::new(year, month)?;
        let schema = TableSchema::resolve(table, &self.schema_config)?;
        let employees = reshape(table, &schema)?;

        let sundays = period.sundays();
        let mut rows = Vec::with_capacity(employees.len());
        for employee in &employees {
            let rules = match self.roster.category_for(&employee.name) {
                crate::types::EmployeeCategory::Trainer => &self.trainer_rules,
                crate::types::EmployeeCategory::NonTrainer => &self.non_trainer_rules,
            };
            debug!(
                employee = %employee.name,
                category = rules.category.as_str(),
                days = employee.entries.len(),
                "scoring employee"
            );
            rows.push(summarize_employee(employee, rules, sundays));
        }

        info!(
            year = period.year(),
            month = period.month(),
            employees = rows.len(),
            sundays,
            "attendance report assembled"
        );

        Ok(AttendanceReport {
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: PUNCHCARD_VERSION.to_string(),
                instance_id: Uuid::new_v4().to_string(),
            },
            year: period.year(),
            month: period.month(),
            generated_at: Utc::now(),
            employees: rows,
        })
    }
}

/// Fold one employee's month into a summary row.
///
/// The Sunday count is subtracted from the raw leave tally once per
/// employee, not once per absent day, and is deliberately not floored at
/// zero.
fn summarize_employee(employee: &EmployeeDays, rules: &RuleSet, sundays: u32) -> EmployeeSummary {
    let mut tally = DayTally::default();
    for entry in &employee.entries {
        rules.score_day(entry, &mut tally);
    }

    EmployeeSummary {
        name: employee.name.clone(),
        sunday: sundays,
        full_day: tally.full_day,
        late_in: tally.late_in,
        half_day: tally.half_day,
        early_out: tally.early_out,
        leave: tally.leave as i32 - sundays as i32,
        missed_in_out: tally.missed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    /// Export with name column and day columns 1-4
    fn sample_table() -> RawLogTable {
        let columns = vec![
            "AC-No.".to_string(),
            "Name".to_string(),
            "1".to_string(),
            "2".to_string(),
            "3".to_string(),
            "4".to_string(),
        ];
        let rows = vec![
            // Asha (non-trainer): late full shift, on-time short-out, absent, missed.
            vec![
                Cell::Number(101.0),
                text("Asha"),
                Cell::Missing,
                Cell::Missing,
                Cell::Missing,
                Cell::Missing,
            ],
            vec![
                Cell::Missing,
                Cell::Missing,
                text("10:00-19:00"),
                text("09:00-18:20"),
                Cell::Missing,
                text("10:00-12:30"),
            ],
            // Sidharth (trainer): on-time full shift, half day, absent twice.
            vec![
                Cell::Number(102.0),
                text("Sidharth"),
                Cell::Missing,
                Cell::Missing,
                Cell::Missing,
                Cell::Missing,
            ],
            vec![
                Cell::Missing,
                Cell::Missing,
                text("09:10-18:30"),
                text("09:30-15:00"),
                Cell::Missing,
                Cell::Missing,
            ],
        ];
        RawLogTable { columns, rows }
    }

    #[test]
    fn test_process_attendance_end_to_end() {
        let roster = Roster::with_trainers(["Sidharth"]);
        // May 2025 has 4 Sundays.
        let report = process_attendance(&sample_table(), 2025, 5, &roster).unwrap();

        assert_eq!(report.year, 2025);
        assert_eq!(report.month, 5);
        assert_eq!(report.producer.name, "punchcard");
        assert_eq!(report.employees.len(), 2);

        assert_eq!(
            report.employees[0],
            EmployeeSummary {
                name: "Asha".to_string(),
                sunday: 4,
                // Day 1: late + full; day 2: early-out + full; day 4: missed.
                full_day: 2,
                late_in: 1,
                half_day: 0,
                early_out: 1,
                leave: 1 - 4,
                missed_in_out: 1,
            }
        );

        assert_eq!(
            report.employees[1],
            EmployeeSummary {
                name: "Sidharth".to_string(),
                sunday: 4,
                full_day: 1,
                late_in: 0,
                half_day: 1,
                early_out: 0,
                leave: 2 - 4,
                missed_in_out: 0,
            }
        );
    }

    #[test]
    fn test_process_is_deterministic() {
        let roster = Roster::with_trainers(["Sidharth"]);
        let processor = AttendanceProcessor::with_roster(roster);
        let table = sample_table();

        let first = processor.process(&table, 2025, 5).unwrap();
        let second = processor.process(&table, 2025, 5).unwrap();
        assert_eq!(first.employees, second.employees);
    }

    #[test]
    fn test_roster_switches_rule_set() {
        let table = sample_table();
        // With an empty roster Sidharth scores under non-trainer rules.
        let as_non_trainer = process_attendance(&table, 2025, 5, &Roster::new()).unwrap();
        assert_eq!(as_non_trainer.employees[1].full_day, 1);

        // Trainer rules at 09:30-17:45 grant late + full; non-trainer rules
        // grant early-out + full and no late.
        let mut rows = sample_table();
        rows.rows[3][3] = text("09:30-17:45");
        let trainer_report =
            process_attendance(&rows, 2025, 5, &Roster::with_trainers(["Sidharth"])).unwrap();
        assert_eq!(trainer_report.employees[1].late_in, 1);
        assert_eq!(trainer_report.employees[1].half_day, 0);
        let non_trainer_report = process_attendance(&rows, 2025, 5, &Roster::new()).unwrap();
        assert_eq!(non_trainer_report.employees[1].late_in, 0);
        assert_eq!(non_trainer_report.employees[1].early_out, 1);
    }

    #[test]
    fn test_invalid_period_rejected_before_processing() {
        let table = RawLogTable {
            columns: vec![],
            rows: vec![],
        };
        // Period validation fires before schema resolution sees the table.
        assert!(matches!(
            process_attendance(&table, 2025, 13, &Roster::new()),
            Err(ProcessError::InvalidPeriod(_))
        ));
        assert!(matches!(
            process_attendance(&table, 1900, 5, &Roster::new()),
            Err(ProcessError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_malformed_cell_aborts_whole_run() {
        let mut table = sample_table();
        table.rows[1][2] = text("junk");
        assert!(matches!(
            process_attendance(&table, 2025, 5, &Roster::new()),
            Err(ProcessError::MalformedEntry { .. })
        ));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = process_attendance(&sample_table(), 2025, 5, &Roster::new()).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["producer"]["name"], "punchcard");
        assert_eq!(value["employees"][0]["Emp Name"], "Asha");
        assert_eq!(value["employees"][0]["Sunday"], 4);
    }
}
