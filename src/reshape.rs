//! Raw log reshaping
//!
//! The export carries two adjacent rows per employee: an IN-log row holding
//! the employee name, and an OUT-log row whose day cells pack both punches
//! into a single string (clock-in in the first five characters, clock-out in
//! the last five). This module pairs the rows, parses the packed cells into
//! typed entries, and drops rows with no real attendance data.

use chrono::NaiveTime;
use tracing::debug;

use crate::error::ProcessError;
use crate::schema::TableSchema;
use crate::types::{AttendanceEntry, Cell, EmployeeDays, RawLogTable};

/// Minimum packed-entry length: two 5-character HH:MM tokens
const MIN_PACKED_LEN: usize = 10;

/// Reshape a raw log table into one record per employee
///
/// An odd trailing row is treated as paired with an all-missing OUT row so
/// positional pairing holds for the last employee.
pub fn reshape(
    table: &RawLogTable,
    schema: &TableSchema,
) -> Result<Vec<EmployeeDays>, ProcessError> {
    table.validate_shape()?;

    let pair_count = table.rows.len().div_ceil(2);
    let mut employees = Vec::with_capacity(pair_count);

    for pair in 0..pair_count {
        let in_row = &table.rows[pair * 2];
        // The OUT row is absent only for the padded final pair.
        let out_row = table.rows.get(pair * 2 + 1);

        let name = in_row[schema.name_column]
            .as_text()
            .map(|s| s.to_string());

        let mut entries = Vec::with_capacity(schema.day_columns.len());
        let mut populated_cells = 0usize;
        for &(_, column) in &schema.day_columns {
            let cell = out_row.map_or(&Cell::Missing, |row| &row[column]);
            if !cell.is_missing() {
                populated_cells += 1;
            }
            let entry = match cell.as_text() {
                Some(packed) => {
                    let (clock_in, clock_out) = parse_packed_entry(packed).map_err(|reason| {
                        ProcessError::MalformedEntry {
                            row: pair * 2 + 1,
                            column: table.columns[column].clone(),
                            reason,
                        }
                    })?;
                    AttendanceEntry::Present {
                        clock_in,
                        clock_out,
                    }
                }
                None => AttendanceEntry::Absent,
            };
            entries.push(entry);
        }

        // The name counts as one populated cell, so a surviving row needs at
        // least one real day cell; padding rows and no-data employees drop out.
        let non_missing = usize::from(name.is_some()) + populated_cells;
        if non_missing <= 1 {
            continue;
        }

        let name = name.ok_or_else(|| {
            ProcessError::ShapeError(format!(
                "IN row {} has attendance data but no employee name",
                pair * 2
            ))
        })?;

        employees.push(EmployeeDays { name, entries });
    }

    debug!(
        input_rows = table.rows.len(),
        employees = employees.len(),
        "reshaped raw log table"
    );

    Ok(employees)
}

/// Parse a packed "INtime...OUTtime" cell into its two punch times
///
/// The packed form always begins and ends with a 5-character HH:MM token; the
/// separator between them varies by device and is ignored. Anything shorter
/// than two full tokens, or with tokens that are not valid times, is rejected.
fn parse_packed_entry(packed: &str) -> Result<(NaiveTime, NaiveTime), String> {
    if packed.len() < MIN_PACKED_LEN
        || !packed.is_char_boundary(5)
        || !packed.is_char_boundary(packed.len() - 5)
    {
        return Err(format!(
            "expected at least two 5-character time tokens, got {:?}",
            packed
        ));
    }

    let clock_in = parse_time_token(&packed[..5])?;
    let clock_out = parse_time_token(&packed[packed.len() - 5..])?;
    Ok((clock_in, clock_out))
}

fn parse_time_token(token: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(token, "%H:%M")
        .map_err(|_| format!("time token {:?} is not HH:MM", token))
}
