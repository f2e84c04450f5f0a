//! Input table schema resolution
//!
//! Device exports shift their metadata columns between firmware versions, so
//! nothing downstream touches the table by raw position. The schema is
//! resolved once against the header row and hands out the name-column index
//! and the ordered day columns; resolution fails fast when the expected
//! columns are absent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProcessError;
use crate::types::RawLogTable;

/// Highest day header recognized as a day-of-month column
const MAX_DAY: u32 = 31;

/// Configuration for resolving a raw log table's columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Header of the column carrying the employee name on IN rows
    pub name_header: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            name_header: "Name".to_string(),
        }
    }
}

/// Resolved column layout of a raw log table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Index of the employee-name column
    pub name_column: usize,
    /// Day columns as (day-of-month, column index), in table order
    pub day_columns: Vec<(u32, usize)>,
}

impl TableSchema {
    /// Resolve the schema against a table's header row
    pub fn resolve(table: &RawLogTable, config: &SchemaConfig) -> Result<Self, ProcessError> {
        let name_column = table
            .column_index(&config.name_header)
            .ok_or_else(|| ProcessError::MissingColumn(config.name_header.clone()))?;

        let mut day_columns = Vec::new();
        for (index, header) in table.columns.iter().enumerate() {
            if let Ok(day) = header.trim().parse::<u32>() {
                if (1..=MAX_DAY).contains(&day) {
                    day_columns.push((day, index));
                }
            }
        }

        if day_columns.is_empty() {
            return Err(ProcessError::MissingColumn(
                "day-of-month columns (headers 1-31)".to_string(),
            ));
        }

        debug!(
            name_column,
            day_columns = day_columns.len(),
            "resolved table schema"
        );

        Ok(Self {
            name_column,
            day_columns,
        })
    }
}
