//! Trainer roster
//!
//! Trainers get the stricter grace-period rule set. Membership is an exact,
//! case-sensitive name lookup against a roster supplied by the caller, so the
//! category can change with staffing instead of living in code.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ProcessError;
use crate::types::EmployeeCategory;

/// Roster of trainer names; everyone else is a non-trainer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    trainers: HashSet<String>,
}

impl Roster {
    /// Empty roster: every employee classifies as a non-trainer
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster with the given trainer names
    pub fn with_trainers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trainers: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a roster from its JSON document form
    pub fn from_json(json: &str) -> Result<Self, ProcessError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn add_trainer(&mut self, name: impl Into<String>) {
        self.trainers.insert(name.into());
    }

    /// Category for the given employee name (exact, case-sensitive match)
    pub fn category_for(&self, name: &str) -> EmployeeCategory {
        if self.trainers.contains(name) {
            EmployeeCategory::Trainer
        } else {
            EmployeeCategory::NonTrainer
        }
    }

    pub fn trainer_count(&self) -> usize {
        self.trainers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_lookup_is_case_sensitive() {
        let roster = Roster::with_trainers(["Sidharth", "sagar"]);

        assert_eq!(roster.category_for("Sidharth"), EmployeeCategory::Trainer);
        assert_eq!(roster.category_for("sagar"), EmployeeCategory::Trainer);
        assert_eq!(roster.category_for("Sagar"), EmployeeCategory::NonTrainer);
        assert_eq!(roster.category_for("Asha"), EmployeeCategory::NonTrainer);
    }

    #[test]
    fn test_empty_roster_classifies_everyone_non_trainer() {
        let roster = Roster::new();
        assert_eq!(roster.trainer_count(), 0);
        assert_eq!(roster.category_for("anyone"), EmployeeCategory::NonTrainer);
    }

    #[test]
    fn test_roster_from_json() {
        let roster = Roster::from_json(r#"{"trainers": ["Ritesh Naidu", "ZuLfikar"]}"#).unwrap();
        assert_eq!(roster.trainer_count(), 2);
        assert_eq!(
            roster.category_for("Ritesh Naidu"),
            EmployeeCategory::Trainer
        );
    }
}
