//! Attendance rule sets
//!
//! Each employee category scores a day against its own immutable set of
//! time-of-day thresholds. The categories share the half-day window and the
//! three-hour minimum, but trainers carry an extra grace cutoff pair that
//! gates late-in and full-day credit differently.
//!
//! The branches increment their counters independently, so a single day can
//! add to Full Day more than once (for example a late-but-early departure
//! that also lands in the early-out window). That matches the payroll rules
//! this engine replaces and is preserved deliberately; do not cap the count.

use chrono::NaiveTime;

use crate::types::{AttendanceEntry, DayTally, EmployeeCategory};

/// Inclusive time-of-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Immutable threshold set for one employee category
///
/// Constructed once via [`RuleSet::trainer`] or [`RuleSet::non_trainer`] and
/// passed explicitly into scoring; the thresholds are fixed policy, not
/// user configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub category: EmployeeCategory,
    /// Latest clock-in that still counts as on time
    pub standard_in: NaiveTime,
    /// Earliest clock-out that earns full-day credit
    pub standard_out: NaiveTime,
    /// Trainer-only grace cutoff for late-in without losing the day
    pub late_in_cutoff: Option<NaiveTime>,
    /// Trainer-only clock-out cutoff paired with the grace late-in
    pub full_day_cutoff: Option<NaiveTime>,
    /// Clock-out window counted as a half day
    pub half_day: TimeWindow,
    /// Clock-out window counted as an early departure
    pub early_out: TimeWindow,
    /// Whole worked hours below this count as a missed punch pair
    pub min_work_hours: i64,
}

/// Build a known-valid time; falls back to midnight, which the fixed
/// threshold literals never hit.
fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl RuleSet {
    /// Trainer thresholds: stricter grace periods, later full-day cutoff
    pub fn trainer() -> Self {
        Self {
            category: EmployeeCategory::Trainer,
            standard_in: hm(9, 15),
            standard_out: hm(17, 31),
            late_in_cutoff: Some(hm(9, 45)),
            full_day_cutoff: Some(hm(18, 20)),
            half_day: TimeWindow {
                start: hm(14, 0),
                end: hm(16, 0),
            },
            early_out: TimeWindow {
                start: hm(16, 0),
                end: hm(17, 30),
            },
            min_work_hours: 3,
        }
    }

    /// Non-trainer thresholds: single late-in line, later standard out
    pub fn non_trainer() -> Self {
        Self {
            category: EmployeeCategory::NonTrainer,
            standard_in: hm(9, 45),
            standard_out: hm(18, 21),
            late_in_cutoff: None,
            full_day_cutoff: None,
            half_day: TimeWindow {
                start: hm(14, 0),
                end: hm(16, 0),
            },
            early_out: TimeWindow {
                start: hm(16, 0),
                end: hm(18, 20),
            },
            min_work_hours: 3,
        }
    }

    pub fn for_category(category: EmployeeCategory) -> Self {
        match category {
            EmployeeCategory::Trainer => Self::trainer(),
            EmployeeCategory::NonTrainer => Self::non_trainer(),
        }
    }

    /// Score one day's entry into the running tally
    pub fn score_day(&self, entry: &AttendanceEntry, tally: &mut DayTally) {
        let (clock_in, clock_out) = match entry {
            AttendanceEntry::Present {
                clock_in,
                clock_out,
            } => (*clock_in, *clock_out),
            AttendanceEntry::Absent => {
                tally.leave += 1;
                return;
            }
        };

        if worked_minutes(clock_in, clock_out) / 60 < self.min_work_hours {
            tally.missed += 1;
            return;
        }

        if self.half_day.contains(clock_out) {
            tally.half_day += 1;
        }

        match self.category {
            EmployeeCategory::Trainer => {
                let late_cutoff = self.late_in_cutoff.unwrap_or(self.standard_in);
                let full_cutoff = self.full_day_cutoff.unwrap_or(self.standard_out);

                if clock_in > self.standard_in
                    && clock_out >= self.standard_out
                    && clock_out < full_cutoff
                {
                    tally.late_in += 1;
                    tally.full_day += 1;
                } else if clock_in > late_cutoff {
                    tally.late_in += 1;
                }

                if self.early_out.contains(clock_out) {
                    tally.early_out += 1;
                    tally.full_day += 1;
                }

                if clock_in <= self.standard_in && clock_out >= self.standard_out {
                    tally.full_day += 1;
                } else if clock_in <= late_cutoff && clock_out >= full_cutoff {
                    tally.full_day += 1;
                }
            }
            EmployeeCategory::NonTrainer => {
                if clock_in > self.standard_in {
                    tally.late_in += 1;
                }

                if self.early_out.contains(clock_out) {
                    tally.early_out += 1;
                    tally.full_day += 1;
                }

                if clock_out >= self.standard_out {
                    tally.full_day += 1;
                }
            }
        }
    }
}

/// Minutes between the punches, wrapping by 24h when the clock-out reads
/// earlier than the clock-in (overnight shift crossing midnight)
fn worked_minutes(clock_in: NaiveTime, clock_out: NaiveTime) -> i64 {
    let minutes = clock_out.signed_duration_since(clock_in).num_minutes();
    if minutes < 0 {
        minutes + 24 * 60
    } else {
        minutes
    }
}
