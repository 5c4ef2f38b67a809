use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::nutrition::{parse_date, DailyLog, Food, NutritionError};
use time::Date;

pub fn parse_log_date(raw: &str) -> Result<Date, ApiError> {
    parse_date(raw).map_err(|_| ApiError::Invalid(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Logged quantities must be finite and strictly positive.
pub fn validate_quantity(quantity: f64) -> Result<f64, ApiError> {
    if !quantity.is_finite() {
        return Err(NutritionError::NonFiniteQuantity(quantity).into());
    }
    if quantity <= 0.0 {
        return Err(ApiError::Invalid("Quantity must be greater than 0".into()));
    }
    Ok(quantity)
}

#[derive(Debug, Default)]
pub struct Repair {
    pub logs: Vec<DailyLog>,
    pub problems: Vec<String>,
    pub entries_dropped: usize,
}

impl Repair {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Check the stored logs against the food catalog and return a cleaned copy.
///
/// Dropped: entries referencing unknown foods and entries with unusable
/// quantities. Fixed in place: entry dates that disagree with their log, and
/// several logs for the same date, which are merged into the first one.
pub fn repair_logs(logs: Vec<DailyLog>, foods: &[Food]) -> Repair {
    let known: HashSet<Uuid> = foods.iter().map(|f| f.id).collect();
    let mut out = Repair::default();

    for log in logs {
        let mut kept = Vec::with_capacity(log.entries.len());
        for mut entry in log.entries {
            if !known.contains(&entry.food_id) {
                out.problems.push(format!(
                    "Entry {} in log {} references non-existent food {}",
                    entry.id, log.date, entry.food_id
                ));
                out.entries_dropped += 1;
                continue;
            }
            if !entry.quantity.is_finite() || entry.quantity <= 0.0 {
                out.problems.push(format!(
                    "Entry {} in log {} has invalid quantity {}",
                    entry.id, log.date, entry.quantity
                ));
                out.entries_dropped += 1;
                continue;
            }
            if entry.date != log.date {
                out.problems.push(format!(
                    "Entry {} in log {} was dated {}",
                    entry.id, log.date, entry.date
                ));
                entry.date = log.date;
            }
            kept.push(entry);
        }

        match out.logs.iter_mut().find(|l| l.date == log.date) {
            Some(existing) => {
                out.problems
                    .push(format!("Log {} appears more than once; merged", log.date));
                existing.entries.extend(kept);
            }
            None => out.logs.push(DailyLog {
                id: log.id,
                date: log.date,
                entries: kept,
            }),
        }
    }

    for problem in &out.problems {
        warn!(%problem, "daily log problem");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::LogEntry;
    use time::macros::date;

    fn food() -> Food {
        Food {
            id: Uuid::new_v4(),
            name: "Egg".into(),
            calories: 78.0,
            carbs: 0.6,
            fat: 5.3,
            protein: 6.3,
            unit: "egg".into(),
            serving_size: 1.0,
        }
    }

    fn entry(food_id: Uuid, quantity: f64, date: Date) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            food_id,
            quantity,
            date,
        }
    }

    #[test]
    fn clean_logs_pass_through() {
        let egg = food();
        let day = date!(2025 - 03 - 24);
        let log = DailyLog {
            id: Uuid::new_v4(),
            date: day,
            entries: vec![entry(egg.id, 2.0, day)],
        };
        let repair = repair_logs(vec![log.clone()], &[egg]);
        assert!(repair.is_valid());
        assert_eq!(repair.logs, vec![log]);
        assert_eq!(repair.entries_dropped, 0);
    }

    #[test]
    fn dangling_and_bad_entries_are_dropped() {
        let egg = food();
        let day = date!(2025 - 03 - 24);
        let log = DailyLog {
            id: Uuid::new_v4(),
            date: day,
            entries: vec![
                entry(egg.id, 2.0, day),
                entry(Uuid::new_v4(), 1.0, day),
                entry(egg.id, 0.0, day),
            ],
        };
        let repair = repair_logs(vec![log], &[egg]);
        assert!(!repair.is_valid());
        assert_eq!(repair.entries_dropped, 2);
        assert_eq!(repair.logs[0].entries.len(), 1);
        assert!(repair.problems[0].contains("non-existent food"));
    }

    #[test]
    fn duplicate_dates_are_merged_and_dates_fixed() {
        let egg = food();
        let day = date!(2025 - 03 - 24);
        let first = DailyLog {
            id: Uuid::new_v4(),
            date: day,
            entries: vec![entry(egg.id, 1.0, day)],
        };
        let second = DailyLog {
            id: Uuid::new_v4(),
            date: day,
            entries: vec![entry(egg.id, 3.0, date!(2025 - 03 - 25))],
        };
        let first_id = first.id;
        let repair = repair_logs(vec![first, second], &[egg]);

        assert_eq!(repair.logs.len(), 1);
        assert_eq!(repair.logs[0].id, first_id);
        assert_eq!(repair.logs[0].entries.len(), 2);
        assert!(repair.logs[0].entries.iter().all(|e| e.date == day));
        assert_eq!(repair.problems.len(), 2);
    }

    #[test]
    fn quantity_and_date_validation() {
        assert!(validate_quantity(150.0).is_ok());
        assert!(validate_quantity(0.0).is_err());
        assert!(validate_quantity(f64::NAN).is_err());
        assert!(parse_log_date("2025-13-01").is_err());
        assert_eq!(parse_log_date("2025-12-01").unwrap(), date!(2025 - 12 - 01));
    }
}
