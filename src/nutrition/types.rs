use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::profile::MacroProfile;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` calendar date as used in log paths and files.
pub fn parse_date(raw: &str) -> Result<Date, time::error::Parse> {
    Date::parse(raw, time::macros::format_description!("[year]-[month]-[day]"))
}

/// Reference nutrition profile of a food, defined at `serving_size` of `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
    pub unit: String,
    pub serving_size: f64,
}

impl Food {
    pub fn profile(&self) -> MacroProfile {
        MacroProfile {
            calories: self.calories,
            carbs: self.carbs,
            fat: self.fat,
            protein: self.protein,
        }
    }
}

/// A dated quantity of a food. `quantity` is in the food's reference unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    pub food_id: Uuid,
    pub quantity: f64,
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// All entries logged for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub entries: Vec<LogEntry>,
}

impl DailyLog {
    pub fn empty(date: Date) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            entries: Vec::new(),
        }
    }
}

pub const DEFAULT_CALORIE_GOAL: u32 = 2400;
pub const DEFAULT_CARB_PERCENTAGE: u32 = 40;
pub const DEFAULT_FAT_PERCENTAGE: u32 = 15;
pub const DEFAULT_PROTEIN_PERCENTAGE: u32 = 45;

/// Daily calorie goal split across macros by percentage.
///
/// The percentages are expected to add up to 100, but that is checked by
/// the settings writer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGoalSettings {
    pub daily_calorie_goal: u32,
    pub carb_percentage: u32,
    pub fat_percentage: u32,
    pub protein_percentage: u32,
}

impl Default for MacroGoalSettings {
    fn default() -> Self {
        Self {
            daily_calorie_goal: DEFAULT_CALORIE_GOAL,
            carb_percentage: DEFAULT_CARB_PERCENTAGE,
            fat_percentage: DEFAULT_FAT_PERCENTAGE,
            protein_percentage: DEFAULT_PROTEIN_PERCENTAGE,
        }
    }
}

impl MacroGoalSettings {
    /// Sum of the three percentages as `u64`, so it cannot overflow.
    pub fn percentage_total(&self) -> u64 {
        [self.carb_percentage, self.fat_percentage, self.protein_percentage]
            .into_iter()
            .map(u64::from)
            .sum()
    }
}
