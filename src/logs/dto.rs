use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::nutrition::{DailyBreakdown, MacroSplit};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEntryRequest {
    pub food_id: Option<Uuid>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryRequest {
    pub quantity: Option<f64>,
}

time::serde::format_description!(day_format, Date, "[year]-[month]-[day]");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummaryResponse {
    #[serde(with = "day_format")]
    pub date: Date,
    #[serde(flatten)]
    pub breakdown: DailyBreakdown,
    pub consumed_split: MacroSplit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    pub valid: bool,
    pub problems: Vec<String>,
    pub logs_kept: usize,
    pub entries_dropped: usize,
    pub backup: Option<String>,
}
