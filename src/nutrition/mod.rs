//! Nutrition aggregation engine.
//!
//! Pure functions that scale a food's reference profile to a logged quantity
//! and fold a day's entries into totals and remaining-to-target values.
//! Everything here is synchronous and works on caller supplied data.

pub mod aggregator;
pub mod error;
pub mod profile;
pub mod scaler;
pub mod types;

pub use aggregator::{aggregate_day, macro_split, summarize, DailyBreakdown, DailySummary, FoodLookup, MacroSplit};
pub use error::NutritionError;
pub use profile::MacroProfile;
pub use scaler::{scale_food, ScaledNutrition};
pub use types::{parse_date, DailyLog, Food, LogEntry, MacroGoalSettings};
