use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::{
    profile::MacroProfile,
    scaler::{scale_food, ScaledNutrition},
    types::{Food, LogEntry, MacroGoalSettings},
};

/// kcal per gram.
pub const CARB_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;

/// Resolves food ids to foods.
pub trait FoodLookup {
    fn food(&self, id: &Uuid) -> Option<&Food>;
}

impl FoodLookup for HashMap<Uuid, Food> {
    fn food(&self, id: &Uuid) -> Option<&Food> {
        self.get(id)
    }
}

impl FoodLookup for [Food] {
    fn food(&self, id: &Uuid) -> Option<&Food> {
        self.iter().find(|f| &f.id == id)
    }
}

impl MacroGoalSettings {
    /// Daily targets: the raw calorie goal and the gram amounts implied by
    /// each macro's share of it.
    pub fn targets(&self) -> MacroProfile {
        let goal = f64::from(self.daily_calorie_goal);
        MacroProfile {
            calories: goal,
            carbs: (f64::from(self.carb_percentage) / 100.0) * goal / CARB_KCAL_PER_GRAM,
            fat: (f64::from(self.fat_percentage) / 100.0) * goal / FAT_KCAL_PER_GRAM,
            protein: (f64::from(self.protein_percentage) / 100.0) * goal / PROTEIN_KCAL_PER_GRAM,
        }
    }
}

/// Consumed and remaining-to-target nutrition for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_calories: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub total_protein: f64,
    pub remaining_calories: f64,
    pub remaining_carbs: f64,
    pub remaining_fat: f64,
    pub remaining_protein: f64,
}

impl DailySummary {
    fn from_parts(total: MacroProfile, remaining: MacroProfile) -> Self {
        Self {
            total_calories: total.calories,
            total_carbs: total.carbs,
            total_fat: total.fat,
            total_protein: total.protein,
            remaining_calories: remaining.calories,
            remaining_carbs: remaining.carbs,
            remaining_fat: remaining.fat,
            remaining_protein: remaining.protein,
        }
    }

    pub fn total(&self) -> MacroProfile {
        MacroProfile {
            calories: self.total_calories,
            carbs: self.total_carbs,
            fat: self.total_fat,
            protein: self.total_protein,
        }
    }

    pub fn remaining(&self) -> MacroProfile {
        MacroProfile {
            calories: self.remaining_calories,
            carbs: self.remaining_carbs,
            fat: self.remaining_fat,
            protein: self.remaining_protein,
        }
    }
}

/// Fold already scaled entries into totals and remaining values.
///
/// With no entries the totals are zero and the remaining values are the
/// full targets.
pub fn summarize(scaled: &[ScaledNutrition], settings: &MacroGoalSettings) -> DailySummary {
    let total: MacroProfile = scaled.iter().map(|s| s.nutrition).sum();
    let remaining = total.remaining_to(&settings.targets());
    DailySummary::from_parts(total, remaining)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    pub entry_id: Uuid,
    pub food_id: Uuid,
    pub reason: String,
}

/// A day's scaled entries, summary and targets, plus the entries left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBreakdown {
    pub entries: Vec<ScaledNutrition>,
    pub summary: DailySummary,
    pub targets: MacroProfile,
    pub skipped: Vec<SkippedEntry>,
}

/// Resolve, scale and sum one day's entries against the macro goals.
///
/// Entries whose food cannot be found, or that the scaler rejects, are left
/// out of every total and reported in `skipped`.
pub fn aggregate_day<F>(entries: &[LogEntry], foods: &F, settings: &MacroGoalSettings) -> DailyBreakdown
where
    F: FoodLookup + ?Sized,
{
    let mut scaled = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
        let Some(food) = foods.food(&entry.food_id) else {
            warn!(entry_id = %entry.id, food_id = %entry.food_id, "log entry references unknown food; skipped");
            skipped.push(SkippedEntry {
                entry_id: entry.id,
                food_id: entry.food_id,
                reason: "food not found".into(),
            });
            continue;
        };

        match scale_food(food, entry.quantity, Some(entry.id)) {
            Ok(s) => scaled.push(s),
            Err(e) => {
                warn!(entry_id = %entry.id, food_id = %entry.food_id, error = %e, "log entry cannot be scaled; skipped");
                skipped.push(SkippedEntry {
                    entry_id: entry.id,
                    food_id: entry.food_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    let summary = summarize(&scaled, settings);
    DailyBreakdown {
        entries: scaled,
        summary,
        targets: settings.targets(),
        skipped,
    }
}

/// Share of each macro in the combined gram weight, in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub carbs_percentage: u32,
    pub fat_percentage: u32,
    pub protein_percentage: u32,
}

pub fn macro_split(carbs: f64, fat: f64, protein: f64) -> MacroSplit {
    let total = carbs + fat + protein;
    if total <= 0.0 || !total.is_finite() {
        return MacroSplit::default();
    }
    let pct = |v: f64| (v / total * 100.0).round() as u32;
    MacroSplit {
        carbs_percentage: pct(carbs),
        fat_percentage: pct(fat),
        protein_percentage: pct(protein),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn settings() -> MacroGoalSettings {
        MacroGoalSettings {
            daily_calorie_goal: 2000,
            carb_percentage: 50,
            fat_percentage: 20,
            protein_percentage: 30,
        }
    }

    fn food() -> Food {
        Food {
            id: Uuid::new_v4(),
            name: "Rice and beans".into(),
            calories: 200.0,
            carbs: 20.0,
            fat: 5.0,
            protein: 10.0,
            unit: "g".into(),
            serving_size: 100.0,
        }
    }

    fn entry(food_id: Uuid, quantity: f64) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            food_id,
            quantity,
            date: date!(2025 - 03 - 24),
        }
    }

    #[test]
    fn targets_use_four_nine_four() {
        let t = settings().targets();
        assert!(approx(t.calories, 2000.0));
        assert!(approx(t.carbs, 250.0));
        assert!(approx(t.fat, 2000.0 * 0.2 / 9.0));
        assert!(approx(t.protein, 150.0));
    }

    #[test]
    fn empty_day_has_full_targets_remaining() {
        let s = settings();
        let foods: HashMap<Uuid, Food> = HashMap::new();
        let day = aggregate_day(&[], &foods, &s);
        assert_eq!(day.summary.total(), MacroProfile::zero());
        assert_eq!(day.summary.remaining(), s.targets());
        assert_eq!(summarize(&[], &s), day.summary);
        assert!(day.entries.is_empty());
        assert!(day.skipped.is_empty());
    }

    #[test]
    fn two_entries_end_to_end() {
        let f = food();
        let entries = vec![entry(f.id, 150.0), entry(f.id, 150.0)];
        let foods = vec![f];
        let day = aggregate_day(&entries, foods.as_slice(), &settings());

        assert_eq!(day.entries.len(), 2);
        assert_eq!(day.entries[0].id, entries[0].id);
        assert!(approx(day.summary.total_calories, 600.0));
        assert!(approx(day.summary.total_carbs, 60.0));
        assert!(approx(day.summary.total_fat, 15.0));
        assert!(approx(day.summary.total_protein, 30.0));
        assert!(approx(day.summary.remaining_calories, 1400.0));
        assert!(approx(day.summary.remaining_carbs, 190.0));
        assert!(approx(day.summary.remaining_protein, 120.0));
    }

    #[test]
    fn unknown_food_is_left_out() {
        let f = food();
        let ghost = Uuid::new_v4();
        let entries = vec![entry(f.id, 100.0), entry(ghost, 500.0)];
        let foods: HashMap<Uuid, Food> = [(f.id, f)].into_iter().collect();
        let day = aggregate_day(&entries, &foods, &settings());

        assert_eq!(day.entries.len(), 1);
        assert!(approx(day.summary.total_calories, 200.0));
        assert_eq!(day.skipped.len(), 1);
        assert_eq!(day.skipped[0].entry_id, entries[1].id);
        assert_eq!(day.skipped[0].food_id, ghost);
    }

    #[test]
    fn unscalable_entry_is_left_out() {
        let broken = Food {
            serving_size: 0.0,
            ..food()
        };
        let good = food();
        let entries = vec![entry(broken.id, 10.0), entry(good.id, 50.0)];
        let foods = vec![broken, good];
        let day = aggregate_day(&entries, foods.as_slice(), &settings());

        assert_eq!(day.entries.len(), 1);
        assert!(approx(day.summary.total_calories, 100.0));
        assert!(day.skipped[0].reason.contains("serving size"));
        assert!(day.summary.total_calories.is_finite());
    }

    #[test]
    fn remaining_never_negative() {
        let f = Food {
            calories: 5000.0,
            carbs: 600.0,
            fat: 300.0,
            protein: 400.0,
            ..food()
        };
        let entries = vec![entry(f.id, 100.0)];
        let day = aggregate_day(&entries, vec![f].as_slice(), &settings());
        assert_eq!(day.summary.remaining(), MacroProfile::zero());
        assert!(approx(day.summary.total_calories, 5000.0));
    }

    #[test]
    fn order_does_not_change_totals() {
        let a = food();
        let b = Food {
            id: Uuid::new_v4(),
            calories: 52.0,
            carbs: 14.0,
            fat: 0.2,
            protein: 0.3,
            serving_size: 1.0,
            unit: "apple".into(),
            ..food()
        };
        let c = Food {
            id: Uuid::new_v4(),
            calories: 884.0,
            carbs: 0.0,
            fat: 100.0,
            protein: 0.0,
            serving_size: 15.0,
            unit: "ml".into(),
            ..food()
        };
        let foods = vec![a.clone(), b.clone(), c.clone()];
        let forward = vec![entry(a.id, 37.0), entry(b.id, 2.5), entry(c.id, 7.0)];
        let mut backward = forward.clone();
        backward.reverse();

        let s1 = aggregate_day(&forward, foods.as_slice(), &settings()).summary;
        let s2 = aggregate_day(&backward, foods.as_slice(), &settings()).summary;
        assert!(approx(s1.total_calories, s2.total_calories));
        assert!(approx(s1.total_carbs, s2.total_carbs));
        assert!(approx(s1.total_fat, s2.total_fat));
        assert!(approx(s1.total_protein, s2.total_protein));
        assert!(approx(s1.remaining_fat, s2.remaining_fat));
    }

    #[test]
    fn percentages_off_one_hundred_are_used_as_given() {
        let s = MacroGoalSettings {
            daily_calorie_goal: 1000,
            carb_percentage: 80,
            fat_percentage: 80,
            protein_percentage: 0,
        };
        let t = s.targets();
        assert!(approx(t.carbs, 200.0));
        assert!(approx(t.fat, 800.0 / 9.0));
        assert!(approx(t.protein, 0.0));
    }

    #[test]
    fn summary_serializes_eight_flat_fields() {
        let json = serde_json::to_value(summarize(&[], &settings())).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert_eq!(obj["remainingCarbs"], 250.0);
        assert_eq!(obj["totalProtein"], 0.0);
    }

    #[test]
    fn macro_split_rounds_and_handles_zero() {
        assert_eq!(macro_split(0.0, 0.0, 0.0), MacroSplit::default());
        let split = macro_split(60.0, 15.0, 30.0);
        assert_eq!(split.carbs_percentage, 57);
        assert_eq!(split.fat_percentage, 14);
        assert_eq!(split.protein_percentage, 29);
    }
}
