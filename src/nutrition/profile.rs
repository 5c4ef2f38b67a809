//! Additive macro bundle shared by foods, scaled entries, totals and targets.

use serde::{Deserialize, Serialize};

/// Calories plus carbohydrate, fat and protein grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroProfile {
    pub calories: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
}

impl MacroProfile {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            protein: self.protein * multiplier,
        }
    }

    /// What is left of `target` after `self` has been consumed, floored at zero per metric.
    pub fn remaining_to(&self, target: &MacroProfile) -> Self {
        Self {
            calories: (target.calories - self.calories).max(0.0),
            carbs: (target.carbs - self.carbs).max(0.0),
            fat: (target.fat - self.fat).max(0.0),
            protein: (target.protein - self.protein).max(0.0),
        }
    }
}

impl std::ops::Add for MacroProfile {
    type Output = MacroProfile;

    fn add(self, other: MacroProfile) -> MacroProfile {
        MacroProfile {
            calories: self.calories + other.calories,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            protein: self.protein + other.protein,
        }
    }
}

impl std::iter::Sum for MacroProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroProfile::zero(), |acc, p| acc + p)
    }
}
