use uuid::Uuid;

use crate::error::ApiError;
use crate::foods::dto::{CreateFoodRequest, UpdateFoodRequest};
use crate::nutrition::aggregator::{CARB_KCAL_PER_GRAM, FAT_KCAL_PER_GRAM, PROTEIN_KCAL_PER_GRAM};
use crate::nutrition::Food;

/// Calories implied by the macros: `carbs*4 + fat*9 + protein*4`.
pub fn calories_from_macros(carbs: f64, fat: f64, protein: f64) -> f64 {
    carbs * CARB_KCAL_PER_GRAM + fat * FAT_KCAL_PER_GRAM + protein * PROTEIN_KCAL_PER_GRAM
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn build_food(req: CreateFoodRequest) -> Result<Food, ApiError> {
    let (Some(name), Some(unit), Some(carbs), Some(fat), Some(protein), Some(serving_size)) = (
        non_blank(req.name),
        non_blank(req.unit),
        req.carbs,
        req.fat,
        req.protein,
        req.serving_size,
    ) else {
        return Err(ApiError::MissingFields);
    };

    let food = Food {
        id: Uuid::new_v4(),
        name,
        calories: req
            .calories
            .unwrap_or_else(|| calories_from_macros(carbs, fat, protein)),
        carbs,
        fat,
        protein,
        unit,
        serving_size,
    };
    validate_food(&food)?;
    Ok(food)
}

pub fn apply_update(current: &Food, req: UpdateFoodRequest) -> Result<Food, ApiError> {
    let food = Food {
        id: current.id,
        name: non_blank(req.name).unwrap_or_else(|| current.name.clone()),
        calories: req.calories.unwrap_or(current.calories),
        carbs: req.carbs.unwrap_or(current.carbs),
        fat: req.fat.unwrap_or(current.fat),
        protein: req.protein.unwrap_or(current.protein),
        unit: non_blank(req.unit).unwrap_or_else(|| current.unit.clone()),
        serving_size: req.serving_size.unwrap_or(current.serving_size),
    };
    validate_food(&food)?;
    Ok(food)
}

pub fn validate_food(food: &Food) -> Result<(), ApiError> {
    if !food.serving_size.is_finite() || food.serving_size <= 0.0 {
        return Err(ApiError::Invalid("Serving size must be greater than 0".into()));
    }
    for (label, value) in [
        ("Calories", food.calories),
        ("Carbs", food.carbs),
        ("Fat", food.fat),
        ("Protein", food.protein),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::Invalid(format!("{label} must be a positive number")));
        }
    }
    Ok(())
}
