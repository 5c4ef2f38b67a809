use serde::{ser::SerializeStruct, Serialize, Serializer};
use uuid::Uuid;

use super::{error::NutritionError, profile::MacroProfile, types::Food};

/// Nutrition contributed by `quantity` of a food.
///
/// On the wire the food's reference values keep their plain names and the
/// scaled ones are prefixed with `calculated`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledNutrition {
    /// Log entry id when scaled for an entry, otherwise the food id.
    pub id: Uuid,
    pub food_id: Uuid,
    pub name: String,
    pub unit: String,
    pub serving_size: f64,
    pub quantity: f64,
    pub multiplier: f64,
    pub reference: MacroProfile,
    pub nutrition: MacroProfile,
}

impl Serialize for ScaledNutrition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ScaledNutrition", 15)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("foodId", &self.food_id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("calories", &self.reference.calories)?;
        s.serialize_field("carbs", &self.reference.carbs)?;
        s.serialize_field("fat", &self.reference.fat)?;
        s.serialize_field("protein", &self.reference.protein)?;
        s.serialize_field("unit", &self.unit)?;
        s.serialize_field("servingSize", &self.serving_size)?;
        s.serialize_field("quantity", &self.quantity)?;
        s.serialize_field("multiplier", &self.multiplier)?;
        s.serialize_field("calculatedCalories", &self.nutrition.calories)?;
        s.serialize_field("calculatedCarbs", &self.nutrition.carbs)?;
        s.serialize_field("calculatedFat", &self.nutrition.fat)?;
        s.serialize_field("calculatedProtein", &self.nutrition.protein)?;
        s.end()
    }
}

/// Scale a food's reference profile to `quantity` of its unit.
///
/// `multiplier = quantity / serving_size` and every metric is multiplied by it.
/// Nothing is rounded. A zero, negative or non-finite serving size and a
/// negative or non-finite quantity are rejected instead of producing NaN or
/// infinite values.
pub fn scale_food(
    food: &Food,
    quantity: f64,
    entry_id: Option<Uuid>,
) -> Result<ScaledNutrition, NutritionError> {
    if !food.serving_size.is_finite() || food.serving_size <= 0.0 {
        return Err(NutritionError::NonPositiveServingSize(food.serving_size));
    }
    if !quantity.is_finite() {
        return Err(NutritionError::NonFiniteQuantity(quantity));
    }
    if quantity < 0.0 {
        return Err(NutritionError::NegativeQuantity(quantity));
    }

    let multiplier = quantity / food.serving_size;
    Ok(ScaledNutrition {
        id: entry_id.unwrap_or(food.id),
        food_id: food.id,
        name: food.name.clone(),
        unit: food.unit.clone(),
        serving_size: food.serving_size,
        quantity,
        multiplier,
        reference: food.profile(),
        nutrition: food.profile().scale(multiplier),
    })
}
