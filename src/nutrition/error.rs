use thiserror::Error;

/// Inputs the scaler refuses to turn into numbers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NutritionError {
    #[error("serving size must be a positive number: {0}")]
    NonPositiveServingSize(f64),

    #[error("quantity must be a finite number: {0}")]
    NonFiniteQuantity(f64),

    #[error("quantity must not be negative: {0}")]
    NegativeQuantity(f64),
}
