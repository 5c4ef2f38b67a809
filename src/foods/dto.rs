use serde::Deserialize;

/// Body of `POST /api/foods`. Everything is optional on the wire so that a
/// missing field is reported as such rather than as a parse failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodRequest {
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub protein: Option<f64>,
    pub unit: Option<String>,
    pub serving_size: Option<f64>,
}

/// Body of `PUT /api/foods/:id`; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFoodRequest {
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub protein: Option<f64>,
    pub unit: Option<String>,
    pub serving_size: Option<f64>,
}
