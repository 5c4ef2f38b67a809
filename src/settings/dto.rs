use serde::Deserialize;

/// Body of `PUT /api/settings`; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub daily_calorie_goal: Option<u32>,
    pub carb_percentage: Option<u32>,
    pub fat_percentage: Option<u32>,
    pub protein_percentage: Option<u32>,
}
