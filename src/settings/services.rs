use crate::error::ApiError;
use crate::nutrition::MacroGoalSettings;
use crate::settings::dto::UpdateSettingsRequest;

/// Merge an update over the current settings and check the result.
pub fn merge_settings(
    current: &MacroGoalSettings,
    req: UpdateSettingsRequest,
) -> Result<MacroGoalSettings, ApiError> {
    let merged = MacroGoalSettings {
        daily_calorie_goal: req.daily_calorie_goal.unwrap_or(current.daily_calorie_goal),
        carb_percentage: req.carb_percentage.unwrap_or(current.carb_percentage),
        fat_percentage: req.fat_percentage.unwrap_or(current.fat_percentage),
        protein_percentage: req.protein_percentage.unwrap_or(current.protein_percentage),
    };

    let total = merged.percentage_total();
    if total != 100 {
        return Err(ApiError::PercentageTotal {
            current_total: total,
        });
    }
    if merged.daily_calorie_goal == 0 {
        return Err(ApiError::Invalid(
            "Daily calorie goal must be greater than 0".into(),
        ));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_keeps_the_rest() {
        let merged = merge_settings(
            &MacroGoalSettings::default(),
            UpdateSettingsRequest {
                daily_calorie_goal: Some(1800),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(merged.daily_calorie_goal, 1800);
        assert_eq!(merged.carb_percentage, 40);
        assert_eq!(merged.protein_percentage, 45);
    }

    #[test]
    fn total_is_checked_after_merging() {
        let err = merge_settings(
            &MacroGoalSettings::default(),
            UpdateSettingsRequest {
                carb_percentage: Some(50),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::PercentageTotal { current_total: 110 }));

        let ok = merge_settings(
            &MacroGoalSettings::default(),
            UpdateSettingsRequest {
                carb_percentage: Some(50),
                protein_percentage: Some(35),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ok.percentage_total(), 100);
    }

    #[test]
    fn huge_percentages_do_not_wrap_to_one_hundred() {
        let err = merge_settings(
            &MacroGoalSettings::default(),
            UpdateSettingsRequest {
                carb_percentage: Some(u32::MAX),
                fat_percentage: Some(1),
                protein_percentage: Some(100),
                ..Default::default()
            },
        )
        .unwrap_err();
        let ApiError::PercentageTotal { current_total } = err else {
            panic!("expected percentage error, got {err:?}");
        };
        assert_eq!(current_total, u64::from(u32::MAX) + 101);
    }

    #[test]
    fn zero_goal_is_rejected() {
        let err = merge_settings(
            &MacroGoalSettings::default(),
            UpdateSettingsRequest {
                daily_calorie_goal: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }
}
