use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    extract::ApiJson,
    logs::{
        dto::{AddEntryRequest, DaySummaryResponse, RepairReport, UpdateEntryRequest},
        services::{parse_log_date, repair_logs, validate_quantity},
    },
    nutrition::{aggregate_day, macro_split, DailyLog, Food, LogEntry},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs))
        .route("/:date", get(get_log))
        .route("/:date/summary", get(day_summary))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/repair", post(repair))
        .route("/:date/entries", post(add_entry))
        .route("/:date/entries/:entry_id", put(update_entry).delete(delete_entry))
}

#[instrument(skip(state))]
pub async fn list_logs(State(state): State<AppState>) -> Result<Json<Vec<DailyLog>>, ApiError> {
    Ok(Json(state.store.daily_logs().await?))
}

/// The stored log for a date, or a fresh empty one that is not persisted.
#[instrument(skip(state))]
pub async fn get_log(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyLog>, ApiError> {
    let date = parse_log_date(&date)?;
    let log = state
        .store
        .daily_logs()
        .await?
        .into_iter()
        .find(|l| l.date == date)
        .unwrap_or_else(|| DailyLog::empty(date));
    Ok(Json(log))
}

#[instrument(skip(state, payload))]
pub async fn add_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    ApiJson(payload): ApiJson<AddEntryRequest>,
) -> Result<(StatusCode, Json<LogEntry>), ApiError> {
    let date = parse_log_date(&date)?;
    let (Some(food_id), Some(quantity)) = (payload.food_id, payload.quantity) else {
        return Err(ApiError::MissingFields);
    };
    let quantity = validate_quantity(quantity)?;

    let entry = LogEntry {
        id: Uuid::new_v4(),
        food_id,
        quantity,
        date,
    };

    let _guard = state.write_lock.lock().await;
    let mut logs = state.store.daily_logs().await?;
    match logs.iter_mut().find(|l| l.date == date) {
        Some(log) => log.entries.push(entry.clone()),
        None => {
            debug!(%date, "creating daily log");
            let mut log = DailyLog::empty(date);
            log.entries.push(entry.clone());
            logs.push(log);
        }
    }
    state.store.save_daily_logs(&logs).await?;

    info!(entry_id = %entry.id, %food_id, %date, "food entry added");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    Path((date, entry_id)): Path<(String, Uuid)>,
    ApiJson(payload): ApiJson<UpdateEntryRequest>,
) -> Result<Json<LogEntry>, ApiError> {
    let date = parse_log_date(&date)?;
    let Some(quantity) = payload.quantity else {
        return Err(ApiError::Invalid("Missing quantity field".into()));
    };
    let quantity = validate_quantity(quantity)?;

    let _guard = state.write_lock.lock().await;
    let mut logs = state.store.daily_logs().await?;
    let log = logs
        .iter_mut()
        .find(|l| l.date == date)
        .ok_or_else(|| ApiError::not_found("Daily log not found"))?;
    let entry = log
        .entries
        .iter_mut()
        .find(|e| e.id == entry_id)
        .ok_or_else(|| ApiError::not_found("Food entry not found"))?;

    entry.quantity = quantity;
    let updated = entry.clone();
    state.store.save_daily_logs(&logs).await?;

    info!(%entry_id, %date, quantity, "food entry updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path((date, entry_id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    let date = parse_log_date(&date)?;

    let _guard = state.write_lock.lock().await;
    let mut logs = state.store.daily_logs().await?;
    debug!(logs = logs.len(), "loaded daily logs for delete");

    let Some(log) = logs.iter_mut().find(|l| l.date == date) else {
        let available: Vec<String> = logs.iter().map(|l| l.date.to_string()).collect();
        return Err(ApiError::not_found_with(
            "Daily log not found",
            json!({ "date": date.to_string(), "availableDates": available }),
        ));
    };

    let before = log.entries.len();
    log.entries.retain(|e| e.id != entry_id);
    if log.entries.len() == before {
        let available: Vec<Uuid> = log.entries.iter().map(|e| e.id).collect();
        return Err(ApiError::not_found_with(
            "Food entry not found",
            json!({ "entryId": entry_id, "availableEntryIds": available }),
        ));
    }
    state.store.save_daily_logs(&logs).await?;

    info!(%entry_id, %date, "food entry deleted");
    Ok(Json(json!({ "message": "Food entry deleted successfully" })))
}

/// Scaled entries, totals and remaining values for one date.
#[instrument(skip(state))]
pub async fn day_summary(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DaySummaryResponse>, ApiError> {
    let date = parse_log_date(&date)?;
    let foods: HashMap<Uuid, Food> = state
        .store
        .foods()
        .await?
        .into_iter()
        .map(|food| (food.id, food))
        .collect();
    let settings = state.store.settings().await?;
    let entries = state
        .store
        .daily_logs()
        .await?
        .into_iter()
        .find(|l| l.date == date)
        .map(|l| l.entries)
        .unwrap_or_default();

    let breakdown = aggregate_day(&entries, &foods, &settings);
    let consumed = breakdown.summary.total();
    Ok(Json(DaySummaryResponse {
        date,
        consumed_split: macro_split(consumed.carbs, consumed.fat, consumed.protein),
        breakdown,
    }))
}

/// Back up the logs, then drop or fix whatever no longer lines up with the
/// food catalog. Only rewrites the logs when something was wrong.
#[instrument(skip(state))]
pub async fn repair(State(state): State<AppState>) -> Result<Json<RepairReport>, ApiError> {
    let _guard = state.write_lock.lock().await;
    let backup = state.store.backup_daily_logs().await?;
    let foods = state.store.foods().await?;
    let logs = state.store.daily_logs().await?;
    info!(foods = foods.len(), logs = logs.len(), "checking daily logs");

    let result = repair_logs(logs, &foods);
    let valid = result.is_valid();
    if !valid {
        state.store.save_daily_logs(&result.logs).await?;
        info!(problems = result.problems.len(), dropped = result.entries_dropped, "daily logs repaired");
    }

    Ok(Json(RepairReport {
        valid,
        logs_kept: result.logs.len(),
        entries_dropped: result.entries_dropped,
        problems: result.problems,
        backup,
    }))
}
