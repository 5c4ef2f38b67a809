use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    extract::ApiJson,
    foods::{
        dto::{CreateFoodRequest, UpdateFoodRequest},
        services::{apply_update, build_food},
    },
    nutrition::Food,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_foods))
        .route("/:id", get(get_food))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::post(create_food))
        .route("/:id", axum::routing::put(update_food).delete(delete_food))
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<Food>>, ApiError> {
    Ok(Json(state.store.foods().await?))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Food>, ApiError> {
    state
        .store
        .foods()
        .await?
        .into_iter()
        .find(|f| f.id == id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Food not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateFoodRequest>,
) -> Result<(StatusCode, Json<Food>), ApiError> {
    let food = build_food(payload)?;

    let _guard = state.write_lock.lock().await;
    let mut foods = state.store.foods().await?;
    foods.push(food.clone());
    state.store.save_foods(&foods).await?;

    info!(food_id = %food.id, name = %food.name, "food created");
    Ok((StatusCode::CREATED, Json(food)))
}

#[instrument(skip(state, payload))]
pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateFoodRequest>,
) -> Result<Json<Food>, ApiError> {
    let _guard = state.write_lock.lock().await;
    let mut foods = state.store.foods().await?;
    let slot = foods
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| ApiError::not_found("Food not found"))?;

    let updated = apply_update(slot, payload)?;
    *slot = updated.clone();
    state.store.save_foods(&foods).await?;

    info!(food_id = %id, "food updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let _guard = state.write_lock.lock().await;
    let mut foods = state.store.foods().await?;
    let before = foods.len();
    foods.retain(|f| f.id != id);
    if foods.len() == before {
        return Err(ApiError::not_found("Food not found"));
    }
    state.store.save_foods(&foods).await?;

    info!(food_id = %id, "food deleted");
    Ok(Json(json!({ "message": "Food deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats() -> CreateFoodRequest {
        CreateFoodRequest {
            name: Some("Oats".into()),
            carbs: Some(66.0),
            fat: Some(7.0),
            protein: Some(17.0),
            unit: Some("g".into()),
            serving_size: Some(100.0),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let state = AppState::fake();
        let (status, Json(created)) = create_food(State(state.clone()), ApiJson(oats()))
            .await
            .expect("create");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.calories, 66.0 * 4.0 + 7.0 * 9.0 + 17.0 * 4.0);

        let Json(fetched) = get_food(State(state.clone()), Path(created.id)).await.expect("get");
        assert_eq!(fetched, created);

        let Json(all) = list_foods(State(state)).await.expect("list");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn unknown_food_is_404() {
        let state = AppState::fake();
        let err = get_food(State(state), Path(Uuid::new_v4())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Food not found");
    }

    #[tokio::test]
    async fn create_without_fields_is_400() {
        let state = AppState::fake();
        let err = create_food(State(state), ApiJson(CreateFoodRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required fields");
    }

    #[tokio::test]
    async fn update_keeps_unspecified_fields() {
        let state = AppState::fake();
        let (_, Json(created)) = create_food(State(state.clone()), ApiJson(oats())).await.unwrap();

        let Json(updated) = update_food(
            State(state.clone()),
            Path(created.id),
            ApiJson(UpdateFoodRequest {
                serving_size: Some(40.0),
                ..Default::default()
            }),
        )
        .await
        .expect("update");
        assert_eq!(updated.serving_size, 40.0);
        assert_eq!(updated.name, "Oats");

        let stored = state.store.foods().await.unwrap();
        assert_eq!(stored, vec![updated]);
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let state = AppState::fake();
        let (_, Json(created)) = create_food(State(state.clone()), ApiJson(oats())).await.unwrap();

        let Json(body) = delete_food(State(state.clone()), Path(created.id)).await.expect("delete");
        assert_eq!(body["message"], "Food deleted successfully");
        assert!(state.store.foods().await.unwrap().is_empty());

        let err = delete_food(State(state), Path(created.id)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
