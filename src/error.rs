use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::error;

use crate::{nutrition::NutritionError, storage::StoreError};

/// Errors surfaced by the HTTP handlers. Rendered as `{"message": ...}`
/// plus any extra context fields.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("{0}")]
    Invalid(String),

    #[error("Macro percentages must add up to 100%")]
    PercentageTotal { current_total: u64 },

    #[error("{message}")]
    NotFound {
        message: &'static str,
        context: Map<String, Value>,
    },

    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Nutrition(#[from] NutritionError),

    #[error("Internal error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        Self::NotFound {
            message,
            context: Map::new(),
        }
    }

    pub fn not_found_with(message: &'static str, context: Value) -> Self {
        let context = match context {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::NotFound { message, context }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields
            | ApiError::Invalid(_)
            | ApiError::PercentageTotal { .. }
            | ApiError::Nutrition(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = Map::new();
        body.insert("message".into(), Value::String(self.to_string()));

        match self {
            ApiError::PercentageTotal { current_total } => {
                body.insert("currentTotal".into(), json!(current_total));
            }
            ApiError::NotFound { context, .. } => body.extend(context),
            ApiError::Store(e) => error!(error = %e, "storage failure"),
            _ => {}
        }

        (status, Json(Value::Object(body))).into_response()
    }
}
