use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::{
    error::ApiError,
    models::{HealthResponse, User, UserSummary},
    present::Present,
    state::AppState,
};
use crate::presenter::DataMethods;

/// Presenters the user endpoints accept
const USER_PRESENTERS: &[&str] = &["html", "json"];

fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
        },
    ]
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

/// User listing (GET /users)
///
/// The html view receives the full records under `users`; the json
/// presenter gets the compact `listing` data method instead.
pub async fn list_users(present: Present) -> Result<Response, ApiError> {
    let all = users();
    let data = serde_json::json!({ "users": to_value(&all)?, "count": all.len() });

    let controller = DataMethods::new().with("listing", move || {
        let listing: Vec<UserSummary> = all
            .iter()
            .map(|user| UserSummary {
                id: user.id,
                name: user.name.clone(),
            })
            .collect();
        Ok(serde_json::to_value(listing)?)
    });

    present
        .controller(controller)
        .set_option("data.json", "listing")
        .data(data)
        .using(USER_PRESENTERS)
}

/// Single user (GET /users/{id} and GET /users/{id}/{presentUsing})
pub async fn show_user(
    present: Present,
    Path(params): Path<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let id = params
        .iter()
        .find(|(key, _)| key == "id")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .ok_or_else(|| ApiError::NotFound("user".to_string()))?;

    let user = users()
        .into_iter()
        .find(|user| user.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("user {id}")))?;

    present.data(to_value(&user)?).using(USER_PRESENTERS)
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        presenters: state.registry.presenters().map(str::to_string).collect(),
        metrics: state.metrics.snapshot(),
    };

    (StatusCode::OK, Json(response))
}
