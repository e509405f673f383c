//! Pass-through auth endpoints. Session issuance happens entirely in the
//! managed auth service; failures surface its message verbatim.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{backend::BackendError, error::AppError, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    payload
        .validate()
        .map_err(|_| AppError::validation("Email and password required"))?;

    let session = state
        .backend
        .auth()
        .sign_up(&payload.email, &payload.password)
        .await
        .map_err(|err| AppError::validation(service_message(err)))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": session.user.clone(),
            "session": session,
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<serde_json::Value>, AppError> {
    let session = state
        .backend
        .auth()
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(|err| AppError::unauthorized(service_message(err)))?;

    Ok(Json(json!({
        "message": "Login successful",
        "user": session.user.clone(),
        "session": session,
    })))
}

fn service_message(err: BackendError) -> String {
    match err {
        BackendError::Service { message, .. } => message,
        other => other.to_string(),
    }
}
