//! User request handlers.
//!
//! The only place where service results become HTTP status codes.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};

use crate::api::dto::{CreateUserRequest, MessageResponse, UserResponse};
use crate::api::error::ApiError;
use crate::error::AppError;
use crate::state::AppState;

const INVALID_INPUT: &str = "Invalid input";
const CREATE_FAILED: &str = "Could not create user";
const CREATED: &str = "User created successfully";
const INVALID_ID: &str = "invalid user id";

/// Creates user-related routes.
///
/// Routes:
/// - POST /user, /user/  - Create a new user
/// - GET  /user/{id}, /user/{id}/ - Get user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/", post(create_user))
        .route("/user/{id}", get(get_user))
        .route("/user/{id}/", get(get_user))
}

/// POST /api/v1/user/ - Create new user
///
/// Returns 201 with an acknowledgement and a `Location` header pointing at
/// the new user. Service failures are logged and reported as a generic 500.
async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected create user body");
        ApiError::bad_request(INVALID_INPUT)
    })?;

    let user = state
        .services
        .create_user
        .execute(request.name, request.phone)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to create user");
            ApiError::internal(CREATE_FAILED)
        })?;

    tracing::info!(user_id = user.id, "User created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/v1/user/{}", user.id))],
        Json(MessageResponse::new(CREATED)),
    ))
}

/// GET /api/v1/user/{id} - Get user by ID
///
/// Any service failure is reported as 404 carrying the error's message.
async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id: i64 = raw_id
        .parse()
        .map_err(|_| ApiError::bad_request(INVALID_ID))?;

    // Ids beyond the i32 key range cannot exist in the store
    let result = match i32::try_from(id) {
        Ok(id) => state.services.get_user_by_id.execute(id).await,
        Err(_) => Err(AppError::not_found("user", "id", id)),
    };

    let user = result.map_err(|err| {
        if err.is_not_found() {
            tracing::warn!(user_id = id, "User not found");
        } else {
            tracing::error!(user_id = id, error = %err, "Failed to fetch user");
        }
        ApiError::not_found(err.to_string())
    })?;

    Ok(Json(UserResponse::from(user)))
}
