//! User HTTP Routes
//!
//! Endpoints for the secondary user record set: registration, listing,
//! bulk delete, and the stats aggregate.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::observability::{Logger, MetricsRegistry};
use crate::users::{NewUser, UserError, UserRecord, UserStats, UserStore};

use super::errors::ApiError;

// ==================
// Shared State
// ==================

/// User state shared across handlers
pub struct UserState {
    pub users: UserStore,
    pub metrics: Arc<MetricsRegistry>,
}

impl UserState {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            users: UserStore::new(),
            metrics,
        }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserRecord>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteAllResponse {
    pub message: String,
    pub removed: usize,
}

// ==================
// User Routes
// ==================

/// Create user routes
pub fn user_routes(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/users", post(add_user_handler))
        .route("/users", get(list_users_handler))
        .route("/users/delete_all", delete(delete_all_users_handler))
        .route("/users/stats", get(user_stats_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Record a failed user request in the metrics and the log, then pass
/// the error on to the response mapping
fn observe_rejection(state: &UserState, err: ApiError) -> ApiError {
    match &err {
        ApiError::User(UserError::Storage(_)) => {
            let detail = err.to_string();
            Logger::error("USER_STORE_FAILED", &[("error", &detail)]);
        }
        other => {
            state.metrics.record_user_rejected();
            let detail = other.to_string();
            Logger::error("USER_REJECTED", &[("error", &detail)]);
        }
    }
    err
}

// ==================
// User Handlers
// ==================

async fn add_user_handler(
    State(state): State<Arc<UserState>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    add_user(&state, body).map_err(|err| observe_rejection(&state, err))
}

fn add_user(
    state: &UserState,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(new_user) = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let record = new_user.validate()?;

    let username = record.username.clone();
    let country = record.country.clone();
    state.users.insert(record)?;

    state.metrics.record_user_added();
    Logger::info("USER_ADDED", &[("username", &username), ("country", &country)]);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("User '{}' added", username),
        }),
    ))
}

async fn list_users_handler(
    State(state): State<Arc<UserState>>,
) -> Result<Json<UsersListResponse>, ApiError> {
    let users = state
        .users
        .list()
        .map_err(|err| observe_rejection(&state, ApiError::from(err)))?;

    Ok(Json(UsersListResponse {
        total: users.len(),
        users,
    }))
}

async fn delete_all_users_handler(
    State(state): State<Arc<UserState>>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let removed = state
        .users
        .delete_all()
        .map_err(|err| observe_rejection(&state, ApiError::from(err)))?;

    state.metrics.record_users_removed(removed as u64);
    let removed_text = removed.to_string();
    Logger::info("USERS_CLEARED", &[("removed", &removed_text)]);

    Ok(Json(DeleteAllResponse {
        message: "All users deleted".to_string(),
        removed,
    }))
}

async fn user_stats_handler(
    State(state): State<Arc<UserState>>,
) -> Result<Json<UserStats>, ApiError> {
    let stats = state
        .users
        .stats()
        .map_err(|err| observe_rejection(&state, ApiError::from(err)))?;
    Ok(Json(stats))
}
