//! Goal management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser, routes::error_response};
use centry_db::repositories::goal::{
    CreateGoalInput, GoalError, GoalRepository, UpdateGoalInput,
};
use centry_shared::AppError;

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Creates the goal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals))
        .route("/goals", post(create_goal))
        .route("/goals/{goal_id}", get(get_goal))
        .route("/goals/{goal_id}", put(update_goal))
        .route("/goals/{goal_id}", delete(delete_goal))
}

/// Request body for creating a goal.
#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    /// Goal name.
    pub name: String,
    /// Target amount to reach.
    pub target_amount: Decimal,
    /// Funding account, if any.
    pub account_id: Option<Uuid>,
    /// Optional target date.
    pub target_date: Option<NaiveDate>,
}

/// Request body for updating a goal. Missing fields are left unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateGoalRequest {
    /// New goal name.
    pub name: Option<String>,
    /// New target amount.
    pub target_amount: Option<Decimal>,
    /// New funding account (`null` detaches).
    #[serde(default, deserialize_with = "double_option")]
    pub account_id: Option<Option<Uuid>>,
    /// New target date (`null` clears).
    #[serde(default, deserialize_with = "double_option")]
    pub target_date: Option<Option<NaiveDate>>,
}

fn map_error(error: GoalError) -> AppError {
    match error {
        GoalError::NotFound(id) => AppError::NotFound(format!("goal {id}")),
        GoalError::Database(e) => AppError::StoreFailure(e.to_string()),
    }
}

/// GET `/goals` - List the owner's goals in creation order.
async fn list_goals(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.list_for_owner(auth.user_id()).await {
        Ok(goals) => (StatusCode::OK, Json(json!({ "goals": goals }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list goals");
            error_response(&AppError::StoreFailure(e.to_string()))
        }
    }
}

/// POST `/goals` - Create a goal with zero progress.
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    let input = CreateGoalInput {
        owner_id: auth.user_id(),
        account_id: payload.account_id,
        name: payload.name,
        target_amount: payload.target_amount,
        target_date: payload.target_date,
    };

    match repo.create(input).await {
        Ok(goal) => {
            info!(goal_id = %goal.id, "Goal created");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "data": goal })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create goal");
            error_response(&map_error(e))
        }
    }
}

/// GET `/goals/{goal_id}` - Fetch a single goal.
async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.get(auth.user_id(), goal_id).await {
        Ok(goal) => (StatusCode::OK, Json(json!({ "goal": goal }))).into_response(),
        Err(e) => error_response(&map_error(e)),
    }
}

/// PUT `/goals/{goal_id}` - Update a goal's metadata.
async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
    Json(payload): Json<UpdateGoalRequest>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    let input = UpdateGoalInput {
        name: payload.name,
        target_amount: payload.target_amount,
        account_id: payload.account_id,
        target_date: payload.target_date,
    };

    match repo.update(auth.user_id(), goal_id, input).await {
        Ok(goal) => {
            info!(goal_id = %goal.id, "Goal updated");
            (StatusCode::OK, Json(json!({ "success": true, "data": goal }))).into_response()
        }
        Err(e) => error_response(&map_error(e)),
    }
}

/// DELETE `/goals/{goal_id}` - Delete a goal, detaching its transactions.
async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(goal_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = GoalRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), goal_id).await {
        Ok(()) => {
            info!(goal_id = %goal_id, "Goal deleted");
            (StatusCode::OK, Json(json!({ "success": true, "data": null }))).into_response()
        }
        Err(e) => error_response(&map_error(e)),
    }
}
