//! Transaction mutation and read routes.
//!
//! Mutations return the structured result envelope and carry the cache
//! keys they invalidated in the `x-centry-invalidate` header.

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

use crate::{
    AppState,
    middleware::AuthUser,
    routes::{error_response, with_invalidations},
};
use centry_core::ledger::{RecurringInterval, TransactionDraft, TransactionKind};
use centry_db::repositories::transaction::{TransactionError, TransactionRepository};
use centry_shared::AppError;

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions/bulk-delete", post(bulk_delete_transactions))
        .route("/transactions/{transaction_id}", get(get_transaction))
        .route("/transactions/{transaction_id}", put(update_transaction))
        .route("/transactions/{transaction_id}", delete(delete_transaction))
        .route(
            "/accounts/{account_id}/transactions",
            get(list_account_transactions),
        )
}

/// Request body for creating or updating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    /// Account the transaction posts to.
    pub account_id: Uuid,
    /// INCOME or EXPENSE.
    pub kind: TransactionKind,
    /// Unsigned amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Optional description.
    pub description: Option<String>,
    /// Posting date.
    pub date: NaiveDate,
    /// Whether the transaction recurs (default: false).
    pub is_recurring: Option<bool>,
    /// Recurrence interval, required iff recurring.
    pub recurring_interval: Option<RecurringInterval>,
    /// Goal to link, if any.
    pub goal_id: Option<Uuid>,
}

impl TransactionRequest {
    fn into_draft(self) -> TransactionDraft {
        TransactionDraft {
            account_id: self.account_id,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            is_recurring: self.is_recurring.unwrap_or(false),
            recurring_interval: self.recurring_interval,
            goal_id: self.goal_id,
        }
    }
}

/// Request body for bulk deleting transactions.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    /// Ids of the transactions to delete.
    pub ids: Vec<Uuid>,
}

fn map_error(error: TransactionError) -> AppError {
    match error {
        TransactionError::NotFound(id) => AppError::NotFound(format!("transaction {id}")),
        TransactionError::AccountNotFound(id) => AppError::NotFound(format!("account {id}")),
        TransactionError::GoalNotFound(id) => AppError::NotFound(format!("goal {id}")),
        TransactionError::NoTransactionsMatched => {
            AppError::NoTransactionsMatched("no owned transactions matched the ids".to_string())
        }
        TransactionError::Validation(e) => AppError::InvalidInput(e.to_string()),
        TransactionError::Database(e) => AppError::StoreFailure(e.to_string()),
    }
}

/// POST `/transactions` - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.create(auth.user_id(), payload.into_draft()).await {
        Ok(mutation) => {
            info!(transaction_id = %mutation.transaction.id, "Transaction created");
            let response = (
                StatusCode::CREATED,
                Json(json!({ "success": true, "data": mutation.transaction })),
            )
                .into_response();
            with_invalidations(response, &mutation.invalidations)
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            error_response(&map_error(e))
        }
    }
}

/// GET `/transactions/{transaction_id}` - Fetch a single transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get(auth.user_id(), transaction_id).await {
        Ok(transaction) => {
            (StatusCode::OK, Json(json!({ "transaction": transaction }))).into_response()
        }
        Err(e) => error_response(&map_error(e)),
    }
}

/// PUT `/transactions/{transaction_id}` - Update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .update(auth.user_id(), transaction_id, payload.into_draft())
        .await
    {
        Ok(mutation) => {
            info!(transaction_id = %mutation.transaction.id, "Transaction updated");
            let response = (
                StatusCode::OK,
                Json(json!({ "success": true, "data": mutation.transaction })),
            )
                .into_response();
            with_invalidations(response, &mutation.invalidations)
        }
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            error_response(&map_error(e))
        }
    }
}

/// DELETE `/transactions/{transaction_id}` - Delete a single transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), transaction_id).await {
        Ok(outcome) => {
            info!(transaction_id = %transaction_id, "Transaction deleted");
            let response = (
                StatusCode::OK,
                Json(json!({ "success": true, "data": { "deleted": outcome.deleted } })),
            )
                .into_response();
            with_invalidations(response, &outcome.invalidations)
        }
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            error_response(&map_error(e))
        }
    }
}

/// POST `/transactions/bulk-delete` - Delete a set of transactions atomically.
async fn bulk_delete_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BulkDeleteRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.bulk_delete(auth.user_id(), &payload.ids).await {
        Ok(outcome) => {
            info!(deleted = outcome.deleted, "Transactions bulk deleted");
            let response = (
                StatusCode::OK,
                Json(json!({ "success": true, "data": { "deleted": outcome.deleted } })),
            )
                .into_response();
            with_invalidations(response, &outcome.invalidations)
        }
        Err(e) => {
            error!(error = %e, "Failed to bulk delete transactions");
            error_response(&map_error(e))
        }
    }
}

/// GET `/accounts/{account_id}/transactions` - List an account's
/// transactions, newest first.
async fn list_account_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_for_account(auth.user_id(), account_id).await {
        Ok(transactions) => {
            (StatusCode::OK, Json(json!({ "transactions": transactions }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            error_response(&AppError::StoreFailure(e.to_string()))
        }
    }
}
