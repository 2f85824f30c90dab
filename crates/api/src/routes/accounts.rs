//! Account management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
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
use centry_core::ledger::CacheKey;
use centry_db::entities::sea_orm_active_enums::AccountKind;
use centry_db::repositories::account::{
    AccountError, AccountRepository, CreateAccountInput, UpdateAccountInput,
};
use centry_shared::AppError;

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}", put(update_account))
        .route("/accounts/{account_id}", delete(delete_account))
        .route("/accounts/{account_id}/default", put(set_default_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account name.
    pub name: String,
    /// Account type: CURRENT or SAVINGS.
    pub kind: AccountKind,
    /// Initial balance (default: 0).
    pub balance: Option<Decimal>,
    /// Whether to make this the default account (default: false).
    pub is_default: Option<bool>,
}

/// Request body for updating an account, including the explicit balance edit.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New account name.
    pub name: String,
    /// New account type: CURRENT or SAVINGS.
    pub kind: AccountKind,
    /// New balance, set directly.
    pub balance: Decimal,
    /// Whether to make this the default account (default: false).
    pub is_default: Option<bool>,
}

fn map_error(error: AccountError) -> AppError {
    match error {
        AccountError::NotFound(id) => AppError::NotFound(format!("account {id}")),
        AccountError::DefaultUndeletable(_) => AppError::InvalidInput(error.to_string()),
        AccountError::Database(e) => AppError::StoreFailure(e.to_string()),
    }
}

/// GET `/accounts` - List the owner's accounts, newest first.
async fn list_accounts(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_for_owner(auth.user_id()).await {
        Ok(accounts) => (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            error_response(&AppError::StoreFailure(e.to_string()))
        }
    }
}

/// POST `/accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = CreateAccountInput {
        owner_id: auth.user_id(),
        name: payload.name,
        kind: payload.kind,
        balance: payload.balance.unwrap_or(Decimal::ZERO),
        is_default: payload.is_default.unwrap_or(false),
    };

    match repo.create(input).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account created");
            (
                StatusCode::CREATED,
                Json(json!({ "success": true, "data": account })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            error_response(&map_error(e))
        }
    }
}

/// GET `/accounts/{account_id}` - Account detail with transactions,
/// newest first.
async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.get_with_transactions(auth.user_id(), account_id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "account": detail.account,
                "transactions": detail.transactions
            })),
        )
            .into_response(),
        Err(e) => error_response(&map_error(e)),
    }
}

/// PUT `/accounts/{account_id}` - Update name, type, balance, and default
/// flag. The balance write is a direct edit, not a reconciled delta, so
/// cached views of this account go stale and are flagged for invalidation.
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = UpdateAccountInput {
        name: payload.name,
        kind: payload.kind,
        balance: payload.balance,
        is_default: payload.is_default.unwrap_or(false),
    };

    match repo.update(auth.user_id(), account_id, input).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account updated");
            let response = (
                StatusCode::OK,
                Json(json!({ "success": true, "data": account })),
            )
                .into_response();
            with_invalidations(
                response,
                &[CacheKey::Dashboard, CacheKey::Account(account_id)],
            )
        }
        Err(e) => {
            error!(error = %e, "Failed to update account");
            error_response(&map_error(e))
        }
    }
}

/// PUT `/accounts/{account_id}/default` - Make this the default account.
async fn set_default_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.set_default(auth.user_id(), account_id).await {
        Ok(account) => {
            info!(account_id = %account.id, "Default account changed");
            (
                StatusCode::OK,
                Json(json!({ "success": true, "data": account })),
            )
                .into_response()
        }
        Err(e) => error_response(&map_error(e)),
    }
}

/// DELETE `/accounts/{account_id}` - Delete an account and its transactions.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete(auth.user_id(), account_id).await {
        Ok(()) => {
            info!(account_id = %account_id, "Account deleted");
            (StatusCode::OK, Json(json!({ "success": true, "data": null }))).into_response()
        }
        Err(e) => error_response(&map_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deleting_the_default_account_maps_to_invalid_input() {
        let err = map_error(AccountError::DefaultUndeletable(Uuid::nil()));
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("set another account as default"));
    }

    #[test]
    fn test_missing_account_maps_to_not_found() {
        let err = map_error(AccountError::NotFound(Uuid::nil()));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_update_request_carries_explicit_balance_edit() {
        let body = r#"{
            "name": "Everyday",
            "kind": "SAVINGS",
            "balance": "250.75",
            "is_default": true
        }"#;
        let request: UpdateAccountRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.balance, dec!(250.75));
        assert_eq!(request.is_default, Some(true));
    }
}
