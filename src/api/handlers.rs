//! HTTP handlers; each one forwards to the ledger service and shapes the reply

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::*;
use crate::api::error::ApiError;
use crate::api::AppState;

/// POST /accounts
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let Json(request) = payload?;
    let account = state
        .ledger
        .create_account(request.name, request.initial_balance)
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// GET /accounts/{account_id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.ledger.get_account(&account_id).await?;
    Ok(Json(account.into()))
}

/// POST /accounts/deposit
pub async fn deposit(
    State(state): State<AppState>,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    state
        .ledger
        .deposit(&request.account_id, request.amount)
        .await?;
    Ok(Json(MessageResponse::new("Deposit successful")))
}

/// POST /accounts/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    payload: Result<Json<WithdrawRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    state
        .ledger
        .withdraw(&request.account_id, request.amount)
        .await?;
    Ok(Json(MessageResponse::new("Withdraw successful")))
}

/// POST /accounts/transfer
pub async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    state
        .ledger
        .transfer(
            &request.from_account_id,
            &request.to_account_id,
            request.amount,
        )
        .await?;
    Ok(Json(MessageResponse::new("Transfer successful")))
}

/// GET /accounts/{account_id}/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let transactions = state.ledger.list_transactions(&account_id).await?;
    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    ))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
