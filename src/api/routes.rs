//! Route table of the HTTP API
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | /accounts | `create_account` |
//! | GET | /accounts/{account_id} | `get_account` |
//! | POST | /accounts/deposit | `deposit` |
//! | POST | /accounts/withdraw | `withdraw` |
//! | POST | /accounts/transfer | `transfer` |
//! | GET | /accounts/{account_id}/transactions | `list_transactions` |
//! | GET | /health | `health_check` |

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::handlers::*;
use crate::api::AppState;
use crate::traits::LedgerService;

/// Build the router over any ledger service
pub fn create_router(ledger: Arc<dyn LedgerService>) -> Router {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/deposit", post(deposit))
        .route("/accounts/withdraw", post(withdraw))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}/transactions", get(list_transactions))
        .route("/health", get(health_check))
        .with_state(AppState { ledger })
}
