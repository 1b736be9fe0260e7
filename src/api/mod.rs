//! HTTP transport over the ledger
//!
//! Handlers do no business logic of their own: they decode the request, call
//! the [`LedgerService`](crate::traits::LedgerService) and translate the
//! outcome into a status code and JSON body.

use std::sync::Arc;

use crate::traits::LedgerService;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::create_router;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerService>,
}
