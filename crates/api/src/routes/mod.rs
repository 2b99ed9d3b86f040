//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use kassa_shared::error::AppError;
use rust_decimal::Decimal;
use serde_json::json;

use crate::AppState;

pub mod accounts;
pub mod health;
pub mod journals;
pub mod reports;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(journals::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
}

/// Converts an application error into the JSON error envelope.
///
/// Server errors are logged here so handlers don't repeat it.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}

/// Formats a monetary amount as a 2-dp decimal string.
pub(crate) fn money(value: Decimal) -> String {
    format!("{value:.2}")
}

/// Builds a page request from optional query parameters.
pub(crate) fn page_request(page: Option<u32>, limit: Option<u32>) -> kassa_shared::types::PageRequest {
    let defaults = kassa_shared::types::PageRequest::default();
    kassa_shared::types::PageRequest {
        page: page.unwrap_or(defaults.page),
        limit: limit.unwrap_or(defaults.limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_always_two_decimal_places() {
        assert_eq!(money(dec!(100)), "100.00");
        assert_eq!(money(dec!(0.5)), "0.50");
        assert_eq!(money(dec!(-12.3)), "-12.30");
        assert_eq!(money(Decimal::ZERO), "0.00");
    }
}
