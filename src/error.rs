use thiserror::Error;

use crate::models::{OrderResult, OrderType};

/// Client-side rejection of order parameters. Raised before any network I/O.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid side {0:?}. Must be one of: BUY, SELL")]
    InvalidSide(String),

    #[error("Invalid order type {0:?}. Must be one of: MARKET, LIMIT, STOP_LIMIT, STOP_MARKET")]
    InvalidType(String),

    #[error("{reason}")]
    InvalidQuantity { quantity: f64, reason: String },

    #[error("{0} orders require a price")]
    MissingPrice(OrderType),

    #[error("{0} orders require a stop price")]
    MissingStopPrice(OrderType),

    #[error("{field} must be a positive number")]
    InvalidPrice { field: &'static str, value: f64 },
}

/// Errors from the exchange REST client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("order rejected by exchange (code {code}): {msg}")]
    OrderRejected { code: i64, msg: String },

    #[error("exchange returned {status} (code {code}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("could not decode exchange response: {0}")]
    Decode(String),

    #[error("could not sign request: {0}")]
    Signing(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Where a failed adapter call went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    OrderRejected,
    ApiError,
    Unexpected,
}

/// Failure of a trading operation as seen by the CLI.
#[derive(Debug, Error)]
pub enum TradeError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("order failed: {0}")]
    OrderRejected(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),

    // the entry leg stays live on the exchange
    #[error("exit leg failed while entry order {} is live: {source}", .entry.order_id)]
    ExitLegFailed {
        entry: Box<OrderResult>,
        source: Box<TradeError>,
    },
}

impl TradeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TradeError::Validation(_) => FailureKind::Validation,
            TradeError::OrderRejected(_) => FailureKind::OrderRejected,
            TradeError::Api(_) => FailureKind::ApiError,
            TradeError::Unexpected(_) => FailureKind::Unexpected,
            TradeError::ExitLegFailed { source, .. } => source.kind(),
        }
    }
}

impl From<ApiError> for TradeError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::OrderRejected { .. } => TradeError::OrderRejected(e.to_string()),
            ApiError::Api { .. } | ApiError::Transport(_) => TradeError::Api(e.to_string()),
            ApiError::Decode(_) | ApiError::Signing(_) => TradeError::Unexpected(e.to_string()),
        }
    }
}
