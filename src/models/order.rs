use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::OrderLimits;
use crate::error::ValidationError;
use crate::services::validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order types a user may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
    StopMarket,
}

impl OrderType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Some(Self::Market),
            "LIMIT" => Some(Self::Limit),
            "STOP_LIMIT" => Some(Self::StopLimit),
            "STOP_MARKET" => Some(Self::StopMarket),
            _ => None,
        }
    }

    pub fn requires_price(self) -> bool {
        matches!(self, Self::Limit | Self::StopLimit)
    }

    pub fn requires_stop_price(self) -> bool {
        matches!(self, Self::StopLimit | Self::StopMarket)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::StopLimit => "STOP_LIMIT",
            Self::StopMarket => "STOP_MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated order. Fields are private so the quantity and price
/// requirements of the order type always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    symbol: String,
    side: OrderSide,
    order_type: OrderType,
    quantity: f64,
    price: Option<f64>,
    stop_price: Option<f64>,
}

impl OrderRequest {
    pub fn new(
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: f64,
        price: Option<f64>,
        stop_price: Option<f64>,
        limits: &OrderLimits,
    ) -> Result<Self, ValidationError> {
        let valid = validator::validate(side, order_type, quantity, price, stop_price, limits)?;

        Ok(Self {
            symbol: symbol.trim().to_uppercase(),
            side: valid.side,
            order_type: valid.order_type,
            quantity,
            price,
            stop_price,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn stop_price(&self) -> Option<f64> {
        self.stop_price
    }
}

fn zero() -> String {
    "0".to_string()
}

/// An order as reported by the exchange. Numeric fields stay as the
/// exchange's decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub order_id: i64,
    pub symbol: String,
    pub side: String,

    #[serde(rename = "type")]
    pub order_type: String,

    pub status: String,

    #[serde(default = "zero")]
    pub orig_qty: String,
    #[serde(default = "zero")]
    pub price: String,
    #[serde(default = "zero")]
    pub executed_qty: String,
    #[serde(default = "zero")]
    pub avg_price: String,
}

/// Both legs of an emulated stop-limit order.
#[derive(Debug, Clone, PartialEq)]
pub struct StopLimitLegs {
    pub entry: OrderResult,
    pub exit: OrderResult,
}
