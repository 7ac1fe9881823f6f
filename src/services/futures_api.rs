use async_trait::async_trait;

use crate::{
    error::ApiError,
    models::{AccountInfo, OrderResult, OrderSide},
};

/// Order types as the futures endpoint names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOrderType {
    Market,
    Limit,
    TakeProfit,
}

impl ExchangeOrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Market => "MARKET",
            Self::Limit => "LIMIT",
            Self::TakeProfit => "TAKE_PROFIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    GoodTillCancel,
}

impl TimeInForce {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoodTillCancel => "GTC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingType {
    ContractPrice,
}

impl WorkingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContractPrice => "CONTRACT_PRICE",
        }
    }
}

/// Parameters of a create-order call.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: ExchangeOrderType,
    pub quantity: f64,
    pub price: Option<f64>,
    pub stop_price: Option<f64>,
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: Option<bool>,
    pub working_type: Option<WorkingType>,
}

impl NewOrder {
    pub fn new(symbol: &str, side: OrderSide, order_type: ExchangeOrderType, quantity: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            side,
            order_type,
            quantity,
            price: None,
            stop_price: None,
            time_in_force: None,
            reduce_only: None,
            working_type: None,
        }
    }

    /// Request parameters in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.as_str().to_string()),
            ("type", self.order_type.as_str().to_string()),
            ("quantity", self.quantity.to_string()),
        ];
        if let Some(p) = self.price {
            out.push(("price", p.to_string()));
        }
        if let Some(sp) = self.stop_price {
            out.push(("stopPrice", sp.to_string()));
        }
        if let Some(tif) = self.time_in_force {
            out.push(("timeInForce", tif.as_str().to_string()));
        }
        if let Some(ro) = self.reduce_only {
            out.push(("reduceOnly", ro.to_string()));
        }
        if let Some(wt) = self.working_type {
            out.push(("workingType", wt.as_str().to_string()));
        }
        out
    }
}

/// The USDT-M futures operations the trading service depends on.
#[async_trait]
pub trait FuturesApi: Send + Sync {
    async fn account_info(&self) -> Result<AccountInfo, ApiError>;

    async fn create_order(&self, order: &NewOrder) -> Result<OrderResult, ApiError>;

    async fn open_orders(&self, symbol: Option<&str>) -> Result<Vec<OrderResult>, ApiError>;

    async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderResult, ApiError>;
}
