use tracing::{debug, error, info, warn};

use crate::{
    config::{OrderLimits, Settings},
    error::{FailureKind, TradeError},
    models::{AccountInfo, BalanceSnapshot, OrderRequest, OrderResult, OrderType, StopLimitLegs},
};

use super::futures_api::{ExchangeOrderType, FuturesApi, NewOrder, TimeInForce, WorkingType};

/// Validates orders, sends them through the exchange client, and turns every
/// outcome into a value the CLI can show.
pub struct TradingService<E> {
    api: E,
    limits: OrderLimits,
}

impl<E: FuturesApi> TradingService<E> {
    pub fn new(api: E, settings: &Settings) -> Self {
        Self {
            api,
            limits: settings.limits,
        }
    }

    pub fn api(&self) -> &E {
        &self.api
    }

    /// Startup check: one authenticated account read. Returns the reported
    /// wallet balance.
    pub async fn test_connection(&self) -> Result<String, TradeError> {
        match self.api.account_info().await {
            Ok(account) => {
                info!(
                    "Connection successful - Wallet Balance: {} USDT",
                    account.total_wallet_balance
                );
                Ok(account.total_wallet_balance)
            }
            Err(e) => {
                let err = TradeError::from(e);
                error!("API connection failed: {err}");
                Err(err)
            }
        }
    }

    /// Reduce-only market order.
    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: f64,
    ) -> Result<OrderResult, TradeError> {
        let req = self.validated(symbol, side, OrderType::Market, quantity, None, None)?;

        info!("Placing MARKET {} order: {} {}", req.side(), req.quantity(), req.symbol());

        let mut order = NewOrder::new(req.symbol(), req.side(), ExchangeOrderType::Market, req.quantity());
        order.reduce_only = Some(true);

        self.submit(&order).await
    }

    /// GTC limit order.
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: f64,
        price: f64,
    ) -> Result<OrderResult, TradeError> {
        let req = self.validated(symbol, side, OrderType::Limit, quantity, Some(price), None)?;

        info!(
            "Placing LIMIT {} order: {} {} @ {}",
            req.side(),
            req.quantity(),
            req.symbol(),
            price
        );

        let mut order = NewOrder::new(req.symbol(), req.side(), ExchangeOrderType::Limit, req.quantity());
        order.price = req.price();
        order.time_in_force = Some(TimeInForce::GoodTillCancel);

        self.submit(&order).await
    }

    /// Stop-limit emulated with two legs: a resting limit order on the
    /// requested side, then a take-profit on the opposite side triggered at
    /// `stop_price`. If the exit leg fails the entry leg stays live and is
    /// returned inside the error.
    pub async fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: &str,
        quantity: f64,
        price: f64,
        stop_price: f64,
    ) -> Result<StopLimitLegs, TradeError> {
        let req = self.validated(
            symbol,
            side,
            OrderType::StopLimit,
            quantity,
            Some(price),
            Some(stop_price),
        )?;

        info!(
            "Placing STOP_LIMIT {} order: {} {} @ {}, stop @ {}",
            req.side(),
            req.quantity(),
            req.symbol(),
            price,
            stop_price
        );

        let mut entry_order =
            NewOrder::new(req.symbol(), req.side(), ExchangeOrderType::Limit, req.quantity());
        entry_order.price = req.price();
        entry_order.time_in_force = Some(TimeInForce::GoodTillCancel);
        entry_order.working_type = Some(WorkingType::ContractPrice);

        let mut exit_order = NewOrder::new(
            req.symbol(),
            req.side().opposite(),
            ExchangeOrderType::TakeProfit,
            req.quantity(),
        );
        exit_order.price = req.price();
        exit_order.stop_price = req.stop_price();
        exit_order.time_in_force = Some(TimeInForce::GoodTillCancel);
        exit_order.working_type = Some(WorkingType::ContractPrice);

        let entry = self.submit(&entry_order).await?;

        match self.submit(&exit_order).await {
            Ok(exit) => Ok(StopLimitLegs { entry, exit }),
            Err(e) => {
                // no compensating cancel
                warn!(
                    "Exit leg failed; entry order {} on {} remains live",
                    entry.order_id, entry.symbol
                );
                Err(TradeError::ExitLegFailed {
                    entry: Box::new(entry),
                    source: Box::new(e),
                })
            }
        }
    }

    pub async fn get_account_balance(&self) -> Result<BalanceSnapshot, TradeError> {
        let account = self.api.account_info().await.map_err(|e| {
            let err = TradeError::from(e);
            error!("Failed to get balance: {err}");
            err
        })?;

        let snapshot = balance_snapshot(&account).inspect_err(|e| error!("Failed to get balance: {e}"))?;

        info!(
            "Account Balance: total={} available={}",
            snapshot.total_balance, snapshot.available_balance
        );
        Ok(snapshot)
    }

    /// Open orders, optionally for one symbol. `Ok(vec![])` means there are
    /// none; a failed fetch is an `Err`.
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<OrderResult>, TradeError> {
        let symbol = symbol
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());

        match self.api.open_orders(symbol.as_deref()).await {
            Ok(orders) => {
                info!("Retrieved {} open orders", orders.len());
                Ok(orders)
            }
            Err(e) => {
                let err = TradeError::from(e);
                error!("Failed to get open orders: {err}");
                Err(err)
            }
        }
    }

    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderResult, TradeError> {
        let sym = symbol.trim().to_uppercase();
        info!("Cancelling order {order_id} for {sym}");

        match self.api.cancel_order(&sym, order_id).await {
            Ok(result) => {
                info!("Order {order_id} cancelled successfully");
                Ok(result)
            }
            Err(e) => {
                let err = TradeError::from(e);
                error!("Failed to cancel order: {err}");
                Err(err)
            }
        }
    }

    fn validated(
        &self,
        symbol: &str,
        side: &str,
        order_type: OrderType,
        quantity: f64,
        price: Option<f64>,
        stop_price: Option<f64>,
    ) -> Result<OrderRequest, TradeError> {
        OrderRequest::new(
            symbol,
            side,
            order_type.as_str(),
            quantity,
            price,
            stop_price,
            &self.limits,
        )
        .map_err(|e| {
            error!("Validation failed: {e}");
            TradeError::Validation(e)
        })
    }

    async fn submit(&self, order: &NewOrder) -> Result<OrderResult, TradeError> {
        debug!(?order, "create order");

        match self.api.create_order(order).await {
            Ok(result) => {
                info!("Order placed successfully - Order ID: {}", result.order_id);
                log_order_details(&result);
                Ok(result)
            }
            Err(e) => {
                let err = TradeError::from(e);
                match err.kind() {
                    FailureKind::OrderRejected => error!("Order failed: {err}"),
                    FailureKind::ApiError => error!("API error: {err}"),
                    _ => error!("Unexpected error: {err}"),
                }
                Err(err)
            }
        }
    }
}

/// USDT balance from an account read; zeroed when there is no USDT entry.
pub fn balance_snapshot(account: &AccountInfo) -> Result<BalanceSnapshot, TradeError> {
    let Some(usdt) = account.assets.iter().find(|a| a.asset == "USDT") else {
        return Ok(BalanceSnapshot::default());
    };

    let available = parse_amount("availableBalance", &usdt.available_balance)?;
    let unrealized = parse_amount("unrealizedProfit", &usdt.unrealized_profit)?;

    Ok(BalanceSnapshot {
        total_balance: available + unrealized,
        available_balance: available,
    })
}

fn parse_amount(field: &str, raw: &str) -> Result<f64, TradeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| TradeError::Unexpected(format!("{field} is not a number: {raw:?}")))
}

pub fn log_order_details(order: &OrderResult) {
    match serde_json::to_string_pretty(order) {
        Ok(json) => debug!("Order Details: {json}"),
        Err(_) => debug!("Order Details: {order:?}"),
    }
}
