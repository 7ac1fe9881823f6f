#![allow(dead_code)]

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use futures_bot::{
    config::{self, Settings},
    error::ApiError,
    models::{AccountInfo, AssetBalance, OrderResult},
    services::{
        futures_api::{FuturesApi, NewOrder},
        trading_service::TradingService,
    },
    AppState,
};

/// In-memory exchange: records every call and replays queued responses.
/// An empty queue answers with a transport error.
#[derive(Default)]
pub struct FakeApi {
    pub created: Mutex<Vec<NewOrder>>,
    pub open_order_queries: Mutex<Vec<Option<String>>>,
    pub cancels: Mutex<Vec<(String, i64)>>,

    order_responses: Mutex<VecDeque<Result<OrderResult, ApiError>>>,
    account_responses: Mutex<VecDeque<Result<AccountInfo, ApiError>>>,
    open_order_responses: Mutex<VecDeque<Result<Vec<OrderResult>, ApiError>>>,
    cancel_responses: Mutex<VecDeque<Result<OrderResult, ApiError>>>,

    hang_with: Mutex<Option<UnboundedSender<()>>>,
}

fn unscripted<T>() -> Result<T, ApiError> {
    Err(ApiError::Transport("no scripted response".to_string()))
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_order(&self, res: Result<OrderResult, ApiError>) -> &Self {
        self.order_responses.lock().unwrap().push_back(res);
        self
    }

    pub fn push_account(&self, res: Result<AccountInfo, ApiError>) -> &Self {
        self.account_responses.lock().unwrap().push_back(res);
        self
    }

    pub fn push_open_orders(&self, res: Result<Vec<OrderResult>, ApiError>) -> &Self {
        self.open_order_responses.lock().unwrap().push_back(res);
        self
    }

    pub fn push_cancel(&self, res: Result<OrderResult, ApiError>) -> &Self {
        self.cancel_responses.lock().unwrap().push_back(res);
        self
    }

    pub fn created(&self) -> Vec<NewOrder> {
        self.created.lock().unwrap().clone()
    }

    /// The next account or order call sends on `tx` and then never answers,
    /// like a request that is still in flight when Ctrl-C arrives.
    pub fn interrupt_next_call(&self, tx: UnboundedSender<()>) -> &Self {
        *self.hang_with.lock().unwrap() = Some(tx);
        self
    }

    async fn hang_if_armed(&self) {
        let armed = self.hang_with.lock().unwrap().take();
        if let Some(tx) = armed {
            let _ = tx.send(());
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl FuturesApi for FakeApi {
    async fn account_info(&self) -> Result<AccountInfo, ApiError> {
        self.hang_if_armed().await;
        self.account_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn create_order(&self, order: &NewOrder) -> Result<OrderResult, ApiError> {
        self.created.lock().unwrap().push(order.clone());
        self.hang_if_armed().await;
        self.order_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn open_orders(&self, symbol: Option<&str>) -> Result<Vec<OrderResult>, ApiError> {
        self.open_order_queries
            .lock()
            .unwrap()
            .push(symbol.map(str::to_string));
        self.open_order_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderResult, ApiError> {
        self.cancels.lock().unwrap().push((symbol.to_string(), order_id));
        self.cancel_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

pub fn test_settings() -> Settings {
    config::from_lookup(|key| match key {
        "API_KEY" => Some("test-key".to_string()),
        "API_SECRET" => Some("test-secret".to_string()),
        _ => None,
    })
    .expect("test settings")
}

pub fn service(api: FakeApi) -> TradingService<FakeApi> {
    TradingService::new(api, &test_settings())
}

pub fn app_state(api: FakeApi) -> AppState<FakeApi> {
    let settings = test_settings();
    let trading = TradingService::new(api, &settings);
    AppState { settings, trading }
}

pub fn order_result(order_id: i64, side: &str, order_type: &str, status: &str) -> OrderResult {
    OrderResult {
        order_id,
        symbol: "BTCUSDT".to_string(),
        side: side.to_string(),
        order_type: order_type.to_string(),
        status: status.to_string(),
        orig_qty: "0.010".to_string(),
        price: "30000.00".to_string(),
        executed_qty: "0".to_string(),
        avg_price: "0.00".to_string(),
    }
}

pub fn account(assets: &[(&str, &str, &str)]) -> AccountInfo {
    AccountInfo {
        total_wallet_balance: "1000.00".to_string(),
        assets: assets
            .iter()
            .map(|(asset, available, unrealized)| AssetBalance {
                asset: asset.to_string(),
                wallet_balance: available.to_string(),
                available_balance: available.to_string(),
                unrealized_profit: unrealized.to_string(),
            })
            .collect(),
    }
}

pub fn rejected(code: i64, msg: &str) -> ApiError {
    ApiError::OrderRejected {
        code,
        msg: msg.to_string(),
    }
}
