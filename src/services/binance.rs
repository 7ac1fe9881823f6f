use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Deserialize};
use sha2::Sha256;
use tracing::debug;

use crate::{
    config::Settings,
    error::ApiError,
    models::{AccountInfo, OrderResult},
};

use super::futures_api::{FuturesApi, NewOrder};

type HmacSha256 = Hmac<Sha256>;

const ACCOUNT_PATH: &str = "/fapi/v2/account";
const ORDER_PATH: &str = "/fapi/v1/order";
const OPEN_ORDERS_PATH: &str = "/fapi/v1/openOrders";

/// Signed REST client for the USDT-M futures API.
#[derive(Clone)]
pub struct BinanceFuturesClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    recv_window: u64,
}

impl BinanceFuturesClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(settings.http_timeout).build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            recv_window: settings.recv_window,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn signed_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::Transport(format!("invalid url {}{}: {e}", self.base_url, path)))?;

        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("recvWindow", &self.recv_window.to_string())
            .append_pair("timestamp", &Utc::now().timestamp_millis().to_string());

        let query = url.query().unwrap_or_default().to_string();
        let signature = sign_query(&self.api_secret, &query)?;
        url.query_pairs_mut().append_pair("signature", &signature);

        Ok(url)
    }

    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.signed_url(path, params)?;
        debug!(%method, path, "sending signed request");

        let res = self
            .http
            .request(method, url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        serde_json::from_str::<T>(&body).map_err(|e| ApiError::Decode(format!("{e}: {body}")))
    }
}

#[async_trait]
impl FuturesApi for BinanceFuturesClient {
    async fn account_info(&self) -> Result<AccountInfo, ApiError> {
        self.send_signed(Method::GET, ACCOUNT_PATH, &[]).await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<OrderResult, ApiError> {
        self.send_signed(Method::POST, ORDER_PATH, &order.params()).await
    }

    async fn open_orders(&self, symbol: Option<&str>) -> Result<Vec<OrderResult>, ApiError> {
        let params: Vec<(&str, String)> = symbol
            .map(|s| vec![("symbol", s.to_string())])
            .unwrap_or_default();
        self.send_signed(Method::GET, OPEN_ORDERS_PATH, &params).await
    }

    async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderResult, ApiError> {
        let params = [("symbol", symbol.to_string()), ("orderId", order_id.to_string())];
        self.send_signed(Method::DELETE, ORDER_PATH, &params).await
    }
}

/// HMAC-SHA256 of the query string, lower-case hex.
pub fn sign_query(secret: &str, query: &str) -> Result<String, ApiError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ApiError::Signing(e.to_string()))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    msg: String,
}

/// Codes for orders the exchange understood but refused to accept.
pub fn is_order_rejection(code: i64) -> bool {
    matches!(
        code,
        -1013 | -1111 | -1116 | -1117 | -2013..=-2010 | -2027..=-2016 | -4999..=-4000
    )
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) if is_order_rejection(err.code) => ApiError::OrderRejected {
            code: err.code,
            msg: err.msg,
        },
        Ok(err) => ApiError::Api {
            status,
            code: err.code,
            msg: err.msg,
        },
        Err(_) => ApiError::Api {
            status,
            code: 0,
            msg: body.trim().to_string(),
        },
    }
}
