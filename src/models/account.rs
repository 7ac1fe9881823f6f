use serde::{Deserialize, Serialize};

fn zero() -> String {
    "0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default = "zero")]
    pub total_wallet_balance: String,

    #[serde(default)]
    pub assets: Vec<AssetBalance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub asset: String,

    #[serde(default = "zero")]
    pub wallet_balance: String,
    #[serde(default = "zero")]
    pub available_balance: String,
    #[serde(default = "zero")]
    pub unrealized_profit: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceSnapshot {
    pub total_balance: f64,
    pub available_balance: f64,
}
