pub mod order;
pub mod account;

pub use order::{OrderRequest, OrderResult, OrderSide, OrderType, StopLimitLegs};
pub use account::{AccountInfo, AssetBalance, BalanceSnapshot};
