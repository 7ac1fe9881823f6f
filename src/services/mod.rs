pub mod validator;
pub mod futures_api;
pub mod binance;
pub mod trading_service;
