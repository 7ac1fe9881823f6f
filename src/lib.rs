//! Library entrypoint for the futures bot.
//!
//! The binary only wires things together; integration tests under `tests/`
//! drive the services and controllers through this crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub mod services;

#[path = "views/render.rs"]
pub mod render;

pub mod cli;
pub mod controllers;

use services::trading_service::TradingService;

pub struct AppState<E> {
    pub settings: config::Settings,
    pub trading: TradingService<E>,
}
