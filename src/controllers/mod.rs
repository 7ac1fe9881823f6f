pub mod order_controller;
pub mod account_controller;
