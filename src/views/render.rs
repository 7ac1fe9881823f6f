use std::fmt::Write;

use crate::{
    error::TradeError,
    models::{BalanceSnapshot, OrderResult, StopLimitLegs},
};

pub fn banner() -> String {
    let rule = "=".repeat(60);
    format!("{rule}\n  BINANCE FUTURES TRADING BOT - TESTNET\n{rule}\n")
}

pub fn menu() -> String {
    let mut s = String::from("\n--- MAIN MENU ---\n");
    s.push_str("1. Place Market Order\n");
    s.push_str("2. Place Limit Order\n");
    s.push_str("3. Place Stop-Limit Order\n");
    s.push_str("4. View Account Balance\n");
    s.push_str("5. View Open Orders\n");
    s.push_str("6. Cancel Order\n");
    s.push_str("7. Exit\n");
    s.push_str(&"-".repeat(40));
    s
}

/// What the user is about to send, shown before the yes/no prompt.
pub struct OrderSummary<'a> {
    pub kind: &'a str,
    pub symbol: &'a str,
    pub side: &'a str,
    pub quantity: f64,
    pub stop_price: Option<f64>,
    pub price: Option<f64>,
}

pub fn order_summary(summary: &OrderSummary<'_>) -> String {
    let mut s = String::from("\nOrder Summary:\n");
    let _ = writeln!(s, "  Type: {}", summary.kind);
    let _ = writeln!(s, "  Symbol: {}", summary.symbol);
    let _ = writeln!(s, "  Side: {}", summary.side.to_uppercase());
    let _ = writeln!(s, "  Quantity: {}", summary.quantity);
    if let Some(sp) = summary.stop_price {
        let _ = writeln!(s, "  Stop Price: {sp}");
    }
    if let Some(p) = summary.price {
        let label = if summary.stop_price.is_some() { "Limit Price" } else { "Price" };
        let _ = writeln!(s, "  {label}: {p}");
    }
    s
}

pub fn order_placed(order: &OrderResult) -> String {
    format!(
        "\n✓ Order placed successfully!\n  Order ID: {}\n  Status: {}",
        order.order_id, order.status
    )
}

pub fn stop_limit_placed(legs: &StopLimitLegs) -> String {
    format!(
        "\n✓ Order placed successfully!\n  Entry Order ID: {} ({} {}, {})\n  Exit Order ID: {} ({} {}, {})",
        legs.entry.order_id,
        legs.entry.side,
        legs.entry.order_type,
        legs.entry.status,
        legs.exit.order_id,
        legs.exit.side,
        legs.exit.order_type,
        legs.exit.status,
    )
}

pub fn order_failed(err: &TradeError) -> String {
    let mut s = format!("\n✗ Order failed: {err}\n  Check logs for details.");

    if let TradeError::ExitLegFailed { entry, .. } = err {
        let _ = write!(
            s,
            "\n  ! Entry order {} ({} {} {} @ {}) is still open on the exchange.\n    Cancel it from the menu if you do not want it.",
            entry.order_id, entry.symbol, entry.side, entry.orig_qty, entry.price
        );
    }
    s
}

pub fn balance(snapshot: &BalanceSnapshot) -> String {
    format!(
        "  Total Balance: {} USDT\n  Available Balance: {} USDT",
        snapshot.total_balance, snapshot.available_balance
    )
}

pub fn open_orders(orders: &[OrderResult]) -> String {
    if orders.is_empty() {
        return "No open orders.".to_string();
    }

    let mut s = format!("\nFound {} open order(s):\n", orders.len());
    for o in orders {
        let _ = writeln!(s, "\n  Order ID: {}", o.order_id);
        let _ = writeln!(s, "  Symbol: {}", o.symbol);
        let _ = writeln!(s, "  Side: {}", o.side);
        let _ = writeln!(s, "  Type: {}", o.order_type);
        let _ = writeln!(s, "  Price: {}", o.price);
        let _ = writeln!(s, "  Quantity: {}", o.orig_qty);
        let _ = writeln!(s, "  Status: {}", o.status);
    }
    s
}
