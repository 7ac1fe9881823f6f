mod common;

use common::{account, app_state, order_result, rejected, FakeApi};
use futures_bot::{
    cli::{self, Console},
    error::ApiError,
    models::OrderSide,
    services::futures_api::ExchangeOrderType,
    AppState,
};
use tokio::sync::mpsc;

/// Runs the menu loop over scripted input and returns everything printed.
async fn drive(state: &AppState<FakeApi>, input: &str) -> String {
    let mut console = Console::new(input.as_bytes(), Vec::new());
    cli::run(state, &mut console).await;
    String::from_utf8_lossy(console.output()).into_owned()
}

#[tokio::test]
async fn market_order_flow_uses_default_symbol() {
    let api = FakeApi::new();
    api.push_order(Ok(order_result(11, "BUY", "MARKET", "NEW")));
    let state = app_state(api);

    let out = drive(&state, "1\n\nbuy\n50\ny\n7\n").await;

    assert!(out.contains("--- PLACE MARKET ORDER ---"));
    assert!(out.contains("  Symbol: BTCUSDT"));
    assert!(out.contains("  Side: BUY"));
    assert!(out.contains("✓ Order placed successfully!"));
    assert!(out.contains("Order ID: 11"));
    assert!(out.ends_with("Exiting bot. Goodbye!\n"));

    let sent = state.trading.api().created();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].symbol, "BTCUSDT");
    assert_eq!(sent[0].side, OrderSide::Buy);
    assert_eq!(sent[0].quantity, 50.0);
}

#[tokio::test]
async fn cancel_keyword_returns_to_menu_without_sending() {
    let state = app_state(FakeApi::new());

    let out = drive(&state, "2\nETHUSDT\nSELL\nCANCEL\n7\n").await;

    assert_eq!(out.matches("--- MAIN MENU ---").count(), 2);
    assert!(!out.contains("Order Summary"));
    assert!(state.trading.api().created().is_empty());
}

#[tokio::test]
async fn declining_confirmation_sends_nothing() {
    let state = app_state(FakeApi::new());

    let out = drive(&state, "2\nethusdt\nsell\n1\n2500\nno\n7\n").await;

    assert!(out.contains("  Symbol: ETHUSDT"));
    assert!(out.contains("  Price: 2500"));
    assert!(out.contains("Order cancelled."));
    assert!(state.trading.api().created().is_empty());
}

#[tokio::test]
async fn bad_answers_are_asked_again() {
    let api = FakeApi::new();
    api.push_order(Ok(order_result(5, "SELL", "MARKET", "FILLED")));
    let state = app_state(api);

    let out = drive(&state, "9\n1\nbtc-usdt\nbtcusdt\nshort\nsell\nabc\n0.5\nmaybe\nyes\n7\n").await;

    assert!(out.contains("Invalid input. Must be one of: 1, 2, 3, 4, 5, 6, 7"));
    assert!(out.contains("Invalid symbol."));
    assert!(out.contains("Invalid input. Must be one of: BUY, SELL"));
    assert!(out.contains("Invalid input. Expected a number. Try again."));
    assert!(out.contains("Invalid input. Must be one of: yes, no, y, n"));
    assert!(out.contains("Status: FILLED"));
    assert_eq!(state.trading.api().created().len(), 1);
}

#[tokio::test]
async fn end_of_input_exits_cleanly() {
    let state = app_state(FakeApi::new());

    let out = drive(&state, "1\nBTCUSDT\n").await;

    assert!(out.ends_with("Exiting bot. Goodbye!\n"));
    assert!(state.trading.api().created().is_empty());
}

#[tokio::test]
async fn out_of_range_quantity_is_reported_as_failure() {
    let state = app_state(FakeApi::new());

    let out = drive(&state, "1\n\nBUY\n500\ny\n7\n").await;

    assert!(out.contains("✗ Order failed:"));
    assert!(out.contains("Quantity must be between 0.001 and 100"));
    assert!(state.trading.api().created().is_empty());
}

#[tokio::test]
async fn stop_limit_exit_failure_warns_about_live_entry() {
    let api = FakeApi::new();
    api.push_order(Ok(order_result(41, "BUY", "LIMIT", "NEW")))
        .push_order(Err(rejected(-2021, "Order would immediately trigger.")));
    let state = app_state(api);

    let out = drive(&state, "3\n\nBUY\n0.01\n31000\n30000\ny\n7\n").await;

    assert!(out.contains("  Stop Price: 31000"));
    assert!(out.contains("  Limit Price: 30000"));
    assert!(out.contains("✗ Order failed:"));
    assert!(out.contains("Order would immediately trigger."));
    assert!(out.contains("Entry order 41"));
    assert!(out.contains("is still open on the exchange"));

    let sent = state.trading.api().created();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].order_type, ExchangeOrderType::TakeProfit);
    assert_eq!(sent[1].stop_price, Some(31_000.0));
}

#[tokio::test]
async fn stop_limit_success_shows_both_legs() {
    let api = FakeApi::new();
    api.push_order(Ok(order_result(51, "SELL", "LIMIT", "NEW")))
        .push_order(Ok(order_result(52, "BUY", "TAKE_PROFIT", "NEW")));
    let state = app_state(api);

    let out = drive(&state, "3\n\nSELL\n0.01\n29000\n30000\nyes\n7\n").await;

    assert!(out.contains("Entry Order ID: 51"));
    assert!(out.contains("Exit Order ID: 52"));
}

#[tokio::test]
async fn balance_is_printed() {
    let api = FakeApi::new();
    api.push_account(Ok(account(&[("USDT", "100.5", "-0.5")])));
    let state = app_state(api);

    let out = drive(&state, "4\n4\n7\n").await;

    assert!(out.contains("  Total Balance: 100 USDT"));
    assert!(out.contains("  Available Balance: 100.5 USDT"));
    // second request had nothing scripted
    assert!(out.contains("Failed to retrieve balance. Check logs for details."));
}

#[tokio::test]
async fn open_orders_distinguishes_empty_from_failure() {
    let api = FakeApi::new();
    api.push_open_orders(Ok(vec![]))
        .push_open_orders(Ok(vec![order_result(61, "BUY", "LIMIT", "NEW")]))
        .push_open_orders(Err(ApiError::Transport("timed out".to_string())));
    let state = app_state(api);

    let out = drive(&state, "5\n\n5\nbtcusdt\n5\n\n7\n").await;

    assert!(out.contains("No open orders."));
    assert!(out.contains("Found 1 open order(s):"));
    assert!(out.contains("  Order ID: 61"));
    assert!(out.contains("Failed to retrieve open orders. Check logs for details."));

    let queries = state.trading.api().open_order_queries.lock().unwrap().clone();
    assert_eq!(queries, vec![None, Some("BTCUSDT".to_string()), None]);
}

#[tokio::test]
async fn cancel_order_flow() {
    let api = FakeApi::new();
    api.push_cancel(Ok(order_result(70, "BUY", "LIMIT", "CANCELED")))
        .push_cancel(Err(rejected(-2011, "Unknown order sent.")));
    let state = app_state(api);

    let out = drive(
        &state,
        "6\nbtcusdt\nx\n70\ny\n6\nBTCUSDT\n71\nn\n6\nBTCUSDT\n72\nyes\n7\n",
    )
    .await;

    assert!(out.contains("Invalid input. Expected a whole number. Try again."));
    assert!(out.contains("Cancel order 70 for BTCUSDT? (yes/no): "));
    assert!(out.contains("✓ Order cancelled successfully!"));
    assert!(out.contains("Cancellation aborted."));
    assert!(out.contains("✗ Failed to cancel order:"));
    assert!(out.contains("Unknown order sent."));

    let cancels = state.trading.api().cancels.lock().unwrap().clone();
    assert_eq!(
        cancels,
        vec![("BTCUSDT".to_string(), 70), ("BTCUSDT".to_string(), 72)]
    );
}

#[tokio::test]
async fn cancel_at_open_orders_prompt_lists_every_symbol() {
    let api = FakeApi::new();
    api.push_open_orders(Ok(vec![order_result(81, "SELL", "LIMIT", "NEW")]));
    let state = app_state(api);

    let out = drive(&state, "5\ncancel\n7\n").await;

    assert!(out.contains("Found 1 open order(s):"));
    let queries = state.trading.api().open_order_queries.lock().unwrap().clone();
    assert_eq!(queries, vec![None]);
}

#[tokio::test]
async fn ctrl_c_during_exchange_call_ends_the_session() {
    let (tx, rx) = mpsc::unbounded_channel();
    let api = FakeApi::new();
    api.interrupt_next_call(tx);
    let state = app_state(api);

    // everything after the confirmation must go unread
    let input = "1\n\nBUY\n1\ny\n4\n7\n";
    let mut console = Console::with_interrupts(input.as_bytes(), Vec::<u8>::new(), rx);
    cli::run(&state, &mut console).await;
    let out = String::from_utf8_lossy(console.output()).into_owned();

    assert!(console.exit_requested());
    assert!(out.contains("\nInterrupted."));
    assert!(!out.contains("Order placed"));
    assert!(!out.contains("--- ACCOUNT BALANCE ---"));
    assert_eq!(out.matches("--- MAIN MENU ---").count(), 1);
    assert!(out.ends_with("Exiting bot. Goodbye!\n"));
    assert_eq!(state.trading.api().created().len(), 1);
}

#[tokio::test]
async fn ctrl_c_queued_while_busy_is_seen_by_the_next_call() {
    let (tx, rx) = mpsc::unbounded_channel();
    let api = FakeApi::new();
    api.push_account(Ok(account(&[("USDT", "10", "0")])));
    let state = app_state(api);

    let mut console = Console::with_interrupts("".as_bytes(), Vec::<u8>::new(), rx);

    // arrives while nothing is listening
    tx.send(()).unwrap();

    let res = console.guard(state.trading.get_account_balance()).await;
    assert!(res.is_none());
    assert!(console.exit_requested());
}

#[tokio::test]
async fn ctrl_c_at_a_prompt_only_cancels_that_prompt() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut console = Console::with_interrupts("2.5\n".as_bytes(), Vec::<u8>::new(), rx);

    tx.send(()).unwrap();
    assert_eq!(console.ask_f64("Enter quantity: ").await, None);
    assert!(!console.exit_requested());

    assert_eq!(console.ask_f64("Enter quantity: ").await, Some(2.5));

    let out = String::from_utf8_lossy(console.output()).into_owned();
    assert!(out.contains("Operation cancelled."));
}
