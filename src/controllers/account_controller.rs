use std::io::Write;

use tokio::io::AsyncBufRead;

use crate::{cli::Console, render, services::futures_api::FuturesApi, AppState};

// menu 4
pub async fn view_balance<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say("\n--- ACCOUNT BALANCE ---");

    let Some(res) = console.guard(state.trading.get_account_balance()).await else {
        return;
    };

    match res {
        Ok(snapshot) => console.say(render::balance(&snapshot)),
        Err(_) => console.say("Failed to retrieve balance. Check logs for details."),
    }
}

// menu 5
pub async fn view_open_orders<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say("\n--- OPEN ORDERS ---");

    // empty, cancel or Ctrl-C all mean every symbol
    let symbol = console
        .ask_symbol("Enter symbol (or press Enter for all): ", Some(""))
        .await
        .unwrap_or_default();

    let filter = Some(symbol.as_str()).filter(|s| !s.is_empty());

    let Some(res) = console.guard(state.trading.get_open_orders(filter)).await else {
        return;
    };

    match res {
        Ok(orders) => console.say(render::open_orders(&orders)),
        Err(_) => console.say("Failed to retrieve open orders. Check logs for details."),
    }
}

// menu 6
pub async fn cancel_order<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    console.say("\n--- CANCEL ORDER ---");

    let Some(symbol) = console.ask_symbol("Enter symbol: ", None).await else {
        return;
    };
    let Some(order_id) = console.ask_i64("Enter order ID to cancel: ").await else {
        return;
    };

    let prompt = format!("\nCancel order {order_id} for {symbol}? (yes/no): ");
    if !console.confirm(&prompt).await {
        console.say("Cancellation aborted.");
        return;
    }

    let Some(res) = console.guard(state.trading.cancel_order(&symbol, order_id)).await else {
        return;
    };

    match res {
        Ok(_) => console.say("\n✓ Order cancelled successfully!"),
        Err(e) => console.say(format!(
            "\n✗ Failed to cancel order: {e}\n  Check logs for details."
        )),
    }
}
