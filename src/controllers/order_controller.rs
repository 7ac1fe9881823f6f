use std::io::Write;

use tokio::io::AsyncBufRead;

use crate::{
    cli::Console,
    render::{self, OrderSummary},
    services::futures_api::FuturesApi,
    AppState,
};

const SIDES: [&str; 2] = ["BUY", "SELL"];

fn header<R: AsyncBufRead + Unpin, W: Write>(console: &mut Console<R, W>, title: &str) {
    console.say(format!("\n--- {title} ---"));
    console.say("(Type 'cancel' at any time to return to main menu)");
}

// menu 1
pub async fn market_order<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    header(console, "PLACE MARKET ORDER");

    let default = state.settings.default_symbol.clone();
    let prompt = format!("Enter symbol (default: {default}): ");
    let Some(symbol) = console.ask_symbol(&prompt, Some(&default)).await else {
        return;
    };
    let Some(side) = console.ask_choice("Enter side (BUY/SELL): ", &SIDES).await else {
        return;
    };
    let Some(quantity) = console.ask_f64("Enter quantity: ").await else {
        return;
    };

    console.say(render::order_summary(&OrderSummary {
        kind: "MARKET",
        symbol: &symbol,
        side: &side,
        quantity,
        stop_price: None,
        price: None,
    }));

    if !console.confirm("\nConfirm order? (yes/no): ").await {
        console.say("Order cancelled.");
        return;
    }

    let Some(res) = console
        .guard(state.trading.place_market_order(&symbol, &side, quantity))
        .await
    else {
        return;
    };

    match res {
        Ok(order) => console.say(render::order_placed(&order)),
        Err(e) => console.say(render::order_failed(&e)),
    }
}

// menu 2
pub async fn limit_order<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    header(console, "PLACE LIMIT ORDER");

    let default = state.settings.default_symbol.clone();
    let prompt = format!("Enter symbol (default: {default}): ");
    let Some(symbol) = console.ask_symbol(&prompt, Some(&default)).await else {
        return;
    };
    let Some(side) = console.ask_choice("Enter side (BUY/SELL): ", &SIDES).await else {
        return;
    };
    let Some(quantity) = console.ask_f64("Enter quantity: ").await else {
        return;
    };
    let Some(price) = console.ask_f64("Enter limit price: ").await else {
        return;
    };

    console.say(render::order_summary(&OrderSummary {
        kind: "LIMIT",
        symbol: &symbol,
        side: &side,
        quantity,
        stop_price: None,
        price: Some(price),
    }));

    if !console.confirm("\nConfirm order? (yes/no): ").await {
        console.say("Order cancelled.");
        return;
    }

    let Some(res) = console
        .guard(state.trading.place_limit_order(&symbol, &side, quantity, price))
        .await
    else {
        return;
    };

    match res {
        Ok(order) => console.say(render::order_placed(&order)),
        Err(e) => console.say(render::order_failed(&e)),
    }
}

// menu 3
pub async fn stop_limit_order<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    header(console, "PLACE STOP-LIMIT ORDER");

    let default = state.settings.default_symbol.clone();
    let prompt = format!("Enter symbol (default: {default}): ");
    let Some(symbol) = console.ask_symbol(&prompt, Some(&default)).await else {
        return;
    };
    let Some(side) = console.ask_choice("Enter side (BUY/SELL): ", &SIDES).await else {
        return;
    };
    let Some(quantity) = console.ask_f64("Enter quantity: ").await else {
        return;
    };
    let Some(stop_price) = console.ask_f64("Enter stop price (trigger): ").await else {
        return;
    };
    let Some(price) = console.ask_f64("Enter limit price: ").await else {
        return;
    };

    console.say(render::order_summary(&OrderSummary {
        kind: "STOP-LIMIT",
        symbol: &symbol,
        side: &side,
        quantity,
        stop_price: Some(stop_price),
        price: Some(price),
    }));

    if !console.confirm("\nConfirm order? (yes/no): ").await {
        console.say("Order cancelled.");
        return;
    }

    let Some(res) = console
        .guard(
            state
                .trading
                .place_stop_limit_order(&symbol, &side, quantity, price, stop_price),
        )
        .await
    else {
        return;
    };

    match res {
        Ok(legs) => console.say(render::stop_limit_placed(&legs)),
        Err(e) => console.say(render::order_failed(&e)),
    }
}
