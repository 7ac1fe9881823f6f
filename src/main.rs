use std::process::ExitCode;

use tokio::io::BufReader;
use tracing::{error, info};

use futures_bot::{
    cli::{self, Console},
    config, logging, render,
    services::{binance::BinanceFuturesClient, trading_service::TradingService},
    AppState,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = match config::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&settings) {
        eprintln!("ERROR: could not open log file {}: {e}", settings.log_file.display());
        return ExitCode::FAILURE;
    }

    println!("{}", render::banner());

    if let Err(e) = settings.check_credentials() {
        println!("ERROR: {e}. Set API_KEY and API_SECRET in the environment or .env");
        println!("Get your testnet API keys from: https://testnet.binancefuture.com/");
        return ExitCode::FAILURE;
    }

    println!("Initializing bot...");

    let client = match BinanceFuturesClient::new(&settings) {
        Ok(c) => c,
        Err(e) => {
            println!("✗ Failed to initialize bot: {e}");
            error!("Initialization failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Bot initialized - Testnet: {} ({})",
        settings.testnet,
        client.base_url()
    );

    let trading = TradingService::new(client, &settings);
    if let Err(e) = trading.test_connection().await {
        println!("✗ Failed to initialize bot: {e}");
        error!("Initialization failed: {e}");
        return ExitCode::FAILURE;
    }
    println!("✓ Bot initialized successfully!\n");

    let state = AppState { settings, trading };
    let mut console = Console::with_interrupts(
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        cli::listen_for_ctrl_c(),
    );

    cli::run(&state, &mut console).await;

    ExitCode::SUCCESS
}
