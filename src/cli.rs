use std::{future::Future, io::Write, sync::LazyLock};

use regex::Regex;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc::{self, UnboundedReceiver},
};
use tracing::warn;

use crate::{
    controllers::{account_controller, order_controller},
    render,
    services::futures_api::FuturesApi,
    AppState,
};

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,20}$").expect("valid symbol pattern"));

const MENU_CHOICES: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];
const YES_NO: [&str; 4] = ["yes", "no", "y", "n"];

/// Forwards every Ctrl-C into a channel. Signals that arrive while nobody is
/// waiting stay queued until the console looks again.
pub fn listen_for_ctrl_c() -> UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Could not listen for Ctrl-C: {e}");
                return;
            }
            if tx.send(()).is_err() {
                return;
            }
        }
    });

    rx
}

async fn next_interrupt(interrupts: &mut Option<UnboundedReceiver<()>>) {
    match interrupts {
        Some(rx) => {
            if rx.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

/// Line-oriented console. Every `ask_*` returns `None` when the user typed
/// `cancel`, pressed Ctrl-C, or input ended.
pub struct Console<R, W> {
    reader: R,
    out: W,
    interrupts: Option<UnboundedReceiver<()>>,
    exit_requested: bool,
}

impl<R: AsyncBufRead + Unpin, W: Write> Console<R, W> {
    /// A console that never sees interrupts.
    pub fn new(reader: R, out: W) -> Self {
        Self {
            reader,
            out,
            interrupts: None,
            exit_requested: false,
        }
    }

    pub fn with_interrupts(reader: R, out: W, interrupts: UnboundedReceiver<()>) -> Self {
        Self {
            interrupts: Some(interrupts),
            ..Self::new(reader, out)
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Set once an exchange call was interrupted; the menu loop then exits.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Awaits `fut` unless an interrupt comes first, in which case the call
    /// is dropped, the session is marked for exit and `None` is returned.
    pub async fn guard<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        let res = tokio::select! {
            biased;
            _ = next_interrupt(&mut self.interrupts) => None,
            res = fut => Some(res),
        };

        if res.is_none() {
            warn!("Interrupted while waiting for the exchange");
            self.say("\nInterrupted.");
            self.exit_requested = true;
        }
        res
    }

    pub fn say(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
        let _ = self.out.flush();
    }

    async fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.out, "{prompt}");
        let _ = self.out.flush();

        let mut buf = String::new();
        let read = tokio::select! {
            biased;
            _ = next_interrupt(&mut self.interrupts) => None,
            res = self.reader.read_line(&mut buf) => Some(res),
        };

        match read {
            Some(Ok(n)) if n > 0 => {
                let line = buf.trim().to_string();
                if line.eq_ignore_ascii_case("cancel") {
                    return None;
                }
                Some(line)
            }
            // EOF or a broken stdin
            Some(_) => None,
            None => {
                self.say("\nOperation cancelled.");
                None
            }
        }
    }

    /// Re-asks until the answer is one of `options` (case-insensitive).
    /// Returns the matching option.
    pub async fn ask_choice(&mut self, prompt: &str, options: &[&str]) -> Option<String> {
        loop {
            let line = self.read_line(prompt).await?;
            if let Some(opt) = options.iter().find(|o| o.eq_ignore_ascii_case(&line)) {
                return Some(opt.to_string());
            }
            self.say(format!("Invalid input. Must be one of: {}", options.join(", ")));
        }
    }

    pub async fn ask_f64(&mut self, prompt: &str) -> Option<f64> {
        loop {
            let line = self.read_line(prompt).await?;
            match line.parse::<f64>() {
                Ok(v) if v.is_finite() => return Some(v),
                _ => self.say("Invalid input. Expected a number. Try again."),
            }
        }
    }

    pub async fn ask_i64(&mut self, prompt: &str) -> Option<i64> {
        loop {
            let line = self.read_line(prompt).await?;
            match line.parse::<i64>() {
                Ok(v) => return Some(v),
                Err(_) => self.say("Invalid input. Expected a whole number. Try again."),
            }
        }
    }

    /// Empty input picks `default`. Answers are upper-cased.
    pub async fn ask_symbol(&mut self, prompt: &str, default: Option<&str>) -> Option<String> {
        loop {
            let line = self.read_line(prompt).await?;
            if line.is_empty() {
                if let Some(d) = default {
                    return Some(d.to_string());
                }
            }

            let sym = line.to_uppercase();
            if SYMBOL_RE.is_match(&sym) {
                return Some(sym);
            }
            self.say("Invalid symbol. Use letters and digits only, e.g. BTCUSDT.");
        }
    }

    pub async fn confirm(&mut self, prompt: &str) -> bool {
        matches!(
            self.ask_choice(prompt, &YES_NO).await.as_deref(),
            Some("yes") | Some("y")
        )
    }
}

/// The interactive menu loop. Returns when the user exits.
pub async fn run<E, R, W>(state: &AppState<E>, console: &mut Console<R, W>)
where
    E: FuturesApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    while !console.exit_requested() {
        console.say(render::menu());

        let choice = console.ask_choice("Select option (1-7): ", &MENU_CHOICES).await;

        match choice.as_deref() {
            None | Some("7") => break,
            Some("1") => order_controller::market_order(state, console).await,
            Some("2") => order_controller::limit_order(state, console).await,
            Some("3") => order_controller::stop_limit_order(state, console).await,
            Some("4") => account_controller::view_balance(state, console).await,
            Some("5") => account_controller::view_open_orders(state, console).await,
            Some("6") => account_controller::cancel_order(state, console).await,
            Some(_) => {}
        }
    }

    console.say("\nExiting bot. Goodbye!");
}
