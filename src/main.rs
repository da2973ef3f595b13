//! limit-book demo binary.
//!
//! Replays a short order flow through the engine and prints the resulting
//! book as JSON, the way a display layer would consume it.

use std::process::ExitCode;

use tracing::{error, info};

use limit_book::types::price::from_fixed_trimmed;
use limit_book::{EngineConfig, MatchingEngine, OrderRequest};

const FLOW: &[(&str, &str, &str)] = &[
    ("sell", "100", "5"),
    ("sell", "100", "10"),
    ("sell", "99", "5"),
    ("sell", "105", "5"),
    ("buy", "100", "12"),
    ("buy", "98", "4"),
    ("buy", "0", "1"),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let mut engine = MatchingEngine::with_config(config);

    for &(side, price, quantity) in FLOW {
        let outcome = OrderRequest::parse(side, price, quantity)
            .and_then(|request| engine.process_order(request));

        match outcome {
            Ok(result) => {
                for trade in &result.trades {
                    info!(
                        "trade #{}: {} @ {} (maker {}, taker {})",
                        trade.id,
                        from_fixed_trimmed(trade.quantity),
                        from_fixed_trimmed(trade.price),
                        trade.maker_order_id,
                        trade.taker_order_id,
                    );
                }
                if result.resting {
                    info!(
                        "order #{} rests with {}",
                        result.order_id,
                        from_fixed_trimmed(result.remaining_quantity)
                    );
                }
            }
            Err(err) => error!("{} {} @ {} rejected: {}", side, quantity, price, err),
        }
    }

    match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            error!(%err, "failed to encode snapshot");
            return ExitCode::FAILURE;
        }
    }
    println!("state root: {}", engine.book().state_root_hex());

    ExitCode::SUCCESS
}
