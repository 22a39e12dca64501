//! Fan-out to several sinks and the two failure policies
//!
//! Run with: cargo run --example merged_sinks

use composable_analytics::prelude::*;
use composable_analytics::sink::{ConsoleSink, FailurePolicy};
use composable_analytics::testing::{FailingSink, RecordingSink};

fn checkout() -> impl Reducer<State = Vec<String>, Action = String, Env = AnalyticsClient> {
    Reduce::new(
        |cart: &mut Vec<String>, item: &String| -> Effects<AnalyticsClient> {
            cart.push(item.clone());
            Effects::none()
        },
    )
    .analytics(|cart, item| {
        Some(AnalyticsPayload::event_with(
            "item_added",
            [("item", item.clone()), ("cart_size", cart.len().to_string())],
        ))
    })
}

#[tokio::main]
async fn main() {
    println!("=== Continue and aggregate ===");
    let warehouse = RecordingSink::new();
    let analytics = AnalyticsClient::merge([
        AnalyticsClient::new(ConsoleSink::with_prefix("[console]")),
        AnalyticsClient::new(FailingSink::new("remote")),
        warehouse.client(),
    ]);
    let mut store = Store::new(Vec::new(), checkout(), analytics);

    if let Err(err) = store.send("apple".to_string()).await {
        println!("reported: {}", err);
    }
    println!("warehouse received {} payload(s)", warehouse.len());

    println!();
    println!("=== Stop on first ===");
    let warehouse = RecordingSink::new();
    store.set_env(AnalyticsClient::merge_with_policy(
        FailurePolicy::StopOnFirst,
        [
            AnalyticsClient::new(FailingSink::new("remote")),
            warehouse.client(),
        ],
    ));

    if let Err(err) = store.send("pear".to_string()).await {
        println!("reported: {}", err);
    }
    println!("warehouse received {} payload(s)", warehouse.len());
    println!("cart: {:?}", store.state());
}
