//! Counter with change tracking, logged through tracing
//!
//! Run with: cargo run --example counter_analytics --features tracing

use composable_analytics::prelude::*;
use composable_analytics::sink::{ConsoleSink, TracingSink};

#[derive(Debug, Default)]
struct Counter {
    count: i32,
    is_enabled: bool,
}

#[derive(Debug)]
enum CounterAction {
    Appeared,
    Increment,
    Decrement,
    Toggle,
}

fn counter() -> impl Reducer<State = Counter, Action = CounterAction, Env = AnalyticsClient> {
    Reduce::new(
        |state: &mut Counter, action: &CounterAction| -> Effects<AnalyticsClient> {
            match action {
                CounterAction::Appeared => {}
                CounterAction::Increment => state.count += 1,
                CounterAction::Decrement => state.count -= 1,
                CounterAction::Toggle => state.is_enabled = !state.is_enabled,
            }
            Effects::none()
        },
    )
    .multiple_analytics(|_, action| match action {
        CounterAction::Appeared => Some(vec![
            AnalyticsPayload::screen("counter"),
            AnalyticsPayload::user_property("theme", "dark"),
        ]),
        _ => None,
    })
    .analytics_on_change(
        |state: &Counter| state.count,
        |old, new| {
            AnalyticsPayload::event_with(
                "count_changed",
                [("old_value", old.to_string()), ("new_value", new.to_string())],
            )
        },
    )
    .analytics_on_change(
        |state: &Counter| state.is_enabled,
        |_, new| AnalyticsPayload::event_with("flag_changed", [("enabled", new.to_string())]),
    )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let analytics = AnalyticsClient::merge([
        AnalyticsClient::new(TracingSink),
        AnalyticsClient::new(ConsoleSink::default()),
    ]);
    let mut store = Store::new(Counter::default(), counter(), analytics);

    let actions = [
        CounterAction::Appeared,
        CounterAction::Increment,
        CounterAction::Increment,
        CounterAction::Decrement,
        CounterAction::Toggle,
    ];

    for action in actions {
        tracing::info!(?action, "sending");
        if let Err(err) = store.send(action).await {
            tracing::error!("effects failed: {}", err);
        }
    }

    tracing::info!(state = ?store.state(), "done");
}
