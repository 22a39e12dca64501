//! Integration tests driving interceptors end to end through a store.
//!
//! These tests use an application environment carrying more than the
//! analytics client, the way a real app would.

use composable_analytics::prelude::*;
use composable_analytics::testing::{RecordingSink, TestStore};
use composable_analytics::{assert_emitted, assert_nothing_emitted};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
struct Settings {
    count: i32,
    is_enabled: bool,
    name: String,
    tags: Vec<String>,
}

#[derive(Debug)]
enum SettingsAction {
    Increment,
    Decrement,
    Toggle,
    Rename(String),
    RenameAndToggle(String),
    AddTag(String),
    Appear,
    Refresh,
}

#[derive(Clone)]
struct AppEnv {
    analytics: AnalyticsClient,
    saves: Arc<AtomicUsize>,
}

impl AppEnv {
    fn new(analytics: AnalyticsClient) -> Self {
        AppEnv {
            analytics,
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl HasAnalytics for AppEnv {
    fn analytics(&self) -> &AnalyticsClient {
        &self.analytics
    }
}

fn settings_reducer() -> impl Reducer<State = Settings, Action = SettingsAction, Env = AppEnv> {
    Reduce::new(
        |state: &mut Settings, action: &SettingsAction| -> Effects<AppEnv> {
            match action {
                SettingsAction::Increment => state.count += 1,
                SettingsAction::Decrement => state.count -= 1,
                SettingsAction::Toggle => state.is_enabled = !state.is_enabled,
                SettingsAction::Rename(name) => state.name = name.clone(),
                SettingsAction::RenameAndToggle(name) => {
                    state.name = name.clone();
                    state.is_enabled = !state.is_enabled;
                }
                SettingsAction::AddTag(tag) => {
                    state.tags.push(tag.clone());
                    return Effects::task(Task::from_fn("save", |env: &AppEnv| {
                        env.saves.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }));
                }
                SettingsAction::Appear | SettingsAction::Refresh => {}
            }
            Effects::none()
        },
    )
}

fn changed(name: &str, old: impl ToString, new: impl ToString) -> AnalyticsPayload {
    AnalyticsPayload::event_with(
        name,
        [
            ("old_value", old.to_string()),
            ("new_value", new.to_string()),
        ],
    )
}

fn tracked_settings() -> impl Reducer<State = Settings, Action = SettingsAction, Env = AppEnv> {
    settings_reducer()
        .multiple_analytics(|_, action| match action {
            SettingsAction::Appear => Some(vec![
                AnalyticsPayload::event("first_event"),
                AnalyticsPayload::event("second_event"),
                AnalyticsPayload::screen("test_screen"),
            ]),
            SettingsAction::AddTag(tag) => Some(vec![AnalyticsPayload::event_with(
                "tag_added",
                [("tag", tag.as_str())],
            )]),
            SettingsAction::Refresh => Some(Vec::new()),
            _ => None,
        })
        .analytics_on_change(
            |state: &Settings| state.count,
            |old, new| changed("count_changed", old, new),
        )
        .analytics_on_change(
            |state: &Settings| state.is_enabled,
            |old, new| changed("flag_changed", old, new),
        )
        .analytics_on_change(
            |state: &Settings| state.name.clone(),
            |old, new| changed("name_changed", old, new),
        )
}

fn test_store() -> TestStore<impl Reducer<State = Settings, Action = SettingsAction, Env = AppEnv>>
{
    TestStore::recording(Settings::default(), tracked_settings(), AppEnv::new)
}

// ============================================================================
// Change tracking
// ============================================================================

#[tokio::test]
async fn increment_emits_count_changed() {
    let mut store = test_store();

    store.send(SettingsAction::Increment, |s| s.count = 1).await;

    assert_eq!(store.recorded(), vec![changed("count_changed", 0, 1)]);
}

#[tokio::test]
async fn each_change_carries_its_own_values() {
    let mut store = test_store();

    store.send(SettingsAction::Increment, |s| s.count = 1).await;
    store.send(SettingsAction::Increment, |s| s.count = 2).await;
    store.send(SettingsAction::Decrement, |s| s.count = 1).await;

    assert_eq!(
        store.recorded(),
        vec![
            changed("count_changed", 0, 1),
            changed("count_changed", 1, 2),
            changed("count_changed", 2, 1),
        ]
    );
}

#[tokio::test]
async fn two_fields_in_one_action_emit_two_events() {
    let mut store = test_store();

    store
        .send(SettingsAction::RenameAndToggle("John".into()), |s| {
            s.name = "John".into();
            s.is_enabled = true;
        })
        .await;

    assert_eq!(
        store.recorded(),
        vec![
            changed("flag_changed", false, true),
            changed("name_changed", "", "John"),
        ]
    );
}

#[tokio::test]
async fn renaming_to_the_same_name_emits_nothing() {
    let mut store = TestStore::recording(
        Settings {
            name: "John".into(),
            ..Settings::default()
        },
        tracked_settings(),
        AppEnv::new,
    );

    store
        .send_unchanged(SettingsAction::Rename("John".into()))
        .await;

    assert!(store.recorded().is_empty());
}

// ============================================================================
// Multiple events
// ============================================================================

#[tokio::test]
async fn appear_emits_three_payloads_in_order() {
    let mut store = test_store();

    store.send_unchanged(SettingsAction::Appear).await;

    assert_emitted!(
        store.recorder().unwrap(),
        [
            "first_event",
            "second_event",
            AnalyticsPayload::screen("test_screen"),
        ]
    );
}

#[tokio::test]
async fn empty_derivation_emits_nothing() {
    let mut store = test_store();

    store.send_unchanged(SettingsAction::Refresh).await;

    assert_nothing_emitted!(store.recorder().unwrap());
}

#[tokio::test]
async fn derivation_runs_even_when_nothing_is_emitted() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reducer = settings_reducer().multiple_analytics({
        let calls = Arc::clone(&calls);
        move |_, action| {
            calls.fetch_add(1, Ordering::SeqCst);
            match action {
                SettingsAction::Refresh => Some(Vec::new()),
                _ => None,
            }
        }
    });
    let mut store = TestStore::recording(Settings::default(), reducer, AppEnv::new);

    store.send_unchanged(SettingsAction::Refresh).await;
    store
        .send(SettingsAction::Toggle, |s| s.is_enabled = true)
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(store.recorded().is_empty());
}

#[tokio::test]
async fn base_effects_run_before_emissions() {
    let recorder = RecordingSink::new();
    let saves = Arc::new(AtomicUsize::new(0));
    let env = AppEnv {
        analytics: AnalyticsClient::from_fn({
            let recorder = recorder.clone();
            let saves = Arc::clone(&saves);
            move |payload| {
                assert_eq!(saves.load(Ordering::SeqCst), 1, "save ran first");
                recorder.client().emit(payload).unwrap();
            }
        }),
        saves: Arc::clone(&saves),
    };
    let mut store = Store::new(Settings::default(), tracked_settings(), env);

    let effects = store.dispatch(SettingsAction::AddTag("beta".into()));
    assert_eq!(effects.labels(), vec!["save", "analytics.emit"]);

    effects.run(store.env()).await.unwrap();

    assert_eq!(saves.load(Ordering::SeqCst), 1);
    assert_emitted!(
        recorder,
        [AnalyticsPayload::event_with("tag_added", [("tag", "beta")])]
    );
}

// ============================================================================
// Single optional payload
// ============================================================================

#[tokio::test]
async fn single_analytics_emits_only_when_derived() {
    let reducer = settings_reducer().analytics(|_, action| match action {
        SettingsAction::Increment => Some("test_action".into()),
        SettingsAction::Toggle => Some("another_test_action".into()),
        _ => None,
    });
    let mut store = TestStore::recording(Settings::default(), reducer, AppEnv::new);

    store.send(SettingsAction::Increment, |s| s.count = 1).await;
    store.send_unchanged(SettingsAction::Appear).await;
    store
        .send(SettingsAction::Toggle, |s| s.is_enabled = true)
        .await;

    assert_eq!(
        store.recorded(),
        vec![
            AnalyticsPayload::event("test_action"),
            AnalyticsPayload::event("another_test_action"),
        ]
    );
}

// ============================================================================
// Environment
// ============================================================================

#[tokio::test]
async fn swapping_the_environment_swaps_the_sink() {
    let before = RecordingSink::new();
    let after = RecordingSink::new();
    let mut store = Store::new(
        Settings::default(),
        tracked_settings(),
        AppEnv::new(before.client()),
    );

    store.send(SettingsAction::Increment).await.unwrap();
    store.set_env(AppEnv::new(after.client()));
    store.send(SettingsAction::Increment).await.unwrap();

    assert_eq!(before.payloads(), vec![changed("count_changed", 0, 1)]);
    assert_eq!(after.payloads(), vec![changed("count_changed", 1, 2)]);
}

#[tokio::test]
async fn sink_failure_leaves_state_committed() {
    let mut store = Store::new(
        Settings::default(),
        tracked_settings(),
        AppEnv::new(AnalyticsClient::try_from_fn(|_| {
            Err(SinkError::rejected("remote", "offline"))
        })),
    );

    let err = store.send(SettingsAction::Increment).await.unwrap_err();

    assert_eq!(store.state().count, 1);
    assert!(matches!(err, EffectError::Sink(SinkError::Rejected { .. })));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn cancelled_spawn_never_emits() {
    use std::time::Duration;

    let reducer = Reduce::new(|count: &mut i32, _: &()| -> Effects<AppEnv> {
        *count += 1;
        Effects::task(Task::fire_and_forget("slow", |_| async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }))
    })
    .analytics(|_, _| Some("late".into()));

    let recorder = RecordingSink::new();
    let mut store = Store::new(0, reducer, AppEnv::new(recorder.client()));

    let handle = store.spawn(());
    handle.cancel();

    assert!(handle.join().await.is_none());
    assert_eq!(*store.state(), 1);
    assert!(recorder.is_empty());
}
