//! End-to-end bridge tests
//!
//! Exercises the full dispatch path over a mock host channel and a
//! file-backed store, the way an embedding management application would
//! drive the bridge.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use virtual_bridge::args;
use virtual_bridge::dispatch::{Command, CommandDispatcher};
use virtual_bridge::launcher::LauncherClient;
use virtual_bridge::native::{CallbackRegistry, MockNativeChannel, NativeChannel};
use virtual_bridge::profile::BrowserProfile;
use virtual_bridge::store::{ConfigStore, FileBackend};
use virtual_bridge::transport::TransportKind;

const DEAD_LAUNCHER: &str = "http://127.0.0.1:9";

struct TestBridge {
    channel: Arc<MockNativeChannel>,
    store: Arc<ConfigStore>,
    dispatcher: CommandDispatcher,
    _dir: tempfile::TempDir,
}

fn setup_native_bridge(timeout: Duration) -> TestBridge {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Arc::new(CallbackRegistry::new());
    let channel = Arc::new(MockNativeChannel::new(Arc::clone(&registry)));

    let backend = Arc::new(FileBackend::new(dir.path()));
    let store = Arc::new(ConfigStore::new(
        backend,
        Some(channel.clone() as Arc<dyn NativeChannel>),
    ));

    let dispatcher = CommandDispatcher::new(
        Some(channel.clone() as Arc<dyn NativeChannel>),
        registry,
        LauncherClient::new(DEAD_LAUNCHER),
        Arc::clone(&store),
        timeout,
    );

    TestBridge {
        channel,
        store,
        dispatcher,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_store_writes_mirror_and_native_dispatch_round_trips() {
    let bridge = setup_native_bridge(Duration::from_millis(2000));
    assert_eq!(bridge.dispatcher.transport(), TransportKind::Native);

    // Adding a profile persists locally and mirrors the collection natively.
    let profile = bridge
        .store
        .add_profile(
            BrowserProfile {
                os: Some("Win 10".to_string()),
                ..Default::default()
            },
            "Browser",
        )
        .await
        .unwrap();
    assert_eq!(profile.id, 1);

    let mirrored = bridge.channel.invocations().await;
    assert_eq!(mirrored[0].0, "setBrowserList");

    // Launch travels the native path and comes back normalized.
    let response = bridge
        .dispatcher
        .dispatch(Command::Launch, vec![json!(profile.id)])
        .await
        .unwrap();
    assert_eq!(response.data, json!({ "success": true }));

    // The stored profile still compiles to deterministic launch arguments.
    let stored = bridge.store.find_profile(profile.id).await.unwrap();
    let compiled = args::compile(&stored);
    assert_eq!(compiled[0], format!("--fingerprint={}", args::derive_seed(1)));
    assert_eq!(compiled[1], "--fingerprint-platform=windows");
}

#[tokio::test]
async fn test_timed_out_call_drops_late_response_and_bridge_keeps_working() {
    let bridge = setup_native_bridge(Duration::from_millis(2000));

    // The host answers, but only after the deadline.
    let slow_registry = bridge.dispatcher.registry();
    let slow_channel = MockNativeChannel::new(slow_registry).with_delay(Duration::from_millis(60));
    let slow_dispatcher = CommandDispatcher::new(
        Some(Arc::new(slow_channel) as Arc<dyn NativeChannel>),
        bridge.dispatcher.registry(),
        LauncherClient::new(DEAD_LAUNCHER),
        Arc::clone(&bridge.store),
        Duration::from_millis(10),
    );

    let err = slow_dispatcher
        .dispatch(Command::GetVersion, vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, virtual_bridge::Error::Timeout(_)));

    // Let the late response arrive; it must find nothing to resolve.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(slow_dispatcher.registry().pending_count().await, 0);

    // The shared registry is unpoisoned: the fast bridge still works.
    let response = bridge
        .dispatcher
        .dispatch(Command::GetVersion, vec![])
        .await
        .unwrap();
    assert_eq!(response.data, json!("139.0.0.0"));
}

#[tokio::test]
async fn test_remote_bridge_over_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(ConfigStore::new(
        Arc::new(FileBackend::new(dir.path())),
        None,
    ));
    let dispatcher = CommandDispatcher::new(
        None,
        Arc::new(CallbackRegistry::new()),
        LauncherClient::new(DEAD_LAUNCHER),
        Arc::clone(&store),
        Duration::from_millis(2000),
    );
    assert_eq!(dispatcher.transport(), TransportKind::Remote);

    store
        .add_profile(BrowserProfile::default(), "Browser")
        .await
        .unwrap();

    let listed = dispatcher
        .dispatch(Command::ListProfiles, vec![])
        .await
        .unwrap();
    assert_eq!(listed.data["users"][0]["name"], "Browser 1");

    // Launching an id that was never stored fails before any network I/O.
    let err = dispatcher
        .dispatch(Command::Launch, vec![json!(999)])
        .await
        .unwrap_err();
    assert!(matches!(err, virtual_bridge::Error::ProfileNotFound(999)));

    // Unrecognized names resolve to a null payload on the remote backend.
    let response = dispatcher.dispatch_named("mystery", vec![]).await.unwrap();
    assert!(response.data.is_null());
}
