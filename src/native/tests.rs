//! Callback registry and mock channel tests

use super::*;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_register_then_deliver_resolves_once() {
    let registry = CallbackRegistry::new();
    let token = CallbackRegistry::next_token();

    let receiver = registry.register(&token, "getBrowserVersion").await;
    assert_eq!(registry.pending_count().await, 1);

    assert!(registry.deliver(&token, json!("139.0.0.0")).await);
    assert_eq!(receiver.await.unwrap(), json!("139.0.0.0"));

    // Entry is gone; a second delivery is a no-op.
    assert_eq!(registry.pending_count().await, 0);
    assert!(!registry.deliver(&token, json!("late")).await);
}

#[tokio::test]
async fn test_deliver_unknown_token_is_noop() {
    let registry = CallbackRegistry::new();
    assert!(!registry.deliver("callback_nobody", json!(1)).await);
}

#[tokio::test]
async fn test_discard_clears_entry_and_drops_late_delivery() {
    let registry = CallbackRegistry::new();
    let token = CallbackRegistry::next_token();

    let receiver = registry.register(&token, "launchBrowser").await;
    assert!(registry.discard(&token).await);
    assert_eq!(registry.pending_count().await, 0);

    // The abandoned receiver observes a closed channel, not a value.
    assert!(receiver.await.is_err());
    assert!(!registry.deliver(&token, json!("late")).await);
}

#[tokio::test]
async fn test_tokens_are_unique() {
    let a = CallbackRegistry::next_token();
    let b = CallbackRegistry::next_token();
    assert_ne!(a, b);
    assert!(a.starts_with("callback_"));
}

#[tokio::test]
async fn test_mock_channel_delivers_through_registry() {
    let registry = Arc::new(CallbackRegistry::new());
    let channel = MockNativeChannel::new(Arc::clone(&registry));

    let token = CallbackRegistry::next_token();
    let receiver = registry.register(&token, "getBrowserList").await;

    channel
        .invoke("getBrowserList", vec![json!(token)])
        .await
        .unwrap();

    assert_eq!(receiver.await.unwrap(), json!({ "users": [] }));

    let invocations = channel.invocations().await;
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].0, "getBrowserList");
}

#[tokio::test]
async fn test_silent_mock_channel_never_answers() {
    let registry = Arc::new(CallbackRegistry::new());
    let channel = MockNativeChannel::new(Arc::clone(&registry));
    channel.set_silent(true);

    let token = CallbackRegistry::next_token();
    let receiver = registry.register(&token, "launchBrowser").await;

    channel
        .invoke("launchBrowser", vec![json!(token), json!(1)])
        .await
        .unwrap();

    // Nothing delivered; the entry is still pending.
    assert_eq!(registry.pending_count().await, 1);
    drop(receiver);
}

#[tokio::test]
async fn test_invoke_without_token_is_rejected() {
    let registry = Arc::new(CallbackRegistry::new());
    let channel = MockNativeChannel::new(registry);

    let err = channel.invoke("launchBrowser", vec![]).await.unwrap_err();
    assert!(matches!(err, crate::Error::Internal(_)));
}
