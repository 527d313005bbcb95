//! Timeout race combinator
//!
//! Races a pending operation against a deadline and settles with whichever
//! completes first. The loser is abandoned, not cancelled: a native call that
//! resolves after its deadline surfaces only as an unknown-token delivery,
//! which the callback registry drops.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Race `operation` against `deadline`
///
/// `what` names the operation in the timeout error.
pub async fn race<T, F>(operation: F, deadline: Duration, what: &str) -> Result<T>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(value) => Ok(value),
        Err(_) => Err(Error::timeout(format!(
            "{} exceeded {}ms",
            what,
            deadline.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_operation_wins_when_faster() {
        let result = race(async { 42 }, Duration::from_millis(100), "fast op").await;
        assert_eq!(assert_ok!(result), 42);
    }

    #[tokio::test]
    async fn test_deadline_wins_when_operation_stalls() {
        let result = race(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                42
            },
            Duration::from_millis(10),
            "stalled op",
        )
        .await;

        match result {
            Err(Error::Timeout(msg)) => assert!(msg.contains("stalled op")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_late_settlement_has_no_observable_effect() {
        let (tx, rx) = tokio::sync::oneshot::channel::<i32>();

        let result = race(rx, Duration::from_millis(10), "late op").await;
        assert!(matches!(result, Err(Error::Timeout(_))));

        // The loser settling afterwards is harmless.
        assert!(tx.send(7).is_err());
    }
}
