//! Bounded retry and deadline helpers for RPC-calling subtasks.
//!
//! The RPC adapter never retries; subtasks that choose to retry do so
//! through [`with_transport_retries`], which is bounded and only retries
//! transport-level failures. A server rejection is final.

use flotilla_core::rpc::RpcError;
use std::future::Future;
use std::time::Duration;

/// Wrap an RPC call in a deadline.
///
/// An elapsed deadline surfaces as a transport-level failure, keeping it
/// distinct from a server rejection.
pub async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, RpcError>
where
    F: Future<Output = Result<T, RpcError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(RpcError::transport(format!(
            "deadline of {}ms elapsed",
            deadline.as_millis()
        ))),
    }
}

/// Run an RPC call up to `max_attempts` times, retrying only
/// transport-level failures with a short linear backoff.
pub async fn with_transport_retries<T, F, Fut>(
    max_attempts: u32,
    mut call: F,
) -> Result<T, RpcError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RpcError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transport() && attempt < max_attempts => {
                tracing::warn!(attempt, max_attempts, %err, "transport failure, retrying");
                tokio::time::sleep(Duration::from_millis(10 * u64::from(attempt))).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn retries_transport_until_success() {
        let attempts = AtomicU32::new(0);
        let result = with_transport_retries(3, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(RpcError::transport("flaky"))
                } else {
                    Ok(())
                }
            }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn remote_rejection_is_not_retried() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_transport_retries(3, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async {
                Err(RpcError::Remote {
                    code: 5,
                    message: "no".to_string(),
                })
            }
        })
        .await;
        assert!(matches!(result, Err(RpcError::Remote { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_bound_is_enforced() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_transport_retries(3, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(RpcError::transport("down")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn deadline_maps_to_transport() {
        let err = with_deadline(Duration::from_millis(5), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.is_transport());
    }
}
