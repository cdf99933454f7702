//! Best-effort result delivery.
//!
//! The orchestrator hands finished results to a [`DeliveryTarget`] and walks
//! away; delivery has its own bounded retry with escalating delay, distinct
//! from the fetch retry. Exhausting the attempts logs the failure and drops
//! the message.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Why a delivery attempt did not land.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The destination may accept a later attempt.
    #[error("delivery failed: {0}")]
    Transient(String),

    /// The destination no longer exists; further attempts are pointless.
    #[error("destination gone: {0}")]
    Gone(String),
}

/// "Send text to destination" with an acknowledgment/failure signal.
#[async_trait]
pub trait DeliveryTarget: Send + Sync {
    async fn deliver(&self, message: &str) -> std::result::Result<(), DeliveryError>;
}

/// Policy for the delivery retry loop.
#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    /// Attempts before the message is dropped.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Growth factor applied to the delay per attempt.
    pub multiplier: f64,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            multiplier: 1.5,
        }
    }
}

/// Deliver `message`, retrying transient failures per `policy`.
///
/// Best-effort by contract: a gone destination short-circuits, and exhausted
/// attempts are logged and swallowed rather than surfaced to the user.
pub async fn deliver_with_retry(target: &dyn DeliveryTarget, message: &str, policy: &DeliveryPolicy) {
    let mut delay = policy.base_delay;
    for attempt in 1..=policy.max_attempts.max(1) {
        match target.deliver(message).await {
            Ok(()) => {
                if attempt > 1 {
                    debug!(attempt, "delivery succeeded after retry");
                }
                return;
            }
            Err(DeliveryError::Gone(reason)) => {
                warn!(%reason, "destination gone, dropping message");
                return;
            }
            Err(DeliveryError::Transient(reason)) => {
                if attempt == policy.max_attempts.max(1) {
                    error!(%reason, attempts = attempt, "failed to deliver message, dropping");
                    return;
                }
                debug!(%reason, attempt, delay_ms = delay.as_millis() as u64, "retrying delivery");
                tokio::time::sleep(delay).await;
                delay = delay.mul_f64(policy.multiplier);
            }
        }
    }
}
