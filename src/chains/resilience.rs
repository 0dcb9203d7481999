use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::models::{Result, RiskScoreError};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 5_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay_ms = self.base_delay_ms as f64
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);

        Duration::from_millis((delay_ms as u64).min(self.max_delay_ms))
    }
}

/// Retry with exponential backoff. Only retryable errors get another attempt.
pub async fn retry_with_backoff<F, T, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!("Operation {} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!("Operation {} failed on attempt {}: {}", operation_name, attempt, e);
                sleep(config.delay_for(attempt)).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    error!("Operation {} failed after {} attempts", operation_name, attempt);
                }
                return Err(e);
            }
        }
    }
}

pub(crate) fn rate_limited(service: &str) -> RiskScoreError {
    RiskScoreError::RateLimitExceeded {
        service: service.to_string(),
    }
}
