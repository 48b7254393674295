//! System clock and tokio-backed delay.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ob_core::ports::{ClockPort, DelayPort};

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One-shot delay on the tokio timer wheel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl DelayPort for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
