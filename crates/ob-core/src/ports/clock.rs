use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Wall-clock source. All "now" reads go through this port so the
/// cooldown and interaction timestamps are testable.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// One-shot delay, used for the organic re-fetch timer. The timer has
/// no cancellation; it is bounded and safe to let fire.
#[async_trait]
pub trait DelayPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
