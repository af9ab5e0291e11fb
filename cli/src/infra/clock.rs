//! System clock: implements `Clock` with `chrono` and `tokio::time`.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::application::ports::Clock;

/// Real wall clock; sleeps suspend the task on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
