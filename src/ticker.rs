use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Waits out the pause between two monitoring cycles.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self, interval: Duration);
}

/// Real-time ticker backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepTicker;

#[async_trait]
impl Ticker for SleepTicker {
    async fn tick(&mut self, interval: Duration) {
        sleep(interval).await;
    }
}
