//! Pacing between consecutive page requests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

/// Pause applied before every page request after the first.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn wait(&self);
}

#[async_trait]
impl<T: Throttle + ?Sized> Throttle for Arc<T> {
    async fn wait(&self) {
        (**self).wait().await;
    }
}

/// Sleep for a fixed interval between requests.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unthrottled;

#[async_trait]
impl Throttle for Unthrottled {
    async fn wait(&self) {}
}
