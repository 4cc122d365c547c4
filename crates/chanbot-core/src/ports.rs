use std::time::Duration;

use async_trait::async_trait;

use crate::{
    protocol::{Reply, Request},
    Result,
};

/// Hexagonal port for the broker's request/reply transport.
///
/// `exchange` takes `&mut self`: one request is in flight at a time and its
/// reply is consumed before the next request can be sent. Implementations
/// own the wire encoding.
#[async_trait]
pub trait Transport: Send {
    /// Human-readable endpoint, for logs.
    fn endpoint(&self) -> &str;

    async fn exchange(&mut self, request: &Request) -> Result<Reply>;
}

/// Port for the bot's pacing pauses.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real pauses on the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
