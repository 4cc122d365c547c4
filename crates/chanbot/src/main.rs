use std::sync::Arc;

use anyhow::Context;

use chanbot_core::{config::Config, driver::SessionDriver, ports::TokioSleeper, random};
use chanbot_zmq::ZmqTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chanbot_core::logging::init("chanbot")?;

    let cfg = Arc::new(Config::load().context("loading configuration")?);
    tracing::info!(
        broker = %cfg.broker_address,
        seeded = cfg.rng_seed.is_some(),
        "configuration loaded"
    );

    let transport = ZmqTransport::new(cfg.broker_address.clone(), cfg.exchange_timeout);
    let mut driver = SessionDriver::new(
        cfg.clone(),
        Box::new(transport),
        Arc::new(TokioSleeper),
        random::source(cfg.rng_seed),
    );

    // Only a failed login makes `run` return.
    let never = driver
        .run()
        .await
        .with_context(|| format!("bot {} stopped", driver.identity()))?;
    match never {}
}
