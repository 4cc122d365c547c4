//! Session driver.
//!
//! Owns the bot lifecycle as an explicit state machine:
//!
//! ```text
//! Unauthenticated --login ok--> Discovering --channel chosen--> Publishing{sent}
//! Unauthenticated --login err--> Failed
//! Publishing{sent} --publish ok--> Publishing{sent+1} | Discovering (burst done)
//! Discovering | Publishing --error--> Recovering --backoff--> Discovering
//! ```
//!
//! Login failure is terminal. Every failure after login is logged, followed
//! by a fixed backoff, and the iteration restarts at channel discovery with
//! the same identity and clock.

use std::{convert::Infallible, sync::Arc};

use tracing::{debug, error, info, warn};

use crate::{
    clock::LogicalClock,
    config::Config,
    domain::{ChannelName, Identity},
    errors::Error,
    policy::{ChannelPolicy, Selection},
    ports::{Sleeper, Transport},
    protocol::{
        builder::pick_message, Reply, Request, RequestBuilder, STATUS_OK, STATUS_SUCCESS,
    },
    random::RandomSource,
    Result,
};

/// Publish exchanges per selected channel.
pub const PUBLISH_BURST: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Unauthenticated,
    Discovering,
    /// `sent` publishes of the current burst have completed.
    Publishing {
        channel: ChannelName,
        sent: u32,
    },
    /// A post-login exchange failed; backoff before rediscovering.
    Recovering,
    /// Login failed. Terminal.
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub exchanges: u64,
    pub publishes: u64,
    pub channels_created: u64,
    pub recoveries: u64,
}

pub struct SessionDriver {
    cfg: Arc<Config>,
    transport: Box<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    rng: Box<dyn RandomSource>,
    builder: RequestBuilder,
    policy: ChannelPolicy,
    identity: Identity,
    clock: LogicalClock,
    phase: Phase,
    stats: SessionStats,
}

impl SessionDriver {
    pub fn new(
        cfg: Arc<Config>,
        transport: Box<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let identity = Identity::generate(&cfg.identity_prefix, rng.as_mut());
        let policy = ChannelPolicy::new(cfg.channel_prefix.clone());
        Self {
            cfg,
            transport,
            sleeper,
            rng,
            builder: RequestBuilder::new(),
            policy,
            identity,
            clock: LogicalClock::new(),
            phase: Phase::Unauthenticated,
            stats: SessionStats::default(),
        }
    }

    pub fn with_builder(mut self, builder: RequestBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn clock(&self) -> u64 {
        self.clock.value()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Drive the session forever.
    ///
    /// Only returns on a failed login; every later failure is retried.
    pub async fn run(&mut self) -> Result<Infallible> {
        info!(
            bot = %self.identity,
            broker = self.transport.endpoint(),
            "starting session"
        );
        loop {
            self.step().await?;
        }
    }

    /// Perform one state transition (at most one exchange or one pause).
    pub async fn step(&mut self) -> Result<()> {
        let phase = std::mem::replace(&mut self.phase, Phase::Failed);
        let next = match phase {
            Phase::Unauthenticated => {
                if let Err(e) = self.login().await {
                    error!(bot = %self.identity, error = %e, "login failed; giving up");
                    return Err(e);
                }
                Phase::Discovering
            }
            Phase::Discovering => match self.discover().await {
                Ok(channel) => Phase::Publishing { channel, sent: 0 },
                Err(e) => self.recover_from(e),
            },
            Phase::Publishing { channel, sent } => {
                let seq = sent + 1;
                match self.publish(&channel, seq).await {
                    Ok(()) if seq >= PUBLISH_BURST => {
                        info!(
                            bot = %self.identity,
                            channel = %channel,
                            clock = self.clock.value(),
                            publishes = self.stats.publishes,
                            recoveries = self.stats.recoveries,
                            "burst complete"
                        );
                        Phase::Discovering
                    }
                    Ok(()) => Phase::Publishing { channel, sent: seq },
                    Err(e) => self.recover_from(e),
                }
            }
            Phase::Recovering => {
                self.sleeper.sleep(self.cfg.retry_backoff).await;
                Phase::Discovering
            }
            Phase::Failed => return Err(Error::Terminated),
        };
        self.phase = next;
        Ok(())
    }

    async fn login(&mut self) -> Result<()> {
        let stamp = self.clock.tick();
        let req = self.builder.login(&self.identity, stamp);
        let user = self.identity.to_string();

        let reply = self.round_trip(req).await.map_err(|e| Error::Login {
            user: user.clone(),
            reason: e.to_string(),
        })?;

        match reply.status() {
            Some(STATUS_SUCCESS) => {
                info!(bot = %self.identity, clock = self.clock.value(), "logged in");
                Ok(())
            }
            Some(other) => Err(Error::Login {
                user,
                reason: format!("broker answered status {other:?}"),
            }),
            None => Err(Error::Login {
                user,
                reason: "reply carried no status".to_string(),
            }),
        }
    }

    async fn discover(&mut self) -> Result<ChannelName> {
        let stamp = self.clock.tick();
        let req = self.builder.channels(stamp);
        let channels = self.round_trip(req).await?.channels();

        let channel = match self.policy.select(&channels, self.rng.as_mut()) {
            Selection::Existing(channel) => channel,
            Selection::Create(channel) => {
                self.create_channel(&channel).await?;
                channel
            }
        };

        info!(
            bot = %self.identity,
            channel = %channel,
            available = channels.len(),
            "sending {PUBLISH_BURST} messages"
        );
        Ok(channel)
    }

    async fn create_channel(&mut self, channel: &ChannelName) -> Result<()> {
        info!(bot = %self.identity, channel = %channel, "creating channel");
        let stamp = self.clock.tick();
        let req = self.builder.create_channel(channel, stamp);
        let reply = self.round_trip(req).await?;
        self.stats.channels_created += 1;

        // The channel is used regardless of what the broker answered.
        if let Some(status) = reply.status().filter(|s| *s != STATUS_SUCCESS) {
            warn!(
                bot = %self.identity,
                channel = %channel,
                status,
                "channel creation not confirmed; publishing anyway"
            );
        }
        Ok(())
    }

    async fn publish(&mut self, channel: &ChannelName, seq: u32) -> Result<()> {
        let text = pick_message(self.rng.as_mut());
        let stamp = self.clock.tick();
        let req = self
            .builder
            .publish(&self.identity, channel, text, seq, PUBLISH_BURST, stamp);
        let reply = self.round_trip(req).await?;
        self.stats.publishes += 1;

        if let Some(status) = reply.status().filter(|s| *s != STATUS_OK) {
            warn!(
                bot = %self.identity,
                channel = %channel,
                status,
                seq,
                "publish rejected by broker"
            );
        }

        let pause = self
            .rng
            .duration_between(self.cfg.publish_pause_min, self.cfg.publish_pause_max);
        self.sleeper.sleep(pause).await;
        Ok(())
    }

    /// One strict exchange: send, await the single reply, merge its clock.
    async fn round_trip(&mut self, req: Request) -> Result<Reply> {
        let service = req.service;
        debug!(
            bot = %self.identity,
            exchange = %service,
            clock = req.data.clock,
            "sending request"
        );

        let reply = self
            .transport
            .exchange(&req)
            .await
            .map_err(|e| e.during(service))?;

        let received = reply.clock();
        let clock = self.clock.merge(received);
        self.stats.exchanges += 1;
        debug!(
            bot = %self.identity,
            exchange = %service,
            received,
            clock,
            "reply received"
        );
        Ok(reply)
    }

    fn recover_from(&mut self, err: Error) -> Phase {
        self.stats.recoveries += 1;
        warn!(
            bot = %self.identity,
            exchange = err.service().map(|s| s.as_str()).unwrap_or("unknown"),
            error = %err,
            backoff = ?self.cfg.retry_backoff,
            "exchange failed; retrying from channel discovery"
        );
        Phase::Recovering
    }
}
