//! Channel selection.
//!
//! Given the channel list from one list-channels exchange, decide where the
//! next publish burst goes. The decision is pure; the session driver performs
//! the create-channel exchange when one is needed.

use crate::{domain::ChannelName, random::RandomSource};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Publish to a channel the broker already listed.
    Existing(ChannelName),
    /// No channels exist; create this one first, then publish to it.
    Create(ChannelName),
}

#[derive(Clone, Debug)]
pub struct ChannelPolicy {
    channel_prefix: String,
}

impl ChannelPolicy {
    pub fn new(channel_prefix: impl Into<String>) -> Self {
        Self {
            channel_prefix: channel_prefix.into(),
        }
    }

    /// Uniform pick from `channels`, or a freshly named channel when empty.
    ///
    /// Generated names are not checked against the broker's namespace.
    pub fn select(&self, channels: &[String], rng: &mut dyn RandomSource) -> Selection {
        if channels.is_empty() {
            return Selection::Create(ChannelName::generate(&self.channel_prefix, rng));
        }
        let idx = rng.index(channels.len());
        Selection::Existing(ChannelName(channels[idx].clone()))
    }
}
