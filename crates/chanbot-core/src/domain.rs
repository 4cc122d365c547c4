use std::fmt;

use crate::random::RandomSource;

/// Length of the random suffix appended to a bot identity.
pub const IDENTITY_SUFFIX_LEN: usize = 5;

/// Length of the random suffix appended to a new channel name.
pub const CHANNEL_SUFFIX_LEN: usize = 4;

/// Bot identity presented to the broker (e.g. `bot_qwert`).
///
/// Generated once per process and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn generate(prefix: &str, rng: &mut dyn RandomSource) -> Self {
        Self(format!("{prefix}{}", rng.lowercase(IDENTITY_SUFFIX_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Broker channel (topic) name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelName(pub String);

impl ChannelName {
    pub fn generate(prefix: &str, rng: &mut dyn RandomSource) -> Self {
        Self(format!("{prefix}{}", rng.lowercase(CHANNEL_SUFFIX_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ChannelName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
