use std::fmt;

use serde::{Serialize, Serializer};

/// Broker service addressed by a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    Login,
    /// List channels.
    Channels,
    /// Create a channel.
    Channel,
    Publish,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Login => "login",
            Service::Channels => "channels",
            Service::Channel => "channel",
            Service::Publish => "publish",
        }
    }
}

// Always a plain string on the wire, whatever the codec's enum convention.
impl Serialize for Service {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outgoing request. Built fresh for every exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Request {
    pub service: Service,
    pub data: RequestData,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
    pub clock: u64,
}
