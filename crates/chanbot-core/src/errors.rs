use std::time::Duration;

use crate::protocol::Service;

/// Core error type for the bot.
///
/// Adapter crates should map their specific errors into this type so the
/// session driver can handle failures consistently (fatal at login, retried
/// afterwards).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error("{service} exchange failed: {source}")]
    Exchange {
        service: Service,
        #[source]
        source: Box<Error>,
    },

    #[error("login failed for {user}: {reason}")]
    Login { user: String, reason: String },

    #[error("session terminated after a failed login")]
    Terminated,
}

impl Error {
    /// Attach the exchange kind to a lower-level failure.
    pub fn during(self, service: Service) -> Self {
        match self {
            e @ Error::Exchange { .. } => e,
            other => Error::Exchange {
                service,
                source: Box::new(other),
            },
        }
    }

    /// The exchange kind this error was raised in, if known.
    pub fn service(&self) -> Option<Service> {
        match self {
            Error::Exchange { service, .. } => Some(*service),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
