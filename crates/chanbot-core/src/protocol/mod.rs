//! Broker request/reply records.
//!
//! Records are plain serde types; the wire codec lives in the transport
//! adapter.

pub mod builder;
pub mod reply;
pub mod request;

pub use builder::RequestBuilder;
pub use reply::{Reply, ReplyData};
pub use request::{Request, RequestData, Service};

/// Status the broker sends for an accepted login or a created channel.
pub const STATUS_SUCCESS: &str = "sucesso";

/// Status the broker sends for an accepted publish.
pub const STATUS_OK: &str = "OK";
