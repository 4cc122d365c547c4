//! MessagePack codec for broker records.
//!
//! Requests are encoded as string-keyed maps (the broker indexes fields by
//! name). Replies are decoded permissively; see [`Reply`].

use chanbot_core::{
    errors::Error,
    protocol::{Reply, Request},
    Result,
};

pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(request)
        .map_err(|e| Error::Codec(format!("encode {} request: {e}", request.service)))
}

pub fn decode_reply(frame: &[u8]) -> Result<Reply> {
    rmp_serde::from_slice(frame).map_err(|e| Error::Codec(format!("decode reply: {e}")))
}
