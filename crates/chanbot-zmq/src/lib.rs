//! ZeroMQ adapter for the broker transport port.
//!
//! One REQ socket, one frame per request and per reply. The socket is
//! connected lazily and dropped after any send/receive failure or timeout,
//! so the next exchange starts on a fresh socket instead of a REQ socket
//! stuck waiting for a reply that will never come.

pub mod codec;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use zeromq::{ReqSocket, Socket, SocketRecv, SocketSend, ZmqMessage};

use chanbot_core::{
    errors::Error,
    ports::Transport,
    protocol::{Reply, Request},
    Result,
};

pub struct ZmqTransport {
    endpoint: String,
    timeout: Option<Duration>,
    socket: Option<ReqSocket>,
}

impl ZmqTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            socket: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    async fn connected(&mut self) -> Result<&mut ReqSocket> {
        if self.socket.is_none() {
            let mut socket = ReqSocket::new();
            socket
                .connect(&self.endpoint)
                .await
                .map_err(|e| Error::Transport(format!("connect {}: {e}", self.endpoint)))?;
            info!(endpoint = %self.endpoint, "connected to broker");
            self.socket = Some(socket);
        }
        self.socket
            .as_mut()
            .ok_or_else(|| Error::Transport("socket unavailable".to_string()))
    }

    async fn attempt(&mut self, payload: Vec<u8>) -> Result<Vec<u8>> {
        let socket = self.connected().await?;
        send_recv(socket, payload).await
    }

    fn reset(&mut self, cause: &Error) {
        if self.socket.take().is_some() {
            warn!(endpoint = %self.endpoint, error = %cause, "dropping broker socket");
        }
    }
}

async fn send_recv(socket: &mut ReqSocket, payload: Vec<u8>) -> Result<Vec<u8>> {
    socket
        .send(ZmqMessage::from(payload))
        .await
        .map_err(|e| Error::Transport(format!("send: {e}")))?;
    let msg = socket
        .recv()
        .await
        .map_err(|e| Error::Transport(format!("recv: {e}")))?;
    msg.get(0)
        .map(|frame| frame.to_vec())
        .ok_or_else(|| Error::Codec("empty reply".to_string()))
}

#[async_trait]
impl Transport for ZmqTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(&mut self, request: &Request) -> Result<Reply> {
        let payload = codec::encode_request(request)?;

        // The limit covers connecting too: zeromq keeps retrying a refused
        // connect without ever returning.
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.attempt(payload))
                .await
                .unwrap_or(Err(Error::Timeout(limit))),
            None => self.attempt(payload).await,
        };

        let frame = match outcome {
            Ok(frame) => frame,
            Err(e) => {
                self.reset(&e);
                return Err(e);
            }
        };
        debug!(service = %request.service, bytes = frame.len(), "reply frame");
        codec::decode_reply(&frame)
    }
}
