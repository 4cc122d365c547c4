use crate::{
    domain::{ChannelName, Identity},
    protocol::request::{Request, RequestData, Service},
    random::RandomSource,
    utils::iso_timestamp_utc,
};

/// Sample texts published by the bot. Static resource, not configurable.
pub const MESSAGE_CATALOG: &[&str] = &[
    "Olá a todos!",
    "Alguém aí?",
    "Este é um teste do sistema de mensagens.",
    "Que dia para programar!",
    "ZeroMQ é muito interessante.",
    "Testando, 1, 2, 3...",
    "Docker facilita muito a vida.",
    "Rust também é legal.",
    "Quem quer café?",
    "Preciso de férias.",
];

/// Assembles the request record for each exchange kind.
///
/// The caller ticks the logical clock and passes the new value in; the
/// builder only stamps it alongside the wall-clock timestamp.
#[derive(Clone, Copy, Debug)]
pub struct RequestBuilder {
    now: fn() -> String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            now: iso_timestamp_utc,
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed timestamp source (tests, replay).
    pub fn with_timestamps(now: fn() -> String) -> Self {
        Self { now }
    }

    pub fn login(&self, user: &Identity, clock: u64) -> Request {
        self.request(Service::Login, clock, |d| {
            d.user = Some(user.to_string());
        })
    }

    pub fn channels(&self, clock: u64) -> Request {
        self.request(Service::Channels, clock, |_| {})
    }

    pub fn create_channel(&self, channel: &ChannelName, clock: u64) -> Request {
        self.request(Service::Channel, clock, |d| {
            d.channel = Some(channel.to_string());
        })
    }

    /// Publish `text` as message `seq` of `total`, e.g. `(3/10) Alguém aí?`.
    pub fn publish(
        &self,
        user: &Identity,
        channel: &ChannelName,
        text: &str,
        seq: u32,
        total: u32,
        clock: u64,
    ) -> Request {
        self.request(Service::Publish, clock, |d| {
            d.user = Some(user.to_string());
            d.channel = Some(channel.to_string());
            d.message = Some(format!("({seq}/{total}) {text}"));
        })
    }

    fn request(
        &self,
        service: Service,
        clock: u64,
        fill: impl FnOnce(&mut RequestData),
    ) -> Request {
        let mut data = RequestData {
            user: None,
            channel: None,
            message: None,
            timestamp: (self.now)(),
            clock,
        };
        fill(&mut data);
        Request { service, data }
    }
}

/// Pick one text from [`MESSAGE_CATALOG`].
pub fn pick_message(rng: &mut dyn RandomSource) -> &'static str {
    MESSAGE_CATALOG[rng.index(MESSAGE_CATALOG.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    fn fixed_ts() -> String {
        "2026-10-15T12:00:00+00:00".to_string()
    }

    fn ident() -> Identity {
        let mut rng = StdRng::seed_from_u64(5);
        Identity::generate("bot_", &mut rng)
    }

    #[test]
    fn login_carries_user_timestamp_and_clock() {
        let b = RequestBuilder::with_timestamps(fixed_ts);
        let id = ident();
        let v = serde_json::to_value(b.login(&id, 1)).unwrap();
        assert_eq!(
            v,
            json!({
                "service": "login",
                "data": { "user": id.as_str(), "timestamp": fixed_ts(), "clock": 1 }
            })
        );
    }

    #[test]
    fn channels_has_only_shared_fields() {
        let b = RequestBuilder::with_timestamps(fixed_ts);
        let v = serde_json::to_value(b.channels(6)).unwrap();
        assert_eq!(
            v,
            json!({ "service": "channels", "data": { "timestamp": fixed_ts(), "clock": 6 } })
        );
    }

    #[test]
    fn create_channel_names_the_channel() {
        let b = RequestBuilder::with_timestamps(fixed_ts);
        let req = b.create_channel(&ChannelName("canal_wxyz".to_string()), 7);
        assert_eq!(req.service, Service::Channel);
        assert_eq!(req.data.channel.as_deref(), Some("canal_wxyz"));
        assert_eq!(req.data.user, None);
    }

    #[test]
    fn publish_marks_sequence() {
        let b = RequestBuilder::with_timestamps(fixed_ts);
        let id = ident();
        let channel = ChannelName("geral".into());
        let req = b.publish(&id, &channel, "Quem quer café?", 3, 10, 9);
        assert_eq!(req.service, Service::Publish);
        assert_eq!(req.data.message.as_deref(), Some("(3/10) Quem quer café?"));
        assert_eq!(req.data.channel.as_deref(), Some("geral"));
        assert_eq!(req.data.user.as_deref(), Some(id.as_str()));
        assert_eq!(req.data.clock, 9);
    }

    #[test]
    fn default_timestamp_is_rfc3339() {
        let req = RequestBuilder::new().channels(1);
        assert!(chrono::DateTime::parse_from_rfc3339(&req.data.timestamp).is_ok());
    }

    #[test]
    fn picked_message_comes_from_catalog() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(MESSAGE_CATALOG.contains(&pick_message(&mut rng)));
        }
    }
}
