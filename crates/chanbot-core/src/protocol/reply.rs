use serde::Deserialize;

/// A decoded broker reply.
///
/// The broker may omit any field, so every access resolves "present or
/// default" explicitly. Unknown fields (`service`, `timestamp`,
/// `description`, ...) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub data: Option<ReplyData>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ReplyData {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub channels: Option<Vec<String>>,
    #[serde(default)]
    pub clock: Option<u64>,
}

impl Reply {
    pub fn status(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.status.as_deref())
    }

    /// Channel list, empty when absent.
    pub fn channels(&self) -> Vec<String> {
        self.data
            .as_ref()
            .and_then(|d| d.channels.clone())
            .unwrap_or_default()
    }

    /// Broker clock, 0 when absent.
    pub fn clock(&self) -> u64 {
        self.data.as_ref().and_then(|d| d.clock).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> Reply {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn empty_reply_resolves_to_defaults() {
        let r = parse(json!({}));
        assert_eq!(r.status(), None);
        assert!(r.channels().is_empty());
        assert_eq!(r.clock(), 0);
    }

    #[test]
    fn null_data_is_tolerated() {
        let r = parse(json!({ "data": null }));
        assert_eq!(r, Reply::default());
    }

    #[test]
    fn known_fields_are_read_and_extras_ignored() {
        let r = parse(json!({
            "service": "channels",
            "data": {
                "timestamp": "2026-01-01T00:00:00",
                "channels": ["geral", "canal_abcd"],
                "clock": 12,
                "description": "ignored"
            }
        }));
        assert_eq!(r.channels(), vec!["geral", "canal_abcd"]);
        assert_eq!(r.clock(), 12);
        assert_eq!(r.status(), None);
    }

    #[test]
    fn login_status_is_exposed() {
        let r = parse(json!({ "data": { "status": "erro", "description": "Usuário já existe" } }));
        assert_eq!(r.status(), Some("erro"));
    }
}
