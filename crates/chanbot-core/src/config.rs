use std::{env, fs, io, path::Path, time::Duration};

use crate::{errors::Error, utils::optional_millis, Result};

pub const DEFAULT_BROKER_ADDRESS: &str = "tcp://broker:5557";

/// Typed configuration for the bot.
///
/// Defaults reproduce the reference client's behaviour; everything can be
/// overridden from the environment or a `.env` file.
#[derive(Clone, Debug)]
pub struct Config {
    // Broker
    pub broker_address: String,
    pub exchange_timeout: Option<Duration>,

    // Naming
    pub identity_prefix: String,
    pub channel_prefix: String,

    // Pacing
    pub publish_pause_min: Duration,
    pub publish_pause_max: Duration,
    pub retry_backoff: Duration,

    // Replay
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            broker_address: DEFAULT_BROKER_ADDRESS.to_string(),
            exchange_timeout: Some(Duration::from_secs(30)),
            identity_prefix: "bot_".to_string(),
            channel_prefix: "canal_".to_string(),
            publish_pause_min: Duration::from_millis(500),
            publish_pause_max: Duration::from_millis(2000),
            retry_backoff: Duration::from_secs(5),
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv(Path::new(".env"))?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the process environment in `load`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).and_then(non_empty);

        let broker_address = get("BROKER_ADDRESS").unwrap_or(defaults.broker_address);
        if !broker_address.contains("://") {
            return Err(Error::Config(format!(
                "BROKER_ADDRESS must be a transport endpoint like tcp://host:port, got {broker_address:?}"
            )));
        }

        let exchange_timeout = match parse_u64(&get, "EXCHANGE_TIMEOUT_MS")? {
            Some(ms) => optional_millis(ms),
            None => defaults.exchange_timeout,
        };

        let identity_prefix = get("BOT_IDENTITY_PREFIX").unwrap_or(defaults.identity_prefix);
        let channel_prefix = get("BOT_CHANNEL_PREFIX").unwrap_or(defaults.channel_prefix);

        let publish_pause_min = parse_u64(&get, "PUBLISH_PAUSE_MIN_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.publish_pause_min);
        let publish_pause_max = parse_u64(&get, "PUBLISH_PAUSE_MAX_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.publish_pause_max);
        if publish_pause_min >= publish_pause_max {
            return Err(Error::Config(format!(
                "publish pause range is empty: min {publish_pause_min:?} >= max {publish_pause_max:?}"
            )));
        }

        let retry_backoff = parse_u64(&get, "RETRY_BACKOFF_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_backoff);

        let rng_seed = parse_u64(&get, "BOT_RNG_SEED")?;

        Ok(Self {
            broker_address,
            exchange_timeout,
            identity_prefix,
            channel_prefix,
            publish_pause_min,
            publish_pause_max,
            retry_backoff,
            rng_seed,
        })
    }
}

fn parse_u64(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = get(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key}={raw:?} is not a valid number: {e}")))
}

/// Export `KEY=value` pairs from a dotenv file into the process environment.
///
/// A missing file is not an error. Variables already set win over the file.
fn load_dotenv(path: &Path) -> Result<()> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for (key, value) in contents.lines().filter_map(dotenv_pair) {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
        }
    }
    Ok(())
}

/// One `KEY=value` line, with matching outer quotes removed from the value.
fn dotenv_pair(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = value.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q));
    Some((key, unquoted.unwrap_or(value)))
}

fn non_empty(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}
