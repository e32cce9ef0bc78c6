use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use anyhow::{anyhow, bail, Context};
use mail_relay::{DEFAULT_RELAY_TIMEOUT, DEFAULT_RELAY_URL};
use url::Url;

const CONFIG_FILE: &str = "server.toml";
const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(anyhow!(
                "unknown environment '{other}'; expected 'development' or 'production'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub relay_url: Url,
    pub relay_timeout: Duration,
    pub static_dir: PathBuf,
    pub environment: Environment,
    pub body_limit_bytes: usize,
}

impl Settings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Unvalidated values gathered from defaults, `server.toml` and the
/// environment, in that order of precedence (last wins).
#[derive(Debug, Clone)]
struct RawSettings {
    host: String,
    port: String,
    relay_url: String,
    relay_timeout_seconds: String,
    static_dir: String,
    environment: String,
    body_limit_bytes: String,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: "3000".into(),
            relay_url: DEFAULT_RELAY_URL.into(),
            relay_timeout_seconds: DEFAULT_RELAY_TIMEOUT.as_secs().to_string(),
            static_dir: "public".into(),
            environment: "production".into(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES.to_string(),
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {CONFIG_FILE}"));
        }
    };
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut raw = RawSettings::default();

    if let Some(contents) = file {
        apply_file(&mut raw, contents)?;
    }

    let overrides: [(&[&str], &mut String); 7] = [
        (&["HOST", "APP__HOST"], &mut raw.host),
        (&["PORT", "APP__PORT"], &mut raw.port),
        (&["CONTACT_RELAY_URL", "APP__RELAY_URL"], &mut raw.relay_url),
        (&["APP__RELAY_TIMEOUT_SECONDS"], &mut raw.relay_timeout_seconds),
        (&["STATIC_DIR", "APP__STATIC_DIR"], &mut raw.static_dir),
        (&["APP_ENV", "APP__ENVIRONMENT"], &mut raw.environment),
        (&["APP__BODY_LIMIT_BYTES"], &mut raw.body_limit_bytes),
    ];
    for (keys, slot) in overrides {
        for key in keys {
            if let Some(value) = env(key) {
                *slot = value;
            }
        }
    }

    validate(raw)
}

fn apply_file(raw: &mut RawSettings, contents: &str) -> anyhow::Result<()> {
    let table: toml::Table =
        toml::from_str(contents).with_context(|| format!("failed to parse {CONFIG_FILE}"))?;

    for (key, value) in table {
        let value = match value {
            toml::Value::String(s) => s,
            other => other.to_string(),
        };
        match key.as_str() {
            "host" => raw.host = value,
            "port" => raw.port = value,
            "relay_url" => raw.relay_url = value,
            "relay_timeout_seconds" => raw.relay_timeout_seconds = value,
            "static_dir" => raw.static_dir = value,
            "environment" => raw.environment = value,
            "body_limit_bytes" => raw.body_limit_bytes = value,
            unknown => tracing::warn!(key = unknown, "ignoring unknown key in {CONFIG_FILE}"),
        }
    }
    Ok(())
}

fn validate(raw: RawSettings) -> anyhow::Result<Settings> {
    let host = raw
        .host
        .trim()
        .parse::<IpAddr>()
        .with_context(|| format!("invalid host address '{}'", raw.host))?;
    let port = parse_port(&raw.port)?;
    let relay_url = Url::parse(raw.relay_url.trim())
        .with_context(|| format!("invalid relay url '{}'", raw.relay_url))?;
    if !matches!(relay_url.scheme(), "http" | "https") {
        bail!("relay url must use http or https, got '{}'", relay_url.scheme());
    }
    let relay_timeout_seconds = raw
        .relay_timeout_seconds
        .trim()
        .parse::<u64>()
        .with_context(|| {
            format!(
                "invalid relay timeout '{}'; expected whole seconds",
                raw.relay_timeout_seconds
            )
        })?;
    let body_limit_bytes = raw
        .body_limit_bytes
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid body limit '{}'", raw.body_limit_bytes))?;

    Ok(Settings {
        host,
        port,
        relay_url,
        relay_timeout: Duration::from_secs(relay_timeout_seconds),
        static_dir: PathBuf::from(raw.static_dir.trim()),
        environment: Environment::parse(&raw.environment)?,
        body_limit_bytes,
    })
}

/// Accepts only integers in `1..=65535`.
pub fn parse_port(raw: &str) -> anyhow::Result<u16> {
    let value = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid port '{raw}'; expected an integer"))?;
    if !(1..=i64::from(u16::MAX)).contains(&value) {
        bail!("invalid port {value}; expected a value between 1 and 65535");
    }
    Ok(value as u16)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
