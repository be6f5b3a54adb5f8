use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::info;
use tracing::warn;

/// Long-term Tencent Cloud credential pair.
#[derive(Clone)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
}

pub struct Config {
    pub port: u16,
    /// `None` when the environment is missing either secret. The route
    /// answers with a misconfiguration error instead of refusing to boot, so
    /// the rest of the site keeps working without the chatbot.
    pub credentials: Option<Credentials>,
    /// Override of the provider endpoint, for tests and proxies.
    pub endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("UIBO_PORT", "3100"),
            credentials: load_credentials(),
            endpoint: env::var("HUNYUAN_ENDPOINT").ok(),
        }
    }
}

fn load_credentials() -> Option<Credentials> {
    let secret_id = secret("TENCENT_SECRET_ID")?;
    let secret_key = secret("TENCENT_SECRET_KEY")?;
    Some(Credentials {
        secret_id,
        secret_key,
    })
}

fn secret(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => {
            warn!("{key} not set, chatbot route will report misconfiguration");
            None
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value ({e}), using default: {default}");
            default.parse().unwrap_or_else(|e| {
                // Defaults are compile-time constants; a bad one is a bug.
                panic!("default for {key} does not parse: {e}")
            })
        }
    }
}
