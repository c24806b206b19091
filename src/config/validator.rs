//! Validation of raw environment values into typed settings.

use crate::error::ConfigError;
use regex::Regex;
use std::net::SocketAddr;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("static identifier pattern"))
}

/// Plain PostgreSQL identifier: letter or underscore first, at most 63 bytes.
pub fn validate_identifier(name: &str) -> Result<(), ConfigError> {
    if identifier_re().is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(name.to_string()))
    }
}

pub fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            var,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

pub fn parse_positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
    T::Err: std::fmt::Display,
{
    let n: T = value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if n <= T::default() {
        return Err(ConfigError::InvalidVar {
            var,
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(n)
}

pub fn parse_addr(var: &'static str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidVar {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
