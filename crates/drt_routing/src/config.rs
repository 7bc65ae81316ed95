use std::{ops::RangeInclusive, str::FromStr, time::Duration};

use jiff::{SignedDuration, SpanRelativeTo};
use thiserror::Error;

use crate::{
    osrm::client::{OsrmClientParams, OsrmProfile},
    route_assembler::AssemblerParams,
    units::Kmh,
};

pub const OSRM_URL_ENV_VAR: &str = "DRT_OSRM_URL";
pub const OSRM_PROFILE_ENV_VAR: &str = "DRT_OSRM_PROFILE";
pub const OSRM_TIMEOUT_ENV_VAR: &str = "DRT_OSRM_TIMEOUT";
pub const AVERAGE_SPEED_ENV_VAR: &str = "DRT_AVERAGE_SPEED_KMH";
pub const DWELL_SECONDS_ENV_VAR: &str = "DRT_DWELL_SECONDS";
pub const ALLOW_FALLBACK_ENV_VAR: &str = "DRT_ALLOW_FALLBACK";

/// Bounds of the average speed accepted for local estimates.
pub const AVERAGE_SPEED_RANGE_KMH: RangeInclusive<f64> = 1.0..=200.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RoutingConfig {
    pub osrm: OsrmClientParams,
    pub assembler: AssemblerParams,
}

/// Accepts `10s`, ISO 8601 (`PT10S`) or a plain number of seconds.
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let duration = input
        .parse::<SignedDuration>()
        .or_else(|_| {
            input
                .parse::<jiff::Span>()
                .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
        })
        .or_else(|_| input.parse::<u32>().map(|secs| SignedDuration::from_secs(secs.into())))
        .map_err(|_| format!("invalid duration {input:?}"))?;

    if duration.is_negative() {
        return Err(format!("negative duration {input:?}"));
    }

    Ok(duration)
}

pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    let duration = parse_duration(input)?;
    Duration::try_from(duration).map_err(|err| err.to_string())
}

fn parse_bool(input: &str) -> Result<bool, String> {
    match input.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got {other}")),
    }
}

fn parse_speed(input: &str) -> Result<Kmh, String> {
    match input.parse::<f64>() {
        Ok(value) if AVERAGE_SPEED_RANGE_KMH.contains(&value) => Ok(Kmh::new(value)),
        Ok(value) => Err(format!(
            "expected a speed between {} and {} km/h, got {value}",
            AVERAGE_SPEED_RANGE_KMH.start(),
            AVERAGE_SPEED_RANGE_KMH.end()
        )),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_seconds(input: &str) -> Result<SignedDuration, String> {
    input
        .parse::<u32>()
        .map(|seconds| SignedDuration::from_secs(i64::from(seconds)))
        .map_err(|err| err.to_string())
}

impl RoutingConfig {
    /// Reads the configuration from `DRT_*` environment variables, falling
    /// back to the defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = RoutingConfig::default();

        if let Some(url) = lookup(OSRM_URL_ENV_VAR) {
            config.osrm.osrm_url = url;
        }

        if let Some(profile) = read(&lookup, OSRM_PROFILE_ENV_VAR, OsrmProfile::from_str)? {
            config.osrm.profile = profile;
        }

        if let Some(timeout) = read(&lookup, OSRM_TIMEOUT_ENV_VAR, parse_timeout)? {
            config.osrm.timeout = timeout;
        }

        if let Some(speed) = read(&lookup, AVERAGE_SPEED_ENV_VAR, parse_speed)? {
            config.assembler.average_speed = speed;
        }

        if let Some(dwell) = read(&lookup, DWELL_SECONDS_ENV_VAR, parse_seconds)? {
            config.assembler.dwell = dwell;
        }

        if let Some(allow_fallback) = read(&lookup, ALLOW_FALLBACK_ENV_VAR, parse_bool)? {
            config.assembler.allow_fallback = allow_fallback;
        }

        Ok(config)
    }
}

fn read<F, T, P>(lookup: &F, name: &str, parse: P) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .map_err(|reason| ConfigError::InvalidValue {
                name: name.to_string(),
                value,
                reason,
            }),
    }
}
