// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONFIRM_COUNTDOWN_SECS: u64 = 10;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 1;
const MAX_CONFIRM_COUNTDOWN_SECS: u64 = 24 * 60 * 60;
const DEFAULT_NOTICE_CAPACITY: usize = 50;
const DEFAULT_CHANGE_CAPACITY: usize = 200;

/// Runtime settings, read from `PLANNER_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub backend_url: String,
    pub request_timeout: Duration,
    pub confirm_countdown: Duration,
    pub sweep_interval: Duration,
    /// Adds the Confirmed column to the events board.
    pub event_confirmed_column: bool,
    pub notice_capacity: usize,
    /// How many status changes `/api/changes` keeps for polling clients.
    pub change_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "PLANNER_BIND_ADDR", || {
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().context("Invalid default bind address")
        })?;

        let backend_url = lookup("PLANNER_BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if backend_url.is_empty() {
            anyhow::bail!("PLANNER_BACKEND_URL cannot be empty");
        }

        let request_timeout = secs(&lookup, "PLANNER_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let confirm_countdown =
            secs(&lookup, "PLANNER_CONFIRM_COUNTDOWN_SECS", DEFAULT_CONFIRM_COUNTDOWN_SECS)?;
        if confirm_countdown.as_secs() > MAX_CONFIRM_COUNTDOWN_SECS {
            anyhow::bail!(
                "PLANNER_CONFIRM_COUNTDOWN_SECS must be at most {}",
                MAX_CONFIRM_COUNTDOWN_SECS
            );
        }
        let sweep_interval = secs(&lookup, "PLANNER_SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;
        if sweep_interval.is_zero() {
            anyhow::bail!("PLANNER_SWEEP_INTERVAL_SECS must be at least 1");
        }

        let event_confirmed_column = parse_or(&lookup, "PLANNER_EVENT_CONFIRMED_COLUMN", || Ok(false))?;
        let notice_capacity = parse_or(&lookup, "PLANNER_NOTICE_CAPACITY", || Ok(DEFAULT_NOTICE_CAPACITY))?;
        let change_capacity = parse_or(&lookup, "PLANNER_CHANGE_CAPACITY", || Ok(DEFAULT_CHANGE_CAPACITY))?;

        Ok(Self {
            bind_addr,
            backend_url,
            request_timeout,
            confirm_countdown,
            sweep_interval,
            event_confirmed_column,
            notice_capacity,
            change_capacity,
        })
    }
}

fn parse_or<F, T, D>(lookup: &F, key: &str, default: D) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    D: FnOnce() -> Result<T>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value {:?} for {}", raw, key)),
        None => default(),
    }
}

fn secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, key, || Ok(default)).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.backend_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.confirm_countdown, Duration::from_secs(10));
        assert!(!config.event_confirmed_column);
        assert_eq!(config.notice_capacity, 50);
        assert_eq!(config.change_capacity, 200);
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("PLANNER_BIND_ADDR", "127.0.0.1:4000"),
            ("PLANNER_BACKEND_URL", "https://api.example.com/v1/"),
            ("PLANNER_CONFIRM_COUNTDOWN_SECS", "30"),
            ("PLANNER_EVENT_CONFIRMED_COLUMN", "true"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.backend_url, "https://api.example.com/v1");
        assert_eq!(config.confirm_countdown, Duration::from_secs(30));
        assert!(config.event_confirmed_column);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = Config::from_lookup(lookup(&[("PLANNER_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("PLANNER_REQUEST_TIMEOUT_SECS"));

        assert!(Config::from_lookup(lookup(&[("PLANNER_SWEEP_INTERVAL_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PLANNER_BIND_ADDR", "nowhere")])).is_err());
    }

    #[test]
    fn test_confirm_countdown_is_bounded() {
        let err = Config::from_lookup(lookup(&[(
            "PLANNER_CONFIRM_COUNTDOWN_SECS",
            "18446744073709551615",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("at most"));

        let config =
            Config::from_lookup(lookup(&[("PLANNER_CONFIRM_COUNTDOWN_SECS", "86400")])).unwrap();
        assert_eq!(config.confirm_countdown, Duration::from_secs(86400));
    }
}
