use std::{env, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_KEEP_USERNAME: &str = "@movie_talk_backup";
pub const DEFAULT_SAVE_TRIGGER: &str = "#save";
pub const DEFAULT_SAVE_PHOTO_URL: &str = "https://telegra.ph/file/movie-talk-saved.jpg";
pub const DEFAULT_FALLBACK_GROUP_URL: &str = "https://t.me/movie_talk_backup";

/// Typed configuration, sourced from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub api_id: i64,
    pub api_hash: String,
    pub bot_token: String,

    // Monitored chats
    pub killme_channels: Vec<i64>,
    pub replybot_groups: Vec<i64>,
    pub group_excluded_ids: Vec<i64>,

    // Health endpoint
    pub health_port: u16,

    // Caption sanitizer
    pub keep_username: String,

    // Duplicate-request tracker
    pub duplicate_window: Duration,
    pub tracker_sweep_interval: Option<Duration>,

    // Admin save flow
    pub save_trigger: String,
    pub save_photo_url: String,
    pub fallback_group_url: String,
    pub save_confirm_delay: Duration,
}

impl Config {
    /// Read the process environment. A `.env` file is loaded by the binary
    /// before the runtime starts, so nothing here mutates the environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_id_raw = required(&lookup, "API_ID")?;
        let api_id = api_id_raw.trim().parse::<i64>().map_err(|_| {
            Error::Config(format!("API_ID must be an integer, got {api_id_raw:?}"))
        })?;
        let api_hash = required(&lookup, "API_HASH")?;
        let bot_token = required(&lookup, "BOT_TOKEN")?;

        let killme_channels = parse_csv_i64(lookup("KILLME_CHANNELS"));
        let replybot_groups = parse_csv_i64(lookup("REPLYBOT_GROUP"));
        let group_excluded_ids = parse_csv_i64(lookup("GROUP_EXCLUDED_IDS"));

        let health_port = parse_num::<u16>(&lookup, "HEALTH_PORT").unwrap_or(8080);

        let keep_username = lookup("KEEP_USERNAME")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_KEEP_USERNAME.to_string());

        let duplicate_window = Duration::from_secs(
            parse_num::<u64>(&lookup, "DUPLICATE_WINDOW_MINUTES").unwrap_or(60) * 60,
        );
        let tracker_sweep_interval = match parse_num::<u64>(&lookup, "TRACKER_SWEEP_SECS") {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(600)),
        };

        let save_trigger = lookup("SAVE_TRIGGER")
            .and_then(non_empty)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_SAVE_TRIGGER.to_string());
        let save_photo_url = lookup("SAVE_PHOTO_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_SAVE_PHOTO_URL.to_string());
        let fallback_group_url = lookup("FALLBACK_GROUP_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_FALLBACK_GROUP_URL.to_string());

        Ok(Self {
            api_id,
            api_hash,
            bot_token,
            killme_channels,
            replybot_groups,
            group_excluded_ids,
            health_port,
            keep_username,
            duplicate_window,
            tracker_sweep_interval,
            save_trigger,
            save_photo_url,
            fallback_group_url,
            save_confirm_delay: Duration::from_secs(3),
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .and_then(non_empty)
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn parse_num<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse::<T>().ok())
}

/// Comma-separated integer list; blanks and unparsable entries are skipped.
pub fn parse_csv_i64(v: Option<String>) -> Vec<i64> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<i64>().ok())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
