use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use self::logger::LoggerSettings;
use self::notifications::DiscordSettings;
use self::streamer::StreamerSettings;

pub mod logger;
pub mod notifications;
pub mod streamer;

/// Snapshot of the environment variables the launcher reads. Captured once at
/// startup so assembly itself never touches the process environment.
#[derive(Debug, Clone, Default)]
pub struct RawEnv {
    pub username: Option<String>,
    pub password: Option<String>,
    pub channels: Option<String>,
    pub discord_webhook: Option<String>,
    pub analytics_enabled: Option<String>,
}

impl RawEnv {
    pub fn capture() -> RawEnv {
        RawEnv {
            username: env::var("USERNAME").ok(),
            password: env::var("PASSWORD").ok(),
            channels: env::var("CHANNELS").ok(),
            discord_webhook: env::var("DISCORD_WEBHOOK").ok(),
            analytics_enabled: env::var("ANALYTICS_ENABLED").ok(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CHANNELS must contain at least one channel name")]
    NoChannels,
    #[error("{var} is not a boolean: {value:?} (expected 1/0, true/false, yes/no, on/off)")]
    InvalidBool { var: &'static str, value: String },
    #[error("not a terminal color: {0:?}")]
    InvalidColor(String),
    #[error("invalid settings: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    pub username: Option<String>,
    // never written to disk
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub claim_drops_startup: bool,
    pub priority: Vec<Priority>,
    pub enable_analytics: bool,
    pub disable_ssl_cert_verification: bool,
    pub disable_at_in_nickname: bool,
    #[validate(nested)]
    pub analytics: AnalyticsSettings,
    #[validate(nested)]
    pub logger: LoggerSettings,
    #[validate(nested)]
    pub streamer_settings: StreamerSettings,
    pub streamers: Vec<String>,
    pub followers: bool,
    pub followers_order: FollowersOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalyticsSettings {
    pub serve: bool,
    pub host: String,
    pub port: u16,
    #[validate(range(min = 1))]
    pub refresh: u64,
    #[validate(range(min = 1))]
    pub days_ago: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Order,
    Streak,
    Drops,
    Subscriptions,
    PointsAscending,
    PointsDescending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowersOrder {
    Asc,
    Desc,
}

impl Settings {
    /// Builds the full settings tree from the captured environment. The
    /// channel list is split on `,` with segments kept exactly as written,
    /// order encoding watch priority among streamers.
    pub fn assemble(raw: RawEnv) -> Result<Settings, ConfigError> {
        let channels = raw
            .channels
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::NoChannels)?;
        let streamers = channels.split(',').map(str::to_owned).collect();

        let mut settings = Settings {
            username: raw.username,
            password: raw.password,
            analytics: AnalyticsSettings {
                serve: parse_bool("ANALYTICS_ENABLED", raw.analytics_enabled)?,
                ..Default::default()
            },
            logger: LoggerSettings {
                discord: raw.discord_webhook.map(DiscordSettings::with_default_events),
                ..Default::default()
            },
            streamers,
            ..Default::default()
        };
        settings.parse_and_validate()?;
        Ok(settings)
    }

    pub fn parse_and_validate(&mut self) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(bet) = self.streamer_settings.bet.as_mut() {
            bet.normalize();
        }
        Ok(())
    }
}

/// Strict reading of a boolean-like variable. Unset means false; anything
/// outside the accepted forms is an error rather than being treated as
/// truthy for merely existing.
fn parse_bool(var: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            username: None,
            password: None,
            claim_drops_startup: false,
            priority: vec![Priority::Streak, Priority::Drops, Priority::Order],
            enable_analytics: true,
            disable_ssl_cert_verification: false,
            disable_at_in_nickname: false,
            analytics: AnalyticsSettings::default(),
            logger: LoggerSettings::default(),
            streamer_settings: StreamerSettings::default(),
            streamers: Vec::new(),
            followers: false,
            followers_order: FollowersOrder::Asc,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        AnalyticsSettings {
            serve: false,
            host: "0.0.0.0".to_owned(),
            port: 5000,
            refresh: 5,
            days_ago: 7,
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    fn raw(channels: Option<&str>) -> RawEnv {
        RawEnv {
            username: Some("miner".to_owned()),
            password: Some("hunter2".to_owned()),
            channels: channels.map(str::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn channels_split_preserves_order() {
        let settings = Settings::assemble(raw(Some("a,b,c"))).unwrap();
        assert_eq!(settings.streamers, vec!["a", "b", "c"]);
    }

    #[test]
    fn channel_whitespace_passes_through() {
        let settings = Settings::assemble(raw(Some(" a , b,c "))).unwrap();
        assert_eq!(settings.streamers, vec![" a ", " b", "c "]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn missing_or_empty_channels_is_an_error(#[case] channels: Option<&str>) {
        let err = Settings::assemble(raw(channels)).unwrap_err();
        assert!(matches!(err, ConfigError::NoChannels));
    }

    #[rstest]
    #[case("1", true)]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("Yes", true)]
    #[case("on", true)]
    #[case("0", false)]
    #[case("false", false)]
    #[case("No", false)]
    #[case("OFF", false)]
    #[case("", false)]
    fn boolean_like_values(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(
            parse_bool("ANALYTICS_ENABLED", Some(value.to_owned())).unwrap(),
            expected
        );
    }

    #[test]
    fn unset_boolean_defaults_false() {
        assert!(!parse_bool("ANALYTICS_ENABLED", None).unwrap());
    }

    #[test]
    fn malformed_boolean_is_an_error() {
        let err = parse_bool("ANALYTICS_ENABLED", Some("maybe".to_owned())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ANALYTICS_ENABLED is not a boolean: \"maybe\" (expected 1/0, true/false, yes/no, on/off)"
        );
    }

    #[test]
    fn analytics_flag_reaches_settings() {
        let mut env = raw(Some("a"));
        env.analytics_enabled = Some("true".to_owned());
        assert!(Settings::assemble(env).unwrap().analytics.serve);
        assert!(!Settings::assemble(raw(Some("a"))).unwrap().analytics.serve);
    }

    #[test]
    fn discord_channel_omitted_without_webhook() {
        let settings = Settings::assemble(raw(Some("a"))).unwrap();
        assert!(settings.logger.discord.is_none());
    }

    #[test]
    fn discord_channel_present_with_webhook() {
        let mut env = raw(Some("a"));
        env.discord_webhook = Some("https://discord.com/api/webhooks/1/abc".to_owned());
        let discord = Settings::assemble(env).unwrap().logger.discord.unwrap();
        assert_eq!(discord.webhook_api, "https://discord.com/api/webhooks/1/abc");
        assert!(!discord.events.is_empty());
    }

    #[test]
    fn missing_credentials_stay_unset() {
        let mut env = raw(Some("a"));
        env.username = None;
        env.password = None;
        let settings = Settings::assemble(env).unwrap();
        assert!(settings.username.is_none());
        assert!(settings.password.is_none());
    }
}
