use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::level_filters::LevelFilter;
use validator::Validate;

use super::notifications::{DiscordSettings, MatrixSettings, PushoverSettings, TelegramSettings};
use super::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggerSettings {
    /// Mirror logs into a file sink as well as the console.
    pub save: bool,
    pub console_level: LogLevel,
    pub file_level: LogLevel,
    /// Tag every console line with the account username. Useful when several
    /// launchers run side by side.
    pub console_username: bool,
    pub auto_clear: bool,
    #[validate(nested)]
    pub rotation: RotationPolicy,
    /// tz database name, e.g. "America/Sao_Paulo". Applied to log timestamps.
    pub time_zone: Option<String>,
    pub emoji: bool,
    pub less: bool,
    pub colored: bool,
    pub color_palette: ColorPalette,
    pub discord: Option<DiscordSettings>,
    pub telegram: Option<TelegramSettings>,
    pub matrix: Option<MatrixSettings>,
    #[validate(nested)]
    pub pushover: Option<PushoverSettings>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        LoggerSettings {
            save: false,
            console_level: LogLevel::Info,
            file_level: LogLevel::Debug,
            console_username: false,
            auto_clear: false,
            rotation: RotationPolicy::default(),
            time_zone: None,
            emoji: true,
            less: true,
            colored: true,
            color_palette: ColorPalette::default(),
            discord: None,
            telegram: None,
            matrix: None,
            pushover: None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> LevelFilter {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RotationPolicy {
    pub interval: RotationInterval,
    #[validate(range(min = 1))]
    pub backup_count: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy {
            interval: RotationInterval::Daily,
            backup_count: 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationInterval {
    Never,
    Hourly,
    Daily,
}

/// Log-event name to terminal color mapping. Names are matched
/// case-insensitively, so `STREAMER_online` and `streamer_online` address the
/// same entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorPalette(IndexMap<String, TermColor>);

impl ColorPalette {
    pub fn set(&mut self, event: &str, color: &str) -> Result<(), ConfigError> {
        let color = color
            .parse()
            .map_err(|_| ConfigError::InvalidColor(color.to_owned()))?;
        self.0.insert(event.to_ascii_lowercase(), color);
        Ok(())
    }

    pub fn get(&self, event: &str) -> TermColor {
        self.0
            .get(&event.to_ascii_lowercase())
            .copied()
            .unwrap_or(TermColor::Reset)
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        let entries = [
            ("streamer_online", TermColor::Green),
            ("streamer_offline", TermColor::Red),
            ("gain_for_raid", TermColor::Yellow),
            ("gain_for_claim", TermColor::Yellow),
            ("gain_for_watch", TermColor::Yellow),
            ("gain_for_watch_streak", TermColor::Yellow),
            ("bonus_claim", TermColor::Green),
            ("moment_claim", TermColor::Green),
            ("drop_claim", TermColor::Green),
            ("prediction_made", TermColor::Blue),
            ("bet_win", TermColor::Magenta),
            ("bet_lose", TermColor::Red),
            ("chat_mention", TermColor::Cyan),
        ];
        ColorPalette(
            entries
                .into_iter()
                .map(|(event, color)| (event.to_owned(), color))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TermColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Reset,
}

impl<'de> Deserialize<'de> for TermColor {
    fn deserialize<D>(deserializer: D) -> Result<TermColor, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[test]
    fn palette_names_are_case_insensitive() {
        let mut palette = ColorPalette::default();
        palette.set("STREAMER_online", "GREEN").unwrap();
        palette.set("BET_wiN", "magenta").unwrap();
        assert_eq!(palette.get("streamer_ONLINE"), TermColor::Green);
        assert_eq!(palette.get("bet_win"), TermColor::Magenta);
    }

    #[test]
    fn unknown_event_falls_back_to_reset() {
        assert_eq!(ColorPalette::default().get("no_such_event"), TermColor::Reset);
    }

    #[test]
    fn invalid_color_is_an_error() {
        let err = ColorPalette::default().set("bet_win", "chartreuse").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor(c) if c == "chartreuse"));
    }

    #[rstest]
    #[case("MAGENTA", TermColor::Magenta)]
    #[case("red", TermColor::Red)]
    #[case("Cyan", TermColor::Cyan)]
    fn colors_parse_any_case(#[case] name: &str, #[case] expected: TermColor) {
        assert_eq!(name.parse::<TermColor>().unwrap(), expected);
    }

    #[rstest]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("info", LogLevel::Info)]
    #[case("Warn", LogLevel::Warn)]
    fn levels_parse_any_case(#[case] name: &str, #[case] expected: LogLevel) {
        assert_eq!(name.parse::<LogLevel>().unwrap(), expected);
    }

    #[test]
    fn level_converts_to_filter() {
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
    }
}
