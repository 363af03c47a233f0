use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use validator::Validate;

/// Lifecycle events a notification channel can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
pub enum Event {
    StreamerOnline,
    StreamerOffline,
    GainForRaid,
    GainForClaim,
    GainForWatch,
    GainForWatchStreak,
    BonusClaim,
    MomentClaim,
    DropClaim,
    PredictionMade,
    BetWin,
    BetLose,
    ChatMention,
}

impl Event {
    /// Events forwarded to a channel configured straight from the
    /// environment, where no per-event selection is possible.
    pub fn default_subscription() -> Vec<Event> {
        vec![
            Event::StreamerOnline,
            Event::StreamerOffline,
            Event::GainForRaid,
            Event::GainForClaim,
            Event::GainForWatch,
            Event::GainForWatchStreak,
            Event::BonusClaim,
            Event::ChatMention,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordSettings {
    pub webhook_api: String,
    pub events: Vec<Event>,
}

impl DiscordSettings {
    pub fn with_default_events(webhook_api: String) -> DiscordSettings {
        DiscordSettings {
            webhook_api,
            events: Event::default_subscription(),
        }
    }

    pub fn wants(&self, event: Event) -> bool {
        self.events.contains(&event)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSettings {
    pub chat_id: i64,
    pub token: String,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSettings {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    pub room_id: String,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PushoverSettings {
    pub userkey: String,
    pub token: String,
    #[validate(range(min = -2, max = 2))]
    pub priority: i8,
    pub sound: Option<String>,
    pub events: Vec<Event>,
}
