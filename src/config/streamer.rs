use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-streamer behavior. A single instance built at assembly acts as the
/// default for every channel in the watch list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StreamerSettings {
    pub make_predictions: bool,
    pub follow_raid: bool,
    pub claim_drops: bool,
    pub claim_moments: bool,
    pub watch_streak: bool,
    pub chat: ChatPresence,
    #[validate(nested)]
    pub bet: Option<BetSettings>,
}

impl Default for StreamerSettings {
    fn default() -> Self {
        StreamerSettings {
            make_predictions: false,
            follow_raid: true,
            claim_drops: true,
            claim_moments: true,
            watch_streak: true,
            chat: ChatPresence::Always,
            bet: None,
        }
    }
}

/// When to sit in a streamer's IRC chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChatPresence {
    #[default]
    Always,
    Never,
    Online,
    Offline,
}

/// Bet strategy parameters, handed to the engine as-is. Percentage fields are
/// written as 0-100 and scaled to 0-1 by `normalize` after validation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
#[serde(default)]
pub struct BetSettings {
    pub strategy: BetStrategy,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "defaults::_percentage_default")]
    pub percentage: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default = "defaults::_percentage_gap_default")]
    pub percentage_gap: f64,
    #[serde(default = "defaults::_max_points_default")]
    pub max_points: u32,
    pub minimum_points: u32,
    pub stealth_mode: bool,
    pub delay_mode: DelayMode,
    #[validate(range(min = 0.0))]
    #[serde(default = "defaults::_delay_default")]
    pub delay: f64,
    #[validate(nested)]
    pub filter_condition: Option<FilterCondition>,
}

#[rustfmt::skip]
mod defaults {
    pub const fn _percentage_default() -> f64 { 5.0 }
    pub const fn _percentage_gap_default() -> f64 { 20.0 }
    pub const fn _max_points_default() -> u32 { 50000 }
    pub const fn _delay_default() -> f64 { 6.0 }
}

impl BetSettings {
    pub fn normalize(&mut self) {
        self.percentage /= 100.0;
        self.percentage_gap /= 100.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BetStrategy {
    MostVoted,
    HighOdds,
    Percentage,
    #[default]
    Smart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DelayMode {
    #[default]
    FromEnd,
    FromStart,
    Percentage,
}

/// Only place a bet when an outcome key compares against the value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterCondition {
    pub by: OutcomeKey,
    pub condition: Condition,
    #[validate(range(min = 0.0))]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKey {
    Percentage,
    Odds,
    OddsPercentage,
    TopPoints,
    TotalUsers,
    TotalPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Gt,
    Lt,
    Gte,
    Lte,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_watch_but_do_not_bet() {
        let settings = StreamerSettings::default();
        assert!(!settings.make_predictions);
        assert!(settings.follow_raid);
        assert!(settings.claim_drops);
        assert!(settings.claim_moments);
        assert!(settings.watch_streak);
        assert_eq!(settings.chat, ChatPresence::Always);
        assert!(settings.bet.is_none());
    }

    #[test]
    fn bet_percentages_are_bounded() {
        let mut bet = BetSettings::default();
        assert!(bet.validate().is_ok());
        bet.percentage = 150.0;
        assert!(bet.validate().is_err());
    }

    #[test]
    fn normalize_scales_percentages_once() {
        let mut bet = BetSettings {
            percentage: 5.0,
            percentage_gap: 20.0,
            ..Default::default()
        };
        bet.normalize();
        assert_eq!(bet.percentage, 0.05);
        assert_eq!(bet.percentage_gap, 0.2);
    }

    #[test]
    fn filter_condition_rejects_negative_values() {
        let filter = FilterCondition {
            by: OutcomeKey::TotalUsers,
            condition: Condition::Gte,
            value: -1.0,
        };
        assert!(filter.validate().is_err());
    }
}
