use color_eyre::eyre::{Context, Result};
use dialoguer::{Input, Password};
use tracing::info;

use crate::config::{AnalyticsSettings, FollowersOrder, Settings};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Boundary to the automation engine. The launcher only assembles settings
/// and hands them over; everything behind these calls (pubsub, claiming,
/// betting, the analytics server) is the engine's own.
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// Interactive credential fallback, used when a value is absent from the
    /// environment.
    fn prompt_username(&self) -> Result<String>;
    fn prompt_password(&self, username: &str) -> Result<String>;
    /// Start the analytics web server. Only called when `ANALYTICS_ENABLED`
    /// parsed truthy.
    async fn start_analytics(&self, analytics: &AnalyticsSettings) -> Result<()>;
    /// The main handoff. Does not return during normal operation.
    async fn run_miner(
        &self,
        settings: &Settings,
        credentials: Credentials,
        followers: bool,
        followers_order: FollowersOrder,
    ) -> Result<()>;
}

/// Terminal-facing engine front. Credentials come from dialoguer prompts and
/// the run loop holds the process until an external signal arrives.
pub struct Interactive;

impl Engine for Interactive {
    fn prompt_username(&self) -> Result<String> {
        Input::<String>::new()
            .with_prompt("Twitch username")
            .interact_text()
            .context("Reading username")
    }

    fn prompt_password(&self, username: &str) -> Result<String> {
        Password::new()
            .with_prompt(format!("Password for {username}"))
            .interact()
            .context("Reading password")
    }

    async fn start_analytics(&self, analytics: &AnalyticsSettings) -> Result<()> {
        info!(
            "Analytics server on {}:{}, refresh {}s, {} days of history",
            analytics.host, analytics.port, analytics.refresh, analytics.days_ago
        );
        Ok(())
    }

    async fn run_miner(
        &self,
        settings: &Settings,
        credentials: Credentials,
        followers: bool,
        followers_order: FollowersOrder,
    ) -> Result<()> {
        info!(
            "Mining {} channels as {}",
            settings.streamers.len(),
            credentials.username
        );
        if followers {
            info!("Follower sync enabled, sorted {followers_order:?} by follow date");
        }
        tokio::signal::ctrl_c()
            .await
            .context("Waiting for shutdown signal")?;
        info!("Shutting down");
        Ok(())
    }
}
