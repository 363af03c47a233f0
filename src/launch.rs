use chrono::Local;
use color_eyre::Result;
use tracing::{debug, info, info_span, Instrument, Span};

use crate::config::notifications::Event;
use crate::config::Settings;
use crate::engine::{Credentials, Engine};

/// Single sequential handoff to the engine: resolve credentials, start the
/// analytics server when enabled, then block in the mine loop.
pub async fn launch<E: Engine>(settings: &Settings, engine: &E) -> Result<()> {
    let username = match settings.username.clone() {
        Some(username) => username,
        None => engine.prompt_username()?,
    };
    let password = match settings.password.clone() {
        Some(password) => password,
        None => engine.prompt_password(&username)?,
    };

    let span = if settings.logger.console_username {
        info_span!("miner", user = %username)
    } else {
        Span::none()
    };

    async {
        let pickaxe = if settings.logger.emoji { "⛏️ " } else { "" };
        info!(
            "{pickaxe}Session start {}, watching {} channels",
            Local::now().to_rfc3339(),
            settings.streamers.len()
        );
        debug!(priority = ?settings.priority, "Watch priority");
        if settings
            .logger
            .discord
            .as_ref()
            .is_some_and(|d| d.wants(Event::StreamerOnline))
        {
            debug!("Discord will be notified when streamers go live");
        }

        if settings.analytics.serve {
            engine.start_analytics(&settings.analytics).await?;
        }

        engine
            .run_miner(
                settings,
                Credentials { username, password },
                settings.followers,
                settings.followers_order,
            )
            .await
    }
    .instrument(span)
    .await
}
