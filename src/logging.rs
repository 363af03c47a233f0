use color_eyre::eyre::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::{Compact, DefaultFields, Format};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::logger::{LoggerSettings, RotationInterval};

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "launcher.log";

fn get_layer<S>(
    layer: fmt::Layer<S>,
) -> fmt::Layer<S, DefaultFields, Format<Compact, ChronoLocal>> {
    layer
        .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
        .compact()
}

/// Wires the console layer and, when `save` is set, a non-blocking file layer
/// with the configured rotation policy. The returned guard must be held for
/// the file sink to flush.
pub fn init(logger: &LoggerSettings) -> Result<Option<WorkerGuard>> {
    if let Some(tz) = &logger.time_zone {
        // chrono's Local reads TZ, which covers both layers' timestamps
        std::env::set_var("TZ", tz);
    }

    let log_level = std::env::var("LOG").unwrap_or_else(|_| logger.console_level.to_string());
    let console = get_layer(fmt::layer())
        .with_ansi(logger.colored)
        .with_target(!logger.less)
        .with_filter(EnvFilter::new(format!(
            "twitch_points_launcher={log_level}"
        )));
    let registry = tracing_subscriber::registry().with(console);

    if logger.save {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(logger)?);
        let file = get_layer(fmt::layer())
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(LevelFilter::from(logger.file_level));
        registry.with(file).init();
        Ok(Some(guard))
    } else {
        registry.init();
        Ok(None)
    }
}

fn file_appender(logger: &LoggerSettings) -> Result<RollingFileAppender> {
    let rotation = match (logger.auto_clear, logger.rotation.interval) {
        (false, _) | (true, RotationInterval::Never) => {
            return Ok(tracing_appender::rolling::never(LOG_DIR, LOG_FILE))
        }
        (true, RotationInterval::Hourly) => Rotation::HOURLY,
        (true, RotationInterval::Daily) => Rotation::DAILY,
    };
    RollingFileAppender::builder()
        .rotation(rotation)
        .max_log_files(logger.rotation.backup_count)
        .filename_prefix(LOG_FILE)
        .build(LOG_DIR)
        .context("Creating log file appender")
}
