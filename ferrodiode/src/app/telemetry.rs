use super::configuration::OutputConfiguration;
use super::LogLevel;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// The filter for both layers, `RUST_LOG` takes precedence over the command line level
fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Creates a subscriber which writes human readable records to `console::Term::stdout` and JSON
/// records to the log file named in the `[output]` configuration
///
/// The output directory is created if it does not exist yet. The returned guard flushes the file
/// writer when dropped, so it has to outlive the calculation.
pub(crate) fn get_subscriber(
    level: LogLevel,
    output: &OutputConfiguration,
) -> color_eyre::Result<(impl Subscriber + Send + Sync, WorkerGuard)> {
    std::fs::create_dir_all(&output.directory)?;
    let appender = tracing_appender::rolling::never(&output.directory, &output.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(console::Term::stdout)
        .with_target(false)
        .without_time();
    let file_layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(file_writer)
        .json();

    let subscriber = Registry::default()
        .with(env_filter(level))
        .with(console_layer)
        .with(file_layer);
    Ok((subscriber, guard))
}

/// Routes `log` records into tracing and installs `subscriber` globally
pub(crate) fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> color_eyre::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}
