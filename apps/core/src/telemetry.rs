use crate::config::LogFormat;
use crate::error::{AppError, AppResult};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. `LogFormat::Json` emits bunyan-style JSON lines,
/// `LogFormat::Pretty` the human-readable formatter. Both write to stderr; stdout belongs to
/// the console session.
pub fn init_tracing(service_name: &str, level: &str, format: LogFormat) -> AppResult<()> {
    build_subscriber(service_name, level, format, std::io::stderr)?
        .try_init()
        .map_err(|e| AppError::Internal(format!("tracing already initialised: {}", e)))
}

/// Builds the subscriber stack writing to `writer`.
pub fn build_subscriber<W>(
    service_name: &str,
    level: &str,
    format: LogFormat,
    writer: W,
) -> AppResult<impl Subscriber + Send + Sync + 'static>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Config(format!("invalid log level '{}': {}", level, e)))?;

    let (json_storage, bunyan, pretty) = match format {
        LogFormat::Json => (
            Some(JsonStorageLayer),
            Some(BunyanFormattingLayer::new(service_name.to_string(), writer)),
            None,
        ),
        LogFormat::Pretty => (
            None,
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
        ),
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(json_storage)
        .with(bunyan)
        .with(pretty))
}


#[cfg(test)]
mod tests {
    use super::capture::CapturedLogs;
    use super::*;

    #[test]
    fn test_json_format_writes_bunyan_lines_to_the_given_writer() {
        let logs = CapturedLogs::default();
        let subscriber = temp_env::with_var_unset("RUST_LOG", || {
            build_subscriber("medaether-test", "info", LogFormat::Json, logs.make_writer()).unwrap()
        });

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(tier = "yellow", "Health tier changed");
        });

        let line = logs.contents();
        let record: serde_json::Value = serde_json::from_str(line.lines().next().unwrap()).unwrap();
        assert_eq!(record["name"], "medaether-test");
        assert_eq!(record["msg"], "Health tier changed");
        assert_eq!(record["tier"], "yellow");
    }

    #[test]
    fn test_pretty_format_writes_to_the_given_writer() {
        let logs = CapturedLogs::default();
        let subscriber = temp_env::with_var_unset("RUST_LOG", || {
            build_subscriber("medaether-test", "debug", LogFormat::Pretty, logs.make_writer()).unwrap()
        });

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("Consultation stored");
        });

        assert!(logs.contents().contains("Consultation stored"));
    }
}
