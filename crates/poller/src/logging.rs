use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use hw_common::config::AppConfig;

const DEFAULT_FILTER: &str = "hw_poller=info,hw_engine=info,hw_notifier=info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. With `LOG_FILE` set, lines are
/// appended to that file without ANSI colors.
pub fn init(config: &AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(true);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let builder = builder.with_writer(Mutex::new(file)).with_ansi(false);
            if config.log_json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        None if config.log_json => builder.json().init(),
        None => builder.init(),
    }

    Ok(())
}
