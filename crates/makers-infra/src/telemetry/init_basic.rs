use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by long-running hosts when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "makers=debug";

/// Initialize tracing with an `EnvFilter` read from `RUST_LOG`, falling back to
/// `default_filter`. Events go to stderr; `json` switches to newline-delimited JSON.
pub fn init_telemetry(
    default_filter: &str,
    json: bool,
    environment: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!(environment = %environment, json, "Tracing initialized");
    Ok(())
}
