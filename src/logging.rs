use anyhow::Result;
use std::io;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "STAC_SEARCH_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive: explicit flag, then `STAC_SEARCH_LOG`, then `warn`.
pub fn resolve_level(cli_level: Option<&str>) -> String {
    cli_level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()?;
    debug!("logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_wins() {
        assert_eq!(resolve_level(Some("debug")), "debug");
        assert_eq!(resolve_level(Some("stac_title_search=trace")), "stac_title_search=trace");
    }
}
