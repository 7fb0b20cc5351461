//! Tracing subscriber setup for hosts that don't install their own.

use tracing_subscriber::EnvFilter;

use crate::config::GeneralConfig;
use crate::error::{KithError, Result};

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Returns `Ok(false)`
/// when a global subscriber was already set, which is not an error.
///
/// # Errors
///
/// Returns [`KithError::Config`] if neither `RUST_LOG` nor the configured
/// level parses as a filter directive.
pub fn init_tracing(config: &GeneralConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| KithError::Config(format!("invalid log level {:?}: {e}", config.log_level)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    };
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let config = GeneralConfig::default();
        init_tracing(&config).expect("default level parses");
        let second = init_tracing(&config).expect("default level parses");
        assert!(!second);
    }
}
