use tracing_subscriber::EnvFilter;

use crate::config;

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects `config::verbose_log_filter()`
/// and the default is `config::default_log_filter()`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(config::verbose_log_filter())
        } else {
            EnvFilter::new(config::default_log_filter())
        }
    });

    // A second install (tests, embedding callers) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
