use tracing_subscriber::EnvFilter;

/// Env var holding a tracing filter directive, e.g. `gitattrs=debug`.
const LOG_ENV: &str = "GITATTRS_LOG";

/// Logs go to stderr so stdout stays clean for templates and JSON.
pub(super) fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
