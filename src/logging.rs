use tracing_subscriber::EnvFilter;

/// Human-readable logs on stderr so stdout carries only the page. `RUST_LOG` overrides the
/// default `info` level; records from the `log` facade are forwarded too.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
