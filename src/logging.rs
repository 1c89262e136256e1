use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `level`. A `format` of "pretty" selects multi-line
/// output; anything else logs one line per event.
/// Output goes to stderr so stdout stays free for command output.
pub fn init(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    // A subscriber may already be installed (tests, embedding hosts)
    let _ = if format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.try_init()
    };
}
