use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON tracing subscriber on stderr.
///
/// Quiet mode only lets errors through; verbose mode logs the capture and
/// server lifecycle at info level. `RUST_LOG` directives are applied on top.
pub fn init_logging(quiet: bool) {
    let directives: &[&str] = if quiet {
        &["winfeed=error", "winfeed_core=error"]
    } else {
        &["winfeed=info", "winfeed_core=info"]
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in directives {
        filter = filter.add_directive(directive.parse().expect("Invalid log directive"));
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
}
