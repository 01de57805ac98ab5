use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr so they never interleave with the terminal UI on stdout.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt_layer.json()).init();
    } else {
        registry.with(fmt_layer).init();
    }
}
