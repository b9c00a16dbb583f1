use tracing_subscriber::EnvFilter;

/// Sets up the replay log. `debug` comes from `debug_logging` in
/// `settings.json`: when off, only `info` and above are printed (sequence
/// changes, previews, cast results); when on, edge and segment traces show up
/// too and `RUST_LOG` may narrow or widen the filter. Repeat calls are no-ops.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
