use tracing_subscriber::EnvFilter;

/// Set up the tracing subscriber. `debug` mirrors `Settings::debug_logging`:
/// when it is on, the filter defaults to `debug` and honours `RUST_LOG`;
/// when it is off, the filter is pinned to `info` so a stray `RUST_LOG` in
/// the environment cannot flood the console with interaction traces.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    // try_init so tests and repeated app launches can call this freely.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(false);
        init(true);
        init(false);
    }
}
