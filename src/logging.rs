use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate only.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
    {
        eprintln!("logging already initialized: {e}");
    }
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(directive(level)).unwrap_or_else(|_| EnvFilter::new(directive("info")))
}

fn directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_is_scoped_to_crate() {
        assert_eq!(directive(" DEBUG "), "traygauge=debug");
    }

    #[test]
    fn unknown_level_falls_back() {
        let filter = default_filter("loud");
        assert_eq!(filter.to_string(), "traygauge=info");
    }
}
