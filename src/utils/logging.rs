/// Initialize tracing/logging for the application.
///
/// This uses a simple `with_max_level` configuration based on `default_level`.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(parse_level(default_level))
        .with_target(false)
        .try_init();
}

fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_is_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), tracing::Level::DEBUG);
        assert_eq!(parse_level("Warning"), tracing::Level::WARN);
        assert_eq!(parse_level("trace"), tracing::Level::TRACE);
    }

    #[test]
    fn parse_level_falls_back_to_info() {
        assert_eq!(parse_level(""), tracing::Level::INFO);
        assert_eq!(parse_level("verbose"), tracing::Level::INFO);
    }

    #[test]
    fn init_accepts_repeated_calls() {
        init("info");
        init("debug");
        init("warn");
    }
}
