use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "shapecorners=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter used when neither `env_filter` nor `RUST_LOG` is set.
    pub const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Info;

    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Filter directives in precedence order: explicit config, then `RUST_LOG`.
///
/// `None` means [`LoggingConfig::DEFAULT_LEVEL`] applies.
fn resolve_filter(configured: Option<String>, rust_log: Option<String>) -> Option<String> {
    configured
        .or(rust_log)
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
}

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Call early in `main`, before the effect is
/// constructed, so shader selection is logged.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(LoggingConfig::DEFAULT_LEVEL);
            }
        }

        builder.write_style(config.write_style);

        // A host may already own the global logger.
        if builder.try_init().is_err() {
            log::debug!("logger already installed; keeping it");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::with_filter("shapecorners=trace"));
        init_logging(LoggingConfig::default());
        log::trace!("still alive");
    }

    #[test]
    fn configured_filter_wins_over_rust_log() {
        let f = resolve_filter(Some("shapecorners=debug".into()), Some("warn".into()));
        assert_eq!(f.as_deref(), Some("shapecorners=debug"));
    }

    #[test]
    fn blank_filters_fall_back_to_default_level() {
        assert_eq!(resolve_filter(None, Some("  ".into())), None);
        assert_eq!(resolve_filter(None, None), None);
        assert_eq!(resolve_filter(None, Some("trace".into())).as_deref(), Some("trace"));
    }

    #[test]
    fn with_filter_keeps_auto_style() {
        let cfg = LoggingConfig::with_filter("warn");
        assert_eq!(cfg.env_filter.as_deref(), Some("warn"));
        assert!(matches!(cfg.write_style, env_logger::WriteStyle::Auto));
    }
}
