use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// The GPU stack is chatty at info level; keep it to warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "texcube_engine=debug,wgpu=warn").
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

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized ({filter})");
    });
}

fn resolve_filter(configured: Option<String>, from_env: Option<String>) -> String {
    configured
        .or(from_env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_beats_env() {
        assert_eq!(resolve_filter(Some("debug".into()), Some("warn".into())), "debug");
    }

    #[test]
    fn env_used_when_unconfigured() {
        assert_eq!(resolve_filter(None, Some("texcube_engine=trace".into())), "texcube_engine=trace");
    }

    #[test]
    fn default_quiets_gpu_stack() {
        assert_eq!(resolve_filter(None, None), DEFAULT_FILTER);
        assert_eq!(resolve_filter(None, Some("  ".into())), DEFAULT_FILTER);
        assert!(DEFAULT_FILTER.contains("wgpu_core=warn"));
    }
}
