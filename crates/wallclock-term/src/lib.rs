use flexi_logger::LogSpecification;
use log::warn;

pub mod app;
pub mod terminal;

pub use app::App;
pub use terminal::TerminalSurface;

/// Resolve the logger specification, letting `RUST_LOG` override the config.
///
/// An unparsable level falls back to `info`.
pub fn get_log_spec(log_level: &str) -> LogSpecification {
    LogSpecification::env_or_parse(log_level).unwrap_or_else(|err| {
        warn!("Failed to parse log level '{log_level}': {err}");
        LogSpecification::info()
    })
}
