//! Configuration — channel selection, export tuning, TOML persistence and
//! platform paths.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ChannelConfig, ExportConfig};
