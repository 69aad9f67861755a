pub mod console_log;
pub mod constants;
pub mod control;
pub mod envelope;

// Re-export primary types for convenience.
pub use console_log::LogEntry;
pub use constants::{
    EVENT_CONSOLE, EVENT_PLUGIN, EVENT_PLUGIN_CONFIG, EVENT_PLUGIN_CONTROL, PLUGIN_NAME,
};
pub use control::{ConfigPatch, ControlPatch, Filters, PluginStatus, Position};
pub use envelope::Event;
