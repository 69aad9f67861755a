/// Inbound event carrying a partial presentation config (`ConfigPatch`).
pub const EVENT_PLUGIN_CONFIG: &str = "device:pluginConfig";

/// Inbound event carrying a partial viewing policy update (`ControlPatch`).
pub const EVENT_PLUGIN_CONTROL: &str = "device:pluginControl";

/// Outbound event announcing the plugin was enabled or disabled.
pub const EVENT_PLUGIN: &str = "plugin";

/// Event emitted by the log-capture collaborator for every captured entry.
pub const EVENT_CONSOLE: &str = "console";

/// Name reported in `plugin` status events.
pub const PLUGIN_NAME: &str = "WebIO";

/// Entry types that are always rendered preformatted.
pub const PREFORMATTED_TYPES: &[&str] = &["assert", "dir", "dirxml", "error", "trace"];

/// Default number of entries kept visible.
pub const DEFAULT_PAGE_SIZE: usize = 50;
