//! WebIO console: a live, filterable, paginated log view.
//!
//! Log entries arrive from a capture source over an [`EventBus`]. The
//! [`Controller`] buffers them, applies the pause/filter/search policy and
//! hands the selection to a [`Renderer`], which mirrors it into a capped
//! visual list on a host-provided [`RenderTarget`].
//!
//! # Events
//!
//! - `device:pluginConfig` → [`Controller::sync_config`]
//! - `device:pluginControl` → [`Controller::sync_control`]
//! - `console` → [`Controller::add`]
//! - emits `plugin` `{name: "WebIO", enabled}` on setup and teardown

pub mod bus;
pub mod config;
pub mod control;
pub mod controller;
pub mod element;
pub mod error;
pub mod html;
pub mod memory;
pub mod plugin;
pub mod render;
pub mod search;

// Re-export primary types for convenience.
pub use bus::{EventBus, Handler, ListenerId, LocalBus};
pub use config::{SetupConfig, ViewConfig};
pub use control::Control;
pub use controller::{Controller, SharedController, TransportBinding};
pub use element::{RenderedElement, Tag};
pub use error::ConsoleError;
pub use memory::{MemoryContainer, MemoryHost};
pub use plugin::WebIo;
pub use render::{ContainerSpec, Edge, RenderTarget, Renderer, VisualList};
pub use search::SearchPattern;
