//! Ingestion and viewing policy.
//!
//! The controller buffers every entry it receives and decides which subset
//! the renderer shows. While running, entries go straight to `added` and the
//! renderer. While paused, they wait in `queue` and are flushed, in arrival
//! order, on the next control sync that leaves the console running.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use webio_protocol::{
    ConfigPatch, ControlPatch, EVENT_PLUGIN, EVENT_PLUGIN_CONFIG, EVENT_PLUGIN_CONTROL, LogEntry,
    PluginStatus,
};

use crate::bus::{EventBus, ListenerId, emit_json};
use crate::config::ViewConfig;
use crate::control::Control;
use crate::error::ConsoleError;
use crate::render::{RenderTarget, Renderer};

/// A controller shared between the bootstrap and bus handlers.
pub type SharedController<T> = Rc<RefCell<Controller<T>>>;

/// Entries owned by the controller. Each entry lives in exactly one list.
#[derive(Debug, Clone, Default)]
struct Store {
    added: Vec<LogEntry>,
    queue: Vec<LogEntry>,
}

/// Owns the log store, the viewing policy and the renderer.
pub struct Controller<T: RenderTarget> {
    config: Arc<ViewConfig>,
    control: Control,
    store: Store,
    view: Renderer<T>,
}

impl<T: RenderTarget> Controller<T> {
    /// Creates a running controller with an unmounted renderer.
    pub fn new(config: ViewConfig) -> Self {
        let config = Arc::new(config);
        Self {
            view: Renderer::new(Arc::clone(&config)),
            config,
            control: Control::default(),
            store: Store::default(),
        }
    }

    /// Mounts the console container on `target`.
    pub fn render(&mut self, target: T) {
        self.view.render(target);
    }

    /// Clears and detaches the console container.
    pub fn destroy(&mut self) {
        self.view.destroy();
    }

    /// Ingests one entry.
    pub fn add(&mut self, entry: LogEntry) {
        if self.control.paused() {
            self.store.queue.push(entry);
            return;
        }
        self.view.add(&entry, &self.control);
        self.store.added.push(entry);
    }

    /// Flushes entries queued while paused. No-op while paused.
    pub fn add_batch(&mut self) {
        if self.control.paused() || self.store.queue.is_empty() {
            return;
        }

        let flushed = self.control.select(&self.store.queue);
        self.view.add_batch(&flushed, &self.control);

        let count = self.store.queue.len();
        self.store.added.append(&mut self.store.queue);
        tracing::debug!(count, "flushed queued console entries");
    }

    /// Applies a control update and re-renders the view from scratch.
    ///
    /// `clear` only wipes the visible list. Otherwise the patch is validated
    /// before anything changes; a rejected patch leaves state untouched.
    pub fn sync_control(&mut self, patch: &ControlPatch) -> Result<(), ConsoleError> {
        if patch.clear {
            self.view.clear();
            return Ok(());
        }

        self.control.apply(patch)?;
        self.render_added();
        self.add_batch();
        Ok(())
    }

    /// Merges a config update and reloads the container with the new snapshot.
    pub fn sync_config(&mut self, patch: &ConfigPatch) {
        self.config = Arc::new(self.config.merged(patch));
        self.view.reload(Arc::clone(&self.config));
        self.render_added();
    }

    /// Up to `page_size` accepted entries of `entries`, newest first.
    pub fn get_data<'a>(&self, entries: &'a [LogEntry]) -> Vec<&'a LogEntry> {
        self.control.select(entries)
    }

    pub fn is_filtered(&self, entry: &LogEntry) -> bool {
        self.control.is_filtered(entry)
    }

    pub fn is_search_filtered(&self, entry: &LogEntry) -> bool {
        self.control.is_search_filtered(entry)
    }

    /// Replaces the search rule without re-rendering.
    pub fn apply_search(&mut self, text: Option<&str>) -> Result<(), ConsoleError> {
        self.control.apply_search(text)
    }

    /// Entries accepted while running, oldest first.
    pub fn added(&self) -> &[LogEntry] {
        &self.store.added
    }

    /// Entries waiting for the console to resume, oldest first.
    pub fn queue(&self) -> &[LogEntry] {
        &self.store.queue
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn config(&self) -> &Arc<ViewConfig> {
        &self.config
    }

    pub fn view(&self) -> &Renderer<T> {
        &self.view
    }

    fn render_added(&mut self) {
        self.view.clear();
        let visible = self.control.select(&self.store.added);
        self.view.add_batch(&visible, &self.control);
    }
}

/// Inbound transport handlers registered for a controller.
///
/// Dropping the binding without calling [`TransportBinding::release`] leaves
/// the handlers registered; they stop acting once the controller is dropped.
pub struct TransportBinding {
    transport: Rc<dyn EventBus>,
    config_listener: ListenerId,
    control_listener: ListenerId,
}

impl TransportBinding {
    /// Subscribes `controller` to config/control events and announces the plugin.
    pub fn bind<T>(controller: &SharedController<T>, transport: Rc<dyn EventBus>) -> Self
    where
        T: RenderTarget + 'static,
        T::Container: 'static,
    {
        let weak = Rc::downgrade(controller);
        let config_listener = transport.on(
            EVENT_PLUGIN_CONFIG,
            Box::new(move |payload: &Value| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                match decode::<ConfigPatch>(payload) {
                    Ok(patch) => {
                        controller.borrow_mut().sync_config(&patch);
                    }
                    Err(e) => tracing::warn!(error = %e, "dropping malformed plugin config"),
                }
            }),
        );

        let weak = Rc::downgrade(controller);
        let control_listener = transport.on(
            EVENT_PLUGIN_CONTROL,
            Box::new(move |payload: &Value| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                let result = decode::<ControlPatch>(payload)
                    .and_then(|patch| controller.borrow_mut().sync_control(&patch));
                if let Err(e) = result {
                    tracing::warn!(error = %e, "rejected plugin control update");
                }
            }),
        );

        announce(transport.as_ref(), true);

        Self {
            transport,
            config_listener,
            control_listener,
        }
    }

    /// Unsubscribes both handlers and announces the plugin as disabled.
    pub fn release(self) {
        self.transport
            .remove_listener(EVENT_PLUGIN_CONFIG, self.config_listener);
        self.transport
            .remove_listener(EVENT_PLUGIN_CONTROL, self.control_listener);
        announce(self.transport.as_ref(), false);
    }
}

/// Decodes an event payload; a missing (`null`) payload is an empty patch.
pub(crate) fn decode<P: DeserializeOwned + Default>(payload: &Value) -> Result<P, ConsoleError> {
    if payload.is_null() {
        return Ok(P::default());
    }
    Ok(serde_json::from_value(payload.clone())?)
}

fn announce(transport: &dyn EventBus, enabled: bool) {
    match emit_json(transport, EVENT_PLUGIN, &PluginStatus::webio(enabled)) {
        Ok(()) => tracing::info!(enabled, "WebIO plugin status announced"),
        Err(e) => tracing::warn!(error = %e, "failed to announce WebIO plugin status"),
    }
}
