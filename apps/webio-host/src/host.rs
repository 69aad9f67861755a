//! Routes transport events into a mounted console.

use std::rc::Rc;

use anyhow::Context;
use serde_json::Value;

use webio_console::{EventBus, LocalBus, MemoryHost, SetupConfig, WebIo};
use webio_protocol::{EVENT_CONSOLE, EVENT_PLUGIN, Event};

/// A console mounted on an in-memory page, fed by two local buses.
pub struct Host {
    transport: Rc<LocalBus>,
    console: Rc<LocalBus>,
    webio: WebIo<MemoryHost>,
}

impl Host {
    pub fn new(config: SetupConfig) -> anyhow::Result<Self> {
        let transport = Rc::new(LocalBus::new());
        let console = Rc::new(LocalBus::new());

        transport.on(
            EVENT_PLUGIN,
            Box::new(|payload: &Value| {
                tracing::info!(
                    name = %payload["name"],
                    enabled = %payload["enabled"],
                    "plugin status"
                );
            }),
        );

        let bus: Rc<dyn EventBus> = transport.clone();
        let source: Rc<dyn EventBus> = console.clone();
        let webio = WebIo::set_up(config, MemoryHost::new(), bus, source)
            .context("failed to set up console")?;

        Ok(Self {
            transport,
            console,
            webio,
        })
    }

    /// Dispatches one JSON event line. Blank lines are ignored.
    pub fn dispatch_line(&self, line: &str) -> anyhow::Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let event: Event = serde_json::from_str(line).context("invalid event line")?;
        let payload = event.payload_or_null();
        if event.event == EVENT_CONSOLE {
            self.console.emit(&event.event, &payload);
        } else {
            self.transport.emit(&event.event, &payload);
        }
        Ok(())
    }

    /// The console container as HTML, or an empty string when unmounted.
    pub fn html(&self) -> String {
        let controller = self.webio.controller().borrow();
        controller
            .view()
            .container()
            .map(|container| container.to_html())
            .unwrap_or_default()
    }

    pub fn shutdown(self) {
        self.webio.disabled();
    }
}
