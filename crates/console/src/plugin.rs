//! Bootstrap: wires a controller to the transport, the capture source and a render target.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use webio_protocol::{EVENT_CONSOLE, LogEntry};

use crate::bus::{EventBus, ListenerId};
use crate::config::SetupConfig;
use crate::control::Control;
use crate::controller::{Controller, SharedController, TransportBinding};
use crate::error::ConsoleError;
use crate::render::RenderTarget;

/// A mounted, ingesting WebIO console.
pub struct WebIo<T: RenderTarget> {
    controller: SharedController<T>,
    binding: TransportBinding,
    console: Rc<dyn EventBus>,
    console_listener: ListenerId,
}

impl<T> WebIo<T>
where
    T: RenderTarget + 'static,
    T::Container: 'static,
{
    /// Builds the controller, mounts it on `target`, applies the initial
    /// policy from `config` and starts consuming `console` events.
    ///
    /// Fails without side effects when the initial policy is invalid.
    pub fn set_up(
        config: SetupConfig,
        target: T,
        transport: Rc<dyn EventBus>,
        console: Rc<dyn EventBus>,
    ) -> Result<Self, ConsoleError> {
        let initial = config.initial_control();
        Control::default().apply(&initial)?;

        let controller: SharedController<T> =
            Rc::new(RefCell::new(Controller::new(config.view)));
        let binding = TransportBinding::bind(&controller, transport);
        controller.borrow_mut().render(target);
        controller.borrow_mut().sync_control(&initial)?;

        let weak = Rc::downgrade(&controller);
        let console_listener = console.on(
            EVENT_CONSOLE,
            Box::new(move |payload: &Value| {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                match serde_json::from_value::<LogEntry>(payload.clone()) {
                    Ok(entry) => {
                        controller.borrow_mut().add(entry);
                    }
                    Err(e) => tracing::warn!(error = %e, "dropping malformed console entry"),
                }
            }),
        );

        tracing::info!("WebIO console mounted");
        Ok(Self {
            controller,
            binding,
            console,
            console_listener,
        })
    }

    /// Stops ingestion, unbinds the transport and removes the container.
    pub fn disabled(self) {
        self.console
            .remove_listener(EVENT_CONSOLE, self.console_listener);
        self.binding.release();
        self.controller.borrow_mut().destroy();
        tracing::info!("WebIO console removed");
    }

    pub fn controller(&self) -> &SharedController<T> {
        &self.controller
    }
}
