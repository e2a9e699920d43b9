//! Event listener bookkeeping so a section can unregister everything it installed.
use bestsellers_core::SectionError;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::dom::js_error_message;

type Handler = Closure<dyn FnMut(Event)>;

struct Registration {
    target: EventTarget,
    event: &'static str,
    handler: Handler,
}

/// Owns every registered handler; removing happens on [`ListenerSet::dispose`] or drop.
#[derive(Default)]
pub struct ListenerSet {
    registrations: Vec<Registration>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on `target`.
    ///
    /// # Errors
    /// Returns an error if the browser rejects the registration.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), SectionError> {
        let handler: Handler = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .map_err(|err| SectionError::Dom(js_error_message(&err)))?;
        self.registrations.push(Registration {
            target: target.clone(),
            event,
            handler,
        });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Unregister and drop every handler.
    pub fn dispose(&mut self) {
        for registration in self.registrations.drain(..) {
            if let Err(err) = registration.target.remove_event_listener_with_callback(
                registration.event,
                registration.handler.as_ref().unchecked_ref(),
            ) {
                log::warn!(
                    "failed to remove {} listener: {}",
                    registration.event,
                    js_error_message(&err)
                );
            }
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.dispose();
    }
}
