//! `best-sellers-section` custom element registration.
//!
//! The element class itself is a few lines of JavaScript; connecting creates a
//! [`SectionController`] and disconnecting disposes it, so every listener added
//! at connect time is removed again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bestsellers_core::{SectionError, WidgetConfig};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::cart_client::FetchCartClient;
use crate::dom;
use crate::section::{CartHooks, SectionController};

#[wasm_bindgen(inline_js = "
export function define_section_element(tag, connect) {
    if (customElements.get(tag)) return false;
    class BestSellersSection extends HTMLElement {
        connectedCallback() {
            this.__section = connect(this);
        }
        disconnectedCallback() {
            if (this.__section) {
                this.__section.dispose();
                this.__section.free();
                this.__section = null;
            }
        }
    }
    customElements.define(tag, BestSellersSection);
    return true;
}
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn define_section_element(
        tag: &str,
        connect: &Closure<dyn FnMut(HtmlElement) -> JsValue>,
    ) -> Result<bool, JsValue>;
}

/// Handle the element keeps while connected.
#[wasm_bindgen]
pub struct MountedSection {
    controller: Option<SectionController>,
}

#[wasm_bindgen]
impl MountedSection {
    pub fn dispose(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.dispose();
        }
    }

    #[wasm_bindgen(getter, js_name = sectionId)]
    #[must_use]
    pub fn section_id(&self) -> Option<String> {
        self.controller
            .as_ref()
            .map(|controller| controller.section_id().to_string())
    }
}

/// Mount a section on `element`; setup failures are reported and leave the element inert.
#[must_use]
pub fn connect(element: &HtmlElement, config: Rc<WidgetConfig>) -> Option<MountedSection> {
    let client = Rc::new(FetchCartClient::new(config.cart_endpoint.clone()));
    match SectionController::mount(element, config, client, CartHooks::default()) {
        Ok(controller) => Some(MountedSection {
            controller: Some(controller),
        }),
        Err(err) => {
            log::error!("best sellers section failed to initialise: {err}");
            dom::console_error(&format!("best sellers section failed to initialise: {err}"));
            None
        }
    }
}

/// Outcome of [`register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The tag was defined by this call.
    Defined,
    /// The tag was already ours; elements connected from now on use the new config.
    Updated,
}

thread_local! {
    // Config each defined tag mounts with, read at connect time.
    static ACTIVE_CONFIGS: RefCell<HashMap<String, Rc<WidgetConfig>>> = RefCell::new(HashMap::new());
}

/// The config new `<tag>` elements will mount with.
#[must_use]
pub fn active_config(tag: &str) -> Option<Rc<WidgetConfig>> {
    ACTIVE_CONFIGS.with(|configs| configs.borrow().get(tag).cloned())
}

/// Define the custom element, or swap the config of a tag this module already defined.
/// Sections that are already connected keep the config they mounted with.
///
/// # Errors
/// Returns an error if the tag belongs to another element class or the browser
/// rejects the definition.
pub fn register(config: WidgetConfig) -> Result<Registration, SectionError> {
    let tag = config.tag_name.clone();
    let previous = ACTIVE_CONFIGS.with(|configs| {
        configs
            .borrow_mut()
            .insert(tag.clone(), Rc::new(config))
    });
    if previous.is_some() {
        log::info!("updated configuration for <{tag}>");
        return Ok(Registration::Updated);
    }

    let connect_tag = tag.clone();
    let connect_closure = Closure::wrap(Box::new(move |element: HtmlElement| {
        active_config(&connect_tag)
            .and_then(|config| connect(&element, config))
            .map_or(JsValue::NULL, JsValue::from)
    }) as Box<dyn FnMut(HtmlElement) -> JsValue>);

    let outcome = match define_section_element(&tag, &connect_closure) {
        Ok(true) => {
            log::info!("registered <{tag}>");
            // The element class calls back into it for the rest of the page's life.
            connect_closure.forget();
            return Ok(Registration::Defined);
        }
        Ok(false) => SectionError::Config(format!("<{tag}> is already defined by another script")),
        Err(err) => SectionError::Config(format!(
            "failed to define <{tag}>: {}",
            dom::js_error_message(&err)
        )),
    };
    ACTIVE_CONFIGS.with(|configs| configs.borrow_mut().remove(&tag));
    Err(outcome)
}
