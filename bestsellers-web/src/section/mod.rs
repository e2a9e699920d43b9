//! Section controller: selection, wishlist modal and add-to-cart wiring for one section.

pub mod listeners;
pub mod regions;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use bestsellers_core::{
    CartClient, CartError, ModalClickTarget, ModalState, PreviewView, SectionData, SectionError,
    Selection, WidgetConfig, parse_index, submit_cart, wishlist_message,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use crate::dom;
pub use listeners::ListenerSet;
pub use regions::{EmbeddedSource, SectionRegions, load_section_data};
pub use render::render_preview;

type ValueHook = Rc<dyn Fn(&serde_json::Value)>;
type ErrorHook = Rc<dyn Fn(&CartError)>;

/// Callbacks observing add-to-cart outcomes.
/// With neither set, failures are only logged and the shopper sees nothing.
#[derive(Clone, Default)]
pub struct CartHooks {
    pub on_added: Option<ValueHook>,
    pub on_error: Option<ErrorHook>,
}

impl CartHooks {
    #[must_use]
    pub fn on_added(mut self, hook: impl Fn(&serde_json::Value) + 'static) -> Self {
        self.on_added = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn on_error(mut self, hook: impl Fn(&CartError) + 'static) -> Self {
        self.on_error = Some(Rc::new(hook));
        self
    }
}

struct SectionState {
    config: Rc<WidgetConfig>,
    regions: SectionRegions,
    data: SectionData,
    selection: Selection,
    modal: ModalState,
}

impl SectionState {
    fn select_product(&mut self, index: usize) -> Result<(), SectionError> {
        let product = self.selection.select(&self.data, index)?;
        let view = PreviewView::from_product(product, &self.config);

        let contract = &self.config.markup;
        for item in &self.regions.category_items {
            let item_index = item
                .get_attribute(&contract.index_attr)
                .and_then(|raw| parse_index(&raw).ok());
            let selected = item_index == Some(index);
            let marker = item
                .query_selector(&contract.category_button)
                .ok()
                .flatten()
                .unwrap_or_else(|| item.clone());
            let _ = marker.set_attribute("aria-selected", if selected { "true" } else { "false" });
        }

        render_preview(&self.regions, &view)?;
        log::debug!("selected product {index}: {}", view.title);
        Ok(())
    }

    fn toggle_modal(&mut self) -> ModalState {
        let state = self.modal.toggle();
        let contract = &self.config.markup;
        let _ = self
            .regions
            .modal
            .set_attribute("aria-hidden", state.aria_hidden());
        let _ = self
            .regions
            .body
            .class_list()
            .toggle_with_force(&contract.body_open_class, state.is_shown());
        let _ = self
            .regions
            .modal
            .class_list()
            .toggle_with_force(&contract.modal_open_class, state.is_shown());
        state
    }

    fn open_wishlist(&mut self) {
        self.toggle_modal();
        let product_name = self.regions.title.text_content().unwrap_or_default();
        self.regions
            .modal_message
            .set_text_content(Some(&wishlist_message(&product_name)));
    }

    fn classify_modal_click(&self, target: &Element) -> ModalClickTarget {
        let contract = &self.config.markup;
        if target.closest(&contract.modal_close).ok().flatten().is_some() {
            ModalClickTarget::CloseButton
        } else if target
            .class_list()
            .contains(&contract.modal_backdrop_class)
        {
            ModalClickTarget::Backdrop
        } else {
            ModalClickTarget::Inside
        }
    }
}

/// One mounted section. Dropping it (or calling [`SectionController::dispose`])
/// removes every listener it installed.
pub struct SectionController {
    state: Rc<RefCell<SectionState>>,
    client: Rc<dyn CartClient>,
    hooks: CartHooks,
    listeners: ListenerSet,
    section_id: String,
}

impl SectionController {
    /// Wire a host element: read its payload, resolve its regions and register listeners.
    ///
    /// # Errors
    /// Returns an error if the markup contract is not met or the payload is malformed.
    pub fn mount(
        container: &Element,
        config: Rc<WidgetConfig>,
        client: Rc<dyn CartClient>,
        hooks: CartHooks,
    ) -> Result<Self, SectionError> {
        let (section_id, data) = load_section_data(container, &config.markup)?;
        let regions = SectionRegions::resolve(container, &config.markup)?;
        Self::with_regions(section_id, data, regions, config, client, hooks)
    }

    /// Wire pre-resolved regions to a dataset.
    ///
    /// # Errors
    /// Returns an error if a listener cannot be registered.
    pub fn with_regions(
        section_id: String,
        data: SectionData,
        regions: SectionRegions,
        config: Rc<WidgetConfig>,
        client: Rc<dyn CartClient>,
        hooks: CartHooks,
    ) -> Result<Self, SectionError> {
        let modal = ModalState::from_aria_hidden(regions.modal.get_attribute("aria-hidden").as_deref());
        let state = Rc::new(RefCell::new(SectionState {
            config,
            regions,
            data,
            selection: Selection::new(),
            modal,
        }));

        let mut controller = Self {
            state,
            client,
            hooks,
            listeners: ListenerSet::new(),
            section_id,
        };
        controller.register_listeners()?;
        log::info!(
            "mounted best sellers section {} with {} products",
            controller.section_id,
            controller.state.borrow().data.len()
        );
        Ok(controller)
    }

    fn register_listeners(&mut self) -> Result<(), SectionError> {
        let (items, index_attr, submit_button, wishlist_button, modal) = {
            let state = self.state.borrow();
            (
                state.regions.category_items.clone(),
                state.config.markup.index_attr.clone(),
                state.regions.submit_button.clone(),
                state.regions.wishlist_button.clone(),
                state.regions.modal.clone(),
            )
        };

        for item in items {
            let state = Rc::clone(&self.state);
            let index_attr = index_attr.clone();
            let source = item.clone();
            self.listeners.listen(&item, "click", move |event: Event| {
                event.prevent_default();
                let result = source
                    .get_attribute(&index_attr)
                    .ok_or_else(|| SectionError::MissingAttribute {
                        element: source.tag_name().to_lowercase(),
                        attribute: index_attr.clone(),
                    })
                    .and_then(|raw| parse_index(&raw))
                    .and_then(|index| state.borrow_mut().select_product(index));
                if let Err(err) = result {
                    log::warn!("ignoring category click: {err}");
                }
            })?;
        }

        let state = Rc::clone(&self.state);
        self.listeners
            .listen(&wishlist_button, "click", move |event: Event| {
                event.stop_propagation();
                state.borrow_mut().open_wishlist();
            })?;

        let state = Rc::clone(&self.state);
        self.listeners.listen(&modal, "click", move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let mut state = state.borrow_mut();
            if state.classify_modal_click(&target).closes() {
                state.toggle_modal();
            }
        })?;

        let state = Rc::clone(&self.state);
        let client = Rc::clone(&self.client);
        let hooks = self.hooks.clone();
        self.listeners
            .listen(&submit_button, "click", move |event: Event| {
                event.prevent_default();
                spawn_submit(&state, Rc::clone(&client), hooks.clone());
            })?;

        Ok(())
    }

    #[must_use]
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Select the product at `index` and re-render the preview card.
    ///
    /// # Errors
    /// Returns an error if `index` is out of range.
    pub fn select_product(&self, index: usize) -> Result<(), SectionError> {
        self.state.borrow_mut().select_product(index)
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.state.borrow().selection.index()
    }

    /// Show the wishlist confirmation for the product in the preview.
    pub fn open_wishlist(&self) {
        self.state.borrow_mut().open_wishlist();
    }

    /// Toggle the wishlist modal closed.
    pub fn close_wishlist(&self) {
        self.state.borrow_mut().toggle_modal();
    }

    #[must_use]
    pub fn modal_state(&self) -> ModalState {
        self.state.borrow().modal
    }

    /// Read the product form and send an add-to-cart request.
    ///
    /// # Errors
    /// Returns an error if the form cannot be read, has no `id`, or the request fails.
    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    pub async fn submit(&self) -> Result<serde_json::Value, CartError> {
        let fields = read_form(&self.state)?;
        submit_cart(self.client.as_ref(), &fields).await
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove every listener; the page keeps the last rendered preview.
    pub fn dispose(&mut self) {
        self.listeners.dispose();
        log::info!("disposed best sellers section {}", self.section_id);
    }
}

impl Drop for SectionController {
    fn drop(&mut self) {
        if !self.listeners.is_empty() {
            self.dispose();
        }
    }
}

fn read_form(
    state: &Rc<RefCell<SectionState>>,
) -> Result<Vec<bestsellers_core::FormField>, CartError> {
    let form = state.borrow().regions.form.clone();
    dom::form_fields(&form).map_err(|err| CartError::Request(err.to_string()))
}

/// Fire-and-forget submission from a click handler; the result goes to the hooks.
fn spawn_submit(state: &Rc<RefCell<SectionState>>, client: Rc<dyn CartClient>, hooks: CartHooks) {
    let fields = match read_form(state) {
        Ok(fields) => fields,
        Err(err) => {
            report_cart_error(&hooks, &err);
            return;
        }
    };
    wasm_bindgen_futures::spawn_local(async move {
        match submit_cart(client.as_ref(), &fields).await {
            Ok(response) => {
                log::info!("added item to cart");
                if let Some(hook) = &hooks.on_added {
                    hook(&response);
                }
            }
            Err(err) => report_cart_error(&hooks, &err),
        }
    });
}

fn report_cart_error(hooks: &CartHooks, err: &CartError) {
    log::error!("add to cart failed: {err}");
    dom::console_error(&format!("add to cart failed: {err}"));
    if let Some(hook) = &hooks.on_error {
        hook(err);
    }
}
