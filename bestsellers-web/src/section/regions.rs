//! DOM regions a section controller drives.
use bestsellers_core::{MarkupContract, SectionData, SectionError, SectionSource};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlFormElement};

use crate::dom::{self, query_all, query_required, required_attribute};

/// Every element the controller reads or writes.
///
/// Built by [`SectionRegions::resolve`] from a host element, or assembled by hand
/// when a test wants to drive the controller against a partial tree.
#[derive(Debug, Clone)]
pub struct SectionRegions {
    pub container: Element,
    pub category_items: Vec<Element>,
    pub card_link: Element,
    pub badges: Element,
    pub price_box: Element,
    pub title: Element,
    pub image_wrapper: Element,
    pub wishlist_button: Element,
    pub submit_button: Element,
    pub modal: Element,
    pub modal_message: Element,
    pub form: HtmlFormElement,
    pub body: HtmlElement,
}

impl SectionRegions {
    /// Resolve all regions under `container` (and its parent, which hosts the
    /// modal, the product form and the data script).
    ///
    /// # Errors
    /// Returns an error naming the first selector that matched nothing.
    pub fn resolve(container: &Element, contract: &MarkupContract) -> Result<Self, SectionError> {
        let wrapper = wrapper_of(container)?;
        let category_list = query_required(container, &contract.category_list)?;
        let product_card = query_required(container, &contract.product_card)?;
        let modal = query_required(&wrapper, &contract.modal)?;
        let modal_content = query_required(&modal, &contract.modal_content)?;
        let modal_message = query_required(&modal_content, &contract.modal_message)
            .or_else(|_| query_required(&modal, &contract.modal_message))?;
        let form = query_required(&wrapper, &contract.product_form)?
            .dyn_into::<HtmlFormElement>()
            .map_err(|_| SectionError::MissingRegion(contract.product_form.clone()))?;
        let body = dom::document()
            .and_then(|doc| doc.body())
            .ok_or_else(|| SectionError::MissingRegion("body".to_string()))?;

        Ok(Self {
            container: container.clone(),
            category_items: query_all(&category_list, &contract.category_item)?,
            card_link: query_required(&product_card, &contract.card_link)?,
            badges: query_required(&product_card, &contract.badges)?,
            price_box: query_required(&product_card, &contract.price_box)?,
            title: query_required(&product_card, &contract.title)?,
            image_wrapper: query_required(&product_card, &contract.image_wrapper)?,
            wishlist_button: query_required(&product_card, &contract.wishlist_button)?,
            submit_button: query_required(&product_card, &contract.submit_button)?,
            modal,
            modal_message,
            form,
            body,
        })
    }
}

fn wrapper_of(container: &Element) -> Result<Element, SectionError> {
    container
        .parent_element()
        .ok_or_else(|| SectionError::MissingRegion("section wrapper".to_string()))
}

/// Reads the `SectionData-<id>` script sitting next to the host element.
pub struct EmbeddedSource {
    wrapper: Element,
}

impl EmbeddedSource {
    /// # Errors
    /// Returns an error if the host element is detached.
    pub fn for_container(container: &Element) -> Result<Self, SectionError> {
        Ok(Self {
            wrapper: wrapper_of(container)?,
        })
    }
}

impl SectionSource for EmbeddedSource {
    fn load_payload(&self, section_id: &str) -> Result<String, SectionError> {
        let element_id = bestsellers_core::section_data_element_id(section_id);
        let selector = format!("script[id=\"{element_id}\"]");
        let script = self
            .wrapper
            .query_selector(&selector)
            .map_err(|err| SectionError::Dom(dom::js_error_message(&err)))?
            .ok_or(SectionError::MissingPayload(element_id))?;
        Ok(script.text_content().unwrap_or_default())
    }
}

/// Read the section identifier from the host element and load its dataset.
///
/// # Errors
/// Returns an error if the identifier attribute is missing or the payload is absent or malformed.
pub fn load_section_data(
    container: &Element,
    contract: &MarkupContract,
) -> Result<(String, SectionData), SectionError> {
    let section_id = required_attribute(container, &contract.section_id_attr)?;
    let data = EmbeddedSource::for_container(container)?.load_section(&section_id)?;
    Ok((section_id, data))
}
