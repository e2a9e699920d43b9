//! Writes a [`PreviewView`] into the preview card regions.
//!
//! Every region is rebuilt in place before `render_preview` returns. Product strings
//! only ever reach the page through `set_text_content` or attribute values.
use bestsellers_core::{Badge, ImageVariants, PreviewView, PriceMode, SectionError};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::regions::SectionRegions;
use crate::dom;

fn dom_error(err: &JsValue) -> SectionError {
    SectionError::Dom(dom::js_error_message(err))
}

/// Update link, title, badges, price, picture and the add-to-cart button for `view`.
///
/// # Errors
/// Returns an error if the browser refuses to create or insert a node.
pub fn render_preview(regions: &SectionRegions, view: &PreviewView) -> Result<(), SectionError> {
    let doc = regions
        .container
        .owner_document()
        .ok_or_else(|| SectionError::Dom("section is not attached to a document".to_string()))?;

    regions
        .card_link
        .set_attribute("href", &view.href)
        .map_err(|err| dom_error(&err))?;
    regions.title.set_text_content(Some(&view.title));

    // No tags: leave whatever the region already shows.
    if let Some(list) = &view.badges {
        replace_children(&regions.badges, &badge_nodes(&doc, list)?)?;
    }
    replace_children(&regions.price_box, &price_nodes(&doc, &view.price)?)?;
    replace_children(&regions.image_wrapper, &[picture_node(&doc, &view.image)?])?;

    let toggled = if view.available {
        regions.submit_button.remove_attribute("disabled")
    } else {
        regions.submit_button.set_attribute("disabled", "")
    };
    toggled.map_err(|err| dom_error(&err))
}

fn replace_children(region: &Element, nodes: &[Element]) -> Result<(), SectionError> {
    region.set_text_content(None);
    for node in nodes {
        region.append_child(node).map_err(|err| dom_error(&err))?;
    }
    Ok(())
}

fn text_element(doc: &Document, tag: &str, class: &str, text: &str) -> Result<Element, SectionError> {
    let element = doc.create_element(tag).map_err(|err| dom_error(&err))?;
    element.set_class_name(class);
    element.set_text_content(Some(text));
    Ok(element)
}

/// One `<span>` per badge, in order.
///
/// # Errors
/// Returns an error if an element cannot be created.
pub fn badge_nodes(doc: &Document, badges: &[Badge]) -> Result<Vec<Element>, SectionError> {
    badges
        .iter()
        .map(|badge| text_element(doc, "span", &badge.class, &badge.label))
        .collect()
}

/// Price markup for each display mode.
///
/// # Errors
/// Returns an error if an element cannot be created.
pub fn price_nodes(doc: &Document, price: &PriceMode) -> Result<Vec<Element>, SectionError> {
    match price {
        PriceMode::StartFrom(start_from) => Ok(vec![text_element(doc, "span", "start-from", start_from)?]),
        PriceMode::OnSale { price, compare_at } => Ok(vec![
            text_element(doc, "span", "current-price", price)?,
            text_element(doc, "del", "old-price", compare_at)?,
        ]),
        PriceMode::Regular(price) => Ok(vec![text_element(doc, "span", "price", price)?]),
    }
}

/// Responsive `<picture>` with a lazy-loaded fallback image.
///
/// # Errors
/// Returns an error if an element cannot be created or an attribute is rejected.
pub fn picture_node(doc: &Document, image: &ImageVariants) -> Result<Element, SectionError> {
    let picture = doc.create_element("picture").map_err(|err| dom_error(&err))?;
    for source in &image.sources {
        let node = doc.create_element("source").map_err(|err| dom_error(&err))?;
        set_attributes(&node, &[("media", source.media.as_str()), ("srcset", source.srcset.as_str())])?;
        picture.append_child(&node).map_err(|err| dom_error(&err))?;
    }

    let img = doc.create_element("img").map_err(|err| dom_error(&err))?;
    let width = image.width.to_string();
    let height = image.height.to_string();
    let style = image.style();
    set_attributes(
        &img,
        &[
            ("src", image.src.as_str()),
            ("alt", image.alt.as_str()),
            ("loading", "lazy"),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("style", style.as_str()),
            ("class", "product-image"),
        ],
    )?;
    picture.append_child(&img).map_err(|err| dom_error(&err))?;
    Ok(picture)
}

fn set_attributes(element: &Element, attributes: &[(&str, &str)]) -> Result<(), SectionError> {
    for (name, value) in attributes {
        element
            .set_attribute(name, value)
            .map_err(|err| dom_error(&err))?;
    }
    Ok(())
}
