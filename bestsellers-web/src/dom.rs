use bestsellers_core::{FormField, SectionError};
use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlFormElement, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// First descendant of `parent` matching `selector`.
///
/// # Errors
/// Returns [`SectionError::MissingRegion`] when nothing matches or the selector is invalid.
pub fn query_required(parent: &Element, selector: &str) -> Result<Element, SectionError> {
    parent
        .query_selector(selector)
        .map_err(|err| SectionError::Dom(js_error_message(&err)))?
        .ok_or_else(|| SectionError::MissingRegion(selector.to_string()))
}

/// All descendants of `parent` matching `selector`, in document order.
///
/// # Errors
/// Returns an error if the selector is invalid.
pub fn query_all(parent: &Element, selector: &str) -> Result<Vec<Element>, SectionError> {
    let list = parent
        .query_selector_all(selector)
        .map_err(|err| SectionError::Dom(js_error_message(&err)))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Read `name` from `element`.
///
/// # Errors
/// Returns [`SectionError::MissingAttribute`] if the attribute is absent.
pub fn required_attribute(element: &Element, name: &str) -> Result<String, SectionError> {
    element
        .get_attribute(name)
        .ok_or_else(|| SectionError::MissingAttribute {
            element: element.tag_name().to_lowercase(),
            attribute: name.to_string(),
        })
}

/// Name/value pairs of a form's successful controls, in document order.
///
/// # Errors
/// Returns an error if the browser refuses to build `FormData` for the form.
pub fn form_fields(form: &HtmlFormElement) -> Result<Vec<FormField>, SectionError> {
    let data = web_sys::FormData::new_with_form(form)
        .map_err(|err| SectionError::Dom(js_error_message(&err)))?;
    let entries = js_sys::try_iter(&data)
        .map_err(|err| SectionError::Dom(js_error_message(&err)))?
        .ok_or_else(|| SectionError::Dom("FormData is not iterable".to_string()))?;

    let mut fields = Vec::new();
    for entry in entries {
        let pair: js_sys::Array = entry
            .map_err(|err| SectionError::Dom(js_error_message(&err)))?
            .unchecked_into();
        let name = pair.get(0).as_string().unwrap_or_default();
        // File inputs carry no string value.
        let value = pair.get(1).as_string().unwrap_or_default();
        fields.push(FormField { name, value });
    }
    Ok(fields)
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if no window is available, the timer cannot be scheduled,
/// or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        duration_ms,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}
