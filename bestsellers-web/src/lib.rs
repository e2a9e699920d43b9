#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod cart_client;
pub mod dom;
pub mod element;
pub mod section;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = element::register(bestsellers_core::WidgetConfig::default_config()) {
        log::error!("{err}");
        dom::console_error(&err.to_string());
    }
}

/// Register the section element under a custom configuration.
/// Pages that ship the stock template never need this; `start` already registered it.
/// Calling it for the default tag replaces the config used by sections connected afterwards.
///
/// # Errors
/// Returns an error if the configuration JSON is invalid or the tag belongs to another script.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = registerBestSellers)]
pub fn register_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = bestsellers_core::WidgetConfig::from_json(config_json)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    element::register(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(())
}
