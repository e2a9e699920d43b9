//! `fetch`-backed cart transport.
use async_trait::async_trait;
use bestsellers_core::{CART_ADD_ENDPOINT, CartClient, CartError, CartRequest};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::dom;

/// Posts add-to-cart requests to the storefront's AJAX cart endpoint.
#[derive(Debug, Clone)]
pub struct FetchCartClient {
    endpoint: String,
}

impl Default for FetchCartClient {
    fn default() -> Self {
        Self::new(CART_ADD_ENDPOINT)
    }
}

impl FetchCartClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, body: &str) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        headers.set("Content-Type", "application/json")?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));

        Request::new_with_str_and_init(&self.endpoint, &init)
    }
}

fn request_error(err: &JsValue) -> CartError {
    CartError::Request(dom::js_error_message(err))
}

#[async_trait(?Send)]
impl CartClient for FetchCartClient {
    async fn add_items(&self, request: &CartRequest) -> Result<serde_json::Value, CartError> {
        let body = request.to_json()?;
        let window =
            dom::window().ok_or_else(|| CartError::Request("window unavailable".to_string()))?;
        let request = self.build_request(&body).map_err(|err| request_error(&err))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| request_error(&err))?
            .dyn_into()
            .map_err(|err| request_error(&err))?;

        if !response.ok() {
            return Err(CartError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        let text = JsFuture::from(response.text().map_err(|err| request_error(&err))?)
            .await
            .map_err(|err| request_error(&err))?
            .as_string()
            .ok_or_else(|| CartError::Decode("response was not valid UTF-8".to_string()))?;

        Ok(serde_json::from_str(&text)?)
    }
}
