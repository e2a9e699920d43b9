//! Add-to-cart payloads and submission
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::CartError;

/// Storefront endpoint accepting add-to-cart requests.
pub const CART_ADD_ENDPOINT: &str = "/cart/add.js";

/// The widget exposes no quantity control.
const FIXED_QUANTITY: u32 = 1;

static PROPERTY_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^properties\[([^\]]+)\]").unwrap_or_else(|err| panic!("invalid regex: {err}"))
});

/// One name/value pair read from the product form, in document order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Line item properties, serialized as a JSON object in first-seen key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartProperties(Vec<(String, String)>);

impl CartProperties {
    /// Set `key`; a repeated key keeps its position and takes the newer value.
    pub fn insert(&mut self, key: String, value: String) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CartProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CartItem {
    pub id: String,
    pub quantity: u32,
    pub properties: CartProperties,
}

/// Body of `POST /cart/add.js`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CartRequest {
    pub items: Vec<CartItem>,
}

impl CartRequest {
    /// JSON body for the request.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the add-to-cart request from the product form's fields.
///
/// # Errors
///
/// Returns [`CartError::MissingId`] if no field is named `id`.
pub fn build_cart_request(fields: &[FormField]) -> Result<CartRequest, CartError> {
    let id = fields
        .iter()
        .find(|field| field.name == "id")
        .map(|field| field.value.clone())
        .ok_or(CartError::MissingId)?;

    let mut properties = CartProperties::default();
    for field in fields {
        if let Some(caps) = PROPERTY_FIELD.captures(&field.name) {
            properties.insert(caps[1].to_string(), field.value.clone());
        }
    }

    Ok(CartRequest {
        items: vec![CartItem {
            id,
            quantity: FIXED_QUANTITY,
            properties,
        }],
    })
}

/// Transport for add-to-cart requests.
/// The browser crate implements it with `fetch`; tests record calls.
#[async_trait(?Send)]
pub trait CartClient {
    /// Send `request` and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the body is not JSON.
    async fn add_items(&self, request: &CartRequest) -> Result<serde_json::Value, CartError>;
}

/// Build a request from `fields` and send it through `client`.
/// A form without an `id` fails before the client is called.
///
/// # Errors
///
/// Returns an error if the form is incomplete or the client fails.
pub async fn submit_cart<C: CartClient + ?Sized>(
    client: &C,
    fields: &[FormField],
) -> Result<serde_json::Value, CartError> {
    let request = build_cart_request(fields)?;
    log::debug!("submitting cart request for item {}", request.items[0].id);
    client.add_items(&request).await
}
