//! Best Sellers Core
//!
//! Platform-agnostic logic for the best sellers storefront section.
//! This crate parses the embedded section payload, builds the typed preview
//! view model, tracks selection and wishlist modal state, and assembles cart
//! submissions without any DOM or browser dependencies.

pub mod cart;
pub mod config;
pub mod data;
pub mod error;
pub mod modal;
pub mod selection;
pub mod view;

// Re-export commonly used types
pub use cart::{
    CART_ADD_ENDPOINT, CartClient, CartItem, CartProperties, CartRequest, FormField,
    build_cart_request, submit_cart,
};
pub use config::{ImageConfig, MarkupContract, WidgetConfig};
pub use data::{ImageData, PriceValue, Product, SectionData, SectionEntry};
pub use error::{CartError, SectionError};
pub use modal::{ModalClickTarget, ModalState, wishlist_message};
pub use selection::{Selection, parse_index, selection_flags};
pub use view::{Badge, ImageSource, ImageVariants, PreviewView, PriceMode};

/// Trait for abstracting where a section payload comes from.
/// The browser crate reads it from an embedded script element; tools read fixtures.
pub trait SectionSource {
    /// Load the serialized payload for the section with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be located.
    fn load_payload(&self, section_id: &str) -> Result<String, SectionError>;

    /// Load and parse the dataset for a section.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be located or parsed.
    fn load_section(&self, section_id: &str) -> Result<SectionData, SectionError> {
        let json = self.load_payload(section_id)?;
        SectionData::from_json(&json)
    }
}

/// Identifier of the script element carrying a section's payload.
#[must_use]
pub fn section_data_element_id(section_id: &str) -> String {
    format!("SectionData-{section_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixtureSource(&'static str);

    impl SectionSource for FixtureSource {
        fn load_payload(&self, section_id: &str) -> Result<String, SectionError> {
            if section_id == "main" {
                Ok(self.0.to_string())
            } else {
                Err(SectionError::MissingPayload(section_data_element_id(
                    section_id,
                )))
            }
        }
    }

    #[test]
    fn section_source_parses_payload() {
        let source = FixtureSource(r#"[{"product":[{"id":1,"title":"Mug","url":"/p/mug"}]}]"#);
        let data = source.load_section("main").unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.product(0).unwrap().title, "Mug");
    }

    #[test]
    fn section_source_reports_missing_payload() {
        let source = FixtureSource("[]");
        let err = source.load_section("other").unwrap_err();
        assert!(err.to_string().contains("SectionData-other"));
    }
}
