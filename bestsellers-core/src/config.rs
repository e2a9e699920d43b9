//! Widget configuration: markup contract selectors, endpoint and image variants
use serde::{Deserialize, Serialize};

use crate::error::SectionError;

/// Selectors and attribute names the controller expects from the page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupContract {
    pub section_id_attr: String,
    pub index_attr: String,
    pub category_list: String,
    pub category_item: String,
    pub category_button: String,
    pub product_card: String,
    pub card_link: String,
    pub badges: String,
    pub price_box: String,
    pub title: String,
    pub image_wrapper: String,
    pub wishlist_button: String,
    pub submit_button: String,
    pub modal: String,
    pub modal_content: String,
    pub modal_message: String,
    pub modal_close: String,
    pub product_form: String,
    /// Class present on the modal element itself; clicks landing on it are backdrop clicks.
    pub modal_backdrop_class: String,
    pub modal_open_class: String,
    pub body_open_class: String,
}

impl Default for MarkupContract {
    fn default() -> Self {
        Self {
            section_id_attr: "data-section-id".to_string(),
            index_attr: "data-forloop-index".to_string(),
            category_list: ".category-list".to_string(),
            category_item: "li.category-item".to_string(),
            category_button: "button".to_string(),
            product_card: ".product-card".to_string(),
            card_link: "a.product-card__link".to_string(),
            badges: ".badges".to_string(),
            price_box: ".product-info .price-box".to_string(),
            title: ".product-info .product-name".to_string(),
            image_wrapper: ".product-image-wrapper".to_string(),
            wishlist_button: ".actions .wish-list-btn".to_string(),
            submit_button: "button[data-submit-button]".to_string(),
            modal: ".wishlist-modal".to_string(),
            modal_content: ".wishlist-content".to_string(),
            modal_message: ".wishlist-message".to_string(),
            modal_close: "button.wishlist-close-btn".to_string(),
            product_form: "form[data-product-form]".to_string(),
            modal_backdrop_class: "wishlist-modal".to_string(),
            modal_open_class: "is-open".to_string(),
            body_open_class: "modal-open".to_string(),
        }
    }
}

/// Responsive image breakpoints and width variants for the preview picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub narrow_media: String,
    pub wide_media: String,
    /// 1x and 2x widths below the breakpoint.
    pub narrow_widths: (u32, u32),
    /// 1x and 2x widths above the breakpoint.
    pub wide_widths: (u32, u32),
    pub fallback_width: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            narrow_media: "(max-width: 749px)".to_string(),
            wide_media: "(min-width: 750px)".to_string(),
            narrow_widths: (343, 686),
            wide_widths: (816, 1632),
            fallback_width: 816,
        }
    }
}

/// Complete widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub tag_name: String,
    pub cart_endpoint: String,
    pub max_badges: usize,
    pub markup: MarkupContract,
    pub image: ImageConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl WidgetConfig {
    /// Configuration matching the stock page template.
    #[must_use]
    pub fn default_config() -> Self {
        Self {
            tag_name: "best-sellers-section".to_string(),
            cart_endpoint: crate::cart::CART_ADD_ENDPOINT.to_string(),
            max_badges: 3,
            markup: MarkupContract::default(),
            image: ImageConfig::default(),
        }
    }

    /// Load a configuration, filling omitted fields from the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or names an invalid custom element tag.
    pub fn from_json(json: &str) -> Result<Self, SectionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SectionError> {
        // Custom element names must contain a hyphen.
        if !self.tag_name.contains('-') {
            return Err(SectionError::Config(format!(
                "custom element name {:?} must contain a hyphen",
                self.tag_name
            )));
        }
        Ok(())
    }
}
