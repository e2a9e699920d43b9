//! Typed preview view model built from a product record
//!
//! The browser crate renders these fragments; nothing here produces markup,
//! so titles, tags and alt text never travel through string templates.
use serde::Serialize;

use crate::config::{ImageConfig, WidgetConfig};
use crate::data::{ImageData, PriceValue, Product};

/// A tag badge: lowercased for the style class, original casing for the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub class: String,
    pub label: String,
}

impl Badge {
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self {
            class: format!("badge {}", tag.to_lowercase()),
            label: tag.to_string(),
        }
    }
}

/// Mutually exclusive price displays, in precedence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PriceMode {
    /// Product has several priced variants; only the "starting from" value shows.
    StartFrom(String),
    /// Current price plus struck-through compare-at price.
    OnSale { price: String, compare_at: String },
    Regular(String),
}

impl PriceMode {
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        if product.price_varies {
            let start_from = product
                .start_from
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            return Self::StartFrom(start_from);
        }
        match &product.compare_at_price {
            Some(compare_at) if is_greater(compare_at, &product.price) => Self::OnSale {
                price: product.price.to_string(),
                compare_at: compare_at.to_string(),
            },
            _ => Self::Regular(product.price.to_string()),
        }
    }
}

fn is_greater(lhs: &PriceValue, rhs: &PriceValue) -> bool {
    match (lhs.amount(), rhs.amount()) {
        (Some(a), Some(b)) => a > b,
        _ => false,
    }
}

/// One `<source>` of the preview picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    pub media: String,
    pub srcset: String,
}

/// Responsive image variant set for the preview picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageVariants {
    pub sources: Vec<ImageSource>,
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    pub object_position: String,
}

impl ImageVariants {
    #[must_use]
    pub fn build(image: &ImageData, config: &ImageConfig) -> Self {
        let srcset = |(one_x, two_x): (u32, u32)| {
            format!(
                "{} 1x, {} 2x",
                variant_url(&image.image, one_x),
                variant_url(&image.image, two_x)
            )
        };
        Self {
            sources: vec![
                ImageSource {
                    media: config.narrow_media.clone(),
                    srcset: srcset(config.narrow_widths),
                },
                ImageSource {
                    media: config.wide_media.clone(),
                    srcset: srcset(config.wide_widths),
                },
            ],
            src: variant_url(&image.image, config.fallback_width),
            alt: image.image_alt.clone(),
            width: config.fallback_width,
            height: config.fallback_width,
            object_position: image.image_focal_point.clone(),
        }
    }

    /// Inline style for the fallback image.
    #[must_use]
    pub fn style(&self) -> String {
        format!("object-position: {}", self.object_position)
    }
}

/// CDN variant URL; image URLs already carry a query string.
#[must_use]
pub fn variant_url(image: &str, width: u32) -> String {
    format!("{image}&width={width}")
}

/// Everything the preview card shows for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewView {
    pub href: String,
    pub title: String,
    /// `None` when the product has no tags; the badge region is then left untouched.
    pub badges: Option<Vec<Badge>>,
    pub price: PriceMode,
    pub image: ImageVariants,
    pub available: bool,
}

impl PreviewView {
    #[must_use]
    pub fn from_product(product: &Product, config: &WidgetConfig) -> Self {
        let tags = product.tags();
        let badges = (!tags.is_empty()).then(|| {
            tags.iter()
                .take(config.max_badges)
                .map(|tag| Badge::from_tag(tag))
                .collect()
        });
        Self {
            href: product.url.clone(),
            title: product.title.clone(),
            badges,
            price: PriceMode::for_product(product),
            image: ImageVariants::build(&product.image_data, &config.image),
            available: product.available,
        }
    }
}
