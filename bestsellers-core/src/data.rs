//! Section dataset parsed from the embedded payload
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::SectionError;

/// A price as the storefront serializes it: either a bare number or preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(serde_json::Number),
    Text(String),
}

impl PriceValue {
    /// Numeric value used for comparisons. Text is read after stripping
    /// currency symbols and thousands separators.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(n) => n.as_f64(),
            Self::Text(text) => {
                let digits: String = text
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                digits.parse().ok()
            }
        }
    }
}

impl Default for PriceValue {
    fn default() -> Self {
        Self::Amount(serde_json::Number::from(0))
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole floats print like the storefront script does: 100.0 reads "100".
            Self::Amount(n) => match n.as_f64() {
                Some(value) if n.is_f64() && value.is_finite() && value.fract() == 0.0 => {
                    write!(f, "{value:.0}")
                }
                _ => write!(f, "{n}"),
            },
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for PriceValue {
    fn from(value: i64) -> Self {
        Self::Amount(serde_json::Number::from(value))
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Reads `null` the same as an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Featured image of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_alt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_focal_point: String,
}

/// Product descriptor rendered into the preview card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub available: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: PriceValue,
    #[serde(default)]
    pub compare_at_price: Option<PriceValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_varies: bool,
    #[serde(default)]
    pub start_from: Option<PriceValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_data: ImageData,
    pub title: String,
    pub url: String,
    /// Absent and empty both mean "no badges".
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Product {
    /// Tags in original order, empty when none were serialized.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// One position in the category list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    #[serde(default)]
    pub product: Vec<Product>,
}

/// Ordered product records for one section, keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionData {
    entries: Vec<SectionEntry>,
}

impl SectionData {
    /// Parse the embedded payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an array of section entries.
    pub fn from_json(json: &str) -> Result<Self, SectionError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn from_entries(entries: Vec<SectionEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Product descriptor at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is past the end or the entry carries no product.
    pub fn product(&self, index: usize) -> Result<&Product, SectionError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(SectionError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })?;
        entry.product.first().ok_or(SectionError::EmptyEntry(index))
    }
}
