//! Currently selected category item
use crate::data::{Product, SectionData};
use crate::error::SectionError;

/// The selected index plus a cached copy of its product record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    index: Option<usize>,
    product: Option<Product>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with the product at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` does not name a product in `data`; the
    /// previous selection is kept in that case.
    pub fn select<'a>(
        &'a mut self,
        data: &SectionData,
        index: usize,
    ) -> Result<&'a Product, SectionError> {
        let product = data.product(index)?.clone();
        self.index = Some(index);
        Ok(self.product.insert(product))
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }
}

/// `aria-selected` flag for each of `count` category items.
#[must_use]
pub fn selection_flags(count: usize, selected: usize) -> Vec<bool> {
    (0..count).map(|i| i == selected).collect()
}

/// Parse the value of an item's index attribute.
///
/// # Errors
///
/// Returns an error if the attribute is not a non-negative integer.
pub fn parse_index(raw: &str) -> Result<usize, SectionError> {
    raw.trim()
        .parse()
        .map_err(|_| SectionError::InvalidIndex(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> SectionData {
        SectionData::from_json(
            r#"[
                {"product":[{"id":1,"title":"One","url":"/1"}]},
                {"product":[{"id":2,"title":"Two","url":"/2"}]},
                {"product":[{"id":3,"title":"Three","url":"/3"}]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn select_replaces_previous_selection() {
        let data = data();
        let mut selection = Selection::new();
        assert_eq!(selection.select(&data, 0).unwrap().title, "One");
        assert_eq!(selection.select(&data, 2).unwrap().title, "Three");
        assert_eq!(selection.index(), Some(2));
        assert_eq!(selection.product().unwrap().title, "Three");
    }

    #[test]
    fn failed_select_keeps_previous() {
        let data = data();
        let mut selection = Selection::new();
        selection.select(&data, 1).unwrap();
        assert!(selection.select(&data, 9).is_err());
        assert_eq!(selection.index(), Some(1));
    }

    #[test]
    fn exactly_one_flag_is_set_for_every_index() {
        for selected in 0..5 {
            let flags = selection_flags(5, selected);
            assert_eq!(flags.iter().filter(|f| **f).count(), 1);
            assert!(flags[selected]);
        }
    }

    #[test]
    fn parse_index_rejects_garbage() {
        assert_eq!(parse_index(" 3 ").unwrap(), 3);
        assert!(matches!(parse_index("x"), Err(SectionError::InvalidIndex(_))));
        assert!(parse_index("-1").is_err());
    }
}
