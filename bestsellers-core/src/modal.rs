//! Wishlist confirmation modal state
/// Where a click inside the modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClickTarget {
    /// The explicit close control or one of its descendants.
    CloseButton,
    /// The modal element itself, outside its content.
    Backdrop,
    /// Any other descendant of the modal.
    Inside,
}

impl ModalClickTarget {
    #[must_use]
    pub const fn closes(self) -> bool {
        matches!(self, Self::CloseButton | Self::Backdrop)
    }
}

/// Visibility flag shared by the open and close operations.
///
/// Both operations toggle, so opening twice in a row leaves the modal hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    shown: bool,
}

impl ModalState {
    #[must_use]
    pub const fn hidden() -> Self {
        Self { shown: false }
    }

    /// Read the state back from the modal's `aria-hidden` attribute.
    /// Anything other than `"false"` counts as hidden.
    #[must_use]
    pub fn from_aria_hidden(value: Option<&str>) -> Self {
        Self {
            shown: value.is_some_and(|v| v.trim() == "false"),
        }
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> Self {
        self.shown = !self.shown;
        *self
    }

    #[must_use]
    pub const fn is_shown(self) -> bool {
        self.shown
    }

    /// Value for the `aria-hidden` attribute.
    #[must_use]
    pub const fn aria_hidden(self) -> &'static str {
        if self.shown { "false" } else { "true" }
    }
}

/// Confirmation text shown after a wishlist click.
#[must_use]
pub fn wishlist_message(product_name: &str) -> String {
    format!("{} has been added to your wishlist", product_name.trim())
}
