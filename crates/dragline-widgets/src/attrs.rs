#![forbid(unsafe_code)]

//! Attribute names emitted on DOM-attachable bundles.

pub const DATA_DROPPABLE_ID: &str = "data-droppable-id";
pub const DATA_DIRECTION: &str = "data-direction";
pub const DATA_DROP_DISABLED: &str = "data-drop-disabled";
pub const DATA_DRAGGABLE_ID: &str = "data-draggable-id";
pub const DATA_INDEX: &str = "data-index";
pub const DATA_DRAG_DISABLED: &str = "data-drag-disabled";
pub const ROLE: &str = "role";
pub const TAB_INDEX: &str = "tabIndex";
pub const ARIA_GRABBED: &str = "aria-grabbed";
pub const ARIA_LABEL: &str = "aria-label";
pub const ARIA_LIVE: &str = "aria-live";
pub const ARIA_ATOMIC: &str = "aria-atomic";

/// Ordered `(name, value)` pairs ready to set on an element.
pub type Attributes = Vec<(&'static str, String)>;

#[inline]
pub(crate) fn flag(value: bool) -> String {
    value.to_string()
}

/// Look up one attribute by name.
#[must_use]
pub fn get<'a>(attrs: &'a Attributes, name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.as_str())
}
