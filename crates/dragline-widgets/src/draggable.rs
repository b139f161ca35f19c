#![forbid(unsafe_code)]

//! Draggable item bundles.
//!
//! [`use_draggable`] is pure: the same coordinator state and arguments
//! always produce the same bundle, so callers can memoize rendering on it.
//! The handle's event entry points live on [`DragHandle`] and take the
//! coordinator explicitly.

use dragline_core::{Coordinator, DragError};

use crate::attrs::{self, Attributes};
use crate::input::Key;
use crate::keyboard::{self, KeyAction};
use crate::pointer;

/// What the engine needs to know about one rendered item.
///
/// `container_id` is the id of the enclosing droppable, passed down by the
/// caller at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    pub id: String,
    pub index: usize,
    pub container_id: String,
    pub drag_disabled: bool,
}

impl ItemDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, index: usize, container_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index,
            container_id: container_id.into(),
            drag_disabled: false,
        }
    }

    #[must_use]
    pub fn with_drag_disabled(mut self, disabled: bool) -> Self {
        self.drag_disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraggableOptions {
    pub drag_disabled: bool,
}

/// Identity attributes for the item element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemProps {
    pub draggable_id: String,
    pub index: usize,
    pub drag_disabled: bool,
}

impl ItemProps {
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        vec![
            (attrs::DATA_DRAGGABLE_ID, self.draggable_id.clone()),
            (attrs::DATA_INDEX, self.index.to_string()),
            (attrs::DATA_DRAG_DISABLED, attrs::flag(self.drag_disabled)),
        ]
    }
}

/// Event entry points of a drag handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragHandle {
    item: ItemDescriptor,
}

impl DragHandle {
    #[must_use]
    pub fn item(&self) -> &ItemDescriptor {
        &self.item
    }

    /// `pointerdown` on the handle.
    pub fn on_pointer_down(&self, coord: &mut Coordinator) -> Result<(), DragError> {
        pointer::press(coord, &self.item)
    }

    /// `keydown` on the handle.
    pub fn on_key_down(&self, coord: &mut Coordinator, key: Key) -> Result<KeyAction, DragError> {
        keyboard::handle_key(coord, &self.item, key)
    }
}

/// Accessible handle attributes plus its handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleProps {
    pub role: &'static str,
    pub tab_index: i32,
    pub aria_grabbed: bool,
    pub aria_label: String,
    pub handle: DragHandle,
}

impl HandleProps {
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        vec![
            (attrs::ROLE, self.role.to_string()),
            (attrs::TAB_INDEX, self.tab_index.to_string()),
            (attrs::ARIA_GRABBED, attrs::flag(self.aria_grabbed)),
            (attrs::ARIA_LABEL, self.aria_label.clone()),
        ]
    }
}

/// Everything a draggable node attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggableState {
    pub item_props: ItemProps,
    pub handle_props: HandleProps,
    pub is_dragging: bool,
}

/// "Draggable item {id}. Press space to {pick up|drop}."
#[must_use]
pub fn handle_label(id: &str, is_dragging: bool) -> String {
    let verb = if is_dragging { "drop" } else { "pick up" };
    format!("Draggable item {id}. Press space to {verb}.")
}

/// Build the bundle for item `id` at `index` inside `container_id`.
#[must_use]
pub fn use_draggable(
    coord: &Coordinator,
    id: &str,
    index: usize,
    container_id: &str,
    options: DraggableOptions,
) -> DraggableState {
    let is_dragging = coord.active_drag_id() == Some(id);
    let item = ItemDescriptor::new(id, index, container_id)
        .with_drag_disabled(options.drag_disabled);
    DraggableState {
        item_props: ItemProps {
            draggable_id: id.to_string(),
            index,
            drag_disabled: options.drag_disabled,
        },
        handle_props: HandleProps {
            role: "button",
            tab_index: 0,
            aria_grabbed: is_dragging,
            aria_label: handle_label(id, is_dragging),
            handle: DragHandle { item },
        },
        is_dragging,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragline_core::{AnnouncementSlot, Orientation};

    fn board() -> Coordinator {
        let mut c = Coordinator::builder(|_| {})
            .announcer(AnnouncementSlot::new())
            .build();
        c.register("todo", Orientation::Vertical);
        c
    }

    #[test]
    fn idle_bundle() {
        let c = board();
        let state = use_draggable(&c, "card-7", 2, "todo", DraggableOptions::default());
        assert!(!state.is_dragging);
        let item = state.item_props.attributes();
        assert_eq!(attrs::get(&item, "data-draggable-id"), Some("card-7"));
        assert_eq!(attrs::get(&item, "data-index"), Some("2"));
        assert_eq!(attrs::get(&item, "data-drag-disabled"), Some("false"));

        let handle = state.handle_props.attributes();
        assert_eq!(attrs::get(&handle, "role"), Some("button"));
        assert_eq!(attrs::get(&handle, "tabIndex"), Some("0"));
        assert_eq!(attrs::get(&handle, "aria-grabbed"), Some("false"));
        assert_eq!(
            attrs::get(&handle, "aria-label"),
            Some("Draggable item card-7. Press space to pick up.")
        );
    }

    #[test]
    fn dragging_bundle_flips_label() {
        let mut c = board();
        let state = use_draggable(&c, "card-7", 2, "todo", DraggableOptions::default());
        state.handle_props.handle.on_pointer_down(&mut c).unwrap();

        let state = use_draggable(&c, "card-7", 2, "todo", DraggableOptions::default());
        assert!(state.is_dragging);
        assert!(state.handle_props.aria_grabbed);
        assert_eq!(
            state.handle_props.aria_label,
            "Draggable item card-7. Press space to drop."
        );
        let other = use_draggable(&c, "card-8", 3, "todo", DraggableOptions::default());
        assert!(!other.is_dragging);
    }

    #[test]
    fn same_inputs_same_bundle() {
        let c = board();
        let opts = DraggableOptions { drag_disabled: true };
        assert_eq!(
            use_draggable(&c, "a", 0, "todo", opts),
            use_draggable(&c, "a", 0, "todo", opts)
        );
    }

    #[test]
    fn disabled_handle_ignores_press() {
        let mut c = board();
        let state = use_draggable(&c, "a", 0, "todo", DraggableOptions { drag_disabled: true });
        assert!(state.handle_props.handle.on_pointer_down(&mut c).is_err());
        assert!(state.handle_props.handle.item().drag_disabled);
        assert!(!c.is_dragging());
    }
}
