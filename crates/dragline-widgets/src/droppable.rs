#![forbid(unsafe_code)]

//! Droppable container bundles.

use dragline_core::{ContainerEntry, Coordinator, DragError, Orientation};

use crate::attrs::{self, Attributes};
use crate::pointer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DroppableOptions {
    pub orientation: Orientation,
    pub drop_disabled: bool,
    /// Items currently rendered inside; enables append-at-end drops.
    pub item_count: Option<usize>,
}

impl DroppableOptions {
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn vertical() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_drop_disabled(mut self, disabled: bool) -> Self {
        self.drop_disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }

    fn entry(&self, id: &str) -> ContainerEntry {
        let entry =
            ContainerEntry::new(id, self.orientation).with_drop_disabled(self.drop_disabled);
        match self.item_count {
            Some(count) => entry.with_item_count(count),
            None => entry,
        }
    }
}

/// Identity attributes and pointer handlers for the container element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerProps {
    pub droppable_id: String,
    pub direction: Orientation,
    pub drop_disabled: bool,
}

impl ContainerProps {
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        vec![
            (attrs::DATA_DROPPABLE_ID, self.droppable_id.clone()),
            (attrs::DATA_DIRECTION, self.direction.as_str().to_string()),
            (attrs::DATA_DROP_DISABLED, attrs::flag(self.drop_disabled)),
        ]
    }

    /// `pointerenter` on the container.
    pub fn on_pointer_enter(&self, coord: &mut Coordinator) -> Result<bool, DragError> {
        pointer::enter_container(coord, &self.droppable_id)
    }

    /// `pointerleave` on the container.
    pub fn on_pointer_leave(&self, coord: &mut Coordinator) -> Result<bool, DragError> {
        pointer::leave_container(coord, &self.droppable_id)
    }
}

/// Everything a droppable node attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppableState {
    pub container_props: ContainerProps,
    /// The active session hovers this container.
    pub is_dragging_over: bool,
    /// Dragged item id when the active session started in this container,
    /// for rendering a placeholder gap.
    pub dragging_from_this_with: Option<String>,
}

/// Build the bundle for container `id` from current state. Pure.
#[must_use]
pub fn droppable_props(
    coord: &Coordinator,
    id: &str,
    options: &DroppableOptions,
) -> DroppableState {
    let session = coord.session();
    DroppableState {
        container_props: ContainerProps {
            droppable_id: id.to_string(),
            direction: options.orientation,
            drop_disabled: options.drop_disabled,
        },
        is_dragging_over: session.is_some_and(|s| s.hovered_container_id() == Some(id)),
        dragging_from_this_with: session
            .filter(|s| s.origin_container_id() == id)
            .map(|s| s.dragged_id().to_string()),
    }
}

/// Register (or refresh) container `id`, then build its bundle. Call on
/// every render; pair with [`Coordinator::unregister`] on unmount.
pub fn use_droppable(
    coord: &mut Coordinator,
    id: &str,
    options: DroppableOptions,
) -> DroppableState {
    coord.register_entry(options.entry(id));
    droppable_props(coord, id, &options)
}
