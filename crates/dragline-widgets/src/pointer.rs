#![forbid(unsafe_code)]

//! Pointer adapter.
//!
//! Press on a handle starts a session over the handle's container. While the
//! session lasts, the host forwards window-level events through
//! [`dispatch_global`]: pointer release drops over the hovered container at
//! index 0, Escape cancels, and pointer-cancel or blur cancel when
//! [`DragConfig::cancel_on_blur`](dragline_core::DragConfig) is set.
//! Container enter/leave keep the hovered container current.

use dragline_core::{CompletionEvent, Coordinator, DragError};

use crate::draggable::ItemDescriptor;
use crate::input::{GlobalEvent, Key};

/// Index used by a pointer release. Insertion position is not tracked at
/// pointer granularity; callers that need one report it through
/// `set_hovered_at` and end the session themselves.
pub const RELEASE_INDEX: usize = 0;

/// Pointer pressed on `item`'s handle.
///
/// Items outside any mounted droppable cannot be picked up; the press
/// returns [`DragError::UnknownContainer`].
pub fn press(coord: &mut Coordinator, item: &ItemDescriptor) -> Result<(), DragError> {
    if item.drag_disabled {
        tracing::trace!(target: "dragline", item = %item.id, "press ignored: drag disabled");
        return Err(DragError::DragDisabled {
            item: item.id.clone(),
        });
    }
    coord.start_drag(&item.id, &item.container_id, item.index)
}

/// Pointer released anywhere: drop over whatever is hovered.
pub fn release(coord: &mut Coordinator) -> Result<CompletionEvent, DragError> {
    let hovered = coord
        .session()
        .ok_or(DragError::NotDragging)?
        .hovered_container_id()
        .map(str::to_owned);
    coord.end(hovered.as_deref(), Some(RELEASE_INDEX))
}

/// Pointer entered a droppable container.
pub fn enter_container(coord: &mut Coordinator, container_id: &str) -> Result<bool, DragError> {
    if coord.registry().resolve_target(Some(container_id)).is_none() {
        return Ok(false);
    }
    coord.set_hovered(Some(container_id))
}

/// Pointer left a droppable container. Only clears the hover if this
/// container still holds it, so enter-before-leave ordering is harmless.
pub fn leave_container(coord: &mut Coordinator, container_id: &str) -> Result<bool, DragError> {
    let session = coord.session().ok_or(DragError::NotDragging)?;
    if session.hovered_container_id() != Some(container_id) {
        return Ok(false);
    }
    coord.set_hovered(None)
}

/// Route a window-level event. Returns the completion event if the event
/// ended the session; inert while no listeners are attached.
pub fn dispatch_global(coord: &mut Coordinator, event: GlobalEvent) -> Option<CompletionEvent> {
    if !coord.listeners_attached() {
        return None;
    }
    let result = match event {
        GlobalEvent::PointerUp => release(coord),
        GlobalEvent::KeyDown(Key::Escape) => coord.cancel(),
        GlobalEvent::PointerCancel | GlobalEvent::Blur if coord.config().cancel_on_blur => {
            tracing::debug!(target: "dragline", ?event, "session interrupted");
            coord.cancel()
        }
        _ => return None,
    };
    result.ok()
}
