#![forbid(unsafe_code)]

//! Keyboard adapter.
//!
//! Attached to the same handle as the pointer adapter and active in every
//! phase. Key handling is split in two: [`classify`] decides what a key
//! means for this handle right now, [`handle_key`] applies it through the
//! coordinator's transitions.
//!
//! | Key | Idle | Dragging this item | Dragging another item |
//! |-----|------|--------------------|-----------------------|
//! | Space/Enter | pick up | drop | ignored |
//! | Escape | ignored | cancel | cancel |
//! | Arrows | ignored | move hovered container | ignored |

use dragline_core::{Coordinator, DragError};

use crate::draggable::ItemDescriptor;
use crate::input::{Direction, Key};
use crate::pointer;

/// What a key press means for a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    PickUp,
    Drop,
    Navigate(Direction),
    Cancel,
}

/// Decide the action for `key` on `item`'s handle without changing state.
#[must_use]
pub fn classify(coord: &Coordinator, item: &ItemDescriptor, key: Key) -> KeyAction {
    let dragged = coord.active_drag_id();
    let is_this = dragged == Some(item.id.as_str());
    match key {
        Key::Escape if dragged.is_some() => KeyAction::Cancel,
        Key::Space | Key::Enter => {
            let Some(activate) = key.as_activate() else {
                return KeyAction::None;
            };
            if !coord.config().is_activate_key(activate) {
                return KeyAction::None;
            }
            match dragged {
                None if !item.drag_disabled => KeyAction::PickUp,
                Some(_) if is_this => KeyAction::Drop,
                _ => KeyAction::None,
            }
        }
        Key::Arrow(dir) if is_this && coord.config().arrow_navigation => KeyAction::Navigate(dir),
        _ => KeyAction::None,
    }
}

/// Apply `key` to `item`'s handle. Returns the action taken; a rejected
/// transition comes back as `Err` and leaves the coordinator unchanged.
pub fn handle_key(
    coord: &mut Coordinator,
    item: &ItemDescriptor,
    key: Key,
) -> Result<KeyAction, DragError> {
    let action = classify(coord, item, key);
    match action {
        KeyAction::None => {
            if key
                .as_activate()
                .is_some_and(|k| coord.config().is_activate_key(k))
            {
                return Err(rejection(coord, item));
            }
        }
        KeyAction::PickUp => pointer::press(coord, item)?,
        KeyAction::Drop => {
            pointer::release(coord)?;
        }
        KeyAction::Cancel => {
            coord.cancel()?;
        }
        KeyAction::Navigate(dir) => {
            let hovered = coord.session().and_then(|s| s.hovered_container_id());
            let next = coord
                .registry()
                .step_target(hovered, dir.is_forward(), coord.config().wrap_navigation)
                .map(str::to_owned);
            if next.is_some() {
                coord.set_hovered(next.as_deref())?;
            }
        }
    }
    Ok(action)
}

/// Why a configured activation key did nothing on this handle.
fn rejection(coord: &Coordinator, item: &ItemDescriptor) -> DragError {
    let item = item.id.clone();
    if coord.is_dragging() {
        DragError::NotDraggedItem { item }
    } else {
        DragError::DragDisabled { item }
    }
}
