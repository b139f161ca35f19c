#![forbid(unsafe_code)]

//! Widgets: input adapters and prop bundles over `dragline-core`.
//!
//! # Role in Dragline
//! The host renders every node itself. This crate tells it what to attach:
//! identity attributes, ARIA state, and handler entry points that funnel
//! pointer and keyboard input into the coordinator's transitions.
//!
//! # Primary responsibilities
//! - **Pointer adapter**: press, global release/escape/blur, container
//!   enter/leave.
//! - **Keyboard adapter**: Space/Enter pick up and drop, Escape cancels,
//!   arrows move between containers.
//! - **Bundles**: [`use_droppable`], [`use_draggable`], [`use_active_drag_id`]
//!   and the live region.

pub mod attrs;
pub mod draggable;
pub mod droppable;
pub mod input;
pub mod keyboard;
pub mod overlay;
pub mod pointer;

pub use draggable::{
    DragHandle, DraggableOptions, DraggableState, HandleProps, ItemDescriptor, ItemProps,
    use_draggable,
};
pub use droppable::{
    ContainerProps, DroppableOptions, DroppableState, droppable_props, use_droppable,
};
pub use input::{Direction, GlobalEvent, Key};
pub use keyboard::KeyAction;
pub use overlay::{LiveRegionProps, live_region_props, use_active_drag_id};
pub use pointer::dispatch_global;
