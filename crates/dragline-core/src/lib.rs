#![forbid(unsafe_code)]

//! Core: the drag-and-drop coordination engine.
//!
//! # Role in Dragline
//! `dragline-core` owns everything stateful about a drag: which containers
//! are mounted, the single active session, and the announcement text for
//! assistive technology. It knows nothing about pointers, keys or DOM
//! attributes; `dragline-widgets` translates those into the transitions
//! defined here.
//!
//! # Primary responsibilities
//! - **Registry**: mounted droppable containers and their orientation.
//! - **Coordinator**: the `Idle`/`Dragging` state machine and its callbacks.
//! - **AnnouncementSlot**: single-slot live-region text.
//! - **CompletionEvent**: the intent handed to the caller when a session ends.
//!
//! The engine only computes intent. Reordering application data is the
//! caller's job.

pub mod announce;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod listener;
pub mod observable;
pub mod registry;
pub mod session;

pub use announce::AnnouncementSlot;
pub use config::{ActivateKey, DragConfig};
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::DragError;
pub use listener::{ListenerHost, ListenerScope};
pub use observable::{Observable, Subscription};
pub use registry::{ContainerEntry, Orientation, Registry};
pub use session::{CompletionEvent, DragPhase, DragStartInfo, DropReason, Location, Session};
