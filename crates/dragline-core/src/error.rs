#![forbid(unsafe_code)]

//! Rejected transitions.
//!
//! A [`DragError`] never means the coordinator is broken. It reports that an
//! input arrived in a state where it has no meaning (a duplicate press, a
//! stray release after teardown). State, callbacks and the announcement slot
//! are untouched when one is returned, so callers that only care about
//! resilience can discard it.

/// Why a transition was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    /// `start_drag` while a session is active.
    AlreadyDragging {
        /// Item of the session that stays active.
        active: String,
    },
    /// `set_hovered`, `end` or `cancel` with no active session.
    NotDragging,
    /// The item is marked drag-disabled.
    DragDisabled { item: String },
    /// The origin container of a new session is not registered.
    UnknownContainer { id: String },
    /// A drop was requested from a handle that is not the dragged item.
    NotDraggedItem { item: String },
}

impl DragError {
    /// Stable short name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyDragging { .. } => "already_dragging",
            Self::NotDragging => "not_dragging",
            Self::DragDisabled { .. } => "drag_disabled",
            Self::UnknownContainer { .. } => "unknown_container",
            Self::NotDraggedItem { .. } => "not_dragged_item",
        }
    }
}

impl core::fmt::Display for DragError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadyDragging { active } => {
                write!(f, "a drag session is already active for item {active}")
            }
            Self::NotDragging => write!(f, "no drag session is active"),
            Self::DragDisabled { item } => write!(f, "item {item} is drag-disabled"),
            Self::UnknownContainer { id } => write!(f, "container {id} is not registered"),
            Self::NotDraggedItem { item } => {
                write!(f, "item {item} is not the item being dragged")
            }
        }
    }
}

impl std::error::Error for DragError {}
