#![forbid(unsafe_code)]

//! Session record and the values handed to caller callbacks.

/// A position inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Location {
    pub container_id: String,
    pub index: usize,
}

impl Location {
    #[must_use]
    pub fn new(container_id: impl Into<String>, index: usize) -> Self {
        Self {
            container_id: container_id.into(),
            index,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DropReason {
    Drop,
    Cancel,
}

impl DropReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Cancel => "cancel",
        }
    }
}

/// Outcome of a finished session. Built once at session end.
///
/// `destination` is `None` exactly when `reason` is [`DropReason::Cancel`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CompletionEvent {
    pub dragged_id: String,
    pub source: Location,
    pub destination: Option<Location>,
    pub reason: DropReason,
}

impl CompletionEvent {
    pub(crate) fn dropped(session: Session, destination: Location) -> Self {
        Self {
            dragged_id: session.dragged_id,
            source: session.origin,
            destination: Some(destination),
            reason: DropReason::Drop,
        }
    }

    pub(crate) fn cancelled(session: Session) -> Self {
        Self {
            dragged_id: session.dragged_id,
            source: session.origin,
            destination: None,
            reason: DropReason::Cancel,
        }
    }

    /// True if the item landed back where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.destination.as_ref() == Some(&self.source) || self.destination.is_none()
    }
}

/// Argument of the `on_drag_start` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStartInfo {
    pub draggable_id: String,
    pub source: Location,
}

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

impl DragPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
        }
    }
}

/// The in-progress drag. At most one exists per coordinator.
///
/// Origin fields are fixed at creation; only the hover fields change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    dragged_id: String,
    origin: Location,
    hovered_container_id: Option<String>,
    hovered_index: Option<usize>,
}

impl Session {
    pub(crate) fn new(dragged_id: String, origin: Location) -> Self {
        let hovered = Some(origin.container_id.clone());
        Self {
            dragged_id,
            origin,
            hovered_container_id: hovered,
            hovered_index: None,
        }
    }

    #[must_use]
    pub fn dragged_id(&self) -> &str {
        &self.dragged_id
    }

    #[must_use]
    pub fn origin(&self) -> &Location {
        &self.origin
    }

    #[must_use]
    pub fn origin_container_id(&self) -> &str {
        &self.origin.container_id
    }

    #[must_use]
    pub fn origin_index(&self) -> usize {
        self.origin.index
    }

    /// `None` while not over any valid drop target.
    #[must_use]
    pub fn hovered_container_id(&self) -> Option<&str> {
        self.hovered_container_id.as_deref()
    }

    /// Candidate insertion index inside the hovered container, if reported.
    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    /// Returns `true` if either hover field changed.
    pub(crate) fn set_hover(&mut self, container: Option<String>, index: Option<usize>) -> bool {
        let index = container.as_ref().and(index);
        if self.hovered_container_id == container && self.hovered_index == index {
            return false;
        }
        self.hovered_container_id = container;
        self.hovered_index = index;
        true
    }
}
