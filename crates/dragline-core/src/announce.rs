#![forbid(unsafe_code)]

//! Assistive-technology announcement slot.
//!
//! One current string, overwritten on every session transition and read by an
//! `aria-live="polite"` region. Nothing is queued: a reader that misses an
//! update only ever sees the latest text.

use crate::observable::{Observable, Subscription};

thread_local! {
    static GLOBAL_SLOT: AnnouncementSlot = AnnouncementSlot::new();
}

/// Handle to a single-slot announcement buffer. Clones share the slot.
#[derive(Debug, Clone)]
pub struct AnnouncementSlot {
    text: Observable<String>,
}

impl Default for AnnouncementSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementSlot {
    /// A fresh, isolated slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: Observable::new(String::new()),
        }
    }

    /// The shared slot for this thread. A single-threaded host has exactly
    /// one of these, which makes it the process-wide slot.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_SLOT.with(Clone::clone)
    }

    /// Current text; empty when nothing is being announced.
    #[must_use]
    pub fn current(&self) -> String {
        self.text.get()
    }

    /// Overwrite the slot.
    pub fn announce(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    pub fn clear(&self) {
        self.text.set(String::new());
    }

    /// Bumped on every change of text.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.text.version()
    }

    /// Called with the new text after each change.
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        self.text.subscribe(move |text: &String| callback(text))
    }

    /// True if both handles write the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        self.text.same_slot(&other.text)
    }
}

/// "Dragging item {id}."
#[must_use]
pub fn picked_up(item: &str) -> String {
    format!("Dragging item {item}.")
}

/// Hover change text; `None` means outside every drop target.
#[must_use]
pub fn hovering(item: &str, container: Option<&str>) -> String {
    match container {
        Some(container) => format!("Dragging item {item} over {container}."),
        None => format!("Dragging item {item}. Not over a drop target."),
    }
}
