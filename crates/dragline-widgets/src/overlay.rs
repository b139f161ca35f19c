#![forbid(unsafe_code)]

//! Drag overlay and live-region bundles.

use dragline_core::Coordinator;

use crate::attrs::{self, Attributes};

/// Id of the item being dragged, for rendering a floating preview.
#[must_use]
pub fn use_active_drag_id(coord: &Coordinator) -> Option<&str> {
    coord.active_drag_id()
}

/// The `aria-live` region that mirrors the announcement slot. Render one per
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRegionProps {
    pub text: String,
}

impl LiveRegionProps {
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        vec![
            (attrs::ROLE, "status".to_string()),
            (attrs::ARIA_LIVE, "polite".to_string()),
            (attrs::ARIA_ATOMIC, "true".to_string()),
        ]
    }
}

#[must_use]
pub fn live_region_props(coord: &Coordinator) -> LiveRegionProps {
    LiveRegionProps {
        text: coord.announcer().current(),
    }
}
