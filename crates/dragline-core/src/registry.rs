#![forbid(unsafe_code)]

//! Mounted droppable containers.
//!
//! Entries keep registration order so keyboard navigation walks containers
//! the way they were mounted. Re-registering an id replaces the entry in
//! place; last registration wins.

/// Layout axis of a droppable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// Value of the `data-direction` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// One registered container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEntry {
    pub id: String,
    pub orientation: Orientation,
    pub drop_disabled: bool,
    /// Items the container currently renders, when the caller reports it.
    /// Used to resolve append positions.
    pub item_count: Option<usize>,
}

impl ContainerEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            orientation,
            drop_disabled: false,
            item_count: None,
        }
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

    /// True if items may be dropped here.
    #[must_use]
    pub fn accepts_drop(&self) -> bool {
        !self.drop_disabled
    }
}

/// Map of mounted containers keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<ContainerEntry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `entry.id`.
    pub fn insert(&mut self, entry: ContainerEntry) {
        match self.position(&entry.id) {
            Some(pos) => self.entries[pos] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove and return the entry for `id`.
    pub fn remove(&mut self, id: &str) -> Option<ContainerEntry> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContainerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ContainerEntry> {
        self.entries.iter()
    }

    /// The entry for `id` if it is registered and accepts drops.
    #[must_use]
    pub fn resolve_target<'a>(&'a self, id: Option<&str>) -> Option<&'a ContainerEntry> {
        self.get(id?).filter(|e| e.accepts_drop())
    }

    /// The drop-enabled container after (or before) `from` in registration
    /// order. With no current container, starts at the first
    /// (forward) or last (backward) target.
    #[must_use]
    pub fn step_target(&self, from: Option<&str>, forward: bool, wrap: bool) -> Option<&str> {
        let targets: Vec<&ContainerEntry> =
            self.entries.iter().filter(|e| e.accepts_drop()).collect();
        if targets.is_empty() {
            return None;
        }
        let last = targets.len() - 1;
        let current = from.and_then(|id| targets.iter().position(|e| e.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) if i < last => i + 1,
            (Some(_), true) if wrap => 0,
            (Some(i), true) => i,
            (Some(i), false) if i > 0 => i - 1,
            (Some(_), false) if wrap => last,
            (Some(i), false) => i,
        };
        let target: &ContainerEntry = targets[next];
        Some(target.id.as_str())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
