#![forbid(unsafe_code)]

//! Coordinator configuration.
//!
//! Escape always cancels an active session and is deliberately absent here.

/// Keys that pick up or drop an item from its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivateKey {
    Space,
    Enter,
}

/// Behavior switches for a [`Coordinator`](crate::Coordinator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragConfig {
    /// Keys that pick up or drop. Default: Space, Enter.
    pub activate_keys: Vec<ActivateKey>,
    /// Arrow keys on the dragged handle move the hovered container.
    pub arrow_navigation: bool,
    /// Arrow navigation wraps past the first/last container.
    pub wrap_navigation: bool,
    /// `PointerCancel` and window blur cancel an active session.
    pub cancel_on_blur: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activate_keys: vec![ActivateKey::Space, ActivateKey::Enter],
            arrow_navigation: true,
            wrap_navigation: true,
            cancel_on_blur: true,
        }
    }
}

#[inline]
fn env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl DragConfig {
    /// Defaults overridden by `DRAGLINE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through a custom environment lookup.
    ///
    /// Recognized: `DRAGLINE_ARROW_NAVIGATION`, `DRAGLINE_WRAP_NAVIGATION`,
    /// `DRAGLINE_CANCEL_ON_BLUR`. Unparseable values keep the default.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |key: &str| get_env(key).as_deref().and_then(env_flag);
        if let Some(v) = read("DRAGLINE_ARROW_NAVIGATION") {
            config.arrow_navigation = v;
        }
        if let Some(v) = read("DRAGLINE_WRAP_NAVIGATION") {
            config.wrap_navigation = v;
        }
        if let Some(v) = read("DRAGLINE_CANCEL_ON_BLUR") {
            config.cancel_on_blur = v;
        }
        config
    }

    #[must_use]
    pub fn with_activate_keys(mut self, keys: Vec<ActivateKey>) -> Self {
        self.activate_keys = keys;
        self
    }

    #[must_use]
    pub fn with_arrow_navigation(mut self, enabled: bool) -> Self {
        self.arrow_navigation = enabled;
        self
    }

    #[must_use]
    pub fn with_wrap_navigation(mut self, wrap: bool) -> Self {
        self.wrap_navigation = wrap;
        self
    }

    #[must_use]
    pub fn with_cancel_on_blur(mut self, cancel: bool) -> Self {
        self.cancel_on_blur = cancel;
        self
    }

    /// True if `key` picks up or drops.
    #[must_use]
    pub fn is_activate_key(&self, key: ActivateKey) -> bool {
        self.activate_keys.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = DragConfig::default();
        assert!(config.is_activate_key(ActivateKey::Space));
        assert!(config.is_activate_key(ActivateKey::Enter));
        assert!(config.arrow_navigation);
        assert!(config.wrap_navigation);
        assert!(config.cancel_on_blur);
    }

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DRAGLINE_ARROW_NAVIGATION", "off"),
            ("DRAGLINE_WRAP_NAVIGATION", " No "),
            ("DRAGLINE_CANCEL_ON_BLUR", "maybe"),
        ]
        .into_iter()
        .collect();
        let config = DragConfig::from_env_with(|k| env.get(k).map(|v| v.to_string()));
        assert!(!config.arrow_navigation);
        assert!(!config.wrap_navigation);
        assert!(config.cancel_on_blur);
    }

    #[test]
    fn builder_setters() {
        let config = DragConfig::default()
            .with_activate_keys(vec![ActivateKey::Enter])
            .with_cancel_on_blur(false);
        assert!(!config.is_activate_key(ActivateKey::Space));
        assert!(!config.cancel_on_blur);
    }
}
