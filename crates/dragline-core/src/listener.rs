#![forbid(unsafe_code)]

//! Session-scoped global listeners.
//!
//! The host owns the real window-level pointer-release and key listeners.
//! [`ListenerScope`] attaches them when a session starts and detaches them on
//! whichever transition ends it. Dropping the scope mid-session detaches too,
//! so a torn-down coordinator never leaks listeners.

/// Host hook for installing window-level listeners.
pub trait ListenerHost {
    /// Install pointer-release, pointer-cancel, blur and key listeners.
    fn attach(&mut self);
    /// Remove everything `attach` installed.
    fn detach(&mut self);
}

/// Attach/detach bookkeeping for one coordinator.
#[derive(Default)]
pub struct ListenerScope {
    host: Option<Box<dyn ListenerHost>>,
    attached: bool,
}

impl std::fmt::Debug for ListenerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerScope")
            .field("has_host", &self.host.is_some())
            .field("attached", &self.attached)
            .finish()
    }
}

impl ListenerScope {
    #[must_use]
    pub fn new(host: Option<Box<dyn ListenerHost>>) -> Self {
        Self {
            host,
            attached: false,
        }
    }

    /// True between session start and session end.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub(crate) fn acquire(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        if let Some(host) = self.host.as_mut() {
            host.attach();
        }
    }

    pub(crate) fn release(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        if let Some(host) = self.host.as_mut() {
            host.detach();
        }
    }
}

impl Drop for ListenerScope {
    fn drop(&mut self) {
        self.release();
    }
}
