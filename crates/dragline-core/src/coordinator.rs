#![forbid(unsafe_code)]

//! Drag session state machine.
//!
//! A [`Coordinator`] owns one board: its container [`Registry`], the single
//! optional [`Session`], the announcement slot it writes, and the caller's
//! callbacks. Independent boards use independent coordinators.
//!
//! # Invariants
//!
//! 1. The phase is `Idle` or `Dragging`; a session exists only while
//!    `Dragging`.
//! 2. `start_drag` is rejected while `Dragging`; the active session's origin
//!    is never rewritten.
//! 3. `set_hovered`, `end` and `cancel` are rejected while `Idle` and have no
//!    side effects (no callback, no announcement).
//! 4. Every exit from `Dragging` (drop, cancel, coordinator drop) releases
//!    the global listener scope exactly once.
//! 5. `on_drag_end` runs exactly once per session, after the coordinator is
//!    already `Idle`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Duplicate press | Repeated event delivery | `AlreadyDragging`, state kept |
//! | Stray release | Event after teardown | `NotDragging`, nothing fires |
//! | Unknown/disabled target | Container unmounted or drop-disabled | Treated as no target |
//! | Callback panic | Caller bug | State already settled, remaining notifications run, first panic re-raised |
//!
//! Callbacks receive event values, never the coordinator, so a callback
//! cannot start a new session while a transition is executing.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::announce::{self, AnnouncementSlot};
use crate::config::DragConfig;
use crate::error::DragError;
use crate::listener::{ListenerHost, ListenerScope};
use crate::observable::Observable;
use crate::registry::{ContainerEntry, Orientation, Registry};
use crate::session::{CompletionEvent, DragPhase, DragStartInfo, Location, Session};

type DragEndCallback = Box<dyn FnMut(&CompletionEvent)>;
type DragStartCallback = Box<dyn FnMut(&DragStartInfo)>;

/// Runs caller-supplied notifications in order, holding back the first panic
/// until all of them have run.
#[derive(Default)]
struct Deferred {
    payload: Option<Box<dyn Any + Send>>,
}

impl Deferred {
    fn run(&mut self, what: &'static str, notify: impl FnOnce()) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(notify)) {
            tracing::error!(target: "dragline", callback = what, "callback panicked");
            if self.payload.is_none() {
                self.payload = Some(payload);
            }
        }
    }

    fn resume(self) {
        if let Some(payload) = self.payload {
            panic::resume_unwind(payload);
        }
    }
}

/// Builder for a [`Coordinator`] with optional collaborators.
pub struct CoordinatorBuilder {
    on_drag_end: DragEndCallback,
    on_drag_start: Option<DragStartCallback>,
    config: DragConfig,
    announcer: Option<AnnouncementSlot>,
    listener_host: Option<Box<dyn ListenerHost>>,
}

impl CoordinatorBuilder {
    /// Called synchronously when a session starts.
    #[must_use]
    pub fn on_drag_start(mut self, callback: impl FnMut(&DragStartInfo) + 'static) -> Self {
        self.on_drag_start = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn config(mut self, config: DragConfig) -> Self {
        self.config = config;
        self
    }

    /// Write announcements to `slot` instead of the thread-wide slot.
    #[must_use]
    pub fn announcer(mut self, slot: AnnouncementSlot) -> Self {
        self.announcer = Some(slot);
        self
    }

    #[must_use]
    pub fn listener_host(mut self, host: impl ListenerHost + 'static) -> Self {
        self.listener_host = Some(Box::new(host));
        self
    }

    #[must_use]
    pub fn build(self) -> Coordinator {
        Coordinator {
            registry: Registry::new(),
            session: None,
            config: self.config,
            announcer: self.announcer.unwrap_or_else(AnnouncementSlot::global),
            active_drag: Observable::new(None),
            listeners: ListenerScope::new(self.listener_host),
            on_drag_end: self.on_drag_end,
            on_drag_start: self.on_drag_start,
        }
    }
}

/// Owner of one board's registry and drag session.
pub struct Coordinator {
    registry: Registry,
    session: Option<Session>,
    config: DragConfig,
    announcer: AnnouncementSlot,
    active_drag: Observable<Option<String>>,
    listeners: ListenerScope,
    on_drag_end: DragEndCallback,
    on_drag_start: Option<DragStartCallback>,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("registry", &self.registry)
            .field("session", &self.session)
            .field("config", &self.config)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// Coordinator with default config, the thread-wide announcement slot
    /// and no start callback.
    #[must_use]
    pub fn new(on_drag_end: impl FnMut(&CompletionEvent) + 'static) -> Self {
        Self::builder(on_drag_end).build()
    }

    #[must_use]
    pub fn builder(on_drag_end: impl FnMut(&CompletionEvent) + 'static) -> CoordinatorBuilder {
        CoordinatorBuilder {
            on_drag_end: Box::new(on_drag_end),
            on_drag_start: None,
            config: DragConfig::default(),
            announcer: None,
            listener_host: None,
        }
    }

    // --- Registry --------------------------------------------------------

    /// Register a container, replacing any previous entry with the same id.
    pub fn register(&mut self, id: impl Into<String>, orientation: Orientation) {
        self.register_entry(ContainerEntry::new(id, orientation));
    }

    /// Register a fully specified container entry.
    pub fn register_entry(&mut self, entry: ContainerEntry) {
        tracing::trace!(
            target: "dragline",
            container = %entry.id,
            orientation = entry.orientation.as_str(),
            drop_disabled = entry.drop_disabled,
            "register container"
        );
        self.registry.insert(entry);
    }

    /// Remove a container. If it is the hovered container of the active
    /// session, the session stops hovering anything.
    pub fn unregister(&mut self, id: &str) -> Option<ContainerEntry> {
        let removed = self.registry.remove(id)?;
        if let Some(session) = self.session.as_mut()
            && session.hovered_container_id() == Some(id)
            && session.set_hover(None, None)
        {
            tracing::debug!(target: "dragline", container = id, "hovered container unmounted");
            self.announcer
                .announce(announce::hovering(session.dragged_id(), None));
        }
        Some(removed)
    }

    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // --- State -----------------------------------------------------------

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Id of the item being dragged, if any.
    #[must_use]
    pub fn active_drag_id(&self) -> Option<&str> {
        self.session.as_ref().map(Session::dragged_id)
    }

    /// Push-style handle on the active drag id, for overlays.
    #[must_use]
    pub fn watch_active_drag(&self) -> Observable<Option<String>> {
        self.active_drag.clone()
    }

    #[must_use]
    pub fn announcer(&self) -> &AnnouncementSlot {
        &self.announcer
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// True while the session's global listeners are installed.
    #[must_use]
    pub fn listeners_attached(&self) -> bool {
        self.listeners.is_attached()
    }

    // --- Transitions -----------------------------------------------------

    /// `Idle -> Dragging`. The new session starts over its own container.
    ///
    /// An item whose container is not registered cannot be picked up
    /// ([`DragError::UnknownContainer`]).
    pub fn start_drag(
        &mut self,
        item_id: &str,
        container_id: &str,
        index: usize,
    ) -> Result<(), DragError> {
        let _span = tracing::debug_span!(
            target: "dragline",
            "start_drag",
            item = item_id,
            container = container_id,
            index
        )
        .entered();

        if let Some(active) = &self.session {
            tracing::warn!(
                target: "dragline",
                active = active.dragged_id(),
                "start_drag ignored: session already active"
            );
            return Err(DragError::AlreadyDragging {
                active: active.dragged_id().to_string(),
            });
        }
        if !self.registry.contains(container_id) {
            tracing::warn!(target: "dragline", "start_drag ignored: container not registered");
            return Err(DragError::UnknownContainer {
                id: container_id.to_string(),
            });
        }

        let origin = Location::new(container_id, index);
        self.session = Some(Session::new(item_id.to_string(), origin.clone()));
        self.listeners.acquire();
        tracing::debug!(target: "dragline", "session started");

        let mut deferred = Deferred::default();
        deferred.run("announcer", || {
            self.announcer.announce(announce::picked_up(item_id));
        });
        deferred.run("active_drag", || {
            self.active_drag.set(Some(item_id.to_string()));
        });
        if let Some(callback) = self.on_drag_start.as_mut() {
            let info = DragStartInfo {
                draggable_id: item_id.to_string(),
                source: origin,
            };
            deferred.run("on_drag_start", || callback(&info));
        }
        deferred.resume();
        Ok(())
    }

    /// Move the hover to `container`, or to nothing. Unknown and
    /// drop-disabled containers count as nothing. Returns whether the hover
    /// changed.
    pub fn set_hovered(&mut self, container: Option<&str>) -> Result<bool, DragError> {
        self.set_hovered_at(container, None)
    }

    /// Like [`set_hovered`](Self::set_hovered), also recording a candidate
    /// insertion index used when the session ends without an explicit index.
    pub fn set_hovered_at(
        &mut self,
        container: Option<&str>,
        index: Option<usize>,
    ) -> Result<bool, DragError> {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(target: "dragline", "set_hovered ignored: idle");
            return Err(DragError::NotDragging);
        };
        let target = self
            .registry
            .resolve_target(container)
            .map(|e| e.id.clone());
        if !session.set_hover(target, index) {
            return Ok(false);
        }
        tracing::debug!(
            target: "dragline",
            hovered = session.hovered_container_id(),
            index = session.hovered_index(),
            "hover changed"
        );
        self.announcer.announce(announce::hovering(
            session.dragged_id(),
            session.hovered_container_id(),
        ));
        Ok(true)
    }

    /// `Dragging -> Idle`. A valid `container` yields a drop; anything else
    /// yields a cancel.
    ///
    /// Without an explicit `index`, the destination index is the candidate
    /// index recorded for that container, else its reported item count
    /// (append), else 0.
    pub fn end(
        &mut self,
        container: Option<&str>,
        index: Option<usize>,
    ) -> Result<CompletionEvent, DragError> {
        let Some(session) = self.session.take() else {
            tracing::debug!(target: "dragline", "end ignored: idle");
            return Err(DragError::NotDragging);
        };
        let event = match self.registry.resolve_target(container) {
            Some(entry) => {
                let candidate = (session.hovered_container_id() == Some(entry.id.as_str()))
                    .then(|| session.hovered_index())
                    .flatten();
                let index = index
                    .or(candidate)
                    .or(entry.item_count)
                    .unwrap_or(0);
                let destination = Location::new(entry.id.clone(), index);
                CompletionEvent::dropped(session, destination)
            }
            None => CompletionEvent::cancelled(session),
        };
        Ok(self.finish(event))
    }

    /// `Dragging -> Idle` with `reason = cancel`, whatever is hovered.
    pub fn cancel(&mut self) -> Result<CompletionEvent, DragError> {
        let Some(session) = self.session.take() else {
            tracing::debug!(target: "dragline", "cancel ignored: idle");
            return Err(DragError::NotDragging);
        };
        Ok(self.finish(CompletionEvent::cancelled(session)))
    }

    /// Settle the idle state, then notify observers and the caller.
    fn finish(&mut self, event: CompletionEvent) -> CompletionEvent {
        self.listeners.release();
        tracing::debug!(
            target: "dragline",
            item = %event.dragged_id,
            reason = event.reason.as_str(),
            destination = event.destination.as_ref().map(|d| d.container_id.as_str()),
            "session ended"
        );

        let mut deferred = Deferred::default();
        deferred.run("announcer", || self.announcer.clear());
        deferred.run("active_drag", || {
            self.active_drag.set(None);
        });
        let callback = &mut self.on_drag_end;
        deferred.run("on_drag_end", || callback(&event));
        deferred.resume();
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DropReason;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<CompletionEvent>>>;

    fn board() -> (Coordinator, Log) {
        let log: Log = Rc::default();
        let sink = Rc::clone(&log);
        let mut c = Coordinator::builder(move |ev| sink.borrow_mut().push(ev.clone()))
            .announcer(AnnouncementSlot::new())
            .build();
        c.register("todo", Orientation::Vertical);
        c.register("done", Orientation::Vertical);
        (c, log)
    }

    #[test]
    fn start_enters_dragging_over_origin() {
        let (mut c, _) = board();
        c.start_drag("item-1", "todo", 0).unwrap();
        assert_eq!(c.phase(), DragPhase::Dragging);
        let s = c.session().unwrap();
        assert_eq!(s.hovered_container_id(), Some("todo"));
        assert_eq!(c.announcer().current(), "Dragging item item-1.");
        assert!(c.listeners_attached());
        assert_eq!(c.watch_active_drag().get().as_deref(), Some("item-1"));
    }

    #[test]
    fn drop_into_other_container() {
        let (mut c, log) = board();
        c.start_drag("item-1", "todo", 0).unwrap();
        assert_eq!(c.set_hovered(Some("done")), Ok(true));
        let ev = c.end(Some("done"), Some(0)).unwrap();
        assert_eq!(ev.destination, Some(Location::new("done", 0)));
        assert_eq!(ev.reason, DropReason::Drop);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(c.phase(), DragPhase::Idle);
        assert_eq!(c.announcer().current(), "");
        assert!(!c.listeners_attached());
        assert_eq!(c.watch_active_drag().get(), None);
    }

    #[test]
    fn repeated_hover_is_noop() {
        let (mut c, _) = board();
        c.start_drag("a", "todo", 0).unwrap();
        let v = c.announcer().version();
        assert_eq!(c.set_hovered(Some("todo")), Ok(false));
        assert_eq!(c.announcer().version(), v);
    }

    #[test]
    fn unknown_hover_counts_as_none() {
        let (mut c, _) = board();
        c.start_drag("a", "todo", 0).unwrap();
        assert_eq!(c.set_hovered(Some("ghost")), Ok(true));
        assert_eq!(c.session().unwrap().hovered_container_id(), None);
        assert_eq!(
            c.announcer().current(),
            "Dragging item a. Not over a drop target."
        );
    }

    #[test]
    fn drop_disabled_container_is_not_a_target() {
        let (mut c, _) = board();
        c.register_entry(
            ContainerEntry::new("archive", Orientation::Vertical).with_drop_disabled(true),
        );
        c.start_drag("a", "todo", 0).unwrap();
        c.set_hovered(Some("archive")).unwrap();
        assert_eq!(c.session().unwrap().hovered_container_id(), None);
        let ev = c.end(Some("archive"), Some(1)).unwrap();
        assert_eq!(ev.reason, DropReason::Cancel);
    }

    #[test]
    fn start_requires_registered_origin() {
        let (mut c, log) = board();
        assert_eq!(
            c.start_drag("a", "ghost", 0),
            Err(DragError::UnknownContainer { id: "ghost".into() })
        );
        assert!(!c.is_dragging());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn index_defaults_candidate_then_item_count_then_zero() {
        let (mut c, _) = board();
        c.register_entry(ContainerEntry::new("done", Orientation::Vertical).with_item_count(5));
        let dest = |ev: CompletionEvent| ev.destination.unwrap();

        c.start_drag("a", "todo", 0).unwrap();
        c.set_hovered_at(Some("done"), Some(2)).unwrap();
        assert_eq!(dest(c.end(Some("done"), None).unwrap()), Location::new("done", 2));

        c.start_drag("a", "todo", 0).unwrap();
        c.set_hovered(Some("done")).unwrap();
        assert_eq!(dest(c.end(Some("done"), None).unwrap()), Location::new("done", 5));

        c.start_drag("a", "todo", 0).unwrap();
        assert_eq!(dest(c.end(Some("todo"), None).unwrap()), Location::new("todo", 0));
    }

    #[test]
    fn candidate_index_only_applies_to_its_container() {
        let (mut c, _) = board();
        c.start_drag("a", "todo", 0).unwrap();
        c.set_hovered_at(Some("done"), Some(3)).unwrap();
        let ev = c.end(Some("todo"), None).unwrap();
        assert_eq!(ev.destination, Some(Location::new("todo", 0)));
    }

    #[test]
    fn on_drag_start_receives_origin() {
        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        let mut c = Coordinator::builder(|_| {})
            .on_drag_start(move |info| *s.borrow_mut() = Some(info.clone()))
            .announcer(AnnouncementSlot::new())
            .build();
        c.register("todo", Orientation::Horizontal);
        c.start_drag("card", "todo", 3).unwrap();
        let info = seen.borrow().clone().unwrap();
        assert_eq!(info.draggable_id, "card");
        assert_eq!(info.source, Location::new("todo", 3));
    }

    #[test]
    fn panicking_on_drag_end_leaves_idle() {
        let mut c = Coordinator::builder(|_| panic!("caller bug"))
            .announcer(AnnouncementSlot::new())
            .build();
        c.register("todo", Orientation::Vertical);
        c.start_drag("a", "todo", 0).unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| c.cancel()));
        assert!(result.is_err());
        assert_eq!(c.phase(), DragPhase::Idle);
        assert!(!c.listeners_attached());
        assert_eq!(c.announcer().current(), "");
        assert!(c.start_drag("b", "todo", 0).is_ok());
    }

    #[test]
    fn panicking_on_drag_start_keeps_session() {
        let ended = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&ended);
        let mut c = Coordinator::builder(move |_| *counter.borrow_mut() += 1)
            .on_drag_start(|_| panic!("caller bug"))
            .announcer(AnnouncementSlot::new())
            .build();
        c.register("todo", Orientation::Vertical);

        let result = panic::catch_unwind(AssertUnwindSafe(|| c.start_drag("a", "todo", 2)));
        assert!(result.is_err());
        assert!(c.is_dragging());
        assert!(c.listeners_attached());
        assert_eq!(c.session().unwrap().origin(), &Location::new("todo", 2));
        assert_eq!(c.watch_active_drag().get().as_deref(), Some("a"));

        let ev = c.cancel().unwrap();
        assert_eq!(ev.reason, DropReason::Cancel);
        assert_eq!(*ended.borrow(), 1);
    }

    #[test]
    fn panicking_subscriber_does_not_skip_on_drag_end() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let slot = AnnouncementSlot::new();
        let _sub = slot.subscribe(|text| {
            if text.is_empty() {
                panic!("live region bug");
            }
        });
        let mut c = Coordinator::builder(move |_| *counter.borrow_mut() += 1)
            .announcer(slot)
            .build();
        c.register("todo", Orientation::Vertical);
        c.start_drag("a", "todo", 0).unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| c.cancel()));
        assert!(result.is_err());
        assert!(!c.is_dragging());
        assert!(!c.listeners_attached());
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(c.watch_active_drag().get(), None);
    }

    #[test]
    fn panicking_subscriber_on_start_still_publishes_active_drag() {
        let slot = AnnouncementSlot::new();
        let _sub = slot.subscribe(|text| {
            if !text.is_empty() {
                panic!("live region bug");
            }
        });
        let mut c = Coordinator::builder(|_| {}).announcer(slot).build();
        c.register("todo", Orientation::Vertical);

        let result = panic::catch_unwind(AssertUnwindSafe(|| c.start_drag("a", "todo", 0)));
        assert!(result.is_err());
        assert!(c.is_dragging());
        assert_eq!(c.watch_active_drag().get().as_deref(), Some("a"));
        assert_eq!(c.announcer().current(), "Dragging item a.");
    }

    #[test]
    fn unregister_non_hovered_keeps_hover() {
        let (mut c, _) = board();
        c.start_drag("a", "todo", 0).unwrap();
        assert!(c.unregister("done").is_some());
        assert_eq!(c.session().unwrap().hovered_container_id(), Some("todo"));
        assert!(c.unregister("done").is_none());
    }
}
