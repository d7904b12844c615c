//! Focus-group controller: ordered item registry plus keyboard navigation.
//!
//! A [`FocusGroup`] owns the identity-to-slot mapping for a set of sibling
//! focusable items and decides, per directional key press, which item should
//! receive focus next. Items never reach into each other; they only submit
//! register/unregister/focus-report requests through the group handle.
//!
//! ## Registry
//!
//! Entries live in a `Vec` in registration order, because that order *is*
//! the navigation order. Lookup is a linear scan: a group holds a handful
//! of items (toolbar buttons, menu entries), so this fits in a cache line
//! or two and avoids map overhead.
//!
//! ## Ownership
//!
//! The registry stores `Weak<dyn FocusTarget>` handles: registering with a
//! group never extends an element's lifetime. Symmetrically, the
//! [`Registration`] cleanup token holds only a weak reference back to the
//! group, so releasing it after the group was torn down is a no-op rather
//! than a use-after-teardown error.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::{EventResponse, Key, Modifiers};
use crate::target::FocusTarget;

/// Stable identifier of an item within a focus group.
///
/// Callers usually supply one (`"save-button".into()`); [`ItemId::auto`]
/// generates a fresh one for anonymous items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(Rc<str>);

static NEXT_AUTO_ID: AtomicU64 = AtomicU64::new(0);

impl ItemId {
    /// Generate a fresh id for callers that don't supply one.
    pub fn auto() -> Self {
        let n = NEXT_AUTO_ID.fetch_add(1, Ordering::Relaxed);
        ItemId(format!("focus-item-{n}").into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(Rc::from(s))
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(Rc::from(s.as_str()))
    }
}

/// Which arrow keys a group responds to.
///
/// `Home`/`End` always navigate, regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Left/Right arrows move focus.
    #[default]
    Horizontal,
    /// Up/Down arrows move focus.
    Vertical,
    /// All four arrows move focus.
    Both,
}

impl Direction {
    fn accepts_horizontal(self) -> bool {
        matches!(self, Direction::Horizontal | Direction::Both)
    }

    fn accepts_vertical(self) -> bool {
        matches!(self, Direction::Vertical | Direction::Both)
    }
}

/// Configuration for a focus group. Build one with the chained setters and
/// pass it to [`create_focus_group`].
#[derive(Debug, Clone)]
pub struct GroupConfig {
    pub direction: Direction,
    /// Whether navigation wraps past the ends of the group.
    pub loop_focus: bool,
    /// Item treated as the focused tab stop before any real focus event.
    pub default_focus_id: Option<ItemId>,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            loop_focus: true,
            default_focus_id: None,
        }
    }
}

impl GroupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Synonym for [`direction`](Self::direction).
    pub fn orientation(self, direction: Direction) -> Self {
        self.direction(direction)
    }

    pub fn loop_focus(mut self, looping: bool) -> Self {
        self.loop_focus = looping;
        self
    }

    pub fn default_focus_id(mut self, id: impl Into<ItemId>) -> Self {
        self.default_focus_id = Some(id.into());
        self
    }
}

/// Errors surfaced by [`FocusGroup::register_item`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    /// An item with this id is already registered in the group. Overwriting
    /// it silently would corrupt the navigation order undetectably, so
    /// registration fails fast instead.
    #[error("focus item id `{0}` is already registered in this group")]
    DuplicateId(ItemId),
}

struct Entry {
    id: ItemId,
    target: Weak<dyn FocusTarget>,
    disabled: bool,
}

struct GroupState {
    config: GroupConfig,
    entries: Vec<Entry>,
    current: Option<ItemId>,
}

/// Handle to a focus-group controller.
///
/// Cheap to clone; all clones share the same state. Created via
/// [`create_focus_group`]. The group lives as long as any handle does;
/// item [`Registration`]s hold only weak references.
#[derive(Clone)]
pub struct FocusGroup {
    state: Rc<RefCell<GroupState>>,
}

/// Create a new focus-group controller.
pub fn create_focus_group(config: GroupConfig) -> FocusGroup {
    FocusGroup {
        state: Rc::new(RefCell::new(GroupState {
            current: config.default_focus_id.clone(),
            entries: Vec::new(),
            config,
        })),
    }
}

impl FocusGroup {
    /// Insert an item at the end of the navigation order.
    ///
    /// `id` falls back to [`ItemId::auto`] when absent. A duplicate id is a
    /// caller bug and fails immediately. The returned [`Registration`] must
    /// be kept for as long as the item participates; releasing it (or
    /// dropping it) removes the item again.
    pub fn register_item(
        &self,
        id: Option<ItemId>,
        target: Weak<dyn FocusTarget>,
        disabled: bool,
    ) -> Result<Registration, RegisterError> {
        let id = id.unwrap_or_else(ItemId::auto);
        let mut state = self.state.borrow_mut();
        if state.entries.iter().any(|e| e.id == id) {
            return Err(RegisterError::DuplicateId(id));
        }
        log::debug!("register focus item `{id}` (disabled: {disabled})");
        state.entries.push(Entry {
            id: id.clone(),
            target,
            disabled,
        });
        Ok(Registration {
            state: Rc::downgrade(&self.state),
            id,
            released: Cell::new(false),
        })
    }

    /// Record that `id` just received real input focus, through any means:
    /// keyboard navigation, pointer click, or a programmatic call.
    ///
    /// Reports for ids no longer in the registry are dropped silently:
    /// they legitimately race with unregistration during unmount, and
    /// recording one would leave the focus record dangling.
    pub fn on_item_focus(&self, id: &ItemId) {
        let mut state = self.state.borrow_mut();
        if state.entries.iter().any(|e| e.id == *id) {
            state.current = Some(id.clone());
        } else {
            log::trace!("focus report for unknown item `{id}` dropped");
        }
    }

    /// The item last known to hold focus, if any.
    pub fn current_focused_id(&self) -> Option<ItemId> {
        self.state.borrow().current.clone()
    }

    /// Flip an item's disabled flag in place.
    ///
    /// The entry keeps its registry slot, so re-enabling restores the item
    /// at its original position in the navigation order. Unknown ids are
    /// ignored.
    pub fn set_item_disabled(&self, id: &ItemId, disabled: bool) {
        let mut state = self.state.borrow_mut();
        if let Some(entry) = state.entries.iter_mut().find(|e| e.id == *id) {
            entry.disabled = disabled;
        }
    }

    /// Number of registered items, disabled ones included.
    pub fn item_count(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Interpret a key press that happened while focus was inside the group.
    ///
    /// Returns [`EventResponse::Handled`] exactly when a navigation decision
    /// was made, which is the caller's signal to suppress the key's default
    /// action. Keys outside the navigation set, chord-modified presses, keys
    /// the group's direction doesn't accept, and boundary presses in a
    /// non-looping group are all inert passthroughs. Never panics: this runs
    /// live during user interaction.
    pub fn handle_key_down(&self, key: Key, modifiers: Modifiers) -> EventResponse {
        if !key.is_navigation() || modifiers.has_chord_modifier() {
            return EventResponse::Ignored;
        }

        // Decide on a target while the registry is borrowed, then release
        // the borrow before touching the target: `focus()` may re-enter the
        // group through a focus report.
        let decision = {
            let state = self.state.borrow();
            let items: Vec<(&ItemId, &Weak<dyn FocusTarget>)> = state
                .entries
                .iter()
                .filter(|e| !e.disabled)
                .map(|e| (&e.id, &e.target))
                .collect();
            if items.is_empty() {
                return EventResponse::Ignored;
            }
            let last = items.len() - 1;

            let current_index = state
                .current
                .as_ref()
                .and_then(|cur| items.iter().position(|(id, _)| *id == cur));

            let wrap = state.config.loop_focus;
            let next_index = match key {
                Key::Home => Some(0),
                Key::End => Some(last),
                Key::Up | Key::Down if !state.config.direction.accepts_vertical() => None,
                Key::Left | Key::Right if !state.config.direction.accepts_horizontal() => None,
                // Backward: no current focus lands on the first item.
                Key::Up | Key::Left => match current_index {
                    None => Some(0),
                    Some(0) => wrap.then_some(last),
                    Some(i) => Some(i - 1),
                },
                // Forward mirrors backward.
                Key::Down | Key::Right => match current_index {
                    None => Some(0),
                    Some(i) if i < last => Some(i + 1),
                    Some(_) => wrap.then_some(0),
                },
                _ => None,
            };

            next_index.map(|i| {
                let (id, target) = items[i];
                (id.clone(), target.clone())
            })
        };

        let Some((id, target)) = decision else {
            return EventResponse::Ignored;
        };

        let Some(target) = target.upgrade() else {
            // The chosen entry's element is mid-unmount; same tolerance as
            // any other stale-id race.
            log::trace!("navigation target `{id}` is gone, ignoring");
            return EventResponse::Ignored;
        };
        if !target.is_mounted() {
            log::trace!("navigation target `{id}` is detached, ignoring");
            return EventResponse::Ignored;
        }

        log::debug!("moving focus to `{id}`");
        target.focus();
        self.on_item_focus(&id);
        EventResponse::Handled
    }
}

/// Cleanup token returned by [`FocusGroup::register_item`].
///
/// Releasing it removes the item from the registry; this also happens on
/// drop, so an item that ties its `Registration` to its own lifetime can
/// never leak a registry slot. [`unregister`](Self::unregister) is
/// idempotent; defensive double-cleanup is a no-op, not an error.
#[derive(Debug)]
pub struct Registration {
    state: Weak<RefCell<GroupState>>,
    id: ItemId,
    released: Cell<bool>,
}

impl Registration {
    /// The id this registration covers.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Remove the item from the group's registry.
    ///
    /// If the removed item currently holds the group's focus record, the
    /// record is cleared rather than left pointing at a removed id. Safe to
    /// call after the group itself was dropped (no-op) and safe to call
    /// more than once.
    pub fn unregister(&self) {
        if self.released.replace(true) {
            return;
        }
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        state.entries.retain(|e| e.id != self.id);
        if state.current.as_ref() == Some(&self.id) {
            state.current = None;
        }
        log::debug!("unregistered focus item `{}`", self.id);
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.unregister();
    }
}
