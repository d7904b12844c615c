//! Item-side wrapper: registration lifecycle, focus reporting, and the
//! roving tab stop.
//!
//! A [`FocusItem`] bridges one focusable element into a group's registry.
//! It registers itself when mounted, releases the registration when dropped
//! (every exit path, including early unmount), reports focus events that
//! land on the element itself, and computes whether the element is the
//! group's single Tab-reachable stop.
//!
//! An item mounted with no group (neither explicit nor ambient) is not an
//! error. It degrades to an inert standalone element: normal tab order, no
//! arrow-key behavior, every event passed through. The same wrapper is
//! meant to be reusable outside any group.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::event::{Event, EventResponse};
use crate::group::{FocusGroup, ItemId, RegisterError, Registration};
use crate::scope::current_group;
use crate::target::FocusTarget;

/// Builder for [`FocusItem`]. Created via [`focus_item`].
pub struct FocusItemBuilder {
    target: Weak<dyn FocusTarget>,
    id: Option<ItemId>,
    group: Option<FocusGroup>,
    disabled: bool,
    focusable: bool,
    tab_stop_id: Option<ItemId>,
}

/// Start building a focus-group item around `target`.
///
/// The item holds only a weak reference — it never keeps the element alive.
pub fn focus_item(target: &Rc<impl FocusTarget + 'static>) -> FocusItemBuilder {
    let target: Rc<dyn FocusTarget> = target.clone();
    let weak: Weak<dyn FocusTarget> = Rc::downgrade(&target);
    FocusItemBuilder {
        target: weak,
        id: None,
        group: None,
        disabled: false,
        focusable: true,
        tab_stop_id: None,
    }
}

impl FocusItemBuilder {
    /// Stable id within the group. Generated when omitted.
    pub fn id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach to this group instead of the ambient one.
    pub fn group(mut self, group: FocusGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// Disabled items are skipped by arrow navigation but keep their
    /// registry slot, so re-enabling restores their position.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the item participates in the focus group at all.
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Force a specific id to count as this item's tab stop before any real
    /// focus event has occurred.
    pub fn tab_stop_id(mut self, id: impl Into<ItemId>) -> Self {
        self.tab_stop_id = Some(id.into());
        self
    }

    /// Finish the item: resolve the group (explicit, else ambient, else
    /// standalone) and register when participating.
    ///
    /// Fails only on a duplicate id, a caller bug surfaced at mount time.
    pub fn mount(self) -> Result<FocusItem, RegisterError> {
        let id = self.id.unwrap_or_else(ItemId::auto);
        let group = self.group.or_else(current_group);

        let registration = match &group {
            Some(g) if self.focusable => Some(g.register_item(
                Some(id.clone()),
                self.target.clone(),
                self.disabled,
            )?),
            Some(_) => None,
            None => {
                log::trace!("focus item `{id}` mounted standalone (no ambient group)");
                None
            }
        };

        Ok(FocusItem {
            id,
            group,
            registration: RefCell::new(registration),
            disabled: Cell::new(self.disabled),
            focusable: Cell::new(self.focusable),
            target: self.target,
            tab_stop_id: self.tab_stop_id,
        })
    }
}

/// One participant in a focus group.
///
/// Dropping the item releases its registration exactly once.
pub struct FocusItem {
    id: ItemId,
    group: Option<FocusGroup>,
    registration: RefCell<Option<Registration>>,
    disabled: Cell<bool>,
    focusable: Cell<bool>,
    target: Weak<dyn FocusTarget>,
    tab_stop_id: Option<ItemId>,
}

impl FocusItem {
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// True when the item was mounted outside any group and operates as a
    /// plain non-roving element.
    pub fn is_standalone(&self) -> bool {
        self.group.is_none()
    }

    /// Whether this item is the group's single sequential (Tab) stop.
    ///
    /// A standalone item is its own tab stop.
    pub fn is_current_tab_stop(&self) -> bool {
        let Some(group) = &self.group else {
            return true;
        };
        let current = group.current_focused_id();
        if current.as_ref() == Some(&self.id) {
            return true;
        }
        match (&self.tab_stop_id, &current) {
            (Some(forced), Some(cur)) => forced == cur,
            _ => false,
        }
    }

    /// Roving tabindex: `0` for the single sequential stop, `-1` for
    /// everything else. Disabled or non-focusable items are never `0`.
    pub fn tab_index(&self) -> i32 {
        if !self.disabled.get() && self.focusable.get() && self.is_current_tab_stop() {
            0
        } else {
            -1
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    /// Toggle the disabled flag, keeping the registry slot (and therefore
    /// the navigation position) intact.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
        if let Some(group) = &self.group {
            group.set_item_disabled(&self.id, disabled);
        }
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable.get()
    }

    /// Toggle participation entirely.
    ///
    /// `false` releases the registration; `true` registers again, at the
    /// tail of the navigation order. Re-registering can fail if another
    /// item claimed the id in the meantime.
    pub fn set_focusable(&self, focusable: bool) -> Result<(), RegisterError> {
        if focusable == self.focusable.get() {
            return Ok(());
        }
        self.focusable.set(focusable);
        let Some(group) = &self.group else {
            return Ok(());
        };
        if focusable {
            let registration = group.register_item(
                Some(self.id.clone()),
                self.target.clone(),
                self.disabled.get(),
            )?;
            *self.registration.borrow_mut() = Some(registration);
        } else {
            // Dropping the token unregisters.
            self.registration.borrow_mut().take();
        }
        Ok(())
    }

    /// Answer an input event delivered to this item's element.
    ///
    /// Focus gained by the element itself is reported to the group; focus
    /// that actually landed on a descendant is not: nested interactive
    /// content must not masquerade as a group member. Key presses are
    /// interpreted by the group. Standalone items pass everything through.
    pub fn handle_event(&self, event: &Event) -> EventResponse {
        let Some(group) = &self.group else {
            return EventResponse::Ignored;
        };
        match event {
            Event::FocusIn { bubbled: false } => {
                group.on_item_focus(&self.id);
                EventResponse::Handled
            }
            Event::FocusIn { bubbled: true } => EventResponse::Ignored,
            Event::KeyDown { key, modifiers } => group.handle_key_down(*key, *modifiers),
            Event::KeyUp { .. } | Event::FocusOut => EventResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, Modifiers};
    use crate::group::{create_focus_group, GroupConfig};
    use crate::scope::with_group_scope;

    #[derive(Default)]
    struct Probe {
        focus_count: Cell<u32>,
    }

    impl FocusTarget for Probe {
        fn focus(&self) {
            self.focus_count.set(self.focus_count.get() + 1);
        }
    }

    fn key_down(key: Key) -> Event {
        Event::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }

    fn mounted(g: &FocusGroup, id: &str) -> (Rc<Probe>, FocusItem) {
        let probe = Rc::new(Probe::default());
        let item = focus_item(&probe).id(id).group(g.clone()).mount().unwrap();
        (probe, item)
    }

    #[test]
    fn test_mount_registers_and_drop_releases() {
        let g = create_focus_group(GroupConfig::new());
        let (_p, item) = mounted(&g, "a");
        assert_eq!(g.item_count(), 1);
        drop(item);
        assert_eq!(g.item_count(), 0);
    }

    #[test]
    fn test_duplicate_id_surfaces_at_mount() {
        let g = create_focus_group(GroupConfig::new());
        let (_p, _item) = mounted(&g, "a");
        let probe = Rc::new(Probe::default());
        let err = focus_item(&probe).id("a").group(g.clone()).mount();
        assert!(err.is_err());
    }

    #[test]
    fn test_ambient_group_is_picked_up() {
        let g = create_focus_group(GroupConfig::new());
        let probe = Rc::new(Probe::default());
        let item = with_group_scope(&g, || focus_item(&probe).id("a").mount().unwrap());
        assert!(!item.is_standalone());
        assert_eq!(g.item_count(), 1);
    }

    #[test]
    fn test_standalone_fallback_is_inert() {
        let probe = Rc::new(Probe::default());
        let item = focus_item(&probe).id("a").mount().unwrap();

        assert!(item.is_standalone());
        // A plain element keeps normal tab order…
        assert!(item.is_current_tab_stop());
        assert_eq!(item.tab_index(), 0);
        // …and no roving behavior: everything passes through.
        assert_eq!(item.handle_event(&key_down(Key::Right)), EventResponse::Ignored);
        assert_eq!(
            item.handle_event(&Event::FocusIn { bubbled: false }),
            EventResponse::Ignored
        );
        assert_eq!(probe.focus_count.get(), 0);
    }

    #[test]
    fn test_direct_focus_is_reported_bubbled_is_not() {
        let g = create_focus_group(GroupConfig::new());
        let (_pa, a) = mounted(&g, "a");

        assert_eq!(
            a.handle_event(&Event::FocusIn { bubbled: true }),
            EventResponse::Ignored
        );
        assert_eq!(g.current_focused_id(), None);

        assert_eq!(
            a.handle_event(&Event::FocusIn { bubbled: false }),
            EventResponse::Handled
        );
        assert_eq!(g.current_focused_id(), Some("a".into()));
    }

    #[test]
    fn test_key_presses_are_forwarded_to_the_group() {
        let g = create_focus_group(GroupConfig::new());
        let (_pa, a) = mounted(&g, "a");
        let (pb, _b) = mounted(&g, "b");

        a.handle_event(&Event::FocusIn { bubbled: false });
        assert_eq!(a.handle_event(&key_down(Key::Right)), EventResponse::Handled);
        assert_eq!(pb.focus_count.get(), 1);
        assert_eq!(g.current_focused_id(), Some("b".into()));
    }

    #[test]
    fn test_single_tab_stop_invariant() {
        let g = create_focus_group(GroupConfig::new());
        let (_pa, a) = mounted(&g, "a");
        let (_pb, b) = mounted(&g, "b");
        let (_pc, c) = mounted(&g, "c");

        b.handle_event(&Event::FocusIn { bubbled: false });
        let stops: Vec<i32> = [&a, &b, &c].iter().map(|i| i.tab_index()).collect();
        assert_eq!(stops, vec![-1, 0, -1]);
    }

    #[test]
    fn test_tab_stop_id_override() {
        let g = create_focus_group(GroupConfig::new().default_focus_id("b"));
        let probe = Rc::new(Probe::default());
        let item = focus_item(&probe)
            .id("a")
            .tab_stop_id("b")
            .group(g.clone())
            .mount()
            .unwrap();

        // The forced id matches the group's current id, so this item claims
        // the tab stop even though it is not focused itself.
        assert!(item.is_current_tab_stop());
        assert_eq!(item.tab_index(), 0);
    }

    #[test]
    fn test_disabled_item_is_never_the_tab_stop() {
        let g = create_focus_group(GroupConfig::new());
        let (_pa, a) = mounted(&g, "a");
        a.handle_event(&Event::FocusIn { bubbled: false });
        assert_eq!(a.tab_index(), 0);

        a.set_disabled(true);
        assert!(a.is_disabled());
        assert_eq!(a.tab_index(), -1);
    }

    #[test]
    fn test_set_disabled_syncs_the_registry() {
        let g = create_focus_group(GroupConfig::new());
        let (_pa, a) = mounted(&g, "a");
        let (_pb, b) = mounted(&g, "b");
        let (pc, _c) = mounted(&g, "c");

        b.set_disabled(true);
        a.handle_event(&Event::FocusIn { bubbled: false });
        assert_eq!(a.handle_event(&key_down(Key::Right)), EventResponse::Handled);
        assert_eq!(pc.focus_count.get(), 1);
        let _ = b;
    }

    #[test]
    fn test_focusable_false_skips_registration() {
        let g = create_focus_group(GroupConfig::new());
        let probe = Rc::new(Probe::default());
        let item = focus_item(&probe)
            .id("a")
            .focusable(false)
            .group(g.clone())
            .mount()
            .unwrap();
        assert_eq!(g.item_count(), 0);
        assert_eq!(item.tab_index(), -1);
    }

    #[test]
    fn test_focusable_toggle_releases_and_reregisters() {
        let g = create_focus_group(GroupConfig::new());
        let (_pa, a) = mounted(&g, "a");
        assert_eq!(g.item_count(), 1);

        a.set_focusable(false).unwrap();
        assert_eq!(g.item_count(), 0);

        a.set_focusable(true).unwrap();
        assert_eq!(g.item_count(), 1);
        assert!(a.is_focusable());
    }
}
