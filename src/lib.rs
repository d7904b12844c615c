//! Roving-focus keyboard navigation for composite widgets.
//!
//! Implements the roving-tabindex pattern: of all the sibling items in a
//! composite widget (toolbar, menu, tab list, radio group), exactly one is
//! reachable via sequential Tab navigation at a time; the others are
//! reached with the arrow keys. A [`group::FocusGroup`] owns the navigation
//! order and interprets key presses; each [`item::FocusItem`] registers
//! itself for its own lifetime, reports focus events that land on its
//! element, and exposes the roving tabindex.
//!
//! ```ignore
//! use rove::prelude::*;
//!
//! let group = create_focus_group(GroupConfig::new().direction(Direction::Horizontal));
//! let save = focus_item(&save_button).id("save").group(group.clone()).mount()?;
//! let open = focus_item(&open_button).id("open").group(group.clone()).mount()?;
//!
//! // Route the element's input events through the item:
//! save.handle_event(&Event::FocusIn { bubbled: false });
//! save.handle_event(&Event::KeyDown { key: Key::Right, modifiers: Modifiers::default() });
//! assert_eq!(group.current_focused_id(), Some("open".into()));
//! assert_eq!(open.tab_index(), 0); // the single roving tab stop
//! ```
//!
//! Everything is synchronous and single-threaded, made to live on a UI
//! event loop: no operation blocks, suspends, or takes a lock.

pub mod event;
pub mod group;
pub mod item;
pub mod scope;
pub mod target;

pub mod prelude {
    pub use crate::event::{Event, EventResponse, Key, Modifiers};
    pub use crate::group::{
        create_focus_group, Direction, FocusGroup, GroupConfig, ItemId, RegisterError,
        Registration,
    };
    pub use crate::item::{focus_item, FocusItem, FocusItemBuilder};
    pub use crate::scope::{current_group, expect_group, with_group_scope};
    pub use crate::target::FocusTarget;
}
