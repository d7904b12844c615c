//! Vertical menu behind an ambient scope: entries mount without an
//! explicit group handle and pick up the nearest provider, the way a
//! widget tree would wire them up.

use std::rc::Rc;

use rove::prelude::*;

struct MenuEntry {
    label: &'static str,
}

impl FocusTarget for MenuEntry {
    fn focus(&self) {
        println!("   focus -> {}", self.label);
    }
}

fn main() {
    env_logger::init();

    let group = create_focus_group(
        GroupConfig::new()
            .direction(Direction::Vertical)
            .loop_focus(false)
            .default_focus_id("new-file"),
    );

    let entries: Vec<Rc<MenuEntry>> = ["new-file", "open-recent", "close"]
        .into_iter()
        .map(|label| Rc::new(MenuEntry { label }))
        .collect();

    // Inside the scope, entries find the menu's controller ambiently.
    let items: Vec<FocusItem> = with_group_scope(&group, || {
        entries
            .iter()
            .map(|entry| {
                focus_item(entry)
                    .id(entry.label)
                    .mount()
                    .expect("menu ids are unique")
            })
            .collect()
    });

    // Before any real focus event, the configured default is the single
    // Tab-reachable stop.
    for item in &items {
        println!("{}: tab_index {}", item.id(), item.tab_index());
    }

    println!("press Down twice, then Down again at the bottom (no loop)");
    for key in [Key::Down, Key::Down, Key::Down] {
        let response = group.handle_key_down(key, Modifiers::default());
        println!(
            "   {key:?}: {response:?}, current {:?}",
            group.current_focused_id().map(|id| id.to_string())
        );
    }

    // Unmounting the focused entry clears the focus record instead of
    // leaving it dangling.
    let mut items = items;
    let closed = items.pop().expect("three items mounted");
    println!("unmount {}", closed.id());
    drop(closed);
    println!("current after unmount: {:?}", group.current_focused_id());

    println!("press Home");
    group.handle_key_down(Key::Home, Modifiers::default());
    println!(
        "current: {:?}",
        group.current_focused_id().map(|id| id.to_string())
    );
}
