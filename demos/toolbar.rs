//! Toolbar walkthrough: a horizontal roving-focus group with a disabled
//! button, driven from a scripted key sequence.
//!
//! Run with `RUST_LOG=debug cargo run --example toolbar` to see the
//! controller's decisions.

use std::rc::Rc;

use rove::prelude::*;

struct Button {
    label: &'static str,
}

impl FocusTarget for Button {
    fn focus(&self) {
        println!("   focus -> [{}]", self.label);
    }
}

fn render(group: &FocusGroup, items: &[FocusItem]) {
    let row: Vec<String> = items
        .iter()
        .map(|item| {
            let marker = if item.tab_index() == 0 { "*" } else { "" };
            let state = if item.is_disabled() { "disabled" } else { "enabled" };
            format!("[{}{} ({state})]", item.id(), marker)
        })
        .collect();
    println!(
        "   {}  current: {:?}",
        row.join(" "),
        group.current_focused_id().map(|id| id.to_string())
    );
}

fn main() {
    env_logger::init();

    let group = create_focus_group(
        GroupConfig::new()
            .direction(Direction::Horizontal)
            .loop_focus(true),
    );

    let buttons: Vec<Rc<Button>> = ["open", "save", "export", "share"]
        .into_iter()
        .map(|label| Rc::new(Button { label }))
        .collect();
    let items: Vec<FocusItem> = buttons
        .iter()
        .map(|button| {
            focus_item(button)
                .id(button.label)
                .group(group.clone())
                .mount()
                .expect("toolbar ids are unique")
        })
        .collect();

    // Export is greyed out today; arrow navigation skips it but it keeps
    // its spot for when it comes back.
    items[2].set_disabled(true);

    println!("pointer click lands on [open]");
    items[0].handle_event(&Event::FocusIn { bubbled: false });
    render(&group, &items);

    for key in [Key::Right, Key::Right, Key::Right, Key::End, Key::Home] {
        println!("press {key:?}");
        let response = items[0].handle_event(&Event::KeyDown {
            key,
            modifiers: Modifiers::default(),
        });
        if response == EventResponse::Ignored {
            println!("   (not consumed)");
        }
        render(&group, &items);
    }

    println!("re-enable [export] and walk right from [open]");
    items[2].set_disabled(false);
    items[0].handle_event(&Event::FocusIn { bubbled: false });
    for _ in 0..2 {
        items[0].handle_event(&Event::KeyDown {
            key: Key::Right,
            modifiers: Modifiers::default(),
        });
    }
    render(&group, &items);
}
