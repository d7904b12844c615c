//! Ambient focus-group propagation.
//!
//! Items deep inside a widget tree need the group controller without every
//! intermediate layer threading it through explicitly. [`with_group_scope`]
//! makes a group the ambient provider for the duration of a closure
//! (typically the subtree-construction call), and items pick it up through
//! [`current_group`].
//!
//! Scopes form a stack so groups can nest (a toolbar inside a menu bar):
//! the nearest enclosing provider wins, and the previous provider is
//! restored when the closure returns, even on unwind.
//!
//! Two lookup paths exist on purpose. [`current_group`] returns `None`
//! outside any provider; that is the supported standalone fallback for
//! items used on their own. [`expect_group`] panics with a pointed message
//! and is for call sites where a missing provider is a programming error.

use std::cell::RefCell;

use crate::group::FocusGroup;

thread_local! {
    static GROUP_SCOPES: RefCell<Vec<FocusGroup>> = const { RefCell::new(Vec::new()) };
}

/// Run `f` with `group` as the innermost ambient focus group.
///
/// Items mounted inside `f` without an explicit group attach to this one.
pub fn with_group_scope<R>(group: &FocusGroup, f: impl FnOnce() -> R) -> R {
    GROUP_SCOPES.with(|scopes| scopes.borrow_mut().push(group.clone()));
    // Pop on a guard so a panicking closure can't leave the scope stack
    // pointing at a dead provider.
    struct PopOnDrop;
    impl Drop for PopOnDrop {
        fn drop(&mut self) {
            GROUP_SCOPES.with(|scopes| {
                scopes.borrow_mut().pop();
            });
        }
    }
    let _guard = PopOnDrop;
    f()
}

/// The innermost ambient focus group, or `None` outside any provider.
pub fn current_group() -> Option<FocusGroup> {
    GROUP_SCOPES.with(|scopes| scopes.borrow().last().cloned())
}

/// The innermost ambient focus group, panicking if there is none.
///
/// # Panics
///
/// Panics when called outside [`with_group_scope`]. Use [`current_group`]
/// where standalone usage is legitimate.
pub fn expect_group() -> FocusGroup {
    current_group().unwrap_or_else(|| {
        panic!(
            "No ambient focus group.\n\
             Did you forget to wrap this subtree in with_group_scope()?"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{create_focus_group, GroupConfig};

    #[test]
    fn test_no_provider_outside_a_scope() {
        assert!(current_group().is_none());
    }

    #[test]
    fn test_scope_provides_and_restores() {
        let g = create_focus_group(GroupConfig::new());
        with_group_scope(&g, || {
            assert!(current_group().is_some());
        });
        assert!(current_group().is_none());
    }

    #[test]
    fn test_nested_scopes_prefer_the_nearest() {
        let outer = create_focus_group(GroupConfig::new().default_focus_id("outer"));
        let inner = create_focus_group(GroupConfig::new().default_focus_id("inner"));

        with_group_scope(&outer, || {
            with_group_scope(&inner, || {
                let g = expect_group();
                assert_eq!(g.current_focused_id(), Some("inner".into()));
            });
            let g = expect_group();
            assert_eq!(g.current_focused_id(), Some("outer".into()));
        });
    }

    #[test]
    fn test_scope_is_restored_after_a_panic() {
        let g = create_focus_group(GroupConfig::new());
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_group_scope(&g, || panic!("boom"));
        }));
        assert!(result.is_err());
        assert!(current_group().is_none());
    }

    #[test]
    #[should_panic(expected = "No ambient focus group")]
    fn test_expect_group_panics_without_provider() {
        expect_group();
    }
}
