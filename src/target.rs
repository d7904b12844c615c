//! The contract a focusable UI element exposes to the controller.

/// Something real input focus can be moved to.
///
/// The controller only ever holds a `Weak<dyn FocusTarget>`: registering
/// with a group must never be the reason an element stays alive. A target
/// whose strong references are gone is treated as unmounted and skipped.
pub trait FocusTarget {
    /// Move real input focus to this element.
    fn focus(&self);

    /// Whether the element is still attached to a live UI tree.
    ///
    /// Targets that can be detached without being dropped (e.g. pooled
    /// widgets) should override this; the default assumes alive-means-mounted.
    fn is_mounted(&self) -> bool {
        true
    }
}
