// Accessibility helpers

/// CSS for visible focus rings and the screen-reader-only utility class.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #ef4444;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Update the live region status for screen readers
///
/// Writes into the `#status-live` region when it is present.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::document().and_then(|doc| doc.get_element_by_id("status-live"))
    {
        node.set_text_content(Some(msg));
    }
}
