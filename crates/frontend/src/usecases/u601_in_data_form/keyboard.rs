use crate::shared::dom::FormControl;

/// Enter inside a marked control only drops focus, so it cannot submit
/// the surrounding form
pub fn should_blur_on_key(key: &str, target_has_marker: bool) -> bool {
    key == "Enter" && target_has_marker
}

/// Keydown on `target`. Returns whether focus was dropped.
pub fn handle_keydown<C: FormControl>(key: &str, target: &C, marker_class: &str) -> bool {
    let blur = should_blur_on_key(key, target.has_class(marker_class));
    if blur {
        target.blur();
    }
    blur
}
