use crate::shared::config::EnhancerConfig;
use crate::shared::dom::FormControl;

/// Set the configured `title` text on every element `lookup` can find.
///
/// Missing elements are skipped. Returns how many titles were set.
pub fn add_tooltips<C, F>(config: &EnhancerConfig, lookup: F) -> usize
where
    C: FormControl,
    F: Fn(&str) -> Option<C>,
{
    let mut applied = 0;
    for (id, text) in &config.tooltips {
        if let Some(element) = lookup(id) {
            element.set_title(text);
            applied += 1;
        }
    }
    applied
}
