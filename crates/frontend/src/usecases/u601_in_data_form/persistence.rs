//! Best-effort snapshot of the form in localStorage.
//!
//! The snapshot is written on every change and read once at startup. The
//! loaded value is only logged; it is not pushed back into the selects.

use contracts::usecases::u601_in_data_form::{FormSelection, PersistedFormState};

use crate::shared::dom::FormControl;
use crate::shared::storage::KeyValueStore;

use super::controller::FormController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key
    Missing,
    Loaded(FormSelection),
    /// Stored value is not valid JSON
    Corrupt(String),
}

impl LoadOutcome {
    /// The stored selection, or the empty form when there is none
    pub fn selection_or_default(&self) -> FormSelection {
        match self {
            LoadOutcome::Loaded(selection) => selection.clone(),
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => FormSelection::default(),
        }
    }
}

/// Overwrite the stored snapshot with the controller's current values.
///
/// Write failures are logged and otherwise ignored.
pub fn save_form_state<C, S>(controller: &FormController<C>, store: &S)
where
    C: FormControl,
    S: KeyValueStore + ?Sized,
{
    let key = &controller.config().storage_key;
    let encoded = match PersistedFormState::encode(&controller.selection()) {
        Ok(encoded) => encoded,
        Err(e) => {
            log::warn!("Failed to serialize form state: {}", e);
            return;
        }
    };

    if let Err(e) = store.set_item(key, &encoded) {
        log::warn!("Failed to save form state: {}", e);
    }
}

/// Read the stored snapshot. Never fails; corruption is logged.
pub fn load_form_state<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> LoadOutcome {
    let Some(raw) = store.get_item(key) else {
        return LoadOutcome::Missing;
    };

    match PersistedFormState::decode(&raw) {
        Ok(selection) => {
            log::debug!("Form state loaded: {:?}", selection);
            LoadOutcome::Loaded(selection)
        }
        Err(e) => {
            log::error!("Error loading form state: {}", e);
            LoadOutcome::Corrupt(e.to_string())
        }
    }
}
