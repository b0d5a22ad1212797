use contracts::usecases::u601_in_data_form::{FormLevel, FORM_STATE_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the optional `<script type="application/json">` element with overrides
pub const CONFIG_ELEMENT_ID: &str = "form-enhancer-config";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Ids of the five cascade selects, keyed by storage key (`state`, ...)
    pub controls: ControlIds,
    pub submit_id: String,
    /// Class shared by every element that takes part in validation
    pub marker_class: String,
    pub storage_key: String,
    /// Element id → `title` text
    pub tooltips: BTreeMap<String, String>,
    pub submit_style: SubmitStyle,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlIds {
    pub state: String,
    pub district: String,
    pub block: String,
    pub grampanchayat: String,
    pub village: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SubmitStyle {
    pub complete_background: String,
    pub incomplete_background: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r##"
{
    "submit_id": "fetchDataBtn",
    "marker_class": "form-select",
    "tooltips": {
        "stateSelect": "Select your state to begin",
        "districtSelect": "Choose a district from the selected state",
        "blockSelect": "Select a block within the district",
        "grampanchayatSelect": "Pick a grampanchayat from the block",
        "villageSelect": "Choose a village to fetch SHG data",
        "fetchDataBtn": "Click to fetch SHG member data from NRLM website"
    },
    "submit_style": {
        "complete_background": "linear-gradient(135deg, #764ba2, #667eea)",
        "incomplete_background": "#ccc"
    }
}
"##;

impl ControlIds {
    pub fn id(&self, level: FormLevel) -> &str {
        match level {
            FormLevel::State => &self.state,
            FormLevel::District => &self.district,
            FormLevel::Block => &self.block,
            FormLevel::Grampanchayat => &self.grampanchayat,
            FormLevel::Village => &self.village,
        }
    }
}

impl Default for ControlIds {
    fn default() -> Self {
        Self {
            state: FormLevel::State.control_id().to_string(),
            district: FormLevel::District.control_id().to_string(),
            block: FormLevel::Block.control_id().to_string(),
            grampanchayat: FormLevel::Grampanchayat.control_id().to_string(),
            village: FormLevel::Village.control_id().to_string(),
        }
    }
}

impl Default for SubmitStyle {
    fn default() -> Self {
        Self {
            complete_background: "linear-gradient(135deg, #764ba2, #667eea)".to_string(),
            incomplete_background: "#ccc".to_string(),
        }
    }
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            controls: ControlIds::default(),
            submit_id: "fetchDataBtn".to_string(),
            marker_class: "form-select".to_string(),
            storage_key: FORM_STATE_STORAGE_KEY.to_string(),
            tooltips: BTreeMap::new(),
            submit_style: SubmitStyle::default(),
        }
    }
}

impl EnhancerConfig {
    /// Embedded defaults
    pub fn embedded() -> Self {
        match serde_json::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Embedded enhancer config is invalid: {}", e);
                Self::default()
            }
        }
    }

    /// Overlay a JSON override document on the embedded defaults.
    ///
    /// Only keys present in the override replace defaults; `tooltips`
    /// entries are merged per element id.
    pub fn with_overrides(overrides: &str) -> Result<Self, serde_json::Error> {
        let mut base = serde_json::to_value(Self::embedded())?;
        let patch: serde_json::Value = serde_json::from_str(overrides)?;
        merge_json(&mut base, patch);
        serde_json::from_value(base)
    }
}

/// Load configuration for the current page
///
/// Search order:
/// 1. `<script id="form-enhancer-config" type="application/json">` overrides
/// 2. Falls back to embedded defaults
pub fn load_config(document: &web_sys::Document) -> EnhancerConfig {
    let overrides = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());

    match overrides {
        Some(text) => match EnhancerConfig::with_overrides(&text) {
            Ok(config) => {
                log::debug!("Loaded enhancer config overrides from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                log::warn!("Invalid #{} contents, using defaults: {}", CONFIG_ELEMENT_ID, e);
                EnhancerConfig::embedded()
            }
        },
        None => EnhancerConfig::embedded(),
    }
}

fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                merge_json(
                    base_map.entry(key).or_insert(serde_json::Value::Null),
                    value,
                );
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<EnhancerConfig, _> = serde_json::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.submit_id, "fetchDataBtn");
        assert_eq!(config.marker_class, "form-select");
        assert_eq!(config.storage_key, "nrlmFormState");
        assert_eq!(config.controls.id(FormLevel::Village), "villageSelect");
        assert_eq!(config.tooltips.len(), 6);
    }

    #[test]
    fn test_overrides_merge_with_defaults() {
        let config = EnhancerConfig::with_overrides(
            r#"{"storage_key": "otherKey", "tooltips": {"stateSelect": "Pick a state"}}"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "otherKey");
        assert_eq!(config.tooltips["stateSelect"], "Pick a state");
        assert_eq!(
            config.tooltips["villageSelect"],
            "Choose a village to fetch SHG data"
        );
        assert_eq!(config.submit_id, "fetchDataBtn");
    }

    #[test]
    fn test_nested_control_override() {
        let config =
            EnhancerConfig::with_overrides(r#"{"controls": {"village": "villageDropdown"}}"#)
                .unwrap();
        assert_eq!(config.controls.village, "villageDropdown");
        assert_eq!(config.controls.state, "stateSelect");
    }

    #[test]
    fn test_invalid_override_is_error() {
        assert!(EnhancerConfig::with_overrides("{oops").is_err());
        assert!(EnhancerConfig::with_overrides(r#"{"submit_id": 5}"#).is_err());
    }
}
