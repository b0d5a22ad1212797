use serde::{Deserialize, Serialize};

/// Ключ localStorage, под которым хранится снимок формы
pub const FORM_STATE_STORAGE_KEY: &str = "nrlmFormState";

/// Уровень каскада state → district → block → grampanchayat → village
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormLevel {
    State,
    District,
    Block,
    Grampanchayat,
    Village,
}

impl FormLevel {
    /// Все уровни в порядке каскада
    pub const ALL: [FormLevel; 5] = [
        FormLevel::State,
        FormLevel::District,
        FormLevel::Block,
        FormLevel::Grampanchayat,
        FormLevel::Village,
    ];

    /// Фиксированный id select-элемента на странице
    pub fn control_id(&self) -> &'static str {
        match self {
            FormLevel::State => "stateSelect",
            FormLevel::District => "districtSelect",
            FormLevel::Block => "blockSelect",
            FormLevel::Grampanchayat => "grampanchayatSelect",
            FormLevel::Village => "villageSelect",
        }
    }

    /// Имя поля в сохранённом JSON
    pub fn storage_key(&self) -> &'static str {
        match self {
            FormLevel::State => "state",
            FormLevel::District => "district",
            FormLevel::Block => "block",
            FormLevel::Grampanchayat => "grampanchayat",
            FormLevel::Village => "village",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            FormLevel::State => 0,
            FormLevel::District => 1,
            FormLevel::Block => 2,
            FormLevel::Grampanchayat => 3,
            FormLevel::Village => 4,
        }
    }
}

/// Текущие значения пяти select-ов формы.
///
/// Содержимое значений не проверяется, важна только непустота.
/// Сериализуется с ключами `state, district, block, grampanchayat, village`;
/// отсутствующие ключи при чтении дают пустую строку.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSelection {
    pub state: String,
    pub district: String,
    pub block: String,
    pub grampanchayat: String,
    pub village: String,
}

impl FormSelection {
    pub fn get(&self, level: FormLevel) -> &str {
        match level {
            FormLevel::State => &self.state,
            FormLevel::District => &self.district,
            FormLevel::Block => &self.block,
            FormLevel::Grampanchayat => &self.grampanchayat,
            FormLevel::Village => &self.village,
        }
    }

    pub fn set(&mut self, level: FormLevel, value: impl Into<String>) {
        let value = value.into();
        match level {
            FormLevel::State => self.state = value,
            FormLevel::District => self.district = value,
            FormLevel::Block => self.block = value,
            FormLevel::Grampanchayat => self.grampanchayat = value,
            FormLevel::Village => self.village = value,
        }
    }

    /// Снимок из произвольного JSON, без отказа по типам полей
    pub fn from_value(value: &serde_json::Value) -> Self {
        let mut selection = FormSelection::default();
        for level in FormLevel::ALL {
            let text = match value.get(level.storage_key()) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                Some(serde_json::Value::Bool(b)) => b.to_string(),
                _ => String::new(),
            };
            selection.set(level, text);
        }
        selection
    }

    /// Количество непустых уровней
    pub fn filled_count(&self) -> usize {
        FormLevel::ALL
            .iter()
            .filter(|level| !self.get(**level).is_empty())
            .count()
    }

    /// Форма готова к отправке, когда выбраны все пять уровней
    pub fn is_complete(&self) -> bool {
        self.filled_count() == FormLevel::ALL.len()
    }

    /// Процент заполнения, округлённый до целого
    pub fn completion_percent(&self) -> u8 {
        let filled = self.filled_count() as f64;
        let total = FormLevel::ALL.len() as f64;
        (filled / total * 100.0).round() as u8
    }
}

/// Сериализованный снимок `FormSelection` в localStorage.
///
/// Каждая запись полностью перезаписывает предыдущую.
pub struct PersistedFormState;

impl PersistedFormState {
    pub fn encode(selection: &FormSelection) -> Result<String, serde_json::Error> {
        serde_json::to_string(selection)
    }

    /// Any syntactically valid JSON is accepted. Numbers and booleans are
    /// taken as their text, other non-string values and non-object
    /// documents give empty levels.
    pub fn decode(raw: &str) -> Result<FormSelection, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Ok(FormSelection::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> FormSelection {
        FormSelection {
            state: "33".into(),
            district: "3301".into(),
            block: "330101".into(),
            grampanchayat: "3301010001".into(),
            village: "633001".into(),
        }
    }

    #[test]
    fn test_completeness_requires_all_levels() {
        assert!(full().is_complete());
        assert!(!FormSelection::default().is_complete());

        for level in FormLevel::ALL {
            let mut selection = full();
            selection.set(level, "");
            assert!(!selection.is_complete(), "{:?} empty must be incomplete", level);
        }
    }

    #[test]
    fn test_completion_percent() {
        let mut selection = FormSelection::default();
        assert_eq!(selection.completion_percent(), 0);
        selection.set(FormLevel::State, "33");
        assert_eq!(selection.completion_percent(), 20);
        selection.set(FormLevel::District, "3301");
        selection.set(FormLevel::Block, "330101");
        assert_eq!(selection.completion_percent(), 60);
        assert_eq!(full().completion_percent(), 100);
    }

    #[test]
    fn test_encode_uses_fixed_keys() {
        let json = PersistedFormState::encode(&full()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for level in FormLevel::ALL {
            assert_eq!(value[level.storage_key()], full().get(level));
        }
    }

    #[test]
    fn test_decode_round_trip() {
        let json = PersistedFormState::encode(&full()).unwrap();
        assert_eq!(PersistedFormState::decode(&json).unwrap(), full());
    }

    #[test]
    fn test_decode_missing_keys_default_to_empty() {
        let selection = PersistedFormState::decode(r#"{"state":"33"}"#).unwrap();
        assert_eq!(selection.state, "33");
        assert_eq!(selection.village, "");
    }

    #[test]
    fn test_decode_malformed() {
        assert!(PersistedFormState::decode("{not json").is_err());
        assert!(PersistedFormState::decode("").is_err());
    }

    #[test]
    fn test_decode_accepts_any_valid_json() {
        let selection = PersistedFormState::decode(r#"{"state": 33, "district": true}"#).unwrap();
        assert_eq!(selection.state, "33");
        assert_eq!(selection.district, "true");

        let selection = PersistedFormState::decode(r#"{"state": null, "block": [1]}"#).unwrap();
        assert_eq!(selection, FormSelection::default());

        assert_eq!(PersistedFormState::decode("null").unwrap(), FormSelection::default());
        assert_eq!(PersistedFormState::decode("[1, 2]").unwrap(), FormSelection::default());
    }

    #[test]
    fn test_level_indices_follow_cascade_order() {
        for (i, level) in FormLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }
}
