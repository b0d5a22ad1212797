/// Визуальное состояние элемента формы.
///
/// Состояния не исключают друг друга и флаг `disabled`: каждое вешается
/// своим CSS-классом и снимается независимо.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlVisualState {
    Neutral,
    Loading,
    Success,
    Error,
}

impl ControlVisualState {
    /// CSS-класс состояния; у нейтрального класса нет
    pub fn marker_class(&self) -> Option<&'static str> {
        match self {
            ControlVisualState::Neutral => None,
            ControlVisualState::Loading => Some("loading"),
            ControlVisualState::Success => Some("success"),
            ControlVisualState::Error => Some("error"),
        }
    }

    /// Через сколько миллисекунд класс снимается автоматически
    pub fn auto_clear_ms(&self) -> Option<u32> {
        match self {
            ControlVisualState::Success => Some(2000),
            ControlVisualState::Error => Some(3000),
            ControlVisualState::Neutral | ControlVisualState::Loading => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays() {
        assert_eq!(ControlVisualState::Success.auto_clear_ms(), Some(2000));
        assert_eq!(ControlVisualState::Error.auto_clear_ms(), Some(3000));
        assert_eq!(ControlVisualState::Loading.auto_clear_ms(), None);
    }

    #[test]
    fn test_marker_classes() {
        assert_eq!(ControlVisualState::Neutral.marker_class(), None);
        assert_eq!(ControlVisualState::Loading.marker_class(), Some("loading"));
        assert_eq!(ControlVisualState::Error.marker_class(), Some("error"));
    }
}
