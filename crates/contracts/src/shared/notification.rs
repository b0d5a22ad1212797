use serde::{Deserialize, Serialize};

/// Через сколько миллисекунд уведомление удаляется само
pub const AUTO_DISMISS_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// Разбор типа, пришедшего со страницы. Неизвестные значения дают `Info`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => NotificationKind::Success,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    /// CSS-классы контейнера уведомления
    pub fn css_class(&self) -> String {
        format!("notification notification-{}", self.as_str())
    }

    /// Классы иконки Font Awesome
    pub fn icon_class(&self) -> &'static str {
        match self {
            NotificationKind::Error => "fas fa-exclamation-triangle",
            NotificationKind::Success => "fas fa-check-circle",
            NotificationKind::Info => "fas fa-info-circle",
        }
    }
}

/// Всплывающее сообщение (toast)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }
}
