//! Контракт ответа API: `{"success": bool, "message"?: string, ...}`
//!
//! Поле `success` проверяется по правилам истинности JavaScript, поскольку
//! его выставляют разные эндпоинты (иногда строкой или числом).

use serde_json::Value;

/// Сообщение, если сервер не объяснил отказ
pub const FALLBACK_FAILURE_MESSAGE: &str = "Unknown error occurred";

/// Истинность значения по правилам JavaScript
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Возвращает сообщение об ошибке, если payload сообщает о неуспехе
pub fn failure_message(payload: &Value) -> Option<String> {
    let success = payload.get("success").unwrap_or(&Value::Null);
    if is_truthy(success) {
        return None;
    }

    let message = payload
        .get("message")
        .filter(|m| is_truthy(m))
        .map(|m| match m {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());

    Some(message)
}
