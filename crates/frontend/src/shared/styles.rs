use web_sys::Document;

/// Id of the injected `<style>` element
pub const STYLE_ELEMENT_ID: &str = "form-enhancer-styles";

/// Notification appearance and slide-in animation
pub const NOTIFICATION_CSS: &str = r#"
.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    padding: 15px 20px;
    border-radius: 8px;
    color: white;
    font-weight: 600;
    z-index: 10000;
    display: flex;
    align-items: center;
    gap: 10px;
    min-width: 300px;
    box-shadow: 0 4px 12px rgba(0,0,0,0.15);
    animation: slideIn 0.3s ease;
}

.notification-success {
    background: #4caf50;
}

.notification-error {
    background: #f44336;
}

.notification-info {
    background: #2196f3;
}

.notification button {
    background: none;
    border: none;
    color: white;
    font-size: 18px;
    cursor: pointer;
    margin-left: auto;
}

@keyframes slideIn {
    from {
        transform: translateX(100%);
        opacity: 0;
    }
    to {
        transform: translateX(0);
        opacity: 1;
    }
}
"#;

/// Append the notification stylesheet to `<head>` once.
///
/// Returns `true` when the element was added by this call.
pub fn inject_styles(document: &Document) -> bool {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return false;
    }

    let Some(head) = document.head() else {
        log::warn!("Document has no <head>, notification styles not injected");
        return false;
    };

    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(e) => {
            log::error!("Failed to create style element: {:?}", e);
            return false;
        }
    };
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(NOTIFICATION_CSS));

    match head.append_child(&style) {
        Ok(_) => true,
        Err(e) => {
            log::error!("Failed to append style element: {:?}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_covers_every_kind() {
        for kind in ["success", "error", "info"] {
            assert!(NOTIFICATION_CSS.contains(&format!(".notification-{}", kind)));
        }
        assert!(NOTIFICATION_CSS.contains("@keyframes slideIn"));
    }
}
