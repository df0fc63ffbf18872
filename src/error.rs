use wasm_bindgen::JsValue;

/// Failures surfaced by the interaction layer. None of them are fatal: the
/// wasm glue logs them and keeps handling events.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// A required element for one feature is not in the document.
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    /// A navigation target (`#id`) that names no section.
    #[error("navigation target does not resolve to a section: {0}")]
    UnknownSection(String),
    #[error("section index {index} out of range (have {count})")]
    SectionOutOfRange { index: usize, count: usize },
    #[error("ignoring invalid config value {key}={value:?}")]
    InvalidConfig { key: &'static str, value: String },
    /// Anything thrown back at us from the browser.
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        UiError::Js(message)
    }
}

impl From<UiError> for JsValue {
    fn from(error: UiError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}
