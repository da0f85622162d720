use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] gloo_net::Error),
    #[error("unexpected response body from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("fail to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("local storage error: {0}")]
    Js(String),
}

#[derive(Debug, Error)]
pub enum DomError {
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("dom error: {0}")]
    Js(String),
}

/// Renders a thrown JS value for logs and error messages.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        StorageError::Js(describe_js(&value))
    }
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(describe_js(&value))
    }
}
