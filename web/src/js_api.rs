//! Functions exported to the page scripts of the server-rendered templates.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::SessionUser;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::api::ApiClient;
use crate::notification::{self, Severity};
use crate::user_session::SessionContext;
use crate::{format, forms, page, validation};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(|error| JsError::new(&crate::error::describe_js(&error)))
}

fn from_js(value: &JsValue) -> Result<Value, JsError> {
    let text: String = js_sys::JSON::stringify(value)
        .map_err(|error| JsError::new(&crate::error::describe_js(&error)))?
        .into();
    Ok(serde_json::from_str(&text)?)
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(input: &str) -> String {
    format::format_date(input)
}

#[wasm_bindgen(js_name = formatPrice)]
pub fn format_price(amount: f64) -> String {
    format::format_price(amount)
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, severity: Option<String>) -> Result<(), JsError> {
    let severity = match severity.as_deref().map(Severity::from_str) {
        Some(Ok(severity)) => severity,
        Some(Err(_)) => {
            log::warn!("Unknown notification severity={severity:?}, using info");
            Severity::Info
        }
        None => Severity::Info,
    };
    Ok(notification::show_notification(message, severity)?)
}

#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form_id: &str) -> Result<bool, JsError> {
    Ok(forms::validate_form(form_id)?)
}

#[wasm_bindgen(js_name = setLoading)]
pub fn set_loading(element: &HtmlElement, is_loading: bool) -> Result<(), JsError> {
    Ok(forms::set_loading(element, is_loading)?)
}

#[wasm_bindgen(js_name = resetValidation)]
pub fn reset_validation(form_id: &str) -> Result<(), JsError> {
    Ok(forms::reset_validation(form_id)?)
}

#[wasm_bindgen(js_name = showFieldError)]
pub fn show_field_error(field_id: &str, message: &str) -> Result<(), JsError> {
    Ok(forms::show_field_error(field_id, message)?)
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn validate_email(email: &str) -> bool {
    validation::validate_email(email)
}

#[wasm_bindgen(js_name = validateFutureDate)]
pub fn validate_future_date(input: &str) -> bool {
    validation::validate_future_date(input)
}

#[wasm_bindgen(js_name = apiGet)]
pub async fn api_get(path: String) -> Result<JsValue, JsError> {
    let body: Value = ApiClient::new().get(&path).await?;
    to_js(&body)
}

#[wasm_bindgen(js_name = apiPost)]
pub async fn api_post(path: String, body: JsValue) -> Result<JsValue, JsError> {
    let response: Value = ApiClient::new().post(&path, &from_js(&body)?).await?;
    to_js(&response)
}

#[wasm_bindgen(js_name = apiPut)]
pub async fn api_put(path: String, body: JsValue) -> Result<JsValue, JsError> {
    let response: Value = ApiClient::new().put(&path, &from_js(&body)?).await?;
    to_js(&response)
}

#[wasm_bindgen(js_name = apiDelete)]
pub async fn api_delete(path: String) -> Result<JsValue, JsError> {
    let body: Value = ApiClient::new().delete(&path).await?;
    to_js(&body)
}

#[wasm_bindgen(js_name = isLoggedIn)]
pub fn is_logged_in() -> Result<bool, JsError> {
    Ok(SessionContext::browser()?.is_logged_in()?)
}

#[wasm_bindgen(js_name = getCurrentUserId)]
pub fn get_current_user_id() -> Result<Option<String>, JsError> {
    Ok(SessionContext::browser()?.current_user_id()?)
}

#[wasm_bindgen(js_name = getCurrentUser)]
pub fn get_current_user() -> Result<JsValue, JsError> {
    to_js(&SessionContext::browser()?.current_user()?)
}

/// Accepts the login page's record, where `id` may still be a number.
#[wasm_bindgen(js_name = setUser)]
pub fn set_user(user: JsValue) -> Result<(), JsError> {
    let user = session_user_from_json(from_js(&user)?)?;
    Ok(SessionContext::browser()?.set_user(&user)?)
}

#[wasm_bindgen]
pub fn logout() -> Result<(), JsError> {
    Ok(SessionContext::browser()?.logout()?)
}

/// `false` means access is denied; the redirect to the login page is
/// already scheduled.
#[wasm_bindgen(js_name = requireAuth)]
pub fn require_auth() -> Result<bool, JsError> {
    Ok(SessionContext::browser()?.require_auth()?.is_granted())
}

#[wasm_bindgen(js_name = teardown)]
pub fn teardown() {
    page::teardown();
}

/// The login page may hand over `id` as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct LoginRecord {
    id: Scalar,
    email: Scalar,
    name: Scalar,
}

pub(crate) fn session_user_from_json(value: Value) -> Result<SessionUser, serde_json::Error> {
    let record: LoginRecord = serde_json::from_value(value)?;
    Ok(SessionUser {
        id: record.id.into(),
        email: record.email.into(),
        name: record.name.into(),
    })
}
