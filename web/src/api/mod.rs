pub mod activities_api;
pub mod appointments_api;
pub mod client;
pub mod users_api;

pub use client::{ApiClient, ApiRequest, ApiResponse, FetchTransport, Method, Transport};

/// Appends `pairs` to `path` as an url-encoded query string.
pub(crate) fn with_query(path: &str, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_owned();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{path}?{query}")
}
