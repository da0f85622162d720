use gloo_net::http::Request;
use serde::{de::DeserializeOwned, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::config::API_BASE_URL;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON text, sent with `Content-Type: application/json`.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Moves one request over the wire and hands back status and body.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        let response = match request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)?
                    .send()
                    .await?
            }
            None => builder.send().await?,
        };
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// JSON client for the same-origin API. Every failure is logged once here and
/// then returned untouched; there is no retry.
#[derive(Debug, Clone)]
pub struct ApiClient<T = FetchTransport> {
    base_url: String,
    transport: T,
}

impl Default for ApiClient<FetchTransport> {
    fn default() -> Self {
        ApiClient::with_transport(API_BASE_URL, FetchTransport)
    }
}

impl ApiClient<FetchTransport> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        ApiClient {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request_json(Method::Post, path, body).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request_json(Method::Put, path, body).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(Method::Delete, path, None).await
    }

    async fn request_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        match serde_json::to_string(body) {
            Ok(body) => self.request(method, path, Some(body)).await,
            Err(error) => {
                let error = ApiError::Encode(error);
                log::error!("API {method} Error: {error}");
                Err(error)
            }
        }
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R, ApiError> {
        let result = self.execute(method, path, body).await;
        if let Err(error) = &result {
            log::error!("API {method} Error: {error}");
        }
        result
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R, ApiError> {
        let request = ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            body,
        };
        let response = self.transport.send(request).await?;
        if !response.ok() {
            return Err(ApiError::Status(response.status));
        }
        serde_json::from_str(&response.body).map_err(|source| ApiError::Decode {
            path: path.to_owned(),
            source,
        })
    }
}
