// salon-client/src/http.rs
// HTTP client - network calls to the booking API

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{ApiResponse, ListFilter, ListQuery, PaginatedData, PaginatedResult};

use crate::error::FieldErrors;
use crate::token::TokenStore;
use crate::{ClientConfig, ClientError, ClientResult};

/// Hook run on every HTTP response before the body is interpreted.
///
/// Status handling shared by all calls (e.g. clearing the session on 401)
/// lives here, not at call sites.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn on_response(&self, method: &Method, path: &str, status: StatusCode);
}

/// Error body shape for non-2xx answers
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// HTTP client for the booking API
///
/// Attaches `Authorization: Bearer <token>` whenever the token store holds a
/// token and runs every registered [`ResponseInterceptor`] on each response.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            tokens,
            interceptors: Vec::new(),
        })
    }

    /// Register a response interceptor
    pub fn with_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store backing the `Authorization` header
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = self.tokens.load() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send a request and decode the envelope.
    ///
    /// Non-2xx answers and `success: false` envelopes become errors.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> ClientResult<ApiResponse<T>> {
        tracing::debug!(%method, path, "API request");

        let response = req.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "API request failed");
            ClientError::Http(e)
        })?;
        let status = response.status();

        for interceptor in &self.interceptors {
            interceptor.on_response(&method, path, status).await;
        }

        let text = response.text().await?;
        tracing::debug!(%method, path, status = status.as_u16(), "API response");

        if !status.is_success() {
            let (message, errors) = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(body) => (body.message, body.errors),
                Err(_) => (None, None),
            };
            let message = message
                .or_else(|| (!text.is_empty()).then(|| text.clone()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            return Err(ClientError::from_status(status, message, errors));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{path}: {e}")))?;

        if !envelope.success {
            let message = envelope
                .message
                .clone()
                .unwrap_or_else(|| "Request was not successful".to_string());
            return Err(match envelope.errors {
                Some(errors) if !errors.is_empty() => ClientError::Validation { message, errors },
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        Ok(envelope)
    }

    async fn data<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> ClientResult<T> {
        self.execute::<T>(method, path, req)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("{path}: missing data")))
    }

    /// Make a GET request, returning the envelope's data
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path);
        self.data(Method::GET, path, req).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).json(body);
        self.data(Method::POST, path, req).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PATCH, path).json(body);
        self.data(Method::PATCH, path, req).await
    }

    /// Make a PATCH request without body
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::PATCH, path);
        self.data(Method::PATCH, path, req).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path);
        self.data(Method::DELETE, path, req).await
    }

    /// POST whose answer carries no resource; returns the envelope message
    pub async fn post_message<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Option<String>> {
        let mut req = self.request(Method::POST, path);
        if let Some(body) = body {
            req = req.json(body);
        }
        let envelope = self
            .execute::<serde_json::Value>(Method::POST, path, req)
            .await?;
        Ok(envelope.message)
    }

    /// GET a page of a collection
    pub async fn get_paginated<R: DeserializeOwned, F: ListFilter>(
        &self,
        path: &str,
        query: &ListQuery<F>,
    ) -> ClientResult<PaginatedResult<R>> {
        build_paginated_request::<R, F>(path, query).send(self).await
    }
}

/// A prepared list request: the collection path plus its canonical query
pub struct PaginatedRequest<R> {
    path: String,
    _marker: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for PaginatedRequest<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedRequest")
            .field("path", &self.path)
            .finish()
    }
}

impl<R> PaginatedRequest<R> {
    /// Collection path with query string, relative to the client's base URL
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<R: DeserializeOwned> PaginatedRequest<R> {
    /// Issue the GET once; no retry, no caching
    pub async fn send(self, http: &HttpClient) -> ClientResult<PaginatedResult<R>> {
        let page: PaginatedData<R> = http.get(&self.path).await?;
        Ok(PaginatedResult::from(page))
    }
}

/// Build the list request for `base_url` (a collection path such as
/// `/branches`) from `params`.
///
/// Only defined, non-empty parameters are written, in fixed order; an empty
/// parameter set yields `base_url` unchanged.
pub fn build_paginated_request<R, F: ListFilter>(
    base_url: &str,
    params: &ListQuery<F>,
) -> PaginatedRequest<R> {
    PaginatedRequest {
        path: params.to_query_params().append_to(base_url),
        _marker: PhantomData,
    }
}
