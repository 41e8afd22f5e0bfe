//! Shared request-building and response-unwrapping layer.

use std::time::Duration;

use reqwest::{
    Client, Method, RequestBuilder,
    header::{CONTENT_TYPE, HeaderValue},
    multipart::Form,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::{config::client::Config, models::failure_message};
use tracing::{debug, warn};

use crate::{error::ApiError, store::SessionStore};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Issues single-attempt requests against the API root, attaching the
/// stored bearer token when there is one.
///
/// Bodies are parsed as JSON whatever the status. A non-success status
/// becomes [`ApiError::RequestFailed`] with the server's `msg`/`message`.
#[derive(Debug, Clone)]
pub struct Gateway {
    base_url: String,
    client: Client,
    store: SessionStore,
}

impl Gateway {
    /// Build a gateway with an HTTP client configured from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config, store: SessionStore) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|source| ApiError::Transport {
            path: config.api_base_url.clone(),
            source,
        })?;
        Ok(Self::with_client(&config.api_base_url, client, store))
    }

    /// Build a gateway around an existing HTTP client.
    #[must_use]
    pub fn with_client(base_url: &str, client: Client, store: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            store,
        }
    }

    /// Session storage the bearer token is read from.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// API root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn prepare(&self, method: Method, path: &str, json: bool) -> RequestBuilder {
        let token = self.store.credential();
        debug!(%method, path, authorized = token.is_some(), "sending API request");

        let mut request = self.client.request(method, self.api_url(path));
        if json {
            request = request.header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a JSON request with an optional body.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.prepare(method.clone(), path, true);
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::dispatch(&method, path, request).await
    }

    /// `GET` without a body.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// `GET` with `query` serialized as the query string.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.prepare(Method::GET, path, true).query(query);
        Self::dispatch(&Method::GET, path, request).await
    }

    /// `POST` a JSON body.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// `PATCH` with a JSON body.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// `DELETE` without a body.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }

    /// `POST` a multipart form. No JSON content type is set so the transport
    /// can supply the multipart boundary.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn request_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.prepare(Method::POST, path, false).multipart(form);
        Self::dispatch(&Method::POST, path, request).await
    }

    async fn dispatch<T: DeserializeOwned>(
        method: &Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let transport = |source: reqwest::Error| ApiError::Transport {
            path: path.to_string(),
            source,
        };
        let response = request.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "API request could not be sent");
            transport(err)
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;

        let decode = |source: serde_json::Error| ApiError::Decode {
            path: path.to_string(),
            source,
        };
        let body: Value = serde_json::from_slice(&bytes).map_err(decode)?;

        if !status.is_success() {
            let message = failure_message(&body);
            warn!(%method, path, status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::RequestFailed { status, message });
        }

        debug!(%method, path, status = status.as_u16(), "API request succeeded");
        serde_json::from_value(body).map_err(decode)
    }
}
