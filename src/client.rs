//! Reqwest-backed client for the CRUD routes of one model.
//!
//! The client speaks the same [`GenericService`] contract as the server-side service, so callers can
//! swap one for the other. Transport and decoding failures never surface as errors; they become a
//! `NoApiResponse` envelope.

use crate::error::ClientError;
use crate::response::{ServiceResponse, ServiceResponseCode};
use crate::service::GenericService;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport settings for [`GenericClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub timeout: Duration,
    /// Prefix the server nests model routes under, e.g. `api`. Empty for none.
    pub route_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: DEFAULT_TIMEOUT,
            route_prefix: crate::config::DEFAULT_ROUTE_PREFIX.to_string(),
        }
    }
}

pub struct GenericClient<G, A, U> {
    http: Client,
    endpoint: Url,
    model_name: String,
    _shapes: PhantomData<fn() -> (G, A, U)>,
}

impl<G, A, U> GenericClient<G, A, U> {
    /// Client for `{base_url}/{route_prefix}/{model_name}` with its own reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute http(s) URL or the reqwest client cannot
    /// be built.
    pub fn new(base_url: &str, model_name: &str, config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Self::with_client(http, base_url, model_name, &config.route_prefix)
    }

    /// Client sharing an existing reqwest client (connection pool, TLS and timeout settings).
    pub fn with_client(
        http: Client,
        base_url: &str,
        model_name: &str,
        route_prefix: &str,
    ) -> Result<Self, ClientError> {
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };
        let mut endpoint = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        endpoint
            .path_segments_mut()
            .map_err(|_| invalid("url cannot be a base"))?
            .pop_if_empty()
            .extend(route_prefix.split('/').filter(|s| !s.is_empty()))
            .push(model_name);
        Ok(GenericClient {
            http,
            endpoint,
            model_name: model_name.to_string(),
            _shapes: PhantomData,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Endpoint URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        // The endpoint was checked to be a base URL at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> ServiceResponse<T> {
        match self.try_exchange(request).await {
            Ok(envelope) => {
                tracing::debug!(
                    model = %self.model_name,
                    operation,
                    code = %envelope.response_code,
                    "remote call answered"
                );
                envelope
            }
            Err(err) => {
                tracing::warn!(
                    model = %self.model_name,
                    operation,
                    error = %err,
                    "no usable response from remote endpoint"
                );
                ServiceResponse::from_code(ServiceResponseCode::NoApiResponse)
            }
        }
    }

    /// The envelope is read whatever the status; a 400 still carries one.
    async fn try_exchange<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ServiceResponse<T>, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode {
            status: status.as_u16(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl<G, A, U> GenericService<G, A, U> for GenericClient<G, A, U>
where
    G: DeserializeOwned + Send + 'static,
    A: Serialize + Send + 'static,
    U: Serialize + Send + 'static,
{
    async fn get_all(&self) -> ServiceResponse<Vec<G>> {
        let request = self.http.get(self.url(&["all"]));
        self.exchange("get_all", request).await
    }

    async fn get(&self, id: i64) -> ServiceResponse<G> {
        let request = self.http.get(self.url(&[&id.to_string()]));
        self.exchange("get", request).await
    }

    async fn delete(&self, id: i64) -> ServiceResponse<Vec<G>> {
        let request = self.http.delete(self.url(&[&id.to_string()]));
        self.exchange("delete", request).await
    }

    async fn add(&self, dto: A) -> ServiceResponse<G> {
        let request = self.http.post(self.url(&[])).json(&dto);
        self.exchange("add", request).await
    }

    async fn add_unique(&self, dto: A, unique_field: &str) -> ServiceResponse<G> {
        let request = self.http.post(self.url(&[unique_field])).json(&dto);
        self.exchange("add_unique", request).await
    }

    async fn update(&self, dto: U, id: i64) -> ServiceResponse<G> {
        let request = self.http.put(self.url(&[&id.to_string()])).json(&dto);
        self.exchange("update", request).await
    }

    async fn update_unique(&self, dto: U, id: i64, unique_field: &str) -> ServiceResponse<G> {
        let request = self
            .http
            .put(self.url(&[&id.to_string(), unique_field]))
            .json(&dto);
        self.exchange("update_unique", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestClient = GenericClient<(), (), ()>;

    #[test]
    fn endpoint_joins_prefix_and_model() {
        let client =
            TestClient::new("http://localhost:3000", "TestModel", ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:3000/api/TestModel");
        assert_eq!(client.url(&["all"]).as_str(), "http://localhost:3000/api/TestModel/all");
        assert_eq!(client.url(&["7", "UniqueName"]).path(), "/api/TestModel/7/UniqueName");
    }

    #[test]
    fn base_path_and_nested_prefix_are_kept() {
        let config = ClientConfig {
            route_prefix: "/v1/crud/".into(),
            ..ClientConfig::default()
        };
        let client = TestClient::new("https://example.com/svc/", "Book", config).unwrap();
        assert_eq!(client.endpoint().path(), "/svc/v1/crud/Book");
    }

    #[test]
    fn empty_prefix_mounts_at_root() {
        let config = ClientConfig {
            route_prefix: String::new(),
            ..ClientConfig::default()
        };
        let client = TestClient::new("http://127.0.0.1:8080", "Book", config).unwrap();
        assert_eq!(client.endpoint().path(), "/Book");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for bad in ["not a url", "ftp://example.com", "mailto:someone@example.com"] {
            let err = TestClient::new(bad, "Book", ClientConfig::default()).err();
            assert!(matches!(err, Some(ClientError::InvalidBaseUrl { .. })), "{bad}");
        }
    }
}
