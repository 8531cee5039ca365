//! HTTP client with Basic auth injection and 401 interception.
//!
//! Every call goes through `ApiClient::send`, which merges the default
//! headers, injects the stored credential, and on a 401 clears the
//! credential and broadcasts `AuthEvent::AuthRequired` before failing
//! with `ApiError::AuthenticationRequired`.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

use super::credentials::{Credential, CredentialStore};
use super::error::ApiError;
use super::events::{AuthEvent, AuthNotifier};
use super::middleware;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::config::ClientConfig;

/// Client for the checklist backend.
///
/// Generic over its transport so tests can swap the network out. Shared
/// across tasks via `Arc`.
///
/// The default `Authorization` header is never stored on its own; it is
/// derived from the credential store each time, so clients sharing a store
/// stop sending it as soon as any of them clears the credential.
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    credentials: Arc<CredentialStore>,
    base_headers: HeaderMap,
    notifier: AuthNotifier,
}

impl ApiClient<HttpTransport> {
    /// Create a client talking to the configured backend over HTTP.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client with its own credential store and notifier.
    pub fn with_transport(transport: T) -> Self {
        Self::with_parts(transport, Arc::new(CredentialStore::new()), AuthNotifier::new())
    }

    /// Create a client around an injected credential store and notifier.
    pub fn with_parts(
        transport: T,
        credentials: Arc<CredentialStore>,
        notifier: AuthNotifier,
    ) -> Self {
        Self {
            transport,
            credentials,
            base_headers: middleware::json_headers(),
            notifier,
        }
    }

    /// Store the credential. Its Basic token becomes a default header.
    pub async fn set_auth(&self, username: &str, password: &str) {
        self.credentials.set(Credential::new(username, password)).await;
        log::info!("Credential set for user {}", username);
    }

    /// Drop the credential, and with it the default `Authorization` header.
    pub async fn clear_auth(&self) {
        self.credentials.clear().await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated().await
    }

    pub async fn current_username(&self) -> Option<String> {
        self.credentials.current_username().await
    }

    /// Subscribe to auth-required notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.notifier.subscribe()
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Snapshot of the headers merged into every request.
    pub async fn default_headers(&self) -> HeaderMap {
        let credential = self.credentials.get().await;
        middleware::default_headers_for(&self.base_headers, credential.as_ref())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a request through the full pipeline.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        // One snapshot feeds both the defaults and the injection stage.
        let credential = self.credentials.get().await;
        let defaults = middleware::default_headers_for(&self.base_headers, credential.as_ref());
        let request = middleware::merge_default_headers(request, &defaults);
        let request = middleware::apply_credentials(request, credential.as_ref());

        let method = request.method.clone();
        let path = request.path.clone();
        log::debug!("{} {}", method, path);

        let resp = self.transport.send(request).await?;

        if middleware::is_auth_failure(&resp) {
            return Err(self.handle_unauthorized(&method, &path).await);
        }
        middleware::check_status(resp)
    }

    async fn handle_unauthorized(&self, method: &reqwest::Method, path: &str) -> ApiError {
        log::warn!("{} {} returned 401, clearing credential", method, path);
        self.clear_auth().await;
        let err = ApiError::AuthenticationRequired;
        self.notifier.emit(AuthEvent::AuthRequired);
        err
    }

    /// GET a relative path and parse the JSON body.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = ApiRequest::post(path).json(serde_json::to_value(body)?);
        self.send(request).await?.json()
    }

    /// POST without a body, ignoring whatever comes back.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::post(path)).await?;
        Ok(())
    }

    /// PUT a JSON body, ignoring whatever comes back.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = ApiRequest::put(path).json(serde_json::to_value(body)?);
        self.send(request).await?;
        Ok(())
    }
}
