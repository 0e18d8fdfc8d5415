//! Shared HTTP plumbing: URL building, authentication, status and body handling.

use delivery::{AccountName, Credentials};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::{VstsConfig, ACCOUNT_PLACEHOLDER};
use crate::error::VstsError;

/// A configured HTTP client shared by every adapter.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    config: VstsConfig,
}

impl Transport {
    /// Builds a transport with the configured request timeout.
    ///
    /// # Errors
    ///
    /// [`VstsError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: VstsConfig) -> Result<Self, VstsError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("vsts-cd/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(VstsError::Client)?;
        Ok(Self { client, config })
    }

    /// Returns the adapter configuration.
    pub fn config(&self) -> &VstsConfig {
        &self.config
    }

    /// Resolves the portal-extension host of `account`.
    pub(crate) fn portalext_url(&self, account: &AccountName) -> Result<Url, VstsError> {
        let url = self
            .config
            .portalext_url_template
            .replace(ACCOUNT_PLACEHOLDER, account.as_str());
        parse(&url)
    }

    /// Returns `GET url` with authentication and `api-version` applied.
    pub(crate) fn get(&self, url: Url, api_version: &str, credentials: &Credentials) -> RequestBuilder {
        self.prepare(self.client.get(url), api_version, credentials)
    }

    /// Returns `POST url` with a JSON body, authentication and `api-version`
    /// applied.
    pub(crate) fn post<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
        api_version: &str,
        credentials: &Credentials,
    ) -> RequestBuilder {
        self.prepare(self.client.post(url).json(body), api_version, credentials)
    }

    fn prepare(
        &self,
        request: RequestBuilder,
        api_version: &str,
        credentials: &Credentials,
    ) -> RequestBuilder {
        request
            .query(&[("api-version", api_version)])
            .header(ACCEPT, "application/json")
            .bearer_auth(credentials.expose())
    }

    /// Sends `request` and decodes a JSON body; any non-success status is an
    /// error.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, VstsError> {
        self.send_optional_json(request, endpoint)
            .await?
            .ok_or_else(|| VstsError::Status {
                endpoint: endpoint.to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
                body: String::new(),
            })
    }

    /// Sends `request` and decodes a JSON body; `404 Not Found` yields `None`.
    pub(crate) async fn send_optional_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<Option<T>, VstsError> {
        let response = request.send().await.map_err(|source| VstsError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "received response");
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await.map_err(|source| VstsError::Request {
            endpoint: endpoint.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(VstsError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| VstsError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }
}

/// Parses an absolute URL.
pub(crate) fn parse(url: &str) -> Result<Url, VstsError> {
    Url::parse(url).map_err(|e| VstsError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Appends `segments` to the path of `base`, percent-encoding each one.
pub(crate) fn join(base: &str, segments: &[&str]) -> Result<Url, VstsError> {
    let mut url = parse(base)?;
    url.path_segments_mut()
        .map_err(|()| VstsError::InvalidUrl {
            url: base.to_string(),
            message: "URL cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
