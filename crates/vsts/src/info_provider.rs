//! [`RepositoryInfoProvider`] backed by the `vsts/info` endpoint that every
//! hosted Git repository exposes.

use async_trait::async_trait;
use delivery::{Credentials, HostedRepositoryInfo, RepositoryInfoProvider, ServiceError};
use tracing::instrument;

use crate::transport::{join, Transport};
use crate::wire::VstsInfoResponse;

/// Repository metadata client.
#[derive(Debug, Clone)]
pub struct VstsInfoProvider {
    transport: Transport,
}

impl VstsInfoProvider {
    /// Creates a provider that queries each repository's info endpoint through `transport`.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl RepositoryInfoProvider for VstsInfoProvider {
    #[instrument(skip(self, credentials))]
    async fn repository_info(
        &self,
        repository_url: &str,
        credentials: &Credentials,
    ) -> Result<HostedRepositoryInfo, ServiceError> {
        let url = join(repository_url, &["vsts", "info"])?;
        let endpoint = url.to_string();
        let request =
            self.transport
                .get(url, &self.transport.config().info_api_version, credentials);

        let response: VstsInfoResponse = self.transport.send_json(request, &endpoint).await?;
        Ok(response.into_info(&endpoint)?)
    }
}
