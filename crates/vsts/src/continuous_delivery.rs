//! [`ContinuousDeliveryService`] over the provisioning-configuration API
//! served by each account's portal-extension host.

use async_trait::async_trait;
use delivery::{
    AccountName, ContinuousDeliveryService, Credentials, ProvisioningConfiguration,
    ProvisioningConfigurationId, ProvisioningResult, ServiceError, SubmittedConfiguration,
};
use reqwest::Url;
use tracing::{debug, instrument};

use crate::error::VstsError;
use crate::transport::Transport;
use crate::wire::{ProvisioningConfigurationBody, ProvisioningConfigurationResponse};

const PROVISIONING_PATH: [&str; 3] = ["_apis", "continuousdelivery", "provisioningconfigurations"];

/// Continuous-delivery provisioning client.
#[derive(Debug, Clone)]
pub struct ContinuousDeliveryClient {
    transport: Transport,
}

impl ContinuousDeliveryClient {
    /// Creates a client that resolves account hosts from `transport`'s
    /// configuration.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn configurations_url(
        &self,
        account: &AccountName,
        id: Option<&ProvisioningConfigurationId>,
    ) -> Result<Url, VstsError> {
        let mut url = self.transport.portalext_url(account)?;
        let base = url.to_string();
        {
            let mut segments = url.path_segments_mut().map_err(|()| VstsError::InvalidUrl {
                url: base,
                message: "URL cannot be a base".to_string(),
            })?;
            segments.pop_if_empty().extend(PROVISIONING_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ContinuousDeliveryService for ContinuousDeliveryClient {
    #[instrument(skip_all, fields(account = %account))]
    async fn submit(
        &self,
        account: &AccountName,
        configuration: &ProvisioningConfiguration,
        credentials: &Credentials,
    ) -> Result<SubmittedConfiguration, ServiceError> {
        let url = self.configurations_url(account, None)?;
        let endpoint = url.to_string();
        let body = ProvisioningConfigurationBody::from(configuration);
        let request = self.transport.post(
            url,
            &body,
            &self.transport.config().continuous_delivery_api_version,
            credentials,
        );

        let response: ProvisioningConfigurationResponse =
            self.transport.send_json(request, &endpoint).await?;
        let submitted = response.into_submitted(&endpoint)?;
        debug!(id = %submitted.id, status = %submitted.status, "provisioning configuration submitted");
        Ok(submitted)
    }

    #[instrument(skip(self, credentials), fields(account = %account, id = %id))]
    async fn fetch(
        &self,
        account: &AccountName,
        id: &ProvisioningConfigurationId,
        credentials: &Credentials,
    ) -> Result<ProvisioningResult, ServiceError> {
        let url = self.configurations_url(account, Some(id))?;
        let endpoint = url.to_string();
        let request = self.transport.get(
            url,
            &self.transport.config().continuous_delivery_api_version,
            credentials,
        );

        let response: ProvisioningConfigurationResponse =
            self.transport.send_json(request, &endpoint).await?;
        Ok(response.into_result(&endpoint)?)
    }
}
