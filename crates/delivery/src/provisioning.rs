//! Provisioning request envelope and the status the service reports back.
//!
//! A [`ProvisioningConfiguration`] is built once per run and submitted once.
//! The service acknowledges it with a [`SubmittedConfiguration`]; the workflow
//! then fetches a [`ProvisioningResult`] until [`ProvisioningStatus::is_pending`]
//! turns false. Each fetch replaces the previous result wholesale.

use serde::Serialize;

use crate::{
    AuthorizationInfo, AzureInfo, BuildConfiguration, DefinitionId, ProjectId, ProjectName,
    ProvisioningConfigurationId, ResourceGroupName, SourceRepository, SubscriptionId, TenantId,
    WebsiteName,
};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Source half of the request: the repository and how to build it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningSource {
    /// Repository to build from.
    pub repository: SourceRepository,
    /// Build template selection.
    pub build_configuration: BuildConfiguration,
}

/// Slot to deploy into before swapping into production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSwapConfiguration {
    /// Name of the deployment slot.
    pub slot_name: String,
}

/// An Azure App Service deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    /// Cloud provider; always `"azure"`.
    pub provider: String,
    /// Target resource type; always `"windowsAppService"`.
    pub target_type: String,
    /// Release environment type; always `"production"`.
    pub environment_type: String,
    /// Release environment display name; always `"Production"`.
    pub friendly_name: String,
    /// Subscription owning the web site.
    pub subscription_id: SubscriptionId,
    /// Display name of the subscription.
    pub subscription_name: String,
    /// Azure AD tenant of the subscription.
    pub tenant_id: TenantId,
    /// The web site being deployed to.
    pub resource_identifier: WebsiteName,
    /// Resource group containing the web site.
    pub resource_group: ResourceGroupName,
    /// Azure region of the web site.
    pub location: String,
    /// Credentials the release pipeline uses to reach the subscription.
    pub authorization: AuthorizationInfo,
    /// Optional slot swap; `None` deploys straight to production.
    pub slot_swap: Option<SlotSwapConfiguration>,
}

impl DeploymentTarget {
    /// Builds the production web-app target for `azure`.
    pub fn azure_web_app(
        azure: &AzureInfo,
        authorization: AuthorizationInfo,
        slot_swap: Option<SlotSwapConfiguration>,
    ) -> Self {
        Self {
            provider: "azure".to_string(),
            target_type: "windowsAppService".to_string(),
            environment_type: "production".to_string(),
            friendly_name: "Production".to_string(),
            subscription_id: azure.subscription_id.clone(),
            subscription_name: azure.subscription_name.clone(),
            tenant_id: azure.tenant_id.clone(),
            resource_identifier: azure.website_name.clone(),
            resource_group: azure.resource_group.clone(),
            location: azure.location.clone(),
            authorization,
            slot_swap,
        }
    }
}

/// The complete provisioning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningConfiguration {
    /// Repository and build template.
    pub source: ProvisioningSource,
    /// Deployment targets; the workflow always sends exactly one.
    pub targets: Vec<DeploymentTarget>,
    /// Team project that will own the build and release definitions.
    pub ci_project_name: ProjectName,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Remote provisioning status.
///
/// `queued → inProgress → {succeeded, failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProvisioningStatus {
    /// Accepted, not yet started.
    Queued,
    /// Build and release definitions are being created.
    InProgress,
    /// Provisioning finished successfully.
    Succeeded,
    /// Provisioning finished with an error.
    Failed,
}

impl ProvisioningStatus {
    /// Parses the wire name of a status. Returns `None` for anything outside
    /// the known set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "queued" => Some(Self::Queued),
            "inProgress" => Some(Self::InProgress),
            "succeeded" => Some(Self::Succeeded),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns the wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "inProgress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` while the service is still working.
    pub fn is_pending(self) -> bool {
        match self {
            Self::Queued | Self::InProgress => true,
            Self::Succeeded | Self::Failed => false,
        }
    }
}

impl std::fmt::Display for ProvisioningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The provisioning service's view of a submitted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningResult {
    /// Id to fetch the configuration by.
    pub id: ProvisioningConfigurationId,
    /// Current status.
    pub status: ProvisioningStatus,
    /// Server explanation of the status; set on failure.
    pub status_message: Option<String>,
    /// Team project the definitions were created in.
    pub project_id: Option<ProjectId>,
    /// Build definition created for the repository.
    pub build_definition_id: Option<DefinitionId>,
    /// Release definition created for the web site.
    pub release_definition_id: Option<DefinitionId>,
}

impl ProvisioningResult {
    /// Creates a result carrying only an id and a status.
    pub fn new(id: ProvisioningConfigurationId, status: ProvisioningStatus) -> Self {
        Self {
            id,
            status,
            status_message: None,
            project_id: None,
            build_definition_id: None,
            release_definition_id: None,
        }
    }
}

/// The provisioning service's answer to a submission.
///
/// The status is kept exactly as the service sent it, since an unrecognised
/// value at this point is reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedConfiguration {
    /// Id to fetch the configuration by.
    pub id: ProvisioningConfigurationId,
    /// Wire name of the initial status.
    pub status: String,
}

impl SubmittedConfiguration {
    /// Returns the initial status, or `None` if it is outside the known set.
    pub fn status(&self) -> Option<ProvisioningStatus> {
        ProvisioningStatus::parse(&self.status)
    }
}
