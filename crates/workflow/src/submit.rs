//! Provisioning request assembly and submission.

use delivery::{
    AccountName, AuthorizationInfo, AzureInfo, BuildConfiguration, ContinuousDeliveryService,
    Credentials, DeploymentTarget, ProjectName, ProvisioningConfiguration, ProvisioningError,
    ProvisioningConfigurationId, ProvisioningSource, ProvisioningStatus, Secret, SlotSwapConfiguration,
    SourceRepository,
};
use tracing::{info, instrument};

/// Checks that a Team Services account can be determined for `source`.
///
/// GitHub and external Git URLs do not name an account, so the caller must.
///
/// # Errors
///
/// [`ProvisioningError::Configuration`] if the account name is missing for
/// such a repository.
pub fn verify_account_parameters(
    account_name: Option<&AccountName>,
    source: &SourceRepository,
) -> Result<(), ProvisioningError> {
    if source.kind().requires_explicit_account() && account_name.is_none() {
        return Err(ProvisioningError::configuration(
            "You must provide a value for cd-account since your repo-url is not a Team Services repository.",
        ));
    }
    Ok(())
}

/// Assembles the provisioning request for one Azure web-app target.
pub fn build_provisioning_configuration(
    repository: SourceRepository,
    build_configuration: BuildConfiguration,
    azure: &AzureInfo,
    app_auth_token: &Secret,
    deployment_slot: Option<&str>,
    ci_project_name: ProjectName,
) -> ProvisioningConfiguration {
    let slot_swap = deployment_slot.map(|slot| SlotSwapConfiguration {
        slot_name: slot.to_string(),
    });
    let target =
        DeploymentTarget::azure_web_app(azure, AuthorizationInfo::bearer(app_auth_token), slot_swap);

    ProvisioningConfiguration {
        source: ProvisioningSource {
            repository,
            build_configuration,
        },
        targets: vec![target],
        ci_project_name,
    }
}

/// Submits `configuration` and checks the service queued it.
///
/// Returns the id to poll the configuration by.
///
/// # Errors
///
/// - [`ProvisioningError::UnexpectedState`] carrying the status string as the
///   service sent it, if the initial status is anything but `queued`,
///   including values outside the known set.
/// - [`ProvisioningError::Service`] if the submit call fails.
#[instrument(skip(service, configuration, credentials), fields(account = %account))]
pub async fn submit_configuration(
    service: &dyn ContinuousDeliveryService,
    account: &AccountName,
    configuration: &ProvisioningConfiguration,
    credentials: &Credentials,
) -> Result<ProvisioningConfigurationId, ProvisioningError> {
    let submitted = service.submit(account, configuration, credentials).await?;
    match submitted.status() {
        Some(ProvisioningStatus::Queued) => {
            info!(id = %submitted.id, "provisioning configuration queued");
            Ok(submitted.id)
        }
        Some(
            ProvisioningStatus::InProgress | ProvisioningStatus::Succeeded | ProvisioningStatus::Failed,
        )
        | None => Err(ProvisioningError::UnexpectedState {
            status: submitted.status,
        }),
    }
}
