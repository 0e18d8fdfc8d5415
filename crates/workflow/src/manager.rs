//! The continuous-delivery setup workflow.

use std::sync::Arc;
use std::time::Duration;

use delivery::{
    build_summary, AccountService, BuildConfiguration, ContinuousDeliveryResult,
    ContinuousDeliveryService, ProgressReporter, ProjectName, ProvisioningError,
    RepositoryInfoProvider, SetupRequest,
};
use tracing::{info, instrument};

use crate::account::ensure_account;
use crate::poll::{wait_for_completion, DEFAULT_POLL_INTERVAL};
use crate::progress::Progress;
use crate::resolver::resolve_repository;
use crate::submit::{build_provisioning_configuration, submit_configuration, verify_account_parameters};

/// Sets up continuous delivery of an Azure web site from a source repository,
/// using Team Services build and release as the backend.
///
/// The manager holds only its collaborators. Each call to
/// [`ContinuousDeliveryManager::setup_continuous_delivery`] receives its own
/// immutable [`SetupRequest`], so one manager can serve any number of runs.
pub struct ContinuousDeliveryManager {
    repositories: Arc<dyn RepositoryInfoProvider>,
    accounts: Arc<dyn AccountService>,
    delivery: Arc<dyn ContinuousDeliveryService>,
    progress: Progress,
    poll_interval: Duration,
}

impl ContinuousDeliveryManager {
    /// Creates a manager over the given collaborators, with no progress
    /// reporter and the default poll interval.
    pub fn new(
        repositories: Arc<dyn RepositoryInfoProvider>,
        accounts: Arc<dyn AccountService>,
        delivery: Arc<dyn ContinuousDeliveryService>,
    ) -> Self {
        Self {
            repositories,
            accounts,
            delivery,
            progress: Progress::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sends progress updates to `reporter`.
    pub fn with_progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Progress::new(Some(reporter));
        self
    }

    /// Overrides the interval between status fetches.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Runs the full setup: resolve the repository, make sure the account is
    /// usable, submit the provisioning request, wait for it to finish and
    /// summarise the outcome.
    ///
    /// # Errors
    ///
    /// - [`ProvisioningError::Configuration`] for missing or unusable input;
    ///   raised before any account or provisioning call is made when the
    ///   account name cannot be determined.
    /// - [`ProvisioningError::UnexpectedState`] if the service does not queue
    ///   the request.
    /// - [`ProvisioningError::RemoteProvisioning`] if provisioning fails.
    /// - [`ProvisioningError::Service`] if any remote call fails.
    #[instrument(
        skip_all,
        fields(
            website = %request.azure.website_name,
            app_type = %request.app_type,
            create_account = request.create_account,
        )
    )]
    pub async fn setup_continuous_delivery(
        &self,
        request: &SetupRequest,
    ) -> Result<ContinuousDeliveryResult, ProvisioningError> {
        let azure = &request.azure;
        let credentials = &azure.credentials;

        let resolved =
            resolve_repository(self.repositories.as_ref(), &request.repository, credentials)
                .await?;
        verify_account_parameters(request.account_name.as_ref(), resolved.source())?;

        let account = request
            .account_name
            .clone()
            .or_else(|| resolved.account_name().cloned())
            .ok_or_else(|| {
                ProvisioningError::configuration("Unable to determine the Team Services account.")
            })?;
        let project = resolved
            .project_name()
            .cloned()
            .unwrap_or_else(|| ProjectName::from(&azure.website_name));
        info!(%account, %project, kind = %resolved.source().kind(), "setting up continuous delivery");

        let account_created = ensure_account(
            self.accounts.as_ref(),
            &account,
            request.create_account,
            credentials,
            &self.progress,
        )
        .await?;

        let configuration = build_provisioning_configuration(
            resolved.into_source(),
            BuildConfiguration::for_app_type(request.app_type, None),
            azure,
            &request.app_auth_token,
            request.deployment_slot.as_deref(),
            project,
        );
        let id =
            submit_configuration(self.delivery.as_ref(), &account, &configuration, credentials)
                .await?;

        let final_result = wait_for_completion(
            self.delivery.as_ref(),
            &account,
            &id,
            credentials,
            &self.progress,
            self.poll_interval,
        )
        .await?;

        Ok(build_summary(final_result, &account, account_created, azure))
    }
}
