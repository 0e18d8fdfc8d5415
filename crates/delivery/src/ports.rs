//! Port traits for the collaborators a setup run depends on.
//!
//! Infrastructure crates implement these; the workflow only ever sees the
//! traits. Every remote call carries the caller's [`Credentials`] explicitly so
//! that an implementation holds no per-run state.

use async_trait::async_trait;

use crate::{
    AccountCreateRequest, AccountCreateResult, AccountName, Credentials, HostedRepositoryInfo,
    ProvisioningConfiguration, ProvisioningConfigurationId, ProvisioningResult, ServiceError,
    SubmittedConfiguration,
};

/// Looks up metadata for repositories hosted by Team Services.
#[async_trait]
pub trait RepositoryInfoProvider: Send + Sync {
    /// Returns the repository id and owning project of the hosted Git
    /// repository at `repository_url`.
    async fn repository_info(
        &self,
        repository_url: &str,
        credentials: &Credentials,
    ) -> Result<HostedRepositoryInfo, ServiceError>;
}

/// Team Services account management.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Returns `true` if an account named `account` exists.
    async fn account_exists(
        &self,
        account: &AccountName,
        credentials: &Credentials,
    ) -> Result<bool, ServiceError>;

    /// Creates the account described by `request`, or accepts an existing
    /// one. The result carries an account id only when one was created.
    async fn create_account(
        &self,
        request: &AccountCreateRequest,
        credentials: &Credentials,
    ) -> Result<AccountCreateResult, ServiceError>;
}

/// The continuous-delivery provisioning API of one Team Services account.
#[async_trait]
pub trait ContinuousDeliveryService: Send + Sync {
    /// Submits `configuration` for provisioning under `account`.
    async fn submit(
        &self,
        account: &AccountName,
        configuration: &ProvisioningConfiguration,
        credentials: &Credentials,
    ) -> Result<SubmittedConfiguration, ServiceError>;

    /// Fetches the current state of a submitted configuration.
    async fn fetch(
        &self,
        account: &AccountName,
        id: &ProvisioningConfigurationId,
        credentials: &Credentials,
    ) -> Result<ProvisioningResult, ServiceError>;
}

/// Receives coarse progress updates during a setup run.
///
/// `current` never decreases within a run and never exceeds `total`.
pub trait ProgressReporter: Send + Sync {
    /// Called at each workflow milestone and once per poll.
    fn report(&self, current: u32, total: u32, message: &str);
}
