//! Core domain for wiring an Azure web site to Team Services continuous delivery.
//!
//! This crate contains every domain concept, newtype identifier, value type and
//! error type used by a setup run, plus the port traits that infrastructure
//! crates implement. It never performs I/O.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate defines *what* is needed;
//! the `vsts` crate defines *how* to reach Team Services, and the `workflow`
//! crate sequences the calls.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`AccountName`, `ProjectId`, etc.) |
//! | [`secret`] | Redacting token wrapper |
//! | [`types`] | Caller input (`SetupRequest`, `AzureInfo`, `AppType`, ...) |
//! | [`repository`] | URL classification and repository descriptors |
//! | [`account`] | Account create request/response |
//! | [`provisioning`] | Provisioning request envelope, status and result |
//! | [`summary`] | Final result aggregate and summary text |
//! | [`ports`] | Collaborator traits |
//! | [`errors`] | `ProvisioningError` and `ServiceError` |

pub mod account;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod provisioning;
pub mod repository;
pub mod secret;
pub mod summary;
pub mod types;

/// Application id of Team Services. Request Azure AD tokens for this resource
/// to obtain credentials the Team Services APIs accept.
pub const VSTS_APP_ID: &str = "499b84ac-1321-427f-aa17-267ca6975798";

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use account::{
    AccountCreateRequest, AccountCreateResult, AccountPreferences, SIGNUP_ENTRY_POINT,
    SIGNUP_ENTRY_POINT_PROPERTY,
};
pub use errors::{ProvisioningError, ServiceError};
pub use identifiers::{
    AccountId, AccountName, BranchName, DefinitionId, ProjectId, ProjectName,
    ProvisioningConfigurationId, RepositoryIdentifier, ResourceGroupName, SubscriptionId,
    TenantId, WebsiteName,
};
pub use ports::{AccountService, ContinuousDeliveryService, ProgressReporter, RepositoryInfoProvider};
pub use provisioning::{
    DeploymentTarget, ProvisioningConfiguration, ProvisioningResult, ProvisioningSource,
    ProvisioningStatus, SlotSwapConfiguration, SubmittedConfiguration,
};
pub use repository::{
    HostedRepositoryInfo, RepositoryKind, RepositoryUrl, ResolvedRepository, SourceRepository,
};
pub use secret::{Credentials, Secret, REDACTED};
pub use summary::{
    account_url, build_summary, portal_url, ContinuousDeliveryResult, STATUS_SUCCESS,
};
pub use types::{
    AppType, AuthorizationInfo, AzureInfo, BuildConfiguration, RepositoryInfo, SetupRequest,
    DEFAULT_BRANCH,
};
