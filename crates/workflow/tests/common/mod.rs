//! Scripted in-memory collaborators shared by the workflow tests.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use delivery::{
    AccountCreateRequest, AccountCreateResult, AccountId, AccountName, AccountService, AppType,
    AzureInfo, ContinuousDeliveryService, Credentials, DefinitionId, HostedRepositoryInfo,
    ProgressReporter, ProjectId, ProjectName, ProvisioningConfiguration,
    ProvisioningConfigurationId, ProvisioningResult, ProvisioningStatus, RepositoryIdentifier,
    RepositoryInfo, RepositoryInfoProvider, ResourceGroupName, Secret, ServiceError, SetupRequest,
    SubmittedConfiguration, SubscriptionId, TenantId, WebsiteName,
};
use workflow::ContinuousDeliveryManager;

// ---------------------------------------------------------------------------
// Repository info provider
// ---------------------------------------------------------------------------

pub struct FakeRepositoryInfo {
    pub response: Result<HostedRepositoryInfo, ServiceError>,
    pub calls: AtomicUsize,
}

impl FakeRepositoryInfo {
    pub fn new(repository_id: &str, project: &str) -> Self {
        Self {
            response: Ok(HostedRepositoryInfo {
                repository_id: RepositoryIdentifier::new(repository_id).unwrap(),
                project_name: ProjectName::new(project).unwrap(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepositoryInfoProvider for FakeRepositoryInfo {
    async fn repository_info(
        &self,
        _repository_url: &str,
        _credentials: &Credentials,
    ) -> Result<HostedRepositoryInfo, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Account service
// ---------------------------------------------------------------------------

/// Accounts held in memory; creating an existing account returns no id.
#[derive(Default)]
pub struct FakeAccounts {
    pub existing: Mutex<HashSet<String>>,
    pub exists_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl FakeAccounts {
    pub fn with_account(name: &str) -> Self {
        let accounts = Self::default();
        accounts.existing.lock().unwrap().insert(name.to_string());
        accounts
    }

    pub fn calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst) + self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountService for FakeAccounts {
    async fn account_exists(
        &self,
        account: &AccountName,
        _credentials: &Credentials,
    ) -> Result<bool, ServiceError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.existing.lock().unwrap().contains(account.as_str()))
    }

    async fn create_account(
        &self,
        request: &AccountCreateRequest,
        _credentials: &Credentials,
    ) -> Result<AccountCreateResult, ServiceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let inserted = self
            .existing
            .lock()
            .unwrap()
            .insert(request.account_name.to_string());
        Ok(AccountCreateResult {
            account_id: inserted.then(|| AccountId::new(format!("id-{}", request.account_name)).unwrap()),
        })
    }
}

// ---------------------------------------------------------------------------
// Continuous-delivery service
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of statuses: the first answers the submit call,
/// each further one answers a fetch. A raw submit status, when set, answers
/// the submit call instead.
pub struct ScriptedDelivery {
    pub statuses: Mutex<VecDeque<ProvisioningStatus>>,
    pub submit_status: Option<String>,
    pub failure_message: Option<String>,
    pub project_id: Option<ProjectId>,
    pub build_definition_id: Option<DefinitionId>,
    pub release_definition_id: Option<DefinitionId>,
    pub submitted: Mutex<Vec<ProvisioningConfiguration>>,
    pub submit_accounts: Mutex<Vec<String>>,
    pub submit_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl ScriptedDelivery {
    pub fn new(statuses: &[ProvisioningStatus]) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            submit_status: None,
            failure_message: None,
            project_id: ProjectId::new("project-1"),
            build_definition_id: DefinitionId::new("11"),
            release_definition_id: DefinitionId::new("22"),
            submitted: Mutex::new(Vec::new()),
            submit_accounts: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_submit_status(mut self, status: &str) -> Self {
        self.submit_status = Some(status.to_string());
        self
    }

    pub fn with_failure_message(mut self, message: &str) -> Self {
        self.failure_message = Some(message.to_string());
        self
    }

    pub fn without_release_definition(mut self) -> Self {
        self.release_definition_id = None;
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst) + self.fetches()
    }

    fn next(&self) -> ProvisioningResult {
        let status = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .expect("status script exhausted");
        let mut result =
            ProvisioningResult::new(ProvisioningConfigurationId::new("cfg-1").unwrap(), status);
        match status {
            ProvisioningStatus::Succeeded => {
                result.project_id = self.project_id.clone();
                result.build_definition_id = self.build_definition_id.clone();
                result.release_definition_id = self.release_definition_id.clone();
            }
            ProvisioningStatus::Failed => {
                result.status_message = self.failure_message.clone();
            }
            ProvisioningStatus::Queued | ProvisioningStatus::InProgress => {}
        }
        result
    }
}

#[async_trait]
impl ContinuousDeliveryService for ScriptedDelivery {
    async fn submit(
        &self,
        account: &AccountName,
        configuration: &ProvisioningConfiguration,
        _credentials: &Credentials,
    ) -> Result<SubmittedConfiguration, ServiceError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(configuration.clone());
        self.submit_accounts.lock().unwrap().push(account.to_string());
        let status = match &self.submit_status {
            Some(raw) => raw.clone(),
            None => self.next().status.as_str().to_string(),
        };
        Ok(SubmittedConfiguration {
            id: ProvisioningConfigurationId::new("cfg-1").unwrap(),
            status,
        })
    }

    async fn fetch(
        &self,
        _account: &AccountName,
        id: &ProvisioningConfigurationId,
        _credentials: &Credentials,
    ) -> Result<ProvisioningResult, ServiceError> {
        assert_eq!(id.as_str(), "cfg-1");
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.next())
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingProgress {
    pub reports: Mutex<Vec<(u32, u32, String)>>,
}

impl RecordingProgress {
    pub fn counts(&self) -> Vec<u32> {
        self.reports.lock().unwrap().iter().map(|r| r.0).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.2.clone())
            .collect()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, current: u32, total: u32, message: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((current, total, message.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub struct Harness {
    pub repositories: Arc<FakeRepositoryInfo>,
    pub accounts: Arc<FakeAccounts>,
    pub delivery: Arc<ScriptedDelivery>,
    pub progress: Arc<RecordingProgress>,
}

impl Harness {
    pub fn new(accounts: FakeAccounts, delivery: ScriptedDelivery) -> Self {
        Self {
            repositories: Arc::new(FakeRepositoryInfo::new("repo-guid", "WebProject")),
            accounts: Arc::new(accounts),
            delivery: Arc::new(delivery),
            progress: Arc::new(RecordingProgress::default()),
        }
    }

    pub fn with_repositories(mut self, repositories: FakeRepositoryInfo) -> Self {
        self.repositories = Arc::new(repositories);
        self
    }

    pub fn manager(&self) -> ContinuousDeliveryManager {
        ContinuousDeliveryManager::new(
            self.repositories.clone(),
            self.accounts.clone(),
            self.delivery.clone(),
        )
        .with_progress_reporter(self.progress.clone())
        .with_poll_interval(Duration::ZERO)
    }

    pub fn network_calls(&self) -> usize {
        self.repositories.calls() + self.accounts.calls() + self.delivery.calls()
    }
}

pub fn azure_info() -> AzureInfo {
    AzureInfo {
        resource_group: ResourceGroupName::new("web-rg").unwrap(),
        website_name: WebsiteName::new("contoso-web").unwrap(),
        credentials: Secret::new("aad-token"),
        subscription_id: SubscriptionId::new("00000000-0000-0000-0000-000000000001").unwrap(),
        subscription_name: "Visual Studio Enterprise".to_string(),
        tenant_id: TenantId::new("tenant-1").unwrap(),
        location: "westus".to_string(),
    }
}

pub fn setup_request(repo_url: &str, account: Option<&str>, create_account: bool) -> SetupRequest {
    SetupRequest {
        azure: azure_info(),
        repository: RepositoryInfo {
            url: repo_url.to_string(),
            branch: None,
            token: Some(Secret::new("github-pat")),
        },
        app_type: AppType::AspNetCore,
        account_name: account.map(|name| AccountName::new(name).unwrap()),
        create_account,
        deployment_slot: None,
        app_auth_token: Secret::new("app-token"),
    }
}
