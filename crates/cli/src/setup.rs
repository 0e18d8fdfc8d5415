//! The `setup` command: builds the adapters, runs the workflow and prints the
//! result.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use delivery::{
    AccountName, AzureInfo, BranchName, ContinuousDeliveryResult, RepositoryInfo,
    ResourceGroupName, Secret, SetupRequest, SubscriptionId, TenantId, WebsiteName,
};
use tracing::info;
use vsts::{AccountClient, ContinuousDeliveryClient, Transport, VstsInfoProvider};
use workflow::ContinuousDeliveryManager;

use crate::args::SetupArgs;
use crate::config::Settings;
use crate::progress::ConsoleProgress;

/// Runs one setup against the configured Team Services endpoints.
pub async fn run(args: SetupArgs, settings: &Settings) -> Result<ContinuousDeliveryResult> {
    let request = setup_request(args)?;

    let transport =
        Transport::new(settings.vsts.clone()).context("Failed to initialise HTTP client")?;
    let manager = ContinuousDeliveryManager::new(
        Arc::new(VstsInfoProvider::new(transport.clone())),
        Arc::new(AccountClient::new(transport.clone())),
        Arc::new(ContinuousDeliveryClient::new(transport)),
    )
    .with_progress_reporter(Arc::new(ConsoleProgress::new(std::io::stderr())))
    .with_poll_interval(settings.poll_interval);

    let result = manager.setup_continuous_delivery(&request).await?;
    info!(
        account_url = %result.account_url,
        account_created = result.account_created,
        "continuous delivery is set up"
    );
    Ok(result)
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| anyhow!("--{flag} must not be empty"))
}

/// Converts parsed arguments into a workflow request.
fn setup_request(args: SetupArgs) -> Result<SetupRequest> {
    let azure = AzureInfo {
        resource_group: required(ResourceGroupName::new(args.resource_group), "resource-group")?,
        website_name: required(WebsiteName::new(args.name), "name")?,
        credentials: Secret::new(args.vsts_token),
        subscription_id: required(SubscriptionId::new(args.subscription_id), "subscription-id")?,
        subscription_name: args.subscription_name,
        tenant_id: required(TenantId::new(args.tenant_id), "tenant-id")?,
        location: args.location,
    };

    Ok(SetupRequest {
        azure,
        repository: RepositoryInfo {
            url: args.repo_url,
            branch: args.branch.and_then(BranchName::new),
            token: args.git_token.map(Secret::new),
        },
        app_type: args.app_type,
        account_name: args.account.and_then(AccountName::new),
        create_account: args.create_account,
        deployment_slot: args.slot.filter(|s| !s.is_empty()),
        app_auth_token: Secret::new(args.azure_token),
    })
}
