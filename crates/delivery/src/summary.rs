//! Final result aggregate and the text/URLs shown to the user.
//!
//! Nothing here talks to a service: [`build_summary`] only assembles strings
//! from the final [`ProvisioningResult`] and the identifying fields of the run.
//! Every interpolated path segment is percent-encoded, leaving `/` and the
//! RFC 3986 unreserved characters intact.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::{
    AccountName, AzureInfo, ProvisioningResult, ResourceGroupName, SubscriptionId, WebsiteName,
};

/// Status reported on every successful run.
pub const STATUS_SUCCESS: &str = "SUCCESS";

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

fn quote(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Returns the web URL of a Team Services account.
pub fn account_url(account: &AccountName) -> String {
    format!("https://{}.visualstudio.com", quote(account.as_str()))
}

/// Returns the Azure portal page showing continuous delivery for a web site.
pub fn portal_url(
    subscription_id: &SubscriptionId,
    resource_group: &ResourceGroupName,
    website_name: &WebsiteName,
) -> String {
    format!(
        "https://portal.azure.com/#resource/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/sites/{}/vstscd",
        quote(subscription_id.as_str()),
        quote(resource_group.as_str()),
        quote(website_name.as_str()),
    )
}

/// Everything a caller learns from a successful setup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousDeliveryResult {
    /// `true` if the run created the Team Services account.
    pub account_created: bool,
    /// Web URL of the Team Services account.
    pub account_url: String,
    /// Link to the created build definition, when the service reported one.
    pub build_definition_url: Option<String>,
    /// Link to the created release definition, when the service reported one.
    pub release_definition_url: Option<String>,
    /// Resource group of the target web site.
    pub resource_group: ResourceGroupName,
    /// Subscription of the target web site.
    pub subscription_id: SubscriptionId,
    /// Name of the target web site.
    pub website_name: WebsiteName,
    /// Azure portal page for the web site's continuous delivery.
    pub continuous_delivery_url: String,
    /// Always [`STATUS_SUCCESS`].
    pub status: String,
    /// Human-readable summary of what was set up.
    pub status_message: String,
    /// Final configuration state as reported by the service.
    pub status_details: ProvisioningResult,
}

/// Builds the result of a successful run.
///
/// The build and release URLs are only produced when the final configuration
/// names both the team project and the respective definition.
pub fn build_summary(
    final_result: ProvisioningResult,
    account: &AccountName,
    account_created: bool,
    azure: &AzureInfo,
) -> ContinuousDeliveryResult {
    let account_url = account_url(account);
    let verb = if account_created { "created" } else { "updated" };
    let website_url = portal_url(
        &azure.subscription_id,
        &azure.resource_group,
        &azure.website_name,
    );

    let mut summary = String::from("\n");
    summary.push_str(&format!(
        "The Team Services account '{account_url}' was {verb} to handle the continuous delivery.\n"
    ));
    summary.push_str("You can check on the status of the Azure web site deployment here:\n");
    summary.push_str(&website_url);
    summary.push('\n');

    let project = final_result.project_id.as_ref().map(|p| quote(p.as_str()));
    let build_definition_url = project
        .as_ref()
        .zip(final_result.build_definition_id.as_ref())
        .map(|(project, definition)| {
            format!(
                "{account_url}/{project}/_build?_a=simple-process&definitionId={}",
                quote(definition.as_str())
            )
        });
    let release_definition_url = project
        .as_ref()
        .zip(final_result.release_definition_id.as_ref())
        .map(|(project, definition)| {
            format!(
                "{account_url}/{project}/_apps/hub/ms.vss-releaseManagement-web.hub-explorer?definitionId={}&_a=releases",
                quote(definition.as_str())
            )
        });

    ContinuousDeliveryResult {
        account_created,
        account_url,
        build_definition_url,
        release_definition_url,
        resource_group: azure.resource_group.clone(),
        subscription_id: azure.subscription_id.clone(),
        website_name: azure.website_name.clone(),
        continuous_delivery_url: website_url,
        status: STATUS_SUCCESS.to_string(),
        status_message: summary,
        status_details: final_result,
    }
}
