//! Endpoint and API-version settings for the Team Services adapter.

use std::time::Duration;

use serde::Deserialize;

/// Placeholder replaced by the account name in URL templates.
pub const ACCOUNT_PLACEHOLDER: &str = "{account}";

/// Where and how to reach Team Services.
///
/// Defaults target the public service; every field can be overridden from the
/// `[vsts]` table of the CLI configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VstsConfig {
    /// Base URL of the account management service.
    pub accounts_base_url: String,
    /// URL template of an account's portal-extension host, which serves the
    /// continuous-delivery API. Must contain `{account}`.
    pub portalext_url_template: String,
    /// API version sent to the account management service.
    pub accounts_api_version: String,
    /// API version sent to the continuous-delivery service.
    pub continuous_delivery_api_version: String,
    /// API version sent to the repository info endpoint.
    pub info_api_version: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for VstsConfig {
    fn default() -> Self {
        Self {
            accounts_base_url: "https://app.vssps.visualstudio.com".to_string(),
            portalext_url_template: "https://{account}.portalext.visualstudio.com".to_string(),
            accounts_api_version: "3.2-preview".to_string(),
            continuous_delivery_api_version: "3.2-preview.1".to_string(),
            info_api_version: "3.2-preview".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl VstsConfig {
    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
