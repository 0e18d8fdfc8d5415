//! Caller-supplied value types for a continuous-delivery setup run.
//!
//! Everything the workflow needs from its caller is gathered into one
//! immutable [`SetupRequest`]: the target web site ([`AzureInfo`]), the source
//! repository ([`RepositoryInfo`]) and the setup options. Nothing here is
//! mutated once the run starts.

use std::str::FromStr;

use crate::{
    AccountName, BranchName, Credentials, ProvisioningError, ResourceGroupName, Secret,
    SubscriptionId, TenantId, WebsiteName,
};

/// Branch used when the caller does not name one.
pub const DEFAULT_BRANCH: &str = "refs/heads/master";

// ---------------------------------------------------------------------------
// Azure target
// ---------------------------------------------------------------------------

/// The Azure App Service web site that releases are deployed to.
#[derive(Debug, Clone)]
pub struct AzureInfo {
    /// Resource group containing the web site.
    pub resource_group: ResourceGroupName,
    /// Name of the web site.
    pub website_name: WebsiteName,
    /// Bearer token for Team Services calls made on the caller's behalf.
    pub credentials: Credentials,
    /// Subscription owning the resource group.
    pub subscription_id: SubscriptionId,
    /// Display name of the subscription.
    pub subscription_name: String,
    /// Azure AD tenant of the subscription.
    pub tenant_id: TenantId,
    /// Azure region of the web site (e.g. `"westus"`).
    pub location: String,
}

// ---------------------------------------------------------------------------
// Source repository
// ---------------------------------------------------------------------------

/// The source repository to build from, as given by the caller.
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    /// Repository URL; classified by [`crate::RepositoryUrl::classify`].
    pub url: String,
    /// Branch to build. `None` means [`DEFAULT_BRANCH`].
    pub branch: Option<BranchName>,
    /// Personal access token for GitHub repositories.
    pub token: Option<Secret>,
}

impl RepositoryInfo {
    /// Returns the branch to build, falling back to [`DEFAULT_BRANCH`].
    pub fn effective_branch(&self) -> BranchName {
        self.branch
            .clone()
            .unwrap_or_else(|| BranchName(DEFAULT_BRANCH.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Application type and build configuration
// ---------------------------------------------------------------------------

/// Kind of web application being deployed; selects the build template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppType {
    /// ASP.NET web application project.
    AspNetWap,
    /// ASP.NET Core application.
    AspNetCore,
    /// Node.js application built with Gulp.
    NodeJsWithGulp,
    /// Node.js application built with Grunt.
    NodeJsWithGrunt,
}

impl AppType {
    /// Every accepted application type, in display order.
    pub const ALL: [AppType; 4] = [
        AppType::AspNetWap,
        AppType::AspNetCore,
        AppType::NodeJsWithGulp,
        AppType::NodeJsWithGrunt,
    ];

    /// Returns the name used on the command line and in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            AppType::AspNetWap => "AspNetWap",
            AppType::AspNetCore => "AspNetCore",
            AppType::NodeJsWithGulp => "NodeJSWithGulp",
            AppType::NodeJsWithGrunt => "NodeJSWithGrunt",
        }
    }
}

impl std::fmt::Display for AppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppType {
    type Err = ProvisioningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppType::ALL
            .into_iter()
            .find(|app| app.as_str() == s)
            .ok_or_else(|| {
                let accepted: Vec<&str> = AppType::ALL.iter().map(|a| a.as_str()).collect();
                ProvisioningError::configuration(format!(
                    "The app_type '{s}' was not understood. Accepted values: {}.",
                    accepted.join(", ")
                ))
            })
    }
}

/// Build template selection sent with the provisioning source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    /// Platform the build template targets (`"AspNetWap"`, `"NodeJS"`, ...).
    pub platform: String,
    /// Directory within the repository containing the application.
    pub working_directory: Option<String>,
    /// Task runner hint for Node.js builds (`"Gulp"` or `"Grunt"`).
    pub tool_hint: Option<String>,
}

impl BuildConfiguration {
    /// Maps an application type onto its build template.
    ///
    /// ASP.NET types pass through unchanged; Node.js types collapse onto the
    /// `NodeJS` platform with the task runner as a hint.
    pub fn for_app_type(app_type: AppType, working_directory: Option<String>) -> Self {
        let (platform, tool_hint) = match app_type {
            AppType::AspNetWap | AppType::AspNetCore => (app_type.as_str(), None),
            AppType::NodeJsWithGulp => ("NodeJS", Some("Gulp")),
            AppType::NodeJsWithGrunt => ("NodeJS", Some("Grunt")),
        };
        Self {
            platform: platform.to_string(),
            working_directory,
            tool_hint: tool_hint.map(str::to_string),
        }
    }

    /// Parses `app_type` and maps it onto its build template.
    ///
    /// # Errors
    ///
    /// [`ProvisioningError::Configuration`] if `app_type` is not one of
    /// [`AppType::ALL`].
    pub fn parse(app_type: &str) -> Result<Self, ProvisioningError> {
        Ok(Self::for_app_type(app_type.parse()?, None))
    }
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// Authorization attached to a source repository or a deployment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationInfo {
    /// GitHub personal access token.
    PersonalAccessToken {
        /// The token; absent when the caller supplied none.
        access_token: Option<Secret>,
    },
    /// Raw HTTP authorization header value, used for the Azure target.
    Headers {
        /// Full `Authorization` header value, e.g. `"Bearer <token>"`.
        authorization: Secret,
    },
}

impl AuthorizationInfo {
    /// Builds the `Headers` authorization carrying `token` as a bearer token.
    pub fn bearer(token: &Secret) -> Self {
        Self::Headers {
            authorization: Secret::new(format!("Bearer {}", token.expose())),
        }
    }

    /// Returns the scheme name used on the wire.
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthorizationInfo::PersonalAccessToken { .. } => "PersonalAccessToken",
            AuthorizationInfo::Headers { .. } => "Headers",
        }
    }
}

// ---------------------------------------------------------------------------
// Setup request
// ---------------------------------------------------------------------------

/// Everything one setup run needs from its caller.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    /// Target web site.
    pub azure: AzureInfo,
    /// Source repository.
    pub repository: RepositoryInfo,
    /// Application type; selects the build template.
    pub app_type: AppType,
    /// Team Services account to use. Required unless the repository itself is
    /// hosted by Team Services.
    pub account_name: Option<AccountName>,
    /// Create the account (or accept an existing one) instead of only
    /// verifying that it exists.
    pub create_account: bool,
    /// Deployment slot to swap through; `None` deploys straight to production.
    pub deployment_slot: Option<String>,
    /// Token granting Team Services access to the Azure subscription; sent as
    /// a bearer header on the deployment target.
    pub app_auth_token: Secret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspnet_types_pass_through() {
        for name in ["AspNetWap", "AspNetCore"] {
            let config = BuildConfiguration::parse(name).unwrap();
            assert_eq!(config.platform, name);
            assert_eq!(config.tool_hint, None);
        }
    }

    #[test]
    fn node_types_map_to_nodejs_with_hint() {
        let gulp = BuildConfiguration::parse("NodeJSWithGulp").unwrap();
        assert_eq!(gulp.platform, "NodeJS");
        assert_eq!(gulp.tool_hint.as_deref(), Some("Gulp"));

        let grunt = BuildConfiguration::parse("NodeJSWithGrunt").unwrap();
        assert_eq!(grunt.platform, "NodeJS");
        assert_eq!(grunt.tool_hint.as_deref(), Some("Grunt"));
    }

    #[test]
    fn unknown_app_type_is_a_configuration_error() {
        for name in ["Python", "", "aspnetcore"] {
            let err = BuildConfiguration::parse(name).unwrap_err();
            assert!(
                matches!(err, ProvisioningError::Configuration { ref message } if message.contains("Accepted values")),
                "unexpected error for {name:?}: {err}"
            );
        }
    }

    #[test]
    fn branch_defaults_to_master() {
        let repo = RepositoryInfo {
            url: "https://github.com/contoso/web".to_string(),
            branch: None,
            token: None,
        };
        assert_eq!(repo.effective_branch().as_str(), DEFAULT_BRANCH);
    }

    #[test]
    fn bearer_authorization_prefixes_token() {
        let auth = AuthorizationInfo::bearer(&Secret::new("abc"));
        match auth {
            AuthorizationInfo::Headers { authorization } => {
                assert_eq!(authorization.expose(), "Bearer abc");
            }
            other => panic!("unexpected authorization {other:?}"),
        }
    }
}
