//! JSON shapes of the Team Services REST APIs.
//!
//! Request bodies borrow from the domain types and are built right before a
//! call; response bodies are decoded here and converted into domain types so
//! that nothing outside this crate depends on the wire format.

use std::collections::BTreeMap;

use delivery::{
    AccountCreateRequest, AccountCreateResult, AccountId, AuthorizationInfo, DefinitionId,
    DeploymentTarget, HostedRepositoryInfo, ProjectId, ProjectName, ProvisioningConfiguration,
    ProvisioningConfigurationId, ProvisioningResult, ProvisioningStatus, RepositoryIdentifier,
    SubmittedConfiguration,
};
use serde::{Deserialize, Serialize};

use crate::error::VstsError;

// ---------------------------------------------------------------------------
// Continuous delivery: request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProvisioningConfigurationBody<'a> {
    source: SourceBody<'a>,
    targets: Vec<TargetBody<'a>>,
    ci_configuration: CiConfigurationBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceBody<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    repository: SourceRepositoryBody<'a>,
    build_configuration: BuildConfigurationBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceRepositoryBody<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: &'a str,
    default_branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization_info: Option<AuthorizationInfoBody<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildConfigurationBody<'a> {
    #[serde(rename = "type")]
    platform: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    working_directory: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AuthorizationInfoBody<'a> {
    scheme: &'static str,
    parameters: AuthorizationParametersBody<'a>,
}

#[derive(Debug, Serialize)]
struct AuthorizationParametersBody<'a> {
    #[serde(rename = "Authorization", skip_serializing_if = "Option::is_none")]
    authorization: Option<&'a str>,
    #[serde(rename = "AccessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetBody<'a> {
    provider: &'a str,
    #[serde(rename = "type")]
    target_type: &'a str,
    environment_type: &'a str,
    friendly_name: &'a str,
    subscription_id: &'a str,
    subscription_name: &'a str,
    tenant_id: &'a str,
    resource_identifier: &'a str,
    resource_group_name: &'a str,
    location: &'a str,
    authorization_info: AuthorizationInfoBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slot_swap_configuration: Option<SlotSwapBody<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotSwapBody<'a> {
    slot_name: &'a str,
}

#[derive(Debug, Serialize)]
struct CiConfigurationBody<'a> {
    project: CiArtifactBody<'a>,
}

#[derive(Debug, Serialize)]
struct CiArtifactBody<'a> {
    name: &'a str,
}

impl<'a> From<&'a AuthorizationInfo> for AuthorizationInfoBody<'a> {
    fn from(info: &'a AuthorizationInfo) -> Self {
        let parameters = match info {
            AuthorizationInfo::PersonalAccessToken { access_token } => {
                AuthorizationParametersBody {
                    authorization: None,
                    access_token: access_token.as_ref().map(|t| t.expose()),
                }
            }
            AuthorizationInfo::Headers { authorization } => AuthorizationParametersBody {
                authorization: Some(authorization.expose()),
                access_token: None,
            },
        };
        Self {
            scheme: info.scheme(),
            parameters,
        }
    }
}

impl<'a> From<&'a DeploymentTarget> for TargetBody<'a> {
    fn from(target: &'a DeploymentTarget) -> Self {
        Self {
            provider: &target.provider,
            target_type: &target.target_type,
            environment_type: &target.environment_type,
            friendly_name: &target.friendly_name,
            subscription_id: target.subscription_id.as_str(),
            subscription_name: &target.subscription_name,
            tenant_id: target.tenant_id.as_str(),
            resource_identifier: target.resource_identifier.as_str(),
            resource_group_name: target.resource_group.as_str(),
            location: &target.location,
            authorization_info: (&target.authorization).into(),
            slot_swap_configuration: target.slot_swap.as_ref().map(|slot| SlotSwapBody {
                slot_name: &slot.slot_name,
            }),
        }
    }
}

impl<'a> From<&'a ProvisioningConfiguration> for ProvisioningConfigurationBody<'a> {
    fn from(config: &'a ProvisioningConfiguration) -> Self {
        let repository = &config.source.repository;
        let build = &config.source.build_configuration;
        Self {
            source: SourceBody {
                source_type: "codeRepository",
                repository: SourceRepositoryBody {
                    kind: repository.kind().as_str(),
                    id: repository.identifier().as_str(),
                    default_branch: repository.branch().as_str(),
                    authorization_info: repository.authorization().map(Into::into),
                },
                build_configuration: BuildConfigurationBody {
                    platform: &build.platform,
                    working_directory: build.working_directory.as_deref(),
                    node_type: build.tool_hint.as_deref(),
                },
            },
            targets: config.targets.iter().map(Into::into).collect(),
            ci_configuration: CiConfigurationBody {
                project: CiArtifactBody {
                    name: config.ci_project_name.as_str(),
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Continuous delivery: response
// ---------------------------------------------------------------------------

/// Ids arrive as strings or as integers depending on the artifact type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProvisioningConfigurationResponse {
    id: String,
    #[serde(default)]
    ci_configuration: Option<CiConfigurationResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CiConfigurationResponse {
    project: Option<CiArtifactResponse>,
    build_definition: Option<CiArtifactResponse>,
    release_definition: Option<CiArtifactResponse>,
    result: Option<CiResultResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CiArtifactResponse {
    id: Option<WireId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CiResultResponse {
    status: String,
    #[serde(default)]
    status_message: Option<String>,
}

fn artifact_id(artifact: Option<CiArtifactResponse>) -> Option<String> {
    artifact.and_then(|a| a.id).map(WireId::into_string)
}

impl ProvisioningConfigurationResponse {
    fn into_parts(
        self,
        endpoint: &str,
    ) -> Result<(ProvisioningConfigurationId, CiConfigurationResponse, CiResultResponse), VstsError>
    {
        let id = ProvisioningConfigurationId::new(self.id)
            .ok_or_else(|| decode_error(endpoint, "provisioning configuration id is empty"))?;
        let mut ci = self.ci_configuration.unwrap_or_default();
        let result = ci
            .result
            .take()
            .ok_or_else(|| decode_error(endpoint, "ciConfiguration.result is missing"))?;
        Ok((id, ci, result))
    }

    /// Converts the answer to a submission, keeping the status string as sent.
    pub(crate) fn into_submitted(self, endpoint: &str) -> Result<SubmittedConfiguration, VstsError> {
        let (id, _, result) = self.into_parts(endpoint)?;
        Ok(SubmittedConfiguration {
            id,
            status: result.status,
        })
    }

    /// Converts the response into a [`ProvisioningResult`].
    ///
    /// A missing or unknown status is a decoding error.
    pub(crate) fn into_result(self, endpoint: &str) -> Result<ProvisioningResult, VstsError> {
        let (id, ci, result) = self.into_parts(endpoint)?;
        let status = ProvisioningStatus::parse(&result.status).ok_or_else(|| {
            decode_error(
                endpoint,
                &format!("unknown provisioning status '{}'", result.status),
            )
        })?;

        Ok(ProvisioningResult {
            id,
            status,
            status_message: result.status_message,
            project_id: artifact_id(ci.project).and_then(ProjectId::new),
            build_definition_id: artifact_id(ci.build_definition).and_then(DefinitionId::new),
            release_definition_id: artifact_id(ci.release_definition).and_then(DefinitionId::new),
        })
    }
}

fn decode_error(endpoint: &str, message: &str) -> VstsError {
    VstsError::Decode {
        endpoint: endpoint.to_string(),
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountCreateBody<'a> {
    account_name: &'a str,
    creator: Option<&'a str>,
    organization: &'a str,
    preferences: Option<AccountPreferencesBody<'a>>,
    properties: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountPreferencesBody<'a> {
    culture: Option<&'a str>,
    language: Option<&'a str>,
    time_zone: Option<&'a str>,
}

impl<'a> From<&'a AccountCreateRequest> for AccountCreateBody<'a> {
    fn from(request: &'a AccountCreateRequest) -> Self {
        Self {
            account_name: request.account_name.as_str(),
            creator: request.creator.as_deref(),
            organization: &request.organization,
            preferences: request.preferences.as_ref().map(|p| AccountPreferencesBody {
                culture: p.culture.as_deref(),
                language: p.language.as_deref(),
                time_zone: p.time_zone.as_deref(),
            }),
            properties: &request.properties,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AccountResponse {
    account_id: Option<String>,
}

impl From<AccountResponse> for AccountCreateResult {
    fn from(response: AccountResponse) -> Self {
        Self {
            account_id: response.account_id.and_then(AccountId::new),
        }
    }
}

// ---------------------------------------------------------------------------
// Repository info
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct VstsInfoResponse {
    repository: RepositoryInfoResponse,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfoResponse {
    id: String,
    project: ProjectInfoResponse,
}

#[derive(Debug, Deserialize)]
struct ProjectInfoResponse {
    name: String,
}

impl VstsInfoResponse {
    pub(crate) fn into_info(self, endpoint: &str) -> Result<HostedRepositoryInfo, VstsError> {
        let repository_id =
            RepositoryIdentifier::new(self.repository.id).ok_or_else(|| VstsError::Decode {
                endpoint: endpoint.to_string(),
                message: "repository id is empty".to_string(),
            })?;
        let project_name =
            ProjectName::new(self.repository.project.name).ok_or_else(|| VstsError::Decode {
                endpoint: endpoint.to_string(),
                message: "project name is empty".to_string(),
            })?;
        Ok(HostedRepositoryInfo {
            repository_id,
            project_name,
        })
    }
}
