use delivery::{
    AccountCreateRequest, AccountName, AccountService, AppType, AuthorizationInfo, AzureInfo,
    BranchName, BuildConfiguration, ContinuousDeliveryService, DeploymentTarget,
    ProjectName, ProvisioningConfiguration, ProvisioningConfigurationId, ProvisioningError,
    ProvisioningSource, ProvisioningStatus, RepositoryIdentifier, RepositoryInfoProvider,
    ResolvedRepository, ResourceGroupName, Secret, ServiceError, SlotSwapConfiguration,
    SubscriptionId, TenantId, WebsiteName,
};
use serde_json::json;
use vsts::{AccountClient, ContinuousDeliveryClient, Transport, VstsConfig, VstsInfoProvider};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> Transport {
    let config = VstsConfig {
        accounts_base_url: server.uri(),
        portalext_url_template: format!("{}/{{account}}", server.uri()),
        ..VstsConfig::default()
    };
    Transport::new(config).unwrap()
}

fn credentials() -> Secret {
    Secret::new("aad-token")
}

fn account() -> AccountName {
    AccountName::new("contoso").unwrap()
}

fn configuration(slot: Option<&str>) -> ProvisioningConfiguration {
    let azure = AzureInfo {
        resource_group: ResourceGroupName::new("web-rg").unwrap(),
        website_name: WebsiteName::new("contoso-web").unwrap(),
        credentials: Secret::new("arm-token"),
        subscription_id: SubscriptionId::new("sub-1").unwrap(),
        subscription_name: "Pay-As-You-Go".to_string(),
        tenant_id: TenantId::new("tenant-1").unwrap(),
        location: "westus".to_string(),
    };
    let repository = ResolvedRepository::github(
        RepositoryIdentifier::new("contoso/web").unwrap(),
        BranchName::new("refs/heads/main").unwrap(),
        Some(Secret::new("github-pat")),
    )
    .into_source();

    ProvisioningConfiguration {
        source: ProvisioningSource {
            repository,
            build_configuration: BuildConfiguration::for_app_type(AppType::NodeJsWithGulp, None),
        },
        targets: vec![DeploymentTarget::azure_web_app(
            &azure,
            AuthorizationInfo::bearer(&azure.credentials),
            slot.map(|s| SlotSwapConfiguration {
                slot_name: s.to_string(),
            }),
        )],
        ci_project_name: ProjectName::new("contoso-web").unwrap(),
    }
}

fn provisioning_response(status: &str) -> serde_json::Value {
    json!({
        "id": "cfg-1",
        "ciConfiguration": {
            "project": {"id": "project-1", "name": "contoso-web"},
            "buildDefinition": {"id": 11},
            "releaseDefinition": {"id": 22},
            "result": {"status": status, "statusMessage": null}
        }
    })
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn account_lookup_treats_not_found_as_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_apis/accounts/contoso"))
        .and(query_param("api-version", "3.2-preview"))
        .and(header("authorization", "Bearer aad-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountId": "a-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/_apis/accounts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = AccountClient::new(transport(&server));

    assert!(client.account_exists(&account(), &credentials()).await.unwrap());
    assert!(!client
        .account_exists(&AccountName::new("missing").unwrap(), &credentials())
        .await
        .unwrap());
}

#[tokio::test]
async fn account_create_sends_precreated_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_apis/accounts"))
        .and(query_param("usePrecreated", "true"))
        .and(query_param("api-version", "3.2-preview"))
        .and(body_partial_json(json!({
            "accountName": "contoso",
            "organization": "contoso",
            "properties": {
                "Microsoft.VisualStudio.Services.Account.SignupEntryPoint": "AzureCli"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accountId": "a-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AccountClient::new(transport(&server));
    let result = client
        .create_account(&AccountCreateRequest::for_account(&account()), &credentials())
        .await
        .unwrap();

    assert!(result.created());
    assert_eq!(result.account_id.unwrap().as_str(), "a-1");
}

#[tokio::test]
async fn account_create_without_id_reports_existing_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_apis/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = AccountClient::new(transport(&server));
    let result = client
        .create_account(&AccountCreateRequest::for_account(&account()), &credentials())
        .await
        .unwrap();

    assert!(!result.created());
}

#[tokio::test]
async fn server_errors_surface_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("TF400813: not authorized"))
        .mount(&server)
        .await;

    let client = AccountClient::new(transport(&server));
    let err = client
        .account_exists(&account(), &credentials())
        .await
        .unwrap_err();

    match err {
        ServiceError::Http {
            status, message, ..
        } => {
            assert_eq!(status, 401);
            assert_eq!(message, "TF400813: not authorized");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Continuous delivery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_posts_configuration_to_account_host() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/contoso/_apis/continuousdelivery/provisioningconfigurations",
        ))
        .and(query_param("api-version", "3.2-preview.1"))
        .and(header("authorization", "Bearer aad-token"))
        .and(body_partial_json(json!({
            "source": {
                "type": "codeRepository",
                "repository": {
                    "type": "Github",
                    "id": "contoso/web",
                    "defaultBranch": "refs/heads/main",
                    "authorizationInfo": {
                        "scheme": "PersonalAccessToken",
                        "parameters": {"AccessToken": "github-pat"}
                    }
                },
                "buildConfiguration": {"type": "NodeJS", "nodeType": "Gulp"}
            },
            "targets": [{
                "provider": "azure",
                "type": "windowsAppService",
                "environmentType": "production",
                "friendlyName": "Production",
                "subscriptionId": "sub-1",
                "resourceIdentifier": "contoso-web",
                "resourceGroupName": "web-rg",
                "authorizationInfo": {
                    "scheme": "Headers",
                    "parameters": {"Authorization": "Bearer arm-token"}
                },
                "slotSwapConfiguration": {"slotName": "staging"}
            }],
            "ciConfiguration": {"project": {"name": "contoso-web"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(provisioning_response("queued")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContinuousDeliveryClient::new(transport(&server));
    let submitted = client
        .submit(&account(), &configuration(Some("staging")), &credentials())
        .await
        .unwrap();

    assert_eq!(submitted.id.as_str(), "cfg-1");
    assert_eq!(submitted.status(), Some(ProvisioningStatus::Queued));
}

#[tokio::test]
async fn submit_passes_unknown_status_through_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/contoso/_apis/continuousdelivery/provisioningconfigurations",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cfg-1",
            "ciConfiguration": {"result": {"status": "cancelled"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContinuousDeliveryClient::new(transport(&server));
    let submitted = client
        .submit(&account(), &configuration(None), &credentials())
        .await
        .unwrap();
    assert_eq!(submitted.status, "cancelled");

    let err = workflow::submit_configuration(
        &client,
        &account(),
        &configuration(None),
        &credentials(),
    )
    .await
    .unwrap_err();
    match err {
        ProvisioningError::UnexpectedState { status } => assert_eq!(status, "cancelled"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetch_reads_configuration_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/contoso/_apis/continuousdelivery/provisioningconfigurations/cfg-1",
        ))
        .and(query_param("api-version", "3.2-preview.1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provisioning_response("succeeded")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ContinuousDeliveryClient::new(transport(&server));
    let result = client
        .fetch(
            &account(),
            &ProvisioningConfigurationId::new("cfg-1").unwrap(),
            &credentials(),
        )
        .await
        .unwrap();

    assert_eq!(result.status, ProvisioningStatus::Succeeded);
    assert_eq!(result.project_id.unwrap().as_str(), "project-1");
    assert_eq!(result.release_definition_id.unwrap().as_str(), "22");
}

#[tokio::test]
async fn unknown_status_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provisioning_response("cancelled")),
        )
        .mount(&server)
        .await;

    let client = ContinuousDeliveryClient::new(transport(&server));
    let err = client
        .fetch(
            &account(),
            &ProvisioningConfigurationId::new("cfg-1").unwrap(),
            &credentials(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidResponse { .. }), "{err}");
}

// ---------------------------------------------------------------------------
// Repository info
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repository_info_reads_id_and_project() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/WebProject/_git/web/vsts/info"))
        .and(query_param("api-version", "3.2-preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "serverUrl": server.uri(),
            "collection": {"id": "c-1"},
            "repository": {
                "id": "repo-guid",
                "name": "web",
                "project": {"id": "p-1", "name": "WebProject"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = VstsInfoProvider::new(transport(&server));
    let info = provider
        .repository_info(
            &format!("{}/WebProject/_git/web", server.uri()),
            &credentials(),
        )
        .await
        .unwrap();

    assert_eq!(info.repository_id.as_str(), "repo-guid");
    assert_eq!(info.project_name.as_str(), "WebProject");
}

#[tokio::test]
async fn malformed_repository_info_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sign in</html>"))
        .mount(&server)
        .await;

    let provider = VstsInfoProvider::new(transport(&server));
    let err = provider
        .repository_info(&format!("{}/p/_git/r", server.uri()), &credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidResponse { .. }), "{err}");
}
