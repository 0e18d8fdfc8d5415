//! [`AccountService`] over the Team Services account management API.

use async_trait::async_trait;
use delivery::{
    AccountCreateRequest, AccountCreateResult, AccountName, AccountService, Credentials,
    ServiceError,
};
use tracing::{debug, instrument};

use crate::transport::{join, Transport};
use crate::wire::{AccountCreateBody, AccountResponse};

/// Account management client.
#[derive(Debug, Clone)]
pub struct AccountClient {
    transport: Transport,
}

impl AccountClient {
    /// Creates a client that talks to `transport`'s configured accounts host.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AccountService for AccountClient {
    #[instrument(skip(self, credentials), fields(account = %account))]
    async fn account_exists(
        &self,
        account: &AccountName,
        credentials: &Credentials,
    ) -> Result<bool, ServiceError> {
        let config = self.transport.config();
        let url = join(
            &config.accounts_base_url,
            &["_apis", "accounts", account.as_str()],
        )?;
        let endpoint = url.to_string();
        let request = self
            .transport
            .get(url, &config.accounts_api_version, credentials);

        let found: Option<AccountResponse> = self
            .transport
            .send_optional_json(request, &endpoint)
            .await?;
        debug!(exists = found.is_some(), "account lookup finished");
        Ok(found.is_some())
    }

    #[instrument(skip_all, fields(account = %request.account_name))]
    async fn create_account(
        &self,
        request: &AccountCreateRequest,
        credentials: &Credentials,
    ) -> Result<AccountCreateResult, ServiceError> {
        let config = self.transport.config();
        let mut url = join(&config.accounts_base_url, &["_apis", "accounts"])?;
        if request.use_precreated {
            url.query_pairs_mut().append_pair("usePrecreated", "true");
        }
        let endpoint = url.to_string();
        let body = AccountCreateBody::from(request);
        let request = self
            .transport
            .post(url, &body, &config.accounts_api_version, credentials);

        let response: AccountResponse = self.transport.send_json(request, &endpoint).await?;
        let result = AccountCreateResult::from(response);
        debug!(created = result.created(), "account create finished");
        Ok(result)
    }
}
