//! Account step: create-or-get, or verify existence.
//!
//! Neither path is atomic with respect to other agents provisioning the same
//! account name; the outcome is best-effort, not exactly-once.

use delivery::{
    account_url, AccountCreateRequest, AccountName, AccountService, Credentials, ProvisioningError,
};
use tracing::{info, instrument};

use crate::progress::{Progress, STEP, TOTAL};

/// Makes sure `account` is usable and returns whether this call created it.
///
/// With `create` set, the account is created or an existing one accepted; an
/// existing account is reported as not created. Without it, the account must
/// already exist.
///
/// # Errors
///
/// - [`ProvisioningError::Configuration`] if `create` is false and the account
///   does not exist.
/// - [`ProvisioningError::Service`] if the account service call fails.
#[instrument(skip(service, credentials, progress), fields(account = %account))]
pub async fn ensure_account(
    service: &dyn AccountService,
    account: &AccountName,
    create: bool,
    credentials: &Credentials,
    progress: &Progress,
) -> Result<bool, ProvisioningError> {
    if create {
        progress.report(
            0,
            TOTAL,
            "Creating or getting Team Services account information",
        );
        let request = AccountCreateRequest::for_account(account);
        let created = service
            .create_account(&request, credentials)
            .await?
            .created();
        if created {
            info!("created Team Services account");
            progress.report(STEP, TOTAL, "Team Services account created");
        } else {
            info!("using existing Team Services account");
        }
        return Ok(created);
    }

    if !service.account_exists(account, credentials).await? {
        return Err(ProvisioningError::configuration(format!(
            "The Team Services url '{}' does not exist. Check the spelling and try again.",
            account_url(account)
        )));
    }
    info!("verified Team Services account exists");
    Ok(false)
}
