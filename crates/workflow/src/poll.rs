//! Poll loop waiting for the service to finish provisioning.
//!
//! There is no deadline and no cancellation hook: the loop ends only when the
//! service reports a terminal status or a fetch fails.

use std::time::Duration;

use delivery::{
    AccountName, ContinuousDeliveryService, Credentials, ProvisioningConfigurationId,
    ProvisioningError, ProvisioningResult, ProvisioningStatus,
};
use tracing::{debug, info, instrument, warn};

use crate::progress::{advance, Progress, STEP, TOTAL};

/// Interval between status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

const SETUP_MESSAGE: &str = "Setting up Team Services continuous deployment";

/// Fetches the configuration `id` until its status is terminal.
///
/// Fetches once straight away, then once per `interval` while the status is
/// `queued` or `inProgress`, reporting progress before each sleep.
///
/// # Errors
///
/// - [`ProvisioningError::RemoteProvisioning`] carrying the server message if
///   provisioning fails.
/// - [`ProvisioningError::Service`] if a fetch fails.
#[instrument(skip(service, credentials, progress), fields(account = %account, id = %id))]
pub async fn wait_for_completion(
    service: &dyn ContinuousDeliveryService,
    account: &AccountName,
    id: &ProvisioningConfigurationId,
    credentials: &Credentials,
    progress: &Progress,
    interval: Duration,
) -> Result<ProvisioningResult, ProvisioningError> {
    let mut step = STEP;
    progress.report(step, TOTAL, SETUP_MESSAGE);
    let mut current = service.fetch(account, id, credentials).await?;

    loop {
        match current.status {
            ProvisioningStatus::Queued | ProvisioningStatus::InProgress => {
                step = advance(step);
                progress.report(
                    step,
                    TOTAL,
                    &format!("{SETUP_MESSAGE} ({})", current.status),
                );
                debug!(status = %current.status, "provisioning still pending");
                tokio::time::sleep(interval).await;
                current = service.fetch(account, id, credentials).await?;
            }
            ProvisioningStatus::Succeeded => {
                progress.report(TOTAL, TOTAL, &format!("{SETUP_MESSAGE} (SUCCEEDED)"));
                info!("provisioning succeeded");
                return Ok(current);
            }
            ProvisioningStatus::Failed => {
                progress.report(TOTAL, TOTAL, &format!("{SETUP_MESSAGE} (FAILED)"));
                let message = current.status_message.unwrap_or_default();
                warn!(%message, "provisioning failed");
                return Err(ProvisioningError::RemoteProvisioning { message });
            }
        }
    }
}
