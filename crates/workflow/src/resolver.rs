//! Repository resolution step.

use delivery::{
    Credentials, ProvisioningError, RepositoryIdentifier, RepositoryInfo, RepositoryInfoProvider,
    RepositoryUrl, ResolvedRepository,
};
use tracing::{debug, instrument};

/// Turns the caller's repository URL into a [`ResolvedRepository`].
///
/// Only hosted Git URLs cost a remote call: the repository id and owning
/// project come from `provider`, and a failed lookup is returned unchanged.
///
/// # Errors
///
/// - [`ProvisioningError::Service`] if the hosted Git lookup fails.
/// - [`ProvisioningError::Configuration`] if the URL is empty.
#[instrument(skip_all, fields(kind))]
pub async fn resolve_repository(
    provider: &dyn RepositoryInfoProvider,
    repository: &RepositoryInfo,
    credentials: &Credentials,
) -> Result<ResolvedRepository, ProvisioningError> {
    let branch = repository.effective_branch();
    let url = RepositoryUrl::classify(&repository.url);
    tracing::Span::current().record("kind", url.kind().as_str());

    let resolved = match url {
        RepositoryUrl::HostedGit { account } => {
            let info = provider
                .repository_info(&repository.url, credentials)
                .await?;
            ResolvedRepository::tfs_git(info, branch, account)
        }
        RepositoryUrl::Github { path } => {
            ResolvedRepository::github(path, branch, repository.token.clone())
        }
        RepositoryUrl::Tfvc { account, path } => ResolvedRepository::tfvc(path, branch, account),
        RepositoryUrl::External => {
            let url = RepositoryIdentifier::new(repository.url.clone())
                .ok_or_else(|| ProvisioningError::configuration("A repository url is required."))?;
            ResolvedRepository::external_git(url, branch)
        }
    };

    debug!(
        identifier = %resolved.source().identifier(),
        branch = %resolved.source().branch(),
        "resolved source repository"
    );
    Ok(resolved)
}
