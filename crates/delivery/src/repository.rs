//! Source repository classification and descriptors.
//!
//! A repository URL is classified by [`RepositoryUrl::classify`] into one of four
//! kinds. Three case-insensitive patterns are tried in a fixed order and the
//! first match wins:
//!
//! | Order | Shape | Kind |
//! |-------|-------|------|
//! | 1 | `https://<account>.visualstudio.com/.../_git/<repo>` | [`RepositoryKind::TfsGit`] |
//! | 2 | `https://github.com/<owner>/<repo>` | [`RepositoryKind::Github`] |
//! | 3 | `https://<account>.visualstudio.com/<path>` | [`RepositoryKind::Tfvc`] |
//!
//! Anything else, including malformed URLs, is treated as an external Git
//! repository identified by the whole URL. Unreachable clone URLs are rejected
//! by the provisioning service, not here.
//!
//! [`SourceRepository`] and [`ResolvedRepository`] can only be built through
//! their per-kind constructors, so the kind always determines which optional
//! fields are present.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    AccountName, AuthorizationInfo, BranchName, ProjectName, RepositoryIdentifier, Secret,
};

static HOSTED_GIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[htps]+://(.+)\.visualstudio\.com.*/_git/(.+)").expect("valid regex")
});

static GITHUB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[htps]+://github\.com/(.+)").expect("valid regex"));

static TFVC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[htps]+://(.+)\.visualstudio\.com/(.+)").expect("valid regex")
});

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Kind of source repository, as named on the provisioning wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryKind {
    /// Git repository hosted by Team Services.
    TfsGit,
    /// GitHub repository.
    Github,
    /// Team Foundation Version Control path hosted by Team Services.
    Tfvc,
    /// Any other Git host.
    ExternalGit,
}

impl RepositoryKind {
    /// Returns the wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            RepositoryKind::TfsGit => "TfsGit",
            RepositoryKind::Github => "Github",
            RepositoryKind::Tfvc => "TFVC",
            RepositoryKind::ExternalGit => "ExternalGit",
        }
    }

    /// Returns `true` if repositories of this kind do not name a Team Services
    /// account, so the caller must supply one.
    pub fn requires_explicit_account(self) -> bool {
        matches!(self, RepositoryKind::Github | RepositoryKind::ExternalGit)
    }
}

impl std::fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of matching a repository URL against the known shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryUrl {
    /// Hosted Git; the repository id must still be looked up remotely.
    HostedGit {
        /// Account named by the URL host.
        account: AccountName,
    },
    /// GitHub repository.
    Github {
        /// Everything after `github.com/`.
        path: RepositoryIdentifier,
    },
    /// Hosted TFVC path.
    Tfvc {
        /// Account named by the URL host.
        account: AccountName,
        /// Everything after the host.
        path: RepositoryIdentifier,
    },
    /// Unrecognised shape; the whole URL identifies the repository.
    External,
}

impl RepositoryUrl {
    /// Classifies `url`. First matching pattern wins; no match means
    /// [`RepositoryUrl::External`].
    pub fn classify(url: &str) -> Self {
        if let Some(caps) = HOSTED_GIT_RE.captures(url) {
            return RepositoryUrl::HostedGit {
                account: AccountName(caps[1].to_string()),
            };
        }
        if let Some(caps) = GITHUB_RE.captures(url) {
            return RepositoryUrl::Github {
                path: RepositoryIdentifier(caps[1].to_string()),
            };
        }
        if let Some(caps) = TFVC_RE.captures(url) {
            return RepositoryUrl::Tfvc {
                account: AccountName(caps[1].to_string()),
                path: RepositoryIdentifier(caps[2].to_string()),
            };
        }
        RepositoryUrl::External
    }

    /// Returns the repository kind this URL resolves to.
    pub fn kind(&self) -> RepositoryKind {
        match self {
            RepositoryUrl::HostedGit { .. } => RepositoryKind::TfsGit,
            RepositoryUrl::Github { .. } => RepositoryKind::Github,
            RepositoryUrl::Tfvc { .. } => RepositoryKind::Tfvc,
            RepositoryUrl::External => RepositoryKind::ExternalGit,
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Repository id and owning project of a hosted Git repository, as reported by
/// the repository-info provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedRepositoryInfo {
    /// Server-assigned repository id.
    pub repository_id: RepositoryIdentifier,
    /// Team project owning the repository.
    pub project_name: ProjectName,
}

/// Source repository as sent to the provisioning service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRepository {
    kind: RepositoryKind,
    identifier: RepositoryIdentifier,
    branch: BranchName,
    authorization: Option<AuthorizationInfo>,
}

impl SourceRepository {
    /// Returns the repository kind.
    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }

    /// Returns the kind-specific identifier.
    pub fn identifier(&self) -> &RepositoryIdentifier {
        &self.identifier
    }

    /// Returns the branch to build.
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Returns the repository authorization; only GitHub repositories carry one.
    pub fn authorization(&self) -> Option<&AuthorizationInfo> {
        self.authorization.as_ref()
    }
}

/// A [`SourceRepository`] together with the account and project names the
/// repository URL revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRepository {
    source: SourceRepository,
    account_name: Option<AccountName>,
    project_name: Option<ProjectName>,
}

impl ResolvedRepository {
    /// Hosted Git repository; identified by its server-assigned id.
    pub fn tfs_git(info: HostedRepositoryInfo, branch: BranchName, account: AccountName) -> Self {
        Self {
            source: SourceRepository {
                kind: RepositoryKind::TfsGit,
                identifier: info.repository_id,
                branch,
                authorization: None,
            },
            account_name: Some(account),
            project_name: Some(info.project_name),
        }
    }

    /// GitHub repository; authorized with the caller's personal access token.
    pub fn github(
        path: RepositoryIdentifier,
        branch: BranchName,
        access_token: Option<Secret>,
    ) -> Self {
        Self {
            source: SourceRepository {
                kind: RepositoryKind::Github,
                identifier: path,
                branch,
                authorization: Some(AuthorizationInfo::PersonalAccessToken { access_token }),
            },
            account_name: None,
            project_name: None,
        }
    }

    /// Hosted TFVC path.
    pub fn tfvc(path: RepositoryIdentifier, branch: BranchName, account: AccountName) -> Self {
        Self {
            source: SourceRepository {
                kind: RepositoryKind::Tfvc,
                identifier: path,
                branch,
                authorization: None,
            },
            account_name: Some(account),
            project_name: None,
        }
    }

    /// Git repository on any other host; identified by its full URL.
    pub fn external_git(url: RepositoryIdentifier, branch: BranchName) -> Self {
        Self {
            source: SourceRepository {
                kind: RepositoryKind::ExternalGit,
                identifier: url,
                branch,
                authorization: None,
            },
            account_name: None,
            project_name: None,
        }
    }

    /// Returns the repository descriptor.
    pub fn source(&self) -> &SourceRepository {
        &self.source
    }

    /// Returns the account named by the repository URL, if any.
    pub fn account_name(&self) -> Option<&AccountName> {
        self.account_name.as_ref()
    }

    /// Returns the team project owning the repository, if known.
    pub fn project_name(&self) -> Option<&ProjectName> {
        self.project_name.as_ref()
    }

    /// Consumes the resolution and returns the descriptor.
    pub fn into_source(self) -> SourceRepository {
        self.source
    }
}
