//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a string. This prevents accidentally interchanging, for example,
//! an [`AccountName`] with a [`ProjectName`] even though both are strings under
//! the hood, and guarantees none of them is empty.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display, and
// deserialization that goes through new().
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String")]
        pub struct $name(pub(crate) String);

        impl TryFrom<String> for $name {
            type Error = &'static str;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(concat!(stringify!($name), " must not be empty"))
            }
        }

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: Team Services
// ---------------------------------------------------------------------------

string_id! {
    /// Name of a Team Services account (the `<name>` in `https://<name>.visualstudio.com`).
    AccountName
}

string_id! {
    /// Name of a Team Services team project.
    ///
    /// Either discovered from a hosted-git repository or defaulted to the web
    /// site name; used as the CI artifact name on the provisioning request.
    ProjectName
}

string_id! {
    /// Server-assigned id of a Team Services team project.
    ProjectId
}

string_id! {
    /// Server-assigned id of a build or release definition.
    DefinitionId
}

string_id! {
    /// Server-assigned id of a submitted provisioning configuration.
    ///
    /// Returned by the submit call and used for every subsequent status fetch.
    ProvisioningConfigurationId
}

string_id! {
    /// Server-assigned id of a newly created Team Services account.
    AccountId
}

// ---------------------------------------------------------------------------
// Identifiers: source control
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a source repository to the provisioning service.
    ///
    /// Its meaning depends on the repository kind: a server-assigned repository
    /// id for hosted Git, `owner/repo` for GitHub, a TFVC path, or the full
    /// clone URL for any other Git host.
    RepositoryIdentifier
}

string_id! {
    /// A Git ref or TFVC branch (e.g. `"refs/heads/master"`).
    BranchName
}

// ---------------------------------------------------------------------------
// Identifiers: Azure
// ---------------------------------------------------------------------------

string_id! {
    /// An Azure subscription id.
    SubscriptionId
}

string_id! {
    /// An Azure resource group name.
    ResourceGroupName
}

string_id! {
    /// The name of an Azure App Service web site.
    WebsiteName
}

string_id! {
    /// An Azure Active Directory tenant id.
    TenantId
}

/// A web site name always makes a usable project name; it is the fallback
/// project when the repository does not name one.
impl From<&WebsiteName> for ProjectName {
    fn from(website: &WebsiteName) -> Self {
        Self(website.0.clone())
    }
}
