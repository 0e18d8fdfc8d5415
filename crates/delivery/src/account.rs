//! Team Services account creation request and response.

use std::collections::BTreeMap;

use crate::{AccountId, AccountName};

/// Account property recording where the sign-up came from.
pub const SIGNUP_ENTRY_POINT_PROPERTY: &str =
    "Microsoft.VisualStudio.Services.Account.SignupEntryPoint";

/// Sign-up source reported for accounts created by this tool.
pub const SIGNUP_ENTRY_POINT: &str = "AzureCli";

/// Regional and language preferences for a new account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountPreferences {
    /// Culture name, e.g. `"en-US"`.
    pub culture: Option<String>,
    /// Language name, e.g. `"en"`.
    pub language: Option<String>,
    /// Time zone id, e.g. `"Pacific Standard Time"`.
    pub time_zone: Option<String>,
}

/// Request to create (or get) a Team Services account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreateRequest {
    /// Name of the account.
    pub account_name: AccountName,
    /// Identity to record as the account creator; `None` means the caller.
    pub creator: Option<String>,
    /// Organization the account belongs to.
    pub organization: String,
    /// Account preferences; `None` lets the service pick defaults.
    pub preferences: Option<AccountPreferences>,
    /// Free-form account properties.
    pub properties: BTreeMap<String, String>,
    /// Accept a pre-created account instead of provisioning a new one.
    pub use_precreated: bool,
}

impl AccountCreateRequest {
    /// Builds the create-or-get request for `account_name`, tagged with the
    /// CLI sign-up entry point.
    pub fn for_account(account_name: &AccountName) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            SIGNUP_ENTRY_POINT_PROPERTY.to_string(),
            SIGNUP_ENTRY_POINT.to_string(),
        );
        Self {
            account_name: account_name.clone(),
            creator: None,
            organization: account_name.to_string(),
            preferences: None,
            properties,
            use_precreated: true,
        }
    }
}

/// Outcome of an account create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreateResult {
    /// Id of the account the call created. `None` when the account already
    /// existed and nothing was created.
    pub account_id: Option<AccountId>,
}

impl AccountCreateResult {
    /// Returns `true` if the call created a new account.
    pub fn created(&self) -> bool {
        self.account_id.is_some()
    }
}
