//! Wrapper for bearer tokens and personal access tokens.
//!
//! [`Secret`] keeps tokens out of logs and result dumps: `Debug`, `Display`
//! and `Serialize` all render [`REDACTED`], and the inner value is zeroed on
//! drop. Call sites that need the raw value must call [`Secret::expose`].

use std::fmt;

use serde::{Serialize, Serializer};
use zeroize::Zeroize;

/// The placeholder rendered in place of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive string value (access token, PAT, bearer token).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Secret {
    inner: String,
}

impl Secret {
    /// Wraps `value` as a secret.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Returns the raw secret value.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Returns `true` if the wrapped value is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&REDACTED).finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Secret {}

/// Azure Active Directory bearer token used to call Team Services on the
/// caller's behalf.
///
/// Issued by an external identity provider for the [`crate::VSTS_APP_ID`]
/// resource; this crate never acquires or refreshes it.
pub type Credentials = Secret;
