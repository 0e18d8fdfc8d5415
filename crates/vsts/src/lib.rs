//! Team Services infrastructure adapter.
//!
//! Implements the port traits defined in the [`delivery`] crate
//! (`RepositoryInfoProvider`, `AccountService`, `ContinuousDeliveryService`)
//! over the Team Services REST APIs using [`reqwest`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! URL building, API versions, authentication headers and JSON shapes are
//! handled here; the [`delivery`] and `workflow` crates never see them.
//!
//! | Module                  | Contents                                         |
//! |-------------------------|--------------------------------------------------|
//! | [`config`]              | `VstsConfig`: hosts, API versions, timeout       |
//! | [`transport`]           | Shared `reqwest` client and response handling    |
//! | [`accounts`]            | `AccountClient`                                  |
//! | [`continuous_delivery`] | `ContinuousDeliveryClient`                       |
//! | [`info_provider`]       | `VstsInfoProvider`                               |
//!
//! Credentials are never stored by a client; each call receives the caller's
//! bearer token.

pub mod accounts;
pub mod config;
pub mod continuous_delivery;
pub mod error;
pub mod info_provider;
pub mod transport;

mod wire;

pub use accounts::AccountClient;
pub use config::VstsConfig;
pub use continuous_delivery::ContinuousDeliveryClient;
pub use error::VstsError;
pub use info_provider::VstsInfoProvider;
pub use transport::Transport;
