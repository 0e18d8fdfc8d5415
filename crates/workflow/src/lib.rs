//! Continuous-delivery setup workflow.
//!
//! This crate sequences one setup run: resolve the source repository, make
//! sure the Team Services account is usable, submit the provisioning request,
//! poll until it finishes and build the summary.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Steps sequence calls between the business logic in
//! the [`delivery`] crate and its port traits. They contain no transport
//! details of their own.
//!
//! ## Concurrency
//!
//! Every remote call and the sleep between polls is awaited before the next
//! step starts; nothing runs in parallel. There is no cancellation hook: a
//! caller wanting to abort a run drops the future or ends the process.
//!
//! | Module | Step |
//! |--------|------|
//! | [`resolver`] | Repository URL resolution |
//! | [`account`] | Account create-or-get / existence check |
//! | [`submit`] | Request assembly and submission |
//! | [`poll`] | Status polling |
//! | [`manager`] | The whole run |

pub mod account;
pub mod manager;
pub mod poll;
pub mod progress;
pub mod resolver;
pub mod submit;

pub use account::ensure_account;
pub use manager::ContinuousDeliveryManager;
pub use poll::{wait_for_completion, DEFAULT_POLL_INTERVAL};
pub use progress::Progress;
pub use resolver::resolve_repository;
pub use submit::{build_provisioning_configuration, submit_configuration, verify_account_parameters};
