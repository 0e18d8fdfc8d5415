//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use delivery::AppType;

/// Set up continuous delivery of an Azure web app through Team Services.
#[derive(Debug, Parser)]
#[command(name = "vsts-cd", version, propagate_version = true)]
pub struct Cli {
    /// TOML configuration file with endpoint, polling and logging settings
    #[arg(long, global = true, env = "VSTS_CD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format; overrides the configuration file
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log filter directives, e.g. `info,vsts=debug`; overrides the
    /// configuration file
    #[arg(long, global = true, env = "VSTS_CD_LOG")]
    pub log_filter: Option<String>,

    /// OTLP collector endpoint; traces are exported only when set
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision build and release definitions for a web app
    Setup(SetupArgs),

    /// Print the Team Services application id to request access tokens for
    AppId,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    Pretty,
    /// One JSON object per event on stderr.
    Json,
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    /// URL of the source repository
    #[arg(long)]
    pub repo_url: String,

    /// Branch to build; defaults to `refs/heads/master`
    #[arg(long)]
    pub branch: Option<String>,

    /// Personal access token for GitHub repositories
    #[arg(long, env = "VSTS_CD_GIT_TOKEN", hide_env_values = true)]
    pub git_token: Option<String>,

    /// Application type (AspNetWap, AspNetCore, NodeJSWithGulp, NodeJSWithGrunt)
    #[arg(long)]
    pub app_type: AppType,

    /// Team Services account; required unless the repository is hosted by
    /// Team Services
    #[arg(long = "cd-account")]
    pub account: Option<String>,

    /// Create the account if it does not exist
    #[arg(long)]
    pub create_account: bool,

    /// Deployment slot to deploy through before swapping into production
    #[arg(long)]
    pub slot: Option<String>,

    /// Resource group of the web app
    #[arg(long, short = 'g')]
    pub resource_group: String,

    /// Name of the web app
    #[arg(long, short = 'n')]
    pub name: String,

    /// Azure subscription id
    #[arg(long)]
    pub subscription_id: String,

    /// Azure subscription display name
    #[arg(long)]
    pub subscription_name: String,

    /// Azure AD tenant id
    #[arg(long)]
    pub tenant_id: String,

    /// Azure region of the web app
    #[arg(long)]
    pub location: String,

    /// Access token for Team Services
    #[arg(long, env = "VSTS_CD_VSTS_TOKEN", hide_env_values = true)]
    pub vsts_token: String,

    /// Access token for Azure Resource Manager, handed to Team Services for
    /// deployments
    #[arg(long, env = "VSTS_CD_AZURE_TOKEN", hide_env_values = true)]
    pub azure_token: String,

    /// Seconds between provisioning status checks; overrides the
    /// configuration file
    #[arg(long)]
    pub poll_interval_secs: Option<u64>,
}
