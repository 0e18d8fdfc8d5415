//! Rendering of the setup result.

use anyhow::{Context, Result};
use delivery::ContinuousDeliveryResult;

/// Renders `result` as pretty-printed JSON.
pub fn render_json(result: &ContinuousDeliveryResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialise result")
}

/// Renders `result` for a human reader.
pub fn render_text(result: &ContinuousDeliveryResult) -> String {
    let mut lines = vec![result.status_message.trim_start().to_string(), String::new()];
    lines.push(format!("Account:             {}", result.account_url));
    if let Some(url) = &result.build_definition_url {
        lines.push(format!("Build definition:    {url}"));
    }
    if let Some(url) = &result.release_definition_url {
        lines.push(format!("Release definition:  {url}"));
    }
    lines.push(format!("Deployment center:   {}", result.continuous_delivery_url));
    lines.join("\n")
}
