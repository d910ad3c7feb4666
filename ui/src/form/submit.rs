//! Turning a draft into the payload handed to the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::draft::{ReportDraft, UrlState};
use crate::core::host::{HostBridge, HostError};
use crate::t;

/// Flat record sent through the host's `sendData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub provider_value: String,
    pub region_value: String,
    pub url: String,
    pub comment_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_vpn_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpn_protocol: Option<String>,
}

impl ReportPayload {
    pub fn to_json(&self) -> Result<String, SubmitError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("report has no URL")]
    MissingUrl,
    #[error("report URL is malformed")]
    InvalidUrl,
    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Host(#[from] HostError),
}

impl SubmitError {
    /// Localized text for the blocking notice shown to the user.
    pub fn notice(&self) -> String {
        match self {
            SubmitError::MissingUrl => t!("notice-missing-url"),
            SubmitError::InvalidUrl => t!("notice-invalid-url"),
            SubmitError::Serialize(_) | SubmitError::Host(_) => t!("notice-send-failed"),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Check the submission rules and build the payload. Pure.
pub fn prepare(draft: &ReportDraft) -> Result<ReportPayload, SubmitError> {
    match draft.url_state() {
        UrlState::Missing => return Err(SubmitError::MissingUrl),
        UrlState::Invalid => return Err(SubmitError::InvalidUrl),
        UrlState::Valid => {}
    }

    Ok(ReportPayload {
        provider_value: draft.provider.clone(),
        region_value: draft.region.clone(),
        url: draft.url.clone(),
        comment_value: draft.comment.clone(),
        is_vpn_used: optional(&draft.vpn_used),
        vpn_provider: optional(&draft.vpn_provider),
        vpn_protocol: optional(&draft.vpn_protocol),
    })
}

/// Validate, serialize and hand the report to the host in one step.
/// Nothing is sent unless every step succeeds.
pub fn submit(draft: &ReportDraft, host: &dyn HostBridge) -> Result<ReportPayload, SubmitError> {
    let payload = prepare(draft)?;
    let json = payload.to_json()?;
    host.send_data(&json)?;
    tracing::info!(
        provider = !payload.provider_value.is_empty(),
        region = !payload.region_value.is_empty(),
        comment = !payload.comment_value.is_empty(),
        vpn = payload.is_vpn_used.is_some(),
        "report handed to host"
    );
    Ok(payload)
}
