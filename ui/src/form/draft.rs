//! In-memory report draft owned by a single form session.

use crate::core::catalog::{ChoiceField, SelectorCatalog};
use crate::core::validate::is_valid_url;

/// Maximum comment length, in characters.
pub const COMMENT_MAX_CHARS: usize = 140;

/// Default shown in the URL field; submitting it verbatim counts as "no URL".
pub const URL_PLACEHOLDER: &str = "https://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlState {
    Missing,
    Invalid,
    Valid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub provider: String,
    pub region: String,
    pub url: String,
    pub comment: String,
    pub vpn_used: String,
    pub vpn_provider: String,
    pub vpn_protocol: String,
    /// Cached validity for the inline error; an untouched field shows no error.
    pub url_valid: bool,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            provider: String::new(),
            region: String::new(),
            url: String::new(),
            comment: String::new(),
            vpn_used: String::new(),
            vpn_provider: String::new(),
            vpn_protocol: String::new(),
            url_valid: true,
        }
    }
}

impl ReportDraft {
    /// Store the URL as typed and refresh its validity flag.
    pub fn set_url(&mut self, value: &str) {
        self.url = value.to_string();
        self.url_valid = is_valid_url(value);
    }

    pub fn clear_url(&mut self) {
        self.url.clear();
        self.url_valid = true;
    }

    /// Accepts comments up to [`COMMENT_MAX_CHARS`]; longer input is rejected
    /// and the previous value kept.
    pub fn set_comment(&mut self, value: &str) -> bool {
        if value.chars().count() > COMMENT_MAX_CHARS {
            return false;
        }
        self.comment = value.to_string();
        true
    }

    /// Set an enumerated field. Empty clears it; values outside the catalog are rejected.
    pub fn set_choice(&mut self, catalog: &SelectorCatalog, field: ChoiceField, value: &str) -> bool {
        if !value.is_empty() && !catalog.contains(field, value) {
            return false;
        }
        *self.choice_mut(field) = value.to_string();
        true
    }

    pub fn choice(&self, field: ChoiceField) -> &str {
        match field {
            ChoiceField::Provider => &self.provider,
            ChoiceField::Region => &self.region,
            ChoiceField::VpnUsed => &self.vpn_used,
            ChoiceField::VpnProvider => &self.vpn_provider,
            ChoiceField::VpnProtocol => &self.vpn_protocol,
        }
    }

    fn choice_mut(&mut self, field: ChoiceField) -> &mut String {
        match field {
            ChoiceField::Provider => &mut self.provider,
            ChoiceField::Region => &mut self.region,
            ChoiceField::VpnUsed => &mut self.vpn_used,
            ChoiceField::VpnProvider => &mut self.vpn_provider,
            ChoiceField::VpnProtocol => &mut self.vpn_protocol,
        }
    }

    /// Validity is recomputed here rather than trusting `url_valid`.
    pub fn url_state(&self) -> UrlState {
        if self.url.is_empty() || self.url == URL_PLACEHOLDER {
            UrlState::Missing
        } else if is_valid_url(&self.url) {
            UrlState::Valid
        } else {
            UrlState::Invalid
        }
    }

    pub fn comment_len(&self) -> usize {
        self.comment.chars().count()
    }
}
