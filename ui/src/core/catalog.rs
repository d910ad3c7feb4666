//! Static selector catalog: the enumerated options offered by the form.
//!
//! The catalog ships inside the binary (`assets/selector_data.json`) and is
//! parsed once on first use. Every list is an array of `{ "name": ... }`
//! entries, matching the layout the report collectors already publish.

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../../assets/selector_data.json");

static CATALOG: Lazy<SelectorCatalog> = Lazy::new(|| {
    SelectorCatalog::from_json(EMBEDDED_CATALOG).unwrap_or_else(|err| {
        tracing::error!("embedded selector catalog is unusable ({err}); offering no options");
        SelectorCatalog::default()
    })
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("selector catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("selector catalog list `{field}` repeats option `{name}`")]
    Duplicate { field: &'static str, name: String },
}

/// Enumerated form fields backed by a catalog list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceField {
    Provider,
    Region,
    VpnUsed,
    VpnProvider,
    VpnProtocol,
}

impl ChoiceField {
    pub const ALL: [ChoiceField; 5] = [
        ChoiceField::Provider,
        ChoiceField::Region,
        ChoiceField::VpnUsed,
        ChoiceField::VpnProvider,
        ChoiceField::VpnProtocol,
    ];

    /// Key of the backing list in the catalog JSON.
    pub fn list_key(self) -> &'static str {
        match self {
            ChoiceField::Provider => "providers",
            ChoiceField::Region => "regions",
            ChoiceField::VpnUsed => "vpnUseCases",
            ChoiceField::VpnProvider => "vpnProviders",
            ChoiceField::VpnProtocol => "vpnProtocols",
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SelectorOption {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectorCatalog {
    #[serde(default)]
    pub providers: Vec<SelectorOption>,
    #[serde(default)]
    pub regions: Vec<SelectorOption>,
    #[serde(default)]
    pub vpn_use_cases: Vec<SelectorOption>,
    #[serde(default)]
    pub vpn_providers: Vec<SelectorOption>,
    #[serde(default)]
    pub vpn_protocols: Vec<SelectorOption>,
}

impl SelectorCatalog {
    /// Parse a catalog, rejecting lists that repeat an option.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: SelectorCatalog = serde_json::from_str(raw)?;
        for field in ChoiceField::ALL {
            let mut seen = std::collections::HashSet::new();
            for option in catalog.list(field) {
                if !seen.insert(option.name.as_str()) {
                    return Err(CatalogError::Duplicate {
                        field: field.list_key(),
                        name: option.name.clone(),
                    });
                }
            }
        }
        Ok(catalog)
    }

    /// The catalog compiled into the crate.
    pub fn embedded() -> &'static SelectorCatalog {
        &CATALOG
    }

    fn list(&self, field: ChoiceField) -> &[SelectorOption] {
        match field {
            ChoiceField::Provider => &self.providers,
            ChoiceField::Region => &self.regions,
            ChoiceField::VpnUsed => &self.vpn_use_cases,
            ChoiceField::VpnProvider => &self.vpn_providers,
            ChoiceField::VpnProtocol => &self.vpn_protocols,
        }
    }

    pub fn options(&self, field: ChoiceField) -> Vec<&str> {
        self.list(field).iter().map(|o| o.name.as_str()).collect()
    }

    pub fn contains(&self, field: ChoiceField, value: &str) -> bool {
        self.list(field).iter().any(|o| o.name == value)
    }
}

/// Case-insensitive substring filter used by the searchable region picker.
/// A blank query keeps every option.
pub fn filter_options<'a>(options: &[&'a str], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.to_vec();
    }
    options
        .iter()
        .copied()
        .filter(|option| option.to_lowercase().contains(&needle))
        .collect()
}
