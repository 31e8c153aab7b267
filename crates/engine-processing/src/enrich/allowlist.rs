use crate::error::EnrichError;
use std::{collections::HashMap, path::Path};
use tracing::{debug, warn};

/// At most this many domains are tried per manufacturer.
pub const MAX_DOMAINS: usize = 3;

/// Manufacturer (lowercased) to the web domains enrichment may visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainAllowlist {
    domains: HashMap<String, Vec<String>>,
}

impl DomainAllowlist {
    pub fn new(domains: HashMap<String, Vec<String>>) -> Self {
        let domains = domains
            .into_iter()
            .map(|(mfr, list)| (mfr.trim().to_lowercase(), list))
            .collect();
        Self { domains }
    }

    pub fn from_json(text: &str) -> Result<Self, EnrichError> {
        let domains: HashMap<String, Vec<String>> = serde_json::from_str(text)?;
        Ok(Self::new(domains))
    }

    /// A missing file is an empty allow-list.
    pub fn load(path: &Path) -> Result<Self, EnrichError> {
        if !path.exists() {
            warn!("Domain allow-list {} not found, using heuristics only", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|err| EnrichError::io(path, err))?;
        let allowlist = Self::from_json(&text)?;
        debug!(
            "Loaded {} manufacturers from {}",
            allowlist.domains.len(),
            path.display()
        );
        Ok(allowlist)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Listed domains for `manufacturer`, else `<manufacturer>.com`.
    pub fn domains_for(&self, manufacturer: &str) -> Vec<String> {
        let key = manufacturer.trim().to_lowercase();
        if key.is_empty() {
            return Vec::new();
        }

        match self.domains.get(&key) {
            Some(list) if !list.is_empty() => list.iter().take(MAX_DOMAINS).cloned().collect(),
            _ => vec![format!("{}.com", key.replace('&', "and").replace(' ', ""))],
        }
    }
}
