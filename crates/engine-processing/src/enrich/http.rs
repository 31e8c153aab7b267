use super::{
    PartLookup,
    allowlist::DomainAllowlist,
    text::{
        DESCRIPTION_FALLBACK_CHARS, confidence, extract_text, meta_description, page_title,
        pick_warranty, prefix_chars,
    },
};
use crate::error::EnrichError;
use model::records::enrichment::{Confidence, EnrichmentResult, EnrichmentStatus};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);
const USER_AGENT: &str = "Mozilla/5.0 (compatible; pricebook/0.1)";

/// Scrapes allow-listed manufacturer sites over blocking HTTP.
pub struct HttpPartLookup {
    client: Client,
    allowlist: DomainAllowlist,
}

impl HttpPartLookup {
    pub fn new(allowlist: DomainAllowlist, timeout: Duration) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, allowlist })
    }

    /// Search, WordPress-style search and direct product URLs for each domain.
    pub fn candidate_urls(&self, part_number: &str, manufacturer: &str) -> Vec<String> {
        let query = quote_plus(part_number);
        self.allowlist
            .domains_for(manufacturer)
            .iter()
            .flat_map(|domain| {
                [
                    format!("https://{domain}/search?q={query}"),
                    format!("https://{domain}/?s={query}"),
                    format!("https://{domain}/{query}"),
                ]
            })
            .collect()
    }

    fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(err) => {
                debug!("GET {} failed: {}", url, err);
                return None;
            }
        };
        if response.status().as_u16() >= 400 {
            debug!("GET {} returned {}", url, response.status());
            return None;
        }
        response.text().ok().filter(|body| !body.is_empty())
    }
}

impl PartLookup for HttpPartLookup {
    fn lookup(&self, part_number: &str, manufacturer: &str) -> EnrichmentResult {
        if part_number.trim().is_empty() {
            return EnrichmentResult::not_found();
        }

        for url in self.candidate_urls(part_number, manufacturer) {
            let Some(html) = self.fetch(&url) else {
                continue;
            };
            match page_result(part_number, &html, &url) {
                Some(result) => {
                    info!("Enriched {} from {} ({})", part_number, url, result.confidence);
                    return result;
                }
                None => debug!("{} does not mention {}", url, part_number),
            }
        }

        EnrichmentResult::not_found()
    }
}

/// Enrichment from one fetched page, `None` when the page is a weak match.
pub fn page_result(part_number: &str, html: &str, url: &str) -> Option<EnrichmentResult> {
    let text = extract_text(html);
    let confidence = confidence(part_number, &text);
    if confidence == Confidence::Low {
        return None;
    }

    let description = meta_description(html).or_else(|| {
        Some(prefix_chars(&text, DESCRIPTION_FALLBACK_CHARS)).filter(|d| !d.is_empty())
    });

    Some(EnrichmentResult {
        part_name: page_title(html),
        description,
        warranty: pick_warranty(&text),
        source_url: Some(url.to_string()),
        confidence,
        status: EnrichmentStatus::Enriched,
    })
}

/// Form-style encoding: unreserved bytes kept, spaces as `+`, the rest `%XX`.
fn quote_plus(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup() -> HttpPartLookup {
        let allowlist = DomainAllowlist::new(HashMap::from([(
            "Carrier".to_string(),
            vec!["carrier.com".to_string(), "parts.carrier.com".to_string()],
        )]));
        HttpPartLookup::new(allowlist, Duration::from_millis(50)).unwrap()
    }

    #[test]
    fn three_urls_per_domain() {
        let urls = lookup().candidate_urls("AB 12/3", "carrier");
        assert_eq!(urls.len(), 6);
        assert_eq!(urls[0], "https://carrier.com/search?q=AB+12%2F3");
        assert_eq!(urls[1], "https://carrier.com/?s=AB+12%2F3");
        assert_eq!(urls[2], "https://carrier.com/AB+12%2F3");
        assert_eq!(urls[3], "https://parts.carrier.com/search?q=AB+12%2F3");
    }

    #[test]
    fn blank_part_number_is_not_found_without_requests() {
        let result = lookup().lookup("  ", "carrier");
        assert_eq!(result, EnrichmentResult::not_found());
    }

    #[test]
    fn weak_pages_are_skipped() {
        assert!(page_result("XK-9", "<p>unrelated</p>", "https://x.com").is_none());
    }

    #[test]
    fn description_falls_back_to_page_text() {
        let html = "<title>XK-9</title><p>The XK-9 blower. 5 year limited warranty.</p>";
        let result = page_result("XK-9", html, "https://x.com/XK-9").unwrap();
        assert_eq!(result.status, EnrichmentStatus::Enriched);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.part_name.as_deref(), Some("XK-9"));
        assert_eq!(
            result.description.as_deref(),
            Some("XK-9 The XK-9 blower. 5 year limited warranty.")
        );
        assert_eq!(result.warranty.as_deref(), Some("5 year limited warranty."));
        assert_eq!(result.source_url.as_deref(), Some("https://x.com/XK-9"));
    }
}
