use lazy_static::lazy_static;
use model::records::ingest::AssetRef;
use regex::bytes::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Asset type -> filename-like token pattern, matched on raw bytes.
    static ref ASSET_PATTERNS: Vec<(&'static str, Regex)> = [
        ("jpg", r"(?i-u)[^\x00\r\n\t ]+\.jpe?g"),
        ("png", r"(?i-u)[^\x00\r\n\t ]+\.png"),
        ("pdf", r"(?i-u)[^\x00\r\n\t ]+\.pdf"),
        ("docx", r"(?i-u)[^\x00\r\n\t ]+\.docx"),
    ]
    .into_iter()
    .filter_map(|(kind, pattern)| Regex::new(pattern).ok().map(|re| (kind, re)))
    .collect();
}

/// Scans raw bytes for embedded image/pdf/document references, deduplicated
/// by (type, name) in first-seen order. Independent of whether the bytes parse.
pub fn scan_asset_refs(raw: &[u8]) -> Vec<AssetRef> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();

    for (asset_type, pattern) in ASSET_PATTERNS.iter() {
        for m in pattern.find_iter(raw) {
            let name = latin1(m.as_bytes());
            if seen.insert((*asset_type, name.clone())) {
                refs.push(AssetRef {
                    asset_type: asset_type.to_string(),
                    asset_name_or_ref: name,
                });
            }
        }
    }

    refs
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
