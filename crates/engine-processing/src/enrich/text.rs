use lazy_static::lazy_static;
use model::records::enrichment::Confidence;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref HIDDEN_BLOCKS: Regex =
        Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)\s*>").unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref TITLE: Regex = Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap();
    static ref META_TAG: Regex = Regex::new(r"(?is)<meta\b[^>]*>").unwrap();
    static ref META_NAME_DESCRIPTION: Regex =
        Regex::new(r#"(?i)\bname\s*=\s*["']?description["']?"#).unwrap();
    static ref META_CONTENT: Regex =
        Regex::new(r#"(?is)\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
    static ref WARRANTY_SENTENCE: Regex = Regex::new(r"(?i)[^.]{0,80}warrant[^.]{0,120}\.").unwrap();
    static ref PART_TOKEN_SPLIT: Regex = Regex::new(r"[-\s]+").unwrap();
}

/// Number of characters of page text used when a page has no meta description.
pub const DESCRIPTION_FALLBACK_CHARS: usize = 350;
pub const MAX_WARRANTY_SENTENCES: usize = 3;

/// Visible text of an HTML page with whitespace collapsed.
pub fn extract_text(html: &str) -> String {
    let without_hidden = HIDDEN_BLOCKS.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_hidden, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

pub fn page_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .map(|c| collapse(&decode_entities(&c[1])))
        .filter(|t| !t.is_empty())
}

pub fn meta_description(html: &str) -> Option<String> {
    META_TAG
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|tag| META_NAME_DESCRIPTION.is_match(tag))
        .find_map(|tag| {
            let caps = META_CONTENT.captures(tag)?;
            let content = caps.get(1).or_else(|| caps.get(2))?.as_str();
            Some(collapse(&decode_entities(content)))
        })
        .filter(|d| !d.is_empty())
}

/// `High` when the whole part number occurs in `text`, `Medium` when one of
/// its dash/space separated tokens does.
pub fn confidence(part_number: &str, text: &str) -> Confidence {
    let part = part_number.trim().to_lowercase();
    if part.is_empty() {
        return Confidence::Low;
    }

    let text = text.to_lowercase();
    if text.contains(&part) {
        Confidence::High
    } else if PART_TOKEN_SPLIT
        .split(&part)
        .any(|token| !token.is_empty() && text.contains(token))
    {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Up to three distinct sentences mentioning a warranty, joined with ` | `.
pub fn pick_warranty(text: &str) -> Option<String> {
    let mut seen = HashSet::new();
    let sentences: Vec<&str> = WARRANTY_SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(MAX_WARRANTY_SENTENCES)
        .collect();

    if sentences.is_empty() {
        None
    } else {
        Some(sentences.join(" | "))
    }
}

/// First `max` characters of `text`, on a char boundary.
pub fn prefix_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn collapse(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
