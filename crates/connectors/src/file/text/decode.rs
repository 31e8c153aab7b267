use std::fmt;

/// Text encodings tried by the fallback parser, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
    Latin1,
}

pub const DECODE_ORDER: [TextEncoding; 3] = [
    TextEncoding::Utf8,
    TextEncoding::Windows1252,
    TextEncoding::Latin1,
];

/// Bytes with no assigned character in the Windows-1252 code page.
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

impl TextEncoding {
    /// Decodes `raw`, rejecting payloads that carry NUL characters (binary data).
    /// Windows-1252 also rejects bytes the code page leaves undefined, so
    /// Latin-1 stays reachable as the catch-all.
    pub fn decode(&self, raw: &[u8]) -> Option<String> {
        let text = match self {
            TextEncoding::Utf8 => {
                let raw = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw);
                std::str::from_utf8(raw).ok()?.to_string()
            }
            TextEncoding::Windows1252 => {
                if raw.iter().any(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                    return None;
                }
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(raw)?
                    .into_owned()
            }
            TextEncoding::Latin1 => raw.iter().map(|&b| b as char).collect(),
        };

        if text.contains('\0') { None } else { Some(text) }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf-8"),
            TextEncoding::Latin1 => write!(f, "latin-1"),
            TextEncoding::Windows1252 => write!(f, "windows-1252"),
        }
    }
}

/// First successful decoding in `DECODE_ORDER`.
pub fn decode_text(raw: &[u8]) -> Option<(String, TextEncoding)> {
    DECODE_ORDER
        .iter()
        .find_map(|enc| enc.decode(raw).map(|text| (text, *enc)))
}
