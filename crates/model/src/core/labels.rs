use std::collections::HashMap;

/// Canonical label for the header cell at 1-based position `idx`.
pub fn header_label(raw: Option<&str>, idx: usize) -> String {
    match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => synthetic_label(idx),
    }
}

pub fn synthetic_label(idx: usize) -> String {
    format!("col_{idx}")
}

/// Builds the label row for a header, synthesizing blanks and suffixing
/// repeated labels (`Cost`, `Cost_2`, ...) so every column keeps its value.
pub fn header_labels<'a, I>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let label = header_label(raw, i + 1);
            let count = seen.entry(label.to_lowercase()).or_insert(0);
            *count += 1;
            if *count == 1 {
                label
            } else {
                format!("{label}_{count}")
            }
        })
        .collect()
}
