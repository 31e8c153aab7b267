use model::{core::value::CellValue, records::row::RowValues};

/// First non-blank value for a prioritized candidate list.
///
/// Exact (case-insensitive) label matches are tried first, in candidate order.
/// Failing that, headers are scanned in column order for one that contains a
/// candidate as a substring.
pub fn find_field<'a, S: AsRef<str>>(values: &'a RowValues, candidates: &[S]) -> Option<&'a CellValue> {
    find_field_excluding::<S, &str>(values, candidates, &[])
}

/// Like [`find_field`], but headers that match any `excluded` candidate
/// (exactly or as a substring) are never considered.
pub fn find_field_excluding<'a, S: AsRef<str>, E: AsRef<str>>(
    values: &'a RowValues,
    candidates: &[S],
    excluded: &[E],
) -> Option<&'a CellValue> {
    let lowered: Vec<String> = candidates.iter().map(|c| c.as_ref().to_lowercase()).collect();
    let excluded: Vec<String> = excluded.iter().map(|c| c.as_ref().to_lowercase()).collect();
    let eligible: Vec<(String, &CellValue)> = values
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(header, v)| (header.to_lowercase(), v))
        .filter(|(header, _)| !excluded.iter().any(|c| header.contains(c.as_str())))
        .collect();

    let exact = lowered
        .iter()
        .find_map(|c| eligible.iter().find(|(header, _)| header == c))
        .map(|(_, v)| *v);
    if exact.is_some() {
        return exact;
    }

    eligible
        .iter()
        .find(|(header, _)| lowered.iter().any(|c| header.contains(c.as_str())))
        .map(|(_, v)| *v)
}

/// Trimmed, uppercased, whitespace-free form used for duplicate detection.
pub fn normalize_part_number(value: Option<&CellValue>) -> String {
    value
        .and_then(CellValue::as_string)
        .map(|s| s.split_whitespace().collect::<String>().to_uppercase())
        .unwrap_or_default()
}
