use super::{
    cost::parse_cost,
    manufacturer::{infer_manufacturer, site_hint},
    resolve::{find_field, find_field_excluding, normalize_part_number},
};
use engine_config::{crosswalk::Crosswalk, inference::InferenceTables, markup::profile::MarkupProfile};
use indexmap::IndexMap;
use model::{
    core::value::CellValue,
    records::{
        counters::MappingCounters,
        mapped::{MappedRow, RowStatus, StatusReasons, fields},
        row::SourceRow,
    },
};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info};

/// Run-level labor values copied into every row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaborDefaults {
    pub cost: Option<Decimal>,
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct MappingOutput {
    pub rows: Vec<MappedRow>,
    pub counters: MappingCounters,
}

/// Reconciles source rows into canonical rows and classifies each one.
pub struct RowMapper<'a> {
    crosswalk: &'a Crosswalk,
    markup: &'a MarkupProfile,
    tables: &'a InferenceTables,
    labor: LaborDefaults,
}

impl<'a> RowMapper<'a> {
    pub fn new(crosswalk: &'a Crosswalk, markup: &'a MarkupProfile, tables: &'a InferenceTables) -> Self {
        Self {
            crosswalk,
            markup,
            tables,
            labor: LaborDefaults::default(),
        }
    }

    pub fn with_labor_defaults(mut self, labor: LaborDefaults) -> Self {
        self.labor = labor;
        self
    }

    /// Maps rows in order. A row whose normalized part number was already seen
    /// is dropped and counted as a duplicate.
    pub fn map_rows(&self, rows: &[SourceRow]) -> MappingOutput {
        let mut counters = MappingCounters::with_total(rows.len() as u64);
        let mut seen: HashSet<String> = HashSet::new();
        let mut mapped = Vec::with_capacity(rows.len());

        for source in rows {
            let part_number = find_field(&source.values, &self.tables.fields.part_number);
            let normalized = normalize_part_number(part_number);
            if !normalized.is_empty() && !seen.insert(normalized.clone()) {
                debug!(
                    "Duplicate part {} at {}:{} ignored",
                    normalized, source.source_sheet, source.source_row_number
                );
                counters.record_duplicate();
                continue;
            }

            let row = self.map_row(source, part_number.cloned(), normalized);
            if row.is_processed() {
                counters.record_processed();
            } else {
                counters.record_manual_review();
            }
            mapped.push(row);
        }

        info!(
            "Mapped {} rows: {} (duplicates ignored: {})",
            mapped.len(),
            counters.summary_text(),
            counters.rows_duplicates_ignored
        );
        MappingOutput {
            rows: mapped,
            counters,
        }
    }

    fn map_row(&self, source: &SourceRow, part_number: Option<CellValue>, normalized: String) -> MappedRow {
        let fields_cfg = &self.tables.fields;
        let part_number = part_number.unwrap_or_default();
        let description = find_field(&source.values, &fields_cfg.description)
            .cloned()
            .unwrap_or_default();
        let explicit_mfr = find_field_excluding(
            &source.values,
            &fields_cfg.manufacturer,
            &fields_cfg.part_number,
        )
        .and_then(CellValue::as_string);
        let manufacturer = infer_manufacturer(explicit_mfr, source, self.tables);
        let cost = parse_cost(find_field(&source.values, &fields_cfg.cost));
        let warranty = find_field(&source.values, &fields_cfg.warranty).cloned();
        let labor_hours = find_field(&source.values, &fields_cfg.labor_hours).cloned();

        let part_name = source
            .family_context
            .as_deref()
            .map(CellValue::text)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| description.clone());
        let hint = manufacturer
            .as_deref()
            .zip(part_number.as_string())
            .and_then(|(mfr, part)| site_hint(mfr, &part));

        let mut status = RowStatus::Processed;
        let mut reasons = StatusReasons::default();

        let price = match cost {
            Some(cost) => match self.markup.price_for_cost(cost) {
                Ok(price) => CellValue::Number(price),
                Err(err) => {
                    status = RowStatus::ManualReview;
                    reasons.push(format!("markup_error:{err}"));
                    CellValue::Empty
                }
            },
            None => {
                reasons.push("warning_missing_cost");
                CellValue::Empty
            }
        };

        if part_number.is_empty() {
            status = RowStatus::ManualReview;
            reasons.push("missing_part_number");
        }

        let mut row: IndexMap<String, CellValue> = IndexMap::new();
        let mut put = |key: &str, value: CellValue| {
            row.insert(key.to_string(), value);
        };
        put(fields::PART_NUMBER, part_number.clone());
        put(fields::PART_NUMBER_ORIGINAL, part_number);
        put(fields::PART_NUMBER_NORMALIZED, CellValue::text(normalized));
        put(fields::PART_NAME, part_name);
        put(fields::DESCRIPTION, description);
        put(fields::MANUFACTURER, manufacturer.into());
        put(fields::CATEGORY, CellValue::text(source.source_sheet.as_str()));
        put(fields::PART_COST, cost.into());
        put(fields::PART_PRICE, price);
        put(fields::LABOR_COST, self.labor.cost.into());
        put(fields::LABOR_RATE, self.labor.rate.into());
        put(fields::LABOR_HOURS, labor_hours.unwrap_or_default());
        put(fields::WARRANTY, warranty.unwrap_or_default());
        put(fields::STATUS, CellValue::Empty);
        put(fields::STATUS_REASON, CellValue::Empty);
        put(fields::ENRICHMENT_URL_HINT, hint.into());
        put(fields::SOURCE_FILE, CellValue::text(source.source_file.as_str()));
        put(fields::SOURCE_SHEET, CellValue::text(source.source_sheet.as_str()));
        put(fields::SOURCE_ROW_NUMBER, source.source_row_number.into());

        let missing: Vec<&str> = self
            .crosswalk
            .blocking_columns()
            .into_iter()
            .filter(|col| row.get(*col).is_none_or(CellValue::is_empty))
            .collect();
        if !missing.is_empty() {
            status = RowStatus::ManualReview;
            reasons.push(format!("missing_required:{}", missing.join(",")));
        }

        for column in self.crosswalk.output_columns() {
            row.entry(column.to_string()).or_default();
        }

        let status_reason = reasons.joined();
        row.insert(fields::STATUS.to_string(), CellValue::text(status.to_string()));
        row.insert(fields::STATUS_REASON.to_string(), CellValue::text(status_reason.as_str()));

        MappedRow {
            row,
            status,
            status_reason,
        }
    }
}
