#[cfg(test)]
mod tests {
    use crate::utils::{
        cell, read_csv, read_json, write_crosswalk, write_file, write_markup, write_source_csv,
        write_source_workbook, write_template,
    };
    use engine_config::templates::TemplateType;
    use engine_processing::{enrich::PartLookup, transform::mapper::LaborDefaults};
    use engine_runtime::execution::{
        RunContext,
        conversion::{ConversionRequest, OutputPaths, run_conversion},
        enrichment::{EnrichmentRequest, run_enrichment_with},
    };
    use model::records::{
        enrichment::{Confidence, EnrichmentResult, EnrichmentStatus},
        ingest::IngestMode,
    };
    use std::{fs, path::Path, time::Duration};
    use tracing_test::traced_test;

    fn request(dir: &Path, source: &Path) -> ConversionRequest {
        ConversionRequest::new(source, TemplateType::SinglePart, write_markup(dir))
            .with_crosswalk(Some(write_crosswalk(dir)))
            .with_template(Some(write_template(&dir.join("templates/single.xlsx"))))
            .with_outputs(OutputPaths::for_customer(&dir.join("out"), "bryant"))
    }

    // Scenario: A distributor workbook with a title row, a family marker, a
    // duplicate part, a row without part number and a non-numeric cost.
    // Expected Outcome:
    // - Parsed as a workbook, duplicates dropped and counted.
    // - Manufacturer comes from the file name, part name from the family marker.
    // - Only the row without part number goes to manual review.
    // - The template copy is filled below its detected header row.
    #[traced_test]
    #[test]
    fn workbook_conversion_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source_workbook(&dir.path().join("in/bryant_2024.xlsx"));
        let request = request(dir.path(), &source);

        let outcome = run_conversion(&request, &RunContext::default()).unwrap();

        assert_eq!(outcome.ingest_mode, IngestMode::Xlsx);
        assert_eq!(outcome.parser_stage.to_string(), "openxml");
        assert_eq!(outcome.counters.rows_total, 5);
        assert_eq!(outcome.counters.rows_processed, 3);
        assert_eq!(outcome.counters.rows_manual_review, 1);
        assert_eq!(outcome.counters.rows_incomplete, 1);
        assert_eq!(outcome.counters.rows_duplicates_ignored, 1);

        let rows = read_csv(&request.outputs.normalized_csv);
        assert_eq!(rows.len(), 4);
        let g100 = &rows[0];
        assert_eq!(g100["Manufacturer Part Number"], "G100");
        assert_eq!(g100["manufacturer_part_number_normalized"], "G100");
        assert_eq!(g100["Part Name"], "Deluxe Series");
        assert_eq!(g100["Manufacturer"], "Bryant");
        assert_eq!(g100["Category"], "Gas Furnaces");
        assert_eq!(g100["Part Price"], "0.5");
        assert_eq!(g100["Status"], "processed");
        assert_eq!(g100["source_row_number"], "4");
        assert_eq!(
            g100["Enrichment URL Hint"],
            "https://www.google.com/search?q=site:bryant.com+G100"
        );
        assert_eq!(rows[1]["Part Price"], "3");
        assert_eq!(rows[3]["Manufacturer Part Number"], "G300");
        assert_eq!(rows[3]["Status"], "processed");
        assert_eq!(rows[3]["Status Reason"], "warning_missing_cost");

        let review = read_csv(&request.outputs.manual_review_csv);
        assert_eq!(review.len(), 1);
        assert!(review[0]["Status Reason"].starts_with("missing_part_number"));
        assert!(review[0]["Status Reason"].contains("missing_required:Manufacturer Part Number"));

        let workbook = &request.outputs.workbook;
        assert_eq!(cell(workbook, "Parts", 1, 2), "Manufacturer Part Number");
        assert_eq!(cell(workbook, "Parts", 1, 3), "G100");
        assert_eq!(cell(workbook, "Parts", 2, 3), "Deluxe Series");
        assert_eq!(cell(workbook, "Parts", 3, 3), "Bryant");
        assert_eq!(cell(workbook, "Parts", 5, 3), "0.5");
        assert_eq!(cell(workbook, "Parts", 5, 4), "3");
        assert_eq!(cell(workbook, "Parts", 1, 5), "");
        assert_eq!(cell(workbook, "Parts", 5, 5), "4");
        assert_eq!(cell(workbook, "Parts", 1, 6), "G300");
        assert_eq!(cell(workbook, "Parts", 6, 3), "");

        let qa = read_json(&request.outputs.qa_json);
        assert_eq!(qa["ingest_mode"], "xlsx");
        assert_eq!(qa["parser_stage"], "openxml");
        assert_eq!(qa["rows_total"], 5);
        assert_eq!(qa["rows_duplicates_ignored"], 1);
        assert_eq!(qa["files_processed_standard"], 1);
        assert_eq!(qa["summary_text"], "3 processed / 1 incomplete");
        assert_eq!(qa["file_results"][0]["file_name"], "bryant_2024.xlsx");
        assert_eq!(qa["file_results"][0]["status"], "processed");
        assert!(qa["file_results"][0]["error_message"].is_null());
        assert!(qa["run_id"].as_str().unwrap().starts_with("run-"));

        assert!(logs_contain("has no sheet 'Labor'"));
    }

    // Scenario: The source is a comma-delimited export saved with any name.
    // Expected Outcome: The fallback parser recovers every data line and the
    // QA report says so.
    #[traced_test]
    #[test]
    fn delimited_text_goes_through_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source_csv(&dir.path().join("in/acme_prices.csv"));
        let request = request(dir.path(), &source);

        let outcome = run_conversion(&request, &RunContext::default()).unwrap();

        assert_eq!(outcome.ingest_mode, IngestMode::Fallback);
        assert_eq!(outcome.counters.rows_processed, 2);

        let rows = read_csv(&request.outputs.normalized_csv);
        assert_eq!(rows[0]["source_sheet"], "Recovered Sheet 1");
        assert_eq!(rows[0]["source_row_number"], "2");
        assert_eq!(rows[0]["Part Price"], "0.5");
        assert_eq!(rows[1]["Part Price"], "3");

        let qa = read_json(&request.outputs.qa_json);
        assert_eq!(qa["ingest_mode"], "fallback");
        assert_eq!(qa["parser_stage"], "delim_\",\"");
        assert_eq!(qa["files_processed_fallback"], 1);
        assert_eq!(qa["rows_recovered_fallback"], 2);
        assert_eq!(qa["file_results"][0]["status"], "processed_fallback");
        assert_eq!(
            qa["file_results"][0]["error_message"],
            "xlsx parsing skipped: not an OpenXML container"
        );

        assert_eq!(
            fs::read_to_string(&request.outputs.manual_review_csv).unwrap(),
            "Status,Status Reason\n"
        );
    }

    // Scenario: The source is binary junk.
    // Expected Outcome: No rows, yet every artifact is still written and the
    // failure is visible in the QA report.
    #[traced_test]
    #[test]
    fn unreadable_source_still_reports() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_file(&dir.path().join("in/blob.bin"), [0u8, 159, 146, 150, 0, 1]);
        let request = request(dir.path(), &source);

        let outcome = run_conversion(&request, &RunContext::default()).unwrap();

        assert_eq!(outcome.ingest_mode, IngestMode::FallbackFailed);
        assert_eq!(outcome.counters.rows_total, 0);
        assert!(request.outputs.normalized_csv.exists());
        assert!(request.outputs.workbook.exists());

        let qa = read_json(&request.outputs.qa_json);
        assert_eq!(qa["files_failed"], 1);
        assert_eq!(qa["parser_stage"], "decode");
        assert_eq!(qa["file_results"][0]["status"], "failed");
        assert_eq!(qa["summary_text"], "0 processed / 0 incomplete");
    }

    // Scenario: Run-level labor defaults are supplied.
    // Expected Outcome: Every mapped row carries them.
    #[test]
    fn labor_defaults_reach_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source_csv(&dir.path().join("in/acme_prices.csv"));
        let request = request(dir.path(), &source).with_labor(LaborDefaults {
            cost: Some("45".parse().unwrap()),
            rate: Some("95.50".parse().unwrap()),
        });

        run_conversion(&request, &RunContext::default()).unwrap();

        for row in read_csv(&request.outputs.normalized_csv) {
            assert_eq!(row["Labor Cost"], "45");
            assert_eq!(row["Labor Rate"], "95.5");
            assert_eq!(row["Labor Hours"], "");
        }
    }

    /// Knows exactly one part.
    struct OnePart;

    impl PartLookup for OnePart {
        fn lookup(&self, part_number: &str, manufacturer: &str) -> EnrichmentResult {
            if part_number == "G100" && manufacturer == "Bryant" {
                EnrichmentResult {
                    part_name: Some("G100 Deluxe Furnace".into()),
                    description: Some("80% single stage furnace".into()),
                    warranty: Some("10 year parts limited warranty".into()),
                    source_url: Some("https://bryant.com/search?q=G100".into()),
                    confidence: Confidence::High,
                    status: EnrichmentStatus::Enriched,
                }
            } else {
                EnrichmentResult::not_found()
            }
        }
    }

    // Scenario: The normalized CSV of a conversion is fed to enrichment.
    // Expected Outcome: Enrichment columns are appended row by row and the
    // enrichment QA report counts each status.
    #[test]
    fn normalized_output_feeds_enrichment() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source_workbook(&dir.path().join("in/bryant_2024.xlsx"));
        let conversion = request(dir.path(), &source);
        run_conversion(&conversion, &RunContext::default()).unwrap();

        let mut enrichment = EnrichmentRequest::new(&conversion.outputs.normalized_csv);
        enrichment.output_csv = dir.path().join("out/enriched/enriched.csv");
        enrichment.qa_json = dir.path().join("out/qa/enrichment.json");
        enrichment.domains_config = dir.path().join("domains.json");
        enrichment.pause = Duration::ZERO;

        let report = run_enrichment_with(&enrichment, &OnePart).unwrap();
        assert_eq!(report.summary.rows_total, 4);
        assert_eq!(report.summary.enriched, 1);
        assert_eq!(report.summary.not_found, 3);

        let rows = read_csv(&enrichment.output_csv);
        assert_eq!(rows[0]["Enriched Part Name"], "G100 Deluxe Furnace");
        assert_eq!(rows[0]["Enrichment Confidence"], "high");
        assert_eq!(rows[0]["Part Price"], "0.5");
        assert_eq!(rows[1]["Enrichment Status"], "not_found");

        let qa = read_json(&enrichment.qa_json);
        assert_eq!(qa["summary"]["enriched"], 1);
    }
}
