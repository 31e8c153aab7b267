#[cfg(test)]
mod tests {
    use crate::utils::{
        cell, read_csv, read_json, seed_registry, write_file, write_markup, write_source_csv,
        write_source_workbook, write_template,
    };
    use engine_config::{inference::InferenceTables, templates::TemplateType};
    use engine_runtime::execution::{
        RunContext,
        batch::{BatchRequest, run_manifest},
    };
    use tracing_test::traced_test;

    // Scenario: A manifest lists two convertible customers and one without an
    // output type. One customer overrides the base template, the other uses
    // the registry default.
    // Expected Outcome:
    // - Two runs, each writing its artifacts under the customer key.
    // - The third customer is skipped with a warning.
    // - The consolidated report sums both runs.
    #[traced_test]
    #[test]
    fn manifest_batch_converts_each_customer() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let registry = seed_registry(root, TemplateType::SinglePart);

        let bryant = write_source_workbook(&root.join("in/bryant_2024.xlsx"));
        let acme = write_source_csv(&root.join("in/acme_prices.csv"));
        let custom_template = write_template(&root.join("custom/bryant_template.xlsx"));

        let manifest = write_file(
            &root.join("manifest.csv"),
            format!(
                "customer_name,source_file,completed_template,base_template,output_type,notes\n\
                 Bryant Supply,{},,{},single_part,\n\
                 Cool Air,{},,,single_part,rush\n\
                 Pending Co,{},,,,awaiting template\n",
                bryant.display(),
                custom_template.display(),
                acme.display(),
                acme.display(),
            ),
        );

        let request = BatchRequest {
            manifest,
            markup_profile: write_markup(root),
            out_dir: root.join("out"),
            consolidated_qa: root.join("out/qa/consolidated.json"),
            ..BatchRequest::default()
        };
        let ctx = RunContext::new(registry, InferenceTables::default());

        let report = run_manifest(&request, &ctx).unwrap();

        assert_eq!(report.runs.len(), 2);
        assert_eq!(report.aggregate.rows_total, 7);
        assert_eq!(report.aggregate.rows_processed, 5);
        assert_eq!(report.aggregate.rows_incomplete, 1);
        assert_eq!(report.aggregate.rows_duplicates_ignored, 1);
        assert_eq!(report.summary_text, "5 processed / 1 incomplete");
        assert!(logs_contain("Skipping Pending Co"));

        let out = root.join("out");
        assert_eq!(read_csv(&out.join("converted/bryant_supply.csv")).len(), 4);
        assert_eq!(read_csv(&out.join("converted/cool_air.csv")).len(), 2);
        assert!(out.join("qa/bryant_supply_manual_review.csv").exists());
        assert_eq!(cell(&out.join("converted/cool_air.xlsx"), "Parts", 1, 3), "X-1");
        assert_eq!(cell(&out.join("converted/bryant_supply.xlsx"), "Parts", 1, 3), "G100");

        let qa = read_json(&out.join("qa/cool_air.json"));
        assert_eq!(qa["ingest_mode"], "fallback");

        let consolidated = read_json(&request.consolidated_qa);
        assert_eq!(consolidated["runs"].as_array().unwrap().len(), 2);
        assert_eq!(consolidated["runs"][1]["ingest_mode"], "fallback");
        assert!(
            consolidated["runs"][0]["qa_json"]
                .as_str()
                .unwrap()
                .ends_with("bryant_supply.json")
        );
        assert_eq!(consolidated["aggregate"]["rows_manual_review"], 1);
    }

    // Scenario: A manifest row points at a source file that does not exist.
    // Expected Outcome: The batch stops with an error instead of skipping it.
    #[test]
    fn missing_source_file_stops_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let registry = seed_registry(root, TemplateType::SinglePart);
        let manifest = write_file(
            &root.join("manifest.csv"),
            format!(
                "customer_name,source_file,output_type\nGhost,{},single_part\n",
                root.join("in/missing.xlsx").display()
            ),
        );

        let request = BatchRequest {
            manifest,
            markup_profile: write_markup(root),
            out_dir: root.join("out"),
            consolidated_qa: root.join("out/qa/consolidated.json"),
            ..BatchRequest::default()
        };
        let ctx = RunContext::new(registry, InferenceTables::default());

        assert!(run_manifest(&request, &ctx).is_err());
        assert!(!request.consolidated_qa.exists());
    }
}
