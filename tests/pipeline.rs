use std::io::Write;
use std::path::Path;

use collection_dash::config::{ColumnNames, SourceOptions};
use collection_dash::data::derive::WEIGHT_PER_BAG_KG;
use collection_dash::data::{AggregateSummary, CollectionDataPipeline, FilterSelection};
use collection_dash::{report, PipelineError};

fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

const SHEET: &str = "\
 Mês , Coleta AM ,Coleta PM , Total de Sacos ,Observação
Jan,10,5,15,
,3,3,6,linha vazia
Fev,8,12,20,chuva
Mar,n/a,7,,
Total,18,24,41,
";

#[test]
fn csv_end_to_end() {
    let f = write_file(".csv", SHEET);
    let ds = CollectionDataPipeline::default().run(f.path()).unwrap();

    assert_eq!(ds.periods, vec!["Jan", "Fev", "Mar"]);
    assert_eq!(
        ds.headers,
        vec!["Mês", "Coleta AM", "Coleta PM", "Total de Sacos", "Observação"]
    );
    assert_eq!(ds.warnings.len(), 1);
    assert_eq!(ds.warnings[0].column, "Coleta AM");

    let mar = &ds.records[2];
    assert_eq!(mar.weight_am, None);
    assert_eq!(mar.weight_pm, Some(140.0));
    // No supplied total and AM unknown: total stays missing.
    assert_eq!(mar.total_bags, None);

    let all = ds.view(&ds.default_selection()).summary;
    assert_eq!(all.total_am, 18.0);
    assert_eq!(all.total_pm, 24.0);
    assert_eq!(all.total_bags, 35.0);
    assert_eq!(all.total_weight, 700.0);
}

#[test]
fn weights_scale_with_counts_for_every_selection() {
    let f = write_file(".csv", SHEET);
    let ds = CollectionDataPipeline::default().run(f.path()).unwrap();

    let selections = [
        FilterSelection::all(["Jan"]),
        FilterSelection::all(["Fev", "Mar"]),
        ds.default_selection(),
        FilterSelection::none(),
    ];
    for sel in &selections {
        let view = ds.view(sel);
        let am: f64 = view.records.iter().filter_map(|r| r.record.collection_am).sum();
        let w_am: f64 = view.records.iter().filter_map(|r| r.weight_am).sum();
        let pm: f64 = view.records.iter().filter_map(|r| r.record.collection_pm).sum();
        let w_pm: f64 = view.records.iter().filter_map(|r| r.weight_pm).sum();
        let total: f64 = view.records.iter().filter_map(|r| r.total_bags).sum();
        let w_total: f64 = view.records.iter().filter_map(|r| r.weight_total).sum();

        assert_eq!(w_am, am * WEIGHT_PER_BAG_KG);
        assert_eq!(w_pm, pm * WEIGHT_PER_BAG_KG);
        assert_eq!(w_total, total * WEIGHT_PER_BAG_KG);
        assert!(view.records.iter().all(|r| ds.records.contains(r)));
    }
}

#[test]
fn empty_selection_gives_zero_summary() {
    let f = write_file(".csv", SHEET);
    let ds = CollectionDataPipeline::default().run(f.path()).unwrap();
    let view = ds.view(&FilterSelection::none());
    assert!(view.records.is_empty());
    assert_eq!(view.summary, AggregateSummary::default());
}

#[test]
fn total_rows_never_survive() {
    let f = write_file(
        ".csv",
        "Mês,Coleta AM,Coleta PM,Total de Sacos\nTotal,1,1,2\n Total ,n/a,x,\n,,,\n",
    );
    let ds = CollectionDataPipeline::default().run(f.path()).unwrap();
    assert!(ds.is_empty());
    assert!(ds.periods.is_empty());
    assert_eq!(ds.view(&ds.default_selection()).summary, AggregateSummary::default());
}

#[test]
fn json_source_with_custom_columns() {
    let f = write_file(
        ".json",
        r#"[
            {"Month": "Jan", "AM": 10, "PM": 5},
            {"Month": "Feb", "AM": "8", "PM": 12, "Bags": 21},
            {"Month": "TOTAL", "AM": 18, "PM": 17}
        ]"#,
    );
    let opts = SourceOptions {
        sheet: None,
        columns: ColumnNames {
            period: "Month".into(),
            collection_am: "AM".into(),
            collection_pm: "PM".into(),
            total: "Bags".into(),
        },
        total_marker: "TOTAL".into(),
    };
    let ds = CollectionDataPipeline::new(opts).run(f.path()).unwrap();

    assert_eq!(ds.periods, vec!["Jan", "Feb"]);
    let s = ds.view(&ds.default_selection()).summary;
    // Jan derives 15 from AM + PM, Feb uses its supplied 21.
    assert_eq!(s.total_bags, 36.0);
    assert_eq!(s.total_am, 18.0);
}

#[test]
fn schema_failure_is_terminal() {
    let f = write_file(".csv", "Month,Coleta AM\nJan,1\n");
    match CollectionDataPipeline::default().run(f.path()) {
        Err(PipelineError::SchemaMissing { column, .. }) => assert_eq!(column, "Mês"),
        other => panic!("expected SchemaMissing, got {other:?}"),
    }
}

#[test]
fn unreadable_source_is_terminal() {
    let err = CollectionDataPipeline::default()
        .run(Path::new("/definitely/not/here/coleta.xlsx"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::SourceUnavailable { .. }), "{err}");
    assert!(err.to_string().contains("coleta.xlsx"));
}

#[test]
fn report_for_selected_months() {
    let f = write_file(".csv", SHEET);
    let ds = CollectionDataPipeline::default().run(f.path()).unwrap();
    let text = report::render(&ds.view(&FilterSelection::all(["Jan", "Fev"]))).unwrap();
    assert!(text.contains("Total bags: 35"), "{text}");
    assert!(text.contains("AM / PM: 18 AM / 17 PM"), "{text}");
    assert!(!text.contains("Mar"), "{text}");
}
