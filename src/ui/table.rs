use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use collection_dash::data::model::format_number;
use collection_dash::report::TABLE_HEADERS;

use crate::state::AppState;

/// The filtered, derived records as a table.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let cell = |v: Option<f64>| v.map(format_number).unwrap_or_else(|| "–".to_string());

    TableBuilder::new(ui)
        .id_salt("records_table")
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(80.0), TABLE_HEADERS.len())
        .header(20.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for r in &state.view.records {
                body.row(18.0, |mut row| {
                    let values = [
                        r.period().to_string(),
                        cell(r.record.collection_am),
                        cell(r.record.collection_pm),
                        cell(r.total_bags),
                        cell(r.weight_am),
                        cell(r.weight_pm),
                        cell(r.weight_total),
                    ];
                    for v in values {
                        row.col(|ui: &mut Ui| {
                            ui.label(v);
                        });
                    }
                });
            }
        });
}
