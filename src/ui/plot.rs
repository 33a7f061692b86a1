use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use collection_dash::data::DerivedRecord;

use crate::state::AppState;

const GROUP_OFFSET: f64 = 0.2;
const BAR_WIDTH: f64 = 0.38;

// ---------------------------------------------------------------------------
// Grouped bar charts (central panel)
// ---------------------------------------------------------------------------

/// AM vs PM bag counts per month.
pub fn bag_chart(ui: &mut Ui, state: &AppState, height: f32) {
    grouped_chart(
        ui,
        "bag_chart",
        "Bags collected per month and shift",
        "Bags",
        &state.view.records,
        (
            |r: &DerivedRecord| r.record.collection_am,
            |r: &DerivedRecord| r.record.collection_pm,
        ),
        (state.colors.am, state.colors.pm),
        height,
    );
}

/// AM vs PM weight per month.
pub fn weight_chart(ui: &mut Ui, state: &AppState, height: f32) {
    grouped_chart(
        ui,
        "weight_chart",
        "Weight collected per month and shift",
        "Weight (kg)",
        &state.view.records,
        (
            |r: &DerivedRecord| r.weight_am,
            |r: &DerivedRecord| r.weight_pm,
        ),
        (state.colors.am_weight, state.colors.pm_weight),
        height,
    );
}

type Series = fn(&DerivedRecord) -> Option<f64>;

#[allow(clippy::too_many_arguments)]
fn grouped_chart(
    ui: &mut Ui,
    id: &str,
    title: &str,
    y_label: &str,
    records: &[DerivedRecord],
    (am_of, pm_of): (Series, Series),
    (am_color, pm_color): (Color32, Color32),
    height: f32,
) {
    ui.strong(title);

    let bars = |value_of: Series, offset: f64| -> Vec<Bar> {
        records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| {
                let v = value_of(r)?;
                Some(
                    Bar::new(i as f64 + offset, v)
                        .width(BAR_WIDTH)
                        .name(r.period()),
                )
            })
            .collect()
    };

    let am = BarChart::new(bars(am_of, -GROUP_OFFSET))
        .name("Morning (AM)")
        .color(am_color);
    let pm = BarChart::new(bars(pm_of, GROUP_OFFSET))
        .name("Afternoon (PM)")
        .color(pm_color);

    let labels: Vec<String> = records.iter().map(|r| r.period().to_string()).collect();

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| period_label(&labels, mark.value))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(am);
            plot_ui.bar_chart(pm);
        });
}

/// Axis tick text: the month at integer positions, blank elsewhere.
fn period_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// AM / PM proportion
// ---------------------------------------------------------------------------

/// One horizontal 100% bar split into the AM and PM shares.
pub fn share_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("AM / PM share of bags collected");

    let s = &state.view.summary;
    let am_pct = s.am_share() * 100.0;
    let pm_pct = s.pm_share() * 100.0;

    let am = BarChart::new(vec![Bar::new(0.0, am_pct).name(format!("AM {am_pct:.1}%"))])
        .name("Morning (AM)")
        .color(state.colors.am)
        .horizontal();
    let pm = BarChart::new(vec![Bar::new(0.0, pm_pct).name(format!("PM {pm_pct:.1}%"))])
        .name("Afternoon (PM)")
        .color(state.colors.pm)
        .horizontal()
        .stack_on(&[&am]);

    Plot::new("share_chart")
        .height(height)
        .legend(Legend::default())
        .show_y(false)
        .y_axis_formatter(|_, _| String::new())
        .include_x(0.0)
        .include_x(100.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(am);
            plot_ui.bar_chart(pm);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_labels_only_at_integer_positions() {
        let labels = vec!["Jan".to_string(), "Fev".to_string()];
        assert_eq!(period_label(&labels, 0.0), "Jan");
        assert_eq!(period_label(&labels, 1.0), "Fev");
        assert_eq!(period_label(&labels, 0.5), "");
        assert_eq!(period_label(&labels, -1.0), "");
        assert_eq!(period_label(&labels, 2.0), "");
    }
}
