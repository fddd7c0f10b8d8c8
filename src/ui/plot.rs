use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use gradview::data::aggregate::HistogramBin;
use gradview::state::DashboardState;

use crate::color::ColorScale;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the four charts, or a notice when there is nothing to draw.
pub fn charts(ui: &mut Ui, state: &DashboardState) {
    if !state.has_data() {
        ui.heading("No data available. Open a file to start (File → Open…)");
        return;
    }
    if state.aggregates.subset.is_empty() {
        ui.colored_label(
            Color32::from_rgb(230, 160, 0),
            "No data available for the selected filters.",
        );
        return;
    }

    let series = &state.aggregates.series;
    ui.heading("Charts");
    ui.columns(2, |cols| {
        category_bars(
            &mut cols[0],
            "salary_by_sector",
            "Mean salary by sector",
            &series.salary_by_sector,
            ColorScale::Viridis,
        );
        category_bars(
            &mut cols[1],
            "employment_by_state",
            "Employment rate by state (%)",
            &series.employment_rate_by_state,
            ColorScale::Blues,
        );
    });
    ui.columns(2, |cols| {
        salary_histogram(&mut cols[0], &series.salary_distribution);
        admissions_line(&mut cols[1], &series.admissions_by_year);
    });
}

/// One bar per category, coloured by value, labelled on the x axis.
fn category_bars(
    ui: &mut Ui,
    id: &str,
    title: &str,
    series: &[(String, f64)],
    scale: ColorScale,
) {
    ui.strong(title);

    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
    let bars: Vec<Bar> = series
        .iter()
        .zip(scale.colors_for(&values))
        .enumerate()
        .map(|(i, ((name, value), color))| {
            Bar::new(i as f64, *value).name(name).fill(color).width(0.7)
        })
        .collect();
    let labels: Vec<String> = series.iter().map(|(name, _)| name.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(title));
        });
}

fn salary_histogram(ui: &mut Ui, bins: &[HistogramBin]) {
    ui.strong("Salary distribution");

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            let width = bin.upper - bin.lower;
            Bar::new((bin.lower + bin.upper) / 2.0, bin.count as f64)
                .name(format!("{:.0} – {:.0}", bin.lower, bin.upper))
                .width(if width > 0.0 { width } else { 1.0 })
                .fill(Color32::from_rgb(99, 110, 250))
        })
        .collect();

    Plot::new("salary_distribution")
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_scroll(false)
        .x_axis_label("Salary")
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Graduates"));
        });
}

fn admissions_line(ui: &mut Ui, counts: &[(i32, usize)]) {
    ui.strong("Admissions per year");

    let points: Vec<[f64; 2]> = counts
        .iter()
        .map(|&(year, n)| [year as f64, n as f64])
        .collect();

    Plot::new("admissions_by_year")
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| year_label(mark.value))
        .y_axis_label("Graduates")
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).name("Admissions").width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(4.0));
        });
}

/// Axis tick label for a bar chart whose bars sit at x = 0, 1, 2, …
fn category_label(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Only whole years get a tick label.
fn year_label(x: f64) -> String {
    if (x - x.round()).abs() > 1e-6 {
        String::new()
    } else {
        format!("{}", x.round() as i64)
    }
}
