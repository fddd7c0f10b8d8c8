use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use gradview::data::filter::Dimension;
use gradview::data::model::REQUIRED_COLUMNS;
use gradview::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    if !state.has_data() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let universe = state.universe.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Categorical multi-selects ----
            for dim in Dimension::ALL {
                let all_values = universe.values(dim);
                let n_selected = state.filters.selection(dim).len();
                let header_text = format!("{}  ({n_selected}/{})", dim.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column())
                    .default_open(dim != Dimension::Sector)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for val in all_values {
                            let mut checked = state.filters.selection(dim).contains(val);
                            if ui.checkbox(&mut checked, val.as_str()).changed() {
                                state.toggle(dim, val);
                            }
                        }
                    });
            }

            // ---- Admission years ----
            let n_years = state.filters.admission_years.len();
            let header_text = format!(
                "Admission years  ({n_years}/{})",
                universe.admission_years.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("admission_year")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_years();
                        }
                    });
                    for &year in &universe.admission_years {
                        let mut checked = state.filters.admission_years.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            // ---- Salary range ----
            ui.separator();
            ui.strong("Salary range");
            if let Some((lo, hi)) = universe.salary_bounds {
                let mut min = state.filters.salary_range.min;
                let mut max = state.filters.salary_range.max;
                let min_changed = ui
                    .add(egui::Slider::new(&mut min, lo..=hi).text("min"))
                    .changed();
                let max_changed = ui
                    .add(egui::Slider::new(&mut max, lo..=hi).text("max"))
                    .changed();
                if min_changed || max_changed {
                    state.set_salary_range(min, max);
                }
            }

            ui.separator();
            ui.label(format!(
                "Selected records: {} of {}",
                state.aggregates.kpis.total_count,
                state.total_records()
            ));
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Graduate Employability Dashboard (2019-2024)");
        ui.separator();

        if let Some(path) = &state.data_path {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Three headline metrics side by side.
pub fn kpi_row(ui: &mut Ui, state: &DashboardState) {
    let kpis = &state.aggregates.kpis;
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Total graduates", kpis.total_count.to_string());
        metric(
            &mut cols[1],
            "Mean salary",
            kpis.mean_salary.map_or_else(not_available, format_currency),
        );
        metric(
            &mut cols[2],
            "Employment rate",
            kpis.employment_rate.map_or_else(not_available, format_percent),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

fn not_available() -> String {
    "N/A".to_string()
}

/// `1234.5` → `"R$ 1,234.50"`.
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("R$ {sign}{grouped}.{:02}", cents % 100)
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

// ---------------------------------------------------------------------------
// Preview of the filtered rows
// ---------------------------------------------------------------------------

pub fn preview_table(ui: &mut Ui, state: &DashboardState) {
    ui.strong("Filtered data");
    let preview = state.aggregates.subset.head(state.config.preview_rows);
    if preview.is_empty() {
        ui.label("No rows to show.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(90.0), REQUIRED_COLUMNS.len())
        .header(20.0, |mut header| {
            for &name in REQUIRED_COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in preview.rows() {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.state);
                    });
                    table_row.col(|ui| {
                        ui.label(row.sector);
                    });
                    table_row.col(|ui| {
                        ui.label(row.employed);
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.2}", row.salary));
                    });
                    table_row.col(|ui| {
                        ui.label(row.admission_year.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open graduate records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
        if state.has_data() {
            log::info!(
                "Showing {} of {} records from {}",
                state.aggregates.kpis.total_count,
                state.total_records(),
                path.display()
            );
        }
    }
}
