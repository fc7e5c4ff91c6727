use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use startup_lens::analysis::{MonthlyPoint, SeriesMode};
use startup_lens::error::QueryError;

use super::plot::{bar_chart, line_chart, palette_colors, pie_chart};
use crate::state::AppState;

const WARNING: Color32 = Color32::from_rgb(220, 140, 0);

fn warning(ui: &mut Ui, msg: impl Into<String>) {
    ui.label(RichText::new(msg.into()).color(WARNING));
}

fn table(ui: &mut Ui, id: &str, headers: &[&str], rows: Vec<Vec<String>>) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(90.0), headers.len())
            .header(20.0, |mut header| {
                for h in headers {
                    header.col(|ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(18.0, |mut table_row| {
                        for cell in row {
                            table_row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Overall analysis
// ---------------------------------------------------------------------------

pub fn overall_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Overall Analysis");

    if let Some(overview) = &state.overview {
        match &overview.metrics {
            Ok(m) => {
                ui.columns(4, |cols: &mut [Ui]| {
                    metric(&mut cols[0], "Total", format!("{} Cr", m.total));
                    metric(&mut cols[1], "Max", crore(m.max));
                    metric(&mut cols[2], "Avg", format!("{} Cr", m.avg));
                    metric(&mut cols[3], "Funded Startups", m.count.to_string());
                });
            }
            Err(QueryError::EmptyDataset) => warning(ui, "The dataset has no usable records."),
            Err(e) => warning(ui, e.to_string()),
        }
    }

    ui.add_space(8.0);
    ui.heading("MoM graph");
    let mut mode = state.series_mode;
    egui::ComboBox::from_id_salt("series_mode")
        .selected_text(mode.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for candidate in SeriesMode::ALL {
                ui.selectable_value(&mut mode, candidate, candidate.to_string());
            }
        });
    state.set_series_mode(mode);

    let Some(overview) = &state.overview else {
        return;
    };
    if overview.monthly.is_empty() {
        warning(ui, "No monthly data to plot.");
        return;
    }
    let labels = overview.monthly.iter().map(MonthlyPoint::label).collect();
    let values: Vec<f64> = overview.monthly.iter().map(|p| p.value).collect();
    let y_label = match state.series_mode {
        SeriesMode::Total => "Amount (Cr)",
        SeriesMode::Count => "Funding rounds",
    };
    line_chart(ui, "mom_plot", labels, &values, y_label);
}

fn crore(amount: f64) -> String {
    format!("{amount:.2} Cr")
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(26.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

pub fn startup_page(ui: &mut Ui, state: &AppState) {
    ui.heading("StartUp Analysis");

    let Some(view) = &state.startup_view else {
        ui.label("Pick a startup and press “Find StartUp Details”.");
        return;
    };

    let profile = match &view.profile {
        Ok(profile) => profile,
        Err(e) => {
            warning(ui, e.to_string());
            return;
        }
    };

    ui.add_space(4.0);
    ui.label(RichText::new(&profile.name).size(22.0).strong());
    egui::Grid::new("startup_profile")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for (key, value) in [
                ("City", profile.cities.as_str()),
                ("Vertical", profile.verticals.as_str()),
                ("Subvertical", profile.subverticals.as_str()),
            ] {
                ui.strong(key);
                ui.label(value);
                ui.end_row();
            }
            ui.strong("Funding rounds");
            ui.label(profile.rounds.to_string());
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Investors");
    if view.investors.is_empty() {
        warning(ui, "No investors recorded.");
    } else {
        bar_chart(
            ui,
            "startup_investors",
            &view.investors,
            "Credited (Cr)",
            palette_colors(view.investors.len()),
        );
    }
}

// ---------------------------------------------------------------------------
// Investor
// ---------------------------------------------------------------------------

pub fn investor_page(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.investor_view else {
        ui.heading("Investor");
        ui.label("Pick an investor and press “Find Investor Details”.");
        return;
    };
    let profile = &view.profile;
    ui.heading(&view.name);

    ui.add_space(4.0);
    ui.strong("Most Recent Investments");
    if profile.recent.is_empty() {
        warning(ui, format!("No investments found for {}.", view.name));
        return;
    }
    let rows = profile
        .recent
        .iter()
        .map(|r| {
            vec![
                r.date.to_string(),
                r.startup.clone(),
                r.vertical.clone(),
                r.city.clone(),
                r.round.clone(),
                format!("{:.2}", r.amount),
            ]
        })
        .collect();
    table(
        ui,
        "recent_investments",
        &["Date", "Startup", "Vertical", "City", "Round", "Amount (Cr)"],
        rows,
    );

    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Biggest Investments");
        if profile.top_startups.is_empty() {
            warning(&mut cols[0], "No investments to plot.");
        } else {
            bar_chart(
                &mut cols[0],
                "biggest_investments",
                &profile.top_startups,
                "Amount (Cr)",
                palette_colors(profile.top_startups.len()),
            );
        }

        cols[1].strong("Sectors invested in");
        if profile.sector_split.is_empty() {
            warning(&mut cols[1], "No sector data.");
        } else {
            pie_chart(&mut cols[1], &profile.sector_split, |_, sector| {
                state.sector_colors.color_for(sector)
            });
        }
    });

    ui.add_space(8.0);
    ui.strong("YoY Investment");
    if profile.yearly.is_empty() {
        warning(ui, "No yearly data.");
    } else {
        let labels = profile.yearly.iter().map(|(y, _)| y.to_string()).collect();
        let values: Vec<f64> = profile.yearly.iter().map(|(_, v)| *v).collect();
        line_chart(ui, "yoy_plot", labels, &values, "Amount (Cr)");
    }
}

// ---------------------------------------------------------------------------
// Sector analysis
// ---------------------------------------------------------------------------

pub fn sector_page(ui: &mut Ui, state: &AppState) {
    ui.heading("Top 5 Sectors by Total Investment");
    if state.sectors.is_empty() {
        warning(ui, "No sector data.");
        return;
    }

    ui.strong("Investment in Top 5 Sectors");
    let rows = state
        .sectors
        .iter()
        .map(|(sector, total)| vec![sector.clone(), format!("{total:.2}")])
        .collect();
    table(ui, "top_sectors", &["Sector", "Total Investment (Cr)"], rows);

    ui.add_space(8.0);
    let colors = |_: usize, sector: &str| state.sector_colors.color_for(sector);
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Bar Chart");
        bar_chart(&mut cols[0], "sector_bars", &state.sectors, "Investment (Cr)", colors);
        cols[1].strong("Pie Chart");
        pie_chart(&mut cols[1], &state.sectors, colors);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crore_amounts_show_two_decimals() {
        assert_eq!(crore(123.45000000000002), "123.45 Cr");
        assert_eq!(crore(150.0), "150.00 Cr");
    }
}
