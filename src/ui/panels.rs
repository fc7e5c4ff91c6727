use eframe::egui::{self, Color32, RichText, Ui};

use startup_lens::analysis::InvestorMatch;

use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – navigation and pickers
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Startup Funding Analysis");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.strong("Select One");
    let mut page = state.page;
    egui::ComboBox::from_id_salt("page")
        .selected_text(page.label())
        .show_ui(ui, |ui: &mut Ui| {
            for candidate in Page::ALL {
                ui.selectable_value(&mut page, candidate, candidate.label());
            }
        });
    state.set_page(page);
    ui.separator();

    match state.page {
        Page::Startup => {
            ui.strong("Select StartUp");
            picker(ui, "startup_picker", &state.startup_names, &mut state.selected_startup);
            if ui.button("Find StartUp Details").clicked() {
                state.find_startup();
            }
        }
        Page::Investor => {
            ui.strong("Select Investor");
            picker(ui, "investor_picker", &state.investor_names, &mut state.selected_investor);
            let mut exact = state.investor_match == InvestorMatch::Exact;
            if ui.checkbox(&mut exact, "Exact name match").changed() {
                state.investor_match = if exact {
                    InvestorMatch::Exact
                } else {
                    InvestorMatch::Substring
                };
            }
            if ui.button("Find Investor Details").clicked() {
                state.find_investor();
            }
        }
        Page::Overall | Page::Sector => {}
    }
}

fn picker(ui: &mut Ui, id: &str, names: &[String], selected: &mut Option<String>) {
    let current = selected.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for name in names {
                if ui.selectable_label(current == *name, name).clicked() {
                    *selected = Some(name.clone());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} funding records, {} startups, {} investors",
                ds.len(),
                state.startup_names.len(),
                state.investor_names.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open funding data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
