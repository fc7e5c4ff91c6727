use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StartupLensApp {
    pub state: AppState,
}

impl StartupLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StartupLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a funding file to begin  (File → Open…)");
                });
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| match self.state.page {
                Page::Overall => pages::overall_page(ui, &mut self.state),
                Page::Startup => pages::startup_page(ui, &self.state),
                Page::Investor => pages::investor_page(ui, &self.state),
                Page::Sector => pages::sector_page(ui, &self.state),
            });
        });
    }
}
