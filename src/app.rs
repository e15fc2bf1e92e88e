use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, viewer};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VocLensApp {
    pub state: AppState,
}

impl Default for VocLensApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for VocLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset browser ----
        egui::SidePanel::left("browser_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: annotation views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            viewer::annotation_viewer(ui, &mut self.state);
        });
    }
}
