use eframe::egui;

use hyakumeiten_map::state::AppState;

use crate::ui::{info, map, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MapApp {
    pub state: AppState,
}

impl MapApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters + legend ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: result list ----
        egui::SidePanel::right("result_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::result_list(ui, &mut self.state);
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            map::restaurant_map(ui, &mut self.state);
        });

        // ---- Floating info window for the selected restaurant ----
        info::info_window(ctx, &mut self.state);
    }
}
