mod app;
mod ui;

use std::path::PathBuf;

use app::MapApp;
use clap::Parser;
use eframe::egui;
use hyakumeiten_map::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "hyakumeiten-map")]
#[command(about = "Browse Tabelog Hyakumeiten restaurants on a map")]
struct ViewerArgs {
    /// Restaurant export to open at startup (.json or .csv)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Category list for the category selector (JSON array of strings)
    #[arg(long)]
    categories: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = ViewerArgs::parse();

    let mut state = AppState::default();
    if let Some(path) = &args.categories {
        state.load_categories(path);
    }
    if let Some(path) = &args.data {
        state.load_restaurants(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Hyakumeiten Map",
        options,
        Box::new(move |cc| {
            ui::fonts::install_cjk_font(&cc.egui_ctx);
            Ok(Box::new(MapApp::new(state)))
        }),
    )
}
