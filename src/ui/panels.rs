use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};

use hyakumeiten_map::color::{ColorMode, RatingTier};
use hyakumeiten_map::data::filter::MAX_RESULTS;
use hyakumeiten_map::data::model::PRICE_RANGES;
use hyakumeiten_map::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter form and legend
// ---------------------------------------------------------------------------

/// Render the left filter panel. Every edit applies immediately.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let categories = match &state.dataset {
        Some(ds) => ds.categories.clone(),
        None => {
            ui.label("No restaurants loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Search");
            changed |= ui
                .add(
                    TextEdit::singleline(&mut state.form.query)
                        .hint_text("Name, address or station"),
                )
                .changed();
            ui.add_space(6.0);

            ui.strong("Category");
            let category_text = if state.form.category.is_empty() {
                "All categories".to_string()
            } else {
                state.form.category.clone()
            };
            egui::ComboBox::from_id_salt("category")
                .selected_text(category_text)
                .width(ui.available_width())
                .height(320.0)
                .show_ui(ui, |ui: &mut Ui| {
                    changed |= ui
                        .selectable_value(&mut state.form.category, String::new(), "All categories")
                        .changed();
                    for cat in &categories {
                        changed |= ui
                            .selectable_value(&mut state.form.category, cat.clone(), cat)
                            .changed();
                    }
                });
            ui.add_space(6.0);

            ui.strong("Station / area");
            changed |= ui
                .add(TextEdit::singleline(&mut state.form.region).hint_text("e.g. 五反田"))
                .changed();
            ui.add_space(6.0);

            ui.strong("Minimum rating");
            changed |= ui
                .add(TextEdit::singleline(&mut state.form.min_rating).hint_text("e.g. 3.5"))
                .changed();
            if !state.form.min_rating.trim().is_empty() && state.criteria.min_rating.is_none() {
                ui.label(RichText::new("Not a number, ignored").small().color(Color32::RED));
            }
            ui.add_space(6.0);

            ui.strong("Price");
            let price_text = if state.form.price_range.is_empty() {
                "Any price".to_string()
            } else {
                state.form.price_range.clone()
            };
            egui::ComboBox::from_id_salt("price_range")
                .selected_text(price_text)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    changed |= ui
                        .selectable_value(&mut state.form.price_range, String::new(), "Any price")
                        .changed();
                    for label in PRICE_RANGES {
                        changed |= ui
                            .selectable_value(&mut state.form.price_range, label.to_string(), label)
                            .changed();
                    }
                });
            ui.add_space(8.0);

            if changed {
                state.apply_form();
            }

            if ui.button("Clear filters").clicked() {
                state.clear_filters();
            }

            ui.separator();
            legend(ui, state);
        });
}

/// Rating tiers double as quick filters; category colours set the category.
fn legend(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Legend");
    match state.color_mode {
        ColorMode::Rating => {
            for tier in RatingTier::ALL {
                let active = state.criteria.min_rating == tier.threshold();
                ui.horizontal(|ui: &mut Ui| {
                    swatch(ui, tier.color());
                    if ui.selectable_label(active, tier.label()).clicked() {
                        state.quick_filter(tier);
                    }
                });
            }
        }
        ColorMode::Category => {
            for (label, color) in state.category_colors.legend_entries() {
                let active = state.form.category == label;
                ui.horizontal(|ui: &mut Ui| {
                    swatch(ui, color);
                    if ui.selectable_label(active, &label).clicked() {
                        state.form.category = if active { String::new() } else { label.clone() };
                        state.apply_form();
                    }
                });
            }
        }
    }
}

fn swatch(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.0, color);
}

// ---------------------------------------------------------------------------
// Right side panel – result list
// ---------------------------------------------------------------------------

/// Render the first `MAX_RESULTS` matches; clicking a name opens its info window.
pub fn result_list(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!("Results ({})", state.result_indices.len()));
    if state.result_indices.len() >= MAX_RESULTS {
        ui.weak(format!("Showing the first {MAX_RESULTS} matches"));
    }
    ui.separator();

    if state.result_indices.is_empty() {
        ui.label("No restaurants found");
        return;
    }

    let restaurants = state.restaurants();
    let mut clicked = None;
    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 8.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(44.0))
        .column(Column::remainder().clip(true))
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Score");
            });
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Station");
            });
        })
        .body(|body| {
            body.rows(row_height, state.result_indices.len(), |mut row| {
                let idx = state.result_indices[row.index()];
                let r = &restaurants[idx];
                row.col(|ui| {
                    let score = r
                        .rating
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or_else(|| "-".to_string());
                    ui.label(RichText::new(score).color(RatingTier::for_rating(r.rating).color()));
                });
                row.col(|ui| {
                    if ui.selectable_label(state.selected == Some(idx), &r.name).clicked() {
                        clicked = Some(idx);
                    }
                });
                row.col(|ui| {
                    ui.label(r.station.as_deref().unwrap_or(""));
                });
            });
        });

    if let Some(idx) = clicked {
        state.select(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open restaurants…").clicked() {
                open_restaurants_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open categories…").clicked() {
                open_categories_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let stats = &ds.stats;
            ui.label(format!(
                "{} restaurants, {} on the map, {} categories",
                stats.total_restaurants, stats.restaurants_with_coords, stats.total_categories
            ));
            if let Some(avg) = stats.avg_rating {
                ui.label(format!("avg rating {avg:.2}"));
            }
            ui.separator();
            ui.label(format!("{} markers in view", state.marker_indices.len()));
            if let Some(view) = &state.viewport {
                let (lat, lng) = view.center();
                ui.weak(format!("centre {lat:.4}, {lng:.4}"));
            }
            ui.separator();
            if ui.button("Fit all").clicked() {
                state.fit_requested = true;
            }
        }

        ui.separator();

        ui.label("Color by");
        ui.selectable_value(&mut state.color_mode, ColorMode::Rating, "Rating");
        ui.selectable_value(&mut state.color_mode, ColorMode::Category, "Category");

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_restaurants_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open restaurant export")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_restaurants(&path);
    }
}

pub fn open_categories_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open category list")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_categories(&path);
    }
}
