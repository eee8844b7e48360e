use eframe::egui::{self, RichText, Ui};

use hyakumeiten_map::color::RatingTier;
use hyakumeiten_map::state::AppState;

/// Floating details window for the selected restaurant. Closing it clears
/// the selection.
pub fn info_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(r) = state.selected_restaurant().cloned() else {
        return;
    };

    let mut open = true;
    egui::Window::new(RichText::new(&r.name).strong())
        .id(egui::Id::new("restaurant_info"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(340.0)
        .show(ctx, |ui: &mut Ui| {
            egui::Grid::new("restaurant_info_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    if let Some(rating) = r.rating {
                        ui.strong("Rating");
                        let mut text = format!("{rating:.2}");
                        if let Some(n) = r.review_count {
                            text.push_str(&format!("  ({n} reviews)"));
                        }
                        ui.label(
                            RichText::new(text)
                                .color(RatingTier::for_rating(Some(rating)).color()),
                        );
                        ui.end_row();
                    }
                    field(ui, "Categories", r.categories.as_deref());
                    field(ui, "Price", r.price_range.as_deref());
                    field(ui, "Station", r.station.as_deref());
                    field(ui, "Address", r.address.as_deref());
                    field(ui, "Hours", r.hours.as_deref());
                    field(ui, "Closed", r.closed.as_deref());
                    field(ui, "Phone", r.phone.as_deref());
                });

            if let Some(url) = &r.url {
                ui.separator();
                ui.hyperlink_to("Open on Tabelog", url);
            }
            match r.coordinates() {
                Some((lat, lng)) => ui.weak(format!("{lat:.5}, {lng:.5}")),
                None => ui.weak("No map position"),
            };
        });

    if !open {
        state.selected = None;
    }
}

fn field(ui: &mut Ui, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        ui.strong(label);
        ui.add(egui::Label::new(value).wrap());
        ui.end_row();
    }
}
