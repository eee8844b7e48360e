use std::collections::BTreeMap;

use eframe::egui::{Color32, Pos2, Ui};
use egui_plot::{
    Legend, MarkerShape, Plot, PlotBounds, PlotPoint, PlotPoints, PlotTransform, Points,
};

use hyakumeiten_map::color::{ColorMode, RatingTier};
use hyakumeiten_map::data::viewport::Bounds;
use hyakumeiten_map::state::AppState;

/// Pointer distance, in points, within which a marker counts as hit.
const PICK_RADIUS: f32 = 10.0;

// ---------------------------------------------------------------------------
// Restaurant map (central panel)
// ---------------------------------------------------------------------------

/// Render the map: x is longitude, y is latitude. The visible plot bounds
/// are fed back into the state as the viewport.
pub fn restaurant_map(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a restaurant export to begin  (File → Open restaurants…)");
        });
        return;
    }

    let fit_to = if std::mem::take(&mut state.fit_requested) {
        Bounds::around(state.restaurants()).map(|b| b.padded(0.05))
    } else {
        None
    };

    let series = marker_series(state);
    let highlight = state.selected_restaurant().and_then(|r| r.coordinates());

    let response = Plot::new("restaurant_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(b) = fit_to {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [b.west, b.south],
                    [b.east, b.north],
                ));
            }

            for (label, (color, points)) in series {
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(label)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }

            if let Some((lat, lng)) = highlight {
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[lng, lat]]))
                        .color(Color32::WHITE)
                        .shape(MarkerShape::Circle)
                        .filled(false)
                        .radius(9.0),
                );
            }

            plot_ui.plot_bounds()
        });

    let plot_bounds = response.inner;
    if state.set_viewport(Bounds::from_plot(plot_bounds.min(), plot_bounds.max())) {
        // Markers depend on the viewport; draw the refreshed set right away.
        ui.ctx().request_repaint();
    }

    let Some(pointer) = response.response.hover_pos() else {
        return;
    };
    let Some(hit) = nearest_marker(state, &response.transform, pointer) else {
        return;
    };
    if response.response.clicked() {
        state.select(hit);
    }
    let name = state.restaurants()[hit].name.clone();
    response.response.on_hover_text_at_pointer(name);
}

/// Markers grouped into one plot series per legend entry.
fn marker_series(state: &AppState) -> BTreeMap<String, (Color32, Vec<[f64; 2]>)> {
    let restaurants = state.restaurants();
    let mut series: BTreeMap<String, (Color32, Vec<[f64; 2]>)> = BTreeMap::new();

    for &idx in &state.marker_indices {
        let r = &restaurants[idx];
        let Some((lat, lng)) = r.coordinates() else {
            continue;
        };
        let label = match state.color_mode {
            ColorMode::Rating => RatingTier::for_rating(r.rating).label().to_string(),
            ColorMode::Category => r.category_labels().next().unwrap_or("Other").to_string(),
        };
        series
            .entry(label)
            .or_insert_with(|| (state.marker_color(r), Vec::new()))
            .1
            .push([lng, lat]);
    }
    series
}

/// The drawn marker closest to `pointer`, if any lies within `PICK_RADIUS`.
fn nearest_marker(state: &AppState, transform: &PlotTransform, pointer: Pos2) -> Option<usize> {
    let restaurants = state.restaurants();
    state
        .marker_indices
        .iter()
        .filter_map(|&idx| {
            let (lat, lng) = restaurants[idx].coordinates()?;
            let pos = transform.position_from_point(&PlotPoint::new(lng, lat));
            let dist = pos.distance(pointer);
            (dist <= PICK_RADIUS).then_some((idx, dist))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}
