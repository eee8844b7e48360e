use std::path::Path;

use eframe::egui::Color32;

use crate::color::{ColorMap, ColorMode, RatingTier};
use crate::data::filter::{filtered_indices, FilterCriteria, Matcher, MAX_RESULTS};
use crate::data::loader;
use crate::data::model::{Restaurant, RestaurantDataset};
use crate::data::viewport::Bounds;

/// Markers drawn at once; matches in view beyond this are not placed.
pub const MAX_MARKERS: usize = 200;

// ---------------------------------------------------------------------------
// Filter form – raw text as typed by the user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    pub query: String,
    /// Empty means "All categories".
    pub category: String,
    pub region: String,
    pub min_rating: String,
    /// Empty means "Any price".
    pub price_range: String,
}

impl FilterForm {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria::from_form(
            &self.query,
            &self.category,
            &self.region,
            &self.min_rating,
            &self.price_range,
        )
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<RestaurantDataset>,

    /// Category labels from `categories.json`, kept across dataset reloads.
    pub category_list: Option<Vec<String>>,

    /// Filter inputs as typed.
    pub form: FilterForm,

    /// Criteria currently applied.
    pub criteria: FilterCriteria,

    /// Visible map rectangle, once the map has been drawn.
    pub viewport: Option<Bounds>,

    /// Indices of the result list (first `MAX_RESULTS` matches).
    pub result_indices: Vec<usize>,

    /// Indices of restaurants drawn as markers (matches inside the viewport).
    pub marker_indices: Vec<usize>,

    /// Restaurant shown in the info window.
    pub selected: Option<usize>,

    pub color_mode: ColorMode,

    /// Category colours, rebuilt whenever the category labels change.
    pub category_colors: ColorMap,

    /// Ask the map to fit all placed restaurants on the next frame.
    pub fit_requested: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            category_list: None,
            form: FilterForm::default(),
            criteria: FilterCriteria::default(),
            viewport: None,
            result_indices: Vec::new(),
            marker_indices: Vec::new(),
            selected: None,
            color_mode: ColorMode::default(),
            category_colors: ColorMap::new(&[]),
            fit_requested: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the view onto it.
    pub fn set_dataset(&mut self, dataset: RestaurantDataset) {
        let dataset = match &self.category_list {
            Some(list) => dataset.with_categories(list.clone()),
            None => dataset,
        };
        self.category_colors = ColorMap::new(&dataset.categories);
        self.dataset = Some(dataset);
        self.selected = None;
        self.viewport = None;
        self.fit_requested = true;
        self.status_message = None;
        self.refilter();
    }

    /// Use an exported category list for the selector.
    pub fn set_categories(&mut self, categories: Vec<String>) {
        if let Some(ds) = self.dataset.take() {
            let ds = ds.with_categories(categories.clone());
            self.category_colors = ColorMap::new(&ds.categories);
            self.dataset = Some(ds);
        }
        self.category_list = Some(categories);
    }

    /// Load a restaurant export; failures end up in `status_message`.
    pub fn load_restaurants(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load a category list; failures end up in `status_message`.
    pub fn load_categories(&mut self, path: &Path) {
        match loader::load_categories(path) {
            Ok(categories) => {
                log::info!("Loaded {} categories from {}", categories.len(), path.display());
                self.set_categories(categories);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        self.dataset
            .as_ref()
            .map(|ds| &ds.restaurants[..])
            .unwrap_or(&[])
    }

    /// Re-read the form and recompute results if the criteria changed.
    pub fn apply_form(&mut self) {
        let criteria = self.form.to_criteria();
        if criteria != self.criteria {
            self.criteria = criteria;
            self.refilter();
        }
    }

    /// Record a new viewport; markers are refreshed only when it moved.
    /// Returns whether it moved.
    pub fn set_viewport(&mut self, bounds: Bounds) -> bool {
        if self.viewport == Some(bounds) {
            return false;
        }
        self.viewport = Some(bounds);
        self.refresh_markers();
        true
    }

    /// Recompute both the result list and the markers.
    pub fn refilter(&mut self) {
        self.result_indices = filtered_indices(self.restaurants(), &self.criteria, MAX_RESULTS);
        self.refresh_markers();
        log::debug!(
            "{} results, {} markers for {:?}",
            self.result_indices.len(),
            self.marker_indices.len(),
            self.criteria
        );
    }

    fn refresh_markers(&mut self) {
        let matcher = Matcher::new(&self.criteria);
        let viewport = self.viewport;
        self.marker_indices = self
            .restaurants()
            .iter()
            .enumerate()
            .filter(|(_, r)| match &viewport {
                Some(b) => b.contains_restaurant(r),
                None => r.coordinates().is_some(),
            })
            .filter(|(_, r)| matcher.matches(r))
            .map(|(i, _)| i)
            .take(MAX_MARKERS)
            .collect();
    }

    /// Reset every filter input.
    pub fn clear_filters(&mut self) {
        self.form = FilterForm::default();
        self.apply_form();
    }

    /// Legend click: show only the clicked tier and above.
    pub fn quick_filter(&mut self, tier: RatingTier) {
        self.form.min_rating = tier
            .threshold()
            .map(|t| t.to_string())
            .unwrap_or_default();
        self.apply_form();
    }

    pub fn select(&mut self, index: usize) {
        if index < self.restaurants().len() {
            self.selected = Some(index);
        }
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected.and_then(|i| self.restaurants().get(i))
    }

    pub fn marker_color(&self, r: &Restaurant) -> Color32 {
        match self.color_mode {
            ColorMode::Rating => RatingTier::for_rating(r.rating).color(),
            ColorMode::Category => self.category_colors.color_for_restaurant(r),
        }
    }
}
