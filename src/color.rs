use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Restaurant;

// ---------------------------------------------------------------------------
// Rating tiers
// ---------------------------------------------------------------------------

/// Marker colour bands by Tabelog score, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RatingTier {
    Excellent,
    Great,
    Good,
    Other,
}

impl RatingTier {
    pub const ALL: [RatingTier; 4] = [
        RatingTier::Excellent,
        RatingTier::Great,
        RatingTier::Good,
        RatingTier::Other,
    ];

    /// Unrated restaurants fall into `Other`.
    pub fn for_rating(rating: Option<f64>) -> Self {
        match rating {
            Some(r) if r >= 3.8 => RatingTier::Excellent,
            Some(r) if r >= 3.5 => RatingTier::Great,
            Some(r) if r >= 3.0 => RatingTier::Good,
            _ => RatingTier::Other,
        }
    }

    /// Lower score bound, used as `min_rating` by the legend quick filter.
    pub fn threshold(self) -> Option<f64> {
        match self {
            RatingTier::Excellent => Some(3.8),
            RatingTier::Great => Some(3.5),
            RatingTier::Good => Some(3.0),
            RatingTier::Other => None,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            RatingTier::Excellent => Color32::from_rgb(0xe7, 0x4c, 0x3c),
            RatingTier::Great => Color32::from_rgb(0xf3, 0x9c, 0x12),
            RatingTier::Good => Color32::from_rgb(0x34, 0x98, 0xdb),
            RatingTier::Other => Color32::from_rgb(0x80, 0x80, 0x80),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingTier::Excellent => "3.8+",
            RatingTier::Great => "3.5-3.8",
            RatingTier::Good => "3.0-3.5",
            RatingTier::Other => "< 3.0 / unrated",
        }
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue of the first category colour; starts away from the red rating tier.
const FIRST_HUE: f32 = 200.0;

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Saturation and lightness stay fixed so markers keep equal weight on the map.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (FIRST_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category colour mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels to distinct colours. A restaurant takes the colour
/// of the first category it lists.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, category: Option<&str>) -> Color32 {
        category
            .and_then(|c| self.mapping.get(c))
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn color_for_restaurant(&self, r: &Restaurant) -> Color32 {
        self.color_for(r.category_labels().next())
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(label, c)| (label.clone(), *c))
            .collect()
    }
}

/// How markers are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Rating,
    Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_score_bands() {
        assert_eq!(RatingTier::for_rating(Some(4.1)), RatingTier::Excellent);
        assert_eq!(RatingTier::for_rating(Some(3.8)), RatingTier::Excellent);
        assert_eq!(RatingTier::for_rating(Some(3.79)), RatingTier::Great);
        assert_eq!(RatingTier::for_rating(Some(3.0)), RatingTier::Good);
        assert_eq!(RatingTier::for_rating(Some(2.9)), RatingTier::Other);
        assert_eq!(RatingTier::for_rating(None), RatingTier::Other);
    }

    #[test]
    fn tier_threshold_admits_its_own_band() {
        for tier in RatingTier::ALL {
            if let Some(t) = tier.threshold() {
                assert_eq!(RatingTier::for_rating(Some(t)), tier);
            }
        }
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn category_colour_uses_first_label() {
        let cats = vec!["そば".to_string(), "寿司".to_string()];
        let cm = ColorMap::new(&cats);
        let r = Restaurant {
            name: "x".into(),
            categories: Some("寿司, そば".into()),
            ..Default::default()
        };
        assert_eq!(cm.color_for_restaurant(&r), cm.color_for(Some("寿司")));
        assert_eq!(cm.color_for(Some("カレー")), Color32::GRAY);
        assert_eq!(cm.legend_entries().len(), 2);
    }
}
