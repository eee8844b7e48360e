use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Price brackets
// ---------------------------------------------------------------------------

/// Price bracket labels as printed on Tabelog, cheapest first.
/// Used to populate the price selector; `Restaurant::price_range` stays free text.
pub const PRICE_RANGES: [&str; 12] = [
    "～￥999",
    "￥1,000～￥1,999",
    "￥2,000～￥2,999",
    "￥3,000～￥3,999",
    "￥4,000～￥4,999",
    "￥5,000～￥5,999",
    "￥6,000～￥7,999",
    "￥8,000～￥9,999",
    "￥10,000～￥14,999",
    "￥15,000～￥19,999",
    "￥20,000～￥29,999",
    "￥30,000～",
];

// ---------------------------------------------------------------------------
// Restaurant – one record of the static export
// ---------------------------------------------------------------------------

/// A single restaurant as exported to `restaurants.json`.
///
/// Every field except `name` is optional. An absent field never matches a
/// filter criterion that inspects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    /// `null` reads as empty so the loader can report the row as nameless.
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Nearest transit station, free text (e.g. "五反田駅 徒歩3分").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    /// Comma separated category labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Tabelog score, 0.0–5.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(rename = "lat", alias = "latitude", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", alias = "longitude", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Restaurant {
    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Individual labels of the `categories` field, trimmed, in listed order.
    pub fn category_labels(&self) -> impl Iterator<Item = &str> {
        self.categories
            .as_deref()
            .unwrap_or("")
            .split([',', '、'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ---------------------------------------------------------------------------
// DatasetStats
// ---------------------------------------------------------------------------

/// Summary numbers shown in the top bar and by `search --stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetStats {
    pub total_restaurants: usize,
    pub restaurants_with_coords: usize,
    pub total_categories: usize,
    /// Mean over rated restaurants, rounded to 2 decimals.
    pub avg_rating: Option<f64>,
}

impl DatasetStats {
    fn compute(restaurants: &[Restaurant], total_categories: usize) -> Self {
        let ratings: Vec<f64> = restaurants.iter().filter_map(|r| r.rating).collect();
        let avg_rating = if ratings.is_empty() {
            None
        } else {
            let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
            Some((mean * 100.0).round() / 100.0)
        };

        DatasetStats {
            total_restaurants: restaurants.len(),
            restaurants_with_coords: restaurants
                .iter()
                .filter(|r| r.coordinates().is_some())
                .count(),
            total_categories,
            avg_rating,
        }
    }
}

// ---------------------------------------------------------------------------
// RestaurantDataset – the immutable snapshot
// ---------------------------------------------------------------------------

/// The loaded restaurant list plus the category labels for the selector.
///
/// The list is shared behind an `Arc` and never mutated after construction.
#[derive(Debug, Clone)]
pub struct RestaurantDataset {
    pub restaurants: Arc<[Restaurant]>,
    /// Sorted category labels.
    pub categories: Vec<String>,
    pub stats: DatasetStats,
}

impl RestaurantDataset {
    /// Build a dataset, deriving category labels from the records.
    pub fn from_restaurants(restaurants: Vec<Restaurant>) -> Self {
        let categories: Vec<String> = restaurants
            .iter()
            .flat_map(|r| r.category_labels())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let stats = DatasetStats::compute(&restaurants, categories.len());

        RestaurantDataset {
            restaurants: restaurants.into(),
            categories,
            stats,
        }
    }

    /// Replace the derived category labels with an explicitly exported list.
    pub fn with_categories(mut self, mut categories: Vec<String>) -> Self {
        categories.sort();
        categories.dedup();
        self.stats.total_categories = categories.len();
        self.categories = categories;
        self
    }

    /// Number of restaurants.
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(name: &str, rating: Option<f64>, coords: Option<(f64, f64)>) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            rating,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            ..Default::default()
        }
    }

    #[test]
    fn coordinates_need_both_axes() {
        let mut r = rated("a", None, Some((35.6, 139.7)));
        assert_eq!(r.coordinates(), Some((35.6, 139.7)));
        r.longitude = None;
        assert_eq!(r.coordinates(), None);
    }

    #[test]
    fn category_labels_split_on_both_separators() {
        let r = Restaurant {
            name: "x".into(),
            categories: Some("寿司, 海鮮、 日本料理,".into()),
            ..Default::default()
        };
        let labels: Vec<&str> = r.category_labels().collect();
        assert_eq!(labels, vec!["寿司", "海鮮", "日本料理"]);
    }

    #[test]
    fn stats_round_average_and_count_placed() {
        let ds = RestaurantDataset::from_restaurants(vec![
            rated("a", Some(3.5), Some((35.0, 139.0))),
            rated("b", Some(3.74), None),
            rated("c", None, Some((35.1, 139.1))),
        ]);
        assert_eq!(ds.stats.total_restaurants, 3);
        assert_eq!(ds.stats.restaurants_with_coords, 2);
        assert_eq!(ds.stats.avg_rating, Some(3.62));
    }

    #[test]
    fn stats_without_ratings_have_no_average() {
        let ds = RestaurantDataset::from_restaurants(vec![rated("a", None, None)]);
        assert_eq!(ds.stats.avg_rating, None);
    }

    #[test]
    fn explicit_categories_replace_derived_ones() {
        let r = Restaurant {
            name: "x".into(),
            categories: Some("ラーメン".into()),
            ..Default::default()
        };
        let ds = RestaurantDataset::from_restaurants(vec![r]);
        assert_eq!(ds.categories, vec!["ラーメン"]);

        let ds = ds.with_categories(vec!["寿司".into(), "そば".into(), "寿司".into()]);
        assert_eq!(ds.categories, vec!["そば", "寿司"]);
        assert_eq!(ds.stats.total_categories, 2);
    }
}
