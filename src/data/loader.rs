use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::clean::clean_restaurant;
use super::error::DataError;
use super::model::{Restaurant, RestaurantDataset};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a restaurant export from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "name": ..., "lat": ..., "lng": ..., ...}, ...]` (the static export)
/// * `.csv`  – header row with the same field names
pub fn load_file(path: &Path) -> Result<RestaurantDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let restaurants = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => return Err(DataError::UnsupportedExtension(other.to_string()).into()),
    };

    let restaurants = finish_records(restaurants)?;
    let dataset = RestaurantDataset::from_restaurants(restaurants);
    log::info!(
        "Loaded {} restaurants ({} placed on the map) from {}",
        dataset.stats.total_restaurants,
        dataset.stats.restaurants_with_coords,
        path.display()
    );
    Ok(dataset)
}

/// Load the category selector labels, a JSON array of strings.
pub fn load_categories(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    parse_categories(&text)
}

/// Parse the category list. Non-string and blank entries are skipped.
pub fn parse_categories(text: &str) -> Result<Vec<String>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing categories JSON")?;
    let items = root
        .as_array()
        .ok_or(DataError::NotAnArray("categories file"))?;

    Ok(items
        .iter()
        .filter_map(JsonValue::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Parse a records-oriented JSON export:
///
/// ```json
/// [
///   {
///     "name": "Sushi Taro",
///     "lat": 35.626, "lng": 139.723,
///     "rating": 4.2,
///     "categories": "寿司",
///     "station": "五反田駅",
///     "price_range": "￥6,000～￥7,999"
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Vec<Restaurant>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .ok_or(DataError::NotAnArray("restaurant file"))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            Restaurant::deserialize(rec)
                .with_context(|| format!("Row {i}: invalid restaurant record"))
        })
        .collect()
}

fn load_json(path: &Path) -> Result<Vec<Restaurant>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the JSON field names (`name`, `lat`/`latitude`,
/// `lng`/`longitude`, `rating`, ...). Empty cells are absent values, unknown
/// columns are ignored.
pub fn parse_csv<R: std::io::Read>(input: R) -> Result<Vec<Restaurant>> {
    let mut reader = csv::Reader::from_reader(input);

    reader
        .deserialize::<Restaurant>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

fn load_csv(path: &Path) -> Result<Vec<Restaurant>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

// ---------------------------------------------------------------------------
// Shared post-processing
// ---------------------------------------------------------------------------

/// Clean every record and reject nameless ones.
pub fn finish_records(records: Vec<Restaurant>) -> Result<Vec<Restaurant>> {
    let mut cleaned_fields = 0;
    let mut out = Vec::with_capacity(records.len());

    for (row, record) in records.into_iter().enumerate() {
        let (record, touched) = clean_restaurant(record);
        if record.name.is_empty() {
            return Err(DataError::MissingName { row }.into());
        }
        cleaned_fields += touched;
        out.push(record);
    }

    if cleaned_fields > 0 {
        log::warn!("Rewrote or dropped {cleaned_fields} malformed fields while loading");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_accepts_both_coordinate_spellings() {
        let text = r#"[
            {"name": "A", "lat": 35.5, "lng": 139.5},
            {"name": "B", "latitude": 35.6, "longitude": 139.6, "unknown": 1},
            {"name": "C", "lat": null, "rating": 3.9}
        ]"#;
        let rs = parse_json(text).unwrap();
        assert_eq!(rs[0].coordinates(), Some((35.5, 139.5)));
        assert_eq!(rs[1].coordinates(), Some((35.6, 139.6)));
        assert_eq!(rs[2].coordinates(), None);
        assert_eq!(rs[2].rating, Some(3.9));
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_json(r#"{"name": "A"}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::NotAnArray(_))
        ));
    }

    #[test]
    fn json_bad_row_reports_index() {
        let err = parse_json(r#"[{"name": "A"}, {"name": "B", "rating": "high"}]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"));
    }

    #[test]
    fn csv_empty_cells_are_absent() {
        let text = "name,lat,lng,rating,station\n\
                    Sushi Taro,35.62,139.72,4.2,Gotanda\n\
                    Ramen Ichi,,,,Shibuya\n";
        let rs = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs[0].coordinates(), Some((35.62, 139.72)));
        assert_eq!(rs[1].coordinates(), None);
        assert_eq!(rs[1].rating, None);
        assert_eq!(rs[1].station.as_deref(), Some("Shibuya"));
    }

    #[test]
    fn nameless_record_is_rejected() {
        let rs = parse_json(r#"[{"name": "A"}, {"rating": 3.1}]"#).unwrap();
        let err = finish_records(rs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingName { row: 1 })
        ));

        let rs = parse_json(r#"[{"name": null, "rating": 3.1}, {"name": "B"}]"#).unwrap();
        assert_eq!(rs[0].name, "");
        let err = finish_records(rs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingName { row: 0 })
        ));
    }

    #[test]
    fn categories_skip_blank_and_non_strings() {
        let cats = parse_categories(r#"["寿司", " ", 3, "ラーメン "]"#).unwrap();
        assert_eq!(cats, vec!["寿司", "ラーメン"]);
    }
}
