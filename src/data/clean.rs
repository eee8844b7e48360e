use serde_json::Value as JsonValue;

use super::model::Restaurant;

/// Plain-text addresses this long or longer are scraped page noise.
const MAX_ADDRESS_CHARS: usize = 200;
/// Same for price labels.
const MAX_PRICE_CHARS: usize = 100;

/// Normalise the free-text fields of a freshly loaded record.
///
/// Some exports carry whole schema.org `Restaurant` blobs in `address`,
/// `price_range` or `hours` instead of the plain value. Those are reduced to
/// the value they hold, or dropped. Blank strings become `None`.
/// Returns the record and the number of fields that were rewritten or dropped.
pub fn clean_restaurant(mut r: Restaurant) -> (Restaurant, usize) {
    let mut touched = 0;

    let mut apply = |field: &mut Option<String>, rule: fn(&str) -> Option<String>| {
        if let Some(raw) = field.take() {
            let cleaned = rule(&raw);
            if cleaned.as_deref() != Some(raw.as_str()) {
                touched += 1;
            }
            *field = cleaned;
        }
    };

    apply(&mut r.address, clean_address);
    apply(&mut r.price_range, clean_price_range);
    apply(&mut r.hours, clean_hours);
    apply(&mut r.station, non_blank);
    apply(&mut r.categories, non_blank);
    apply(&mut r.phone, non_blank);
    apply(&mut r.closed, non_blank);
    apply(&mut r.url, non_blank);

    r.name = r.name.trim().to_string();
    (r, touched)
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_blob(s: &str) -> Option<JsonValue> {
    serde_json::from_str(s).ok()
}

fn is_blob(s: &str) -> bool {
    s.trim_start().starts_with('{')
}

/// `{"address": {"addressRegion", "addressLocality", "streetAddress"}}` →
/// the three parts joined in that order.
pub fn clean_address(raw: &str) -> Option<String> {
    if !is_blob(raw) {
        return non_blank(raw).filter(|s| s.chars().count() < MAX_ADDRESS_CHARS);
    }
    let blob = parse_blob(raw)?;
    let addr = blob.get("address")?.as_object()?;
    let joined: String = ["addressRegion", "addressLocality", "streetAddress"]
        .iter()
        .filter_map(|key| addr.get(*key).and_then(JsonValue::as_str))
        .collect();
    non_blank(&joined)
}

/// `{"priceRange": "￥3,000～￥3,999"}` → the label.
pub fn clean_price_range(raw: &str) -> Option<String> {
    if !is_blob(raw) {
        return non_blank(raw).filter(|s| s.chars().count() < MAX_PRICE_CHARS);
    }
    let blob = parse_blob(raw)?;
    blob.get("priceRange")
        .and_then(JsonValue::as_str)
        .and_then(non_blank)
}

/// Opening hours are kept only as plain text.
pub fn clean_hours(raw: &str) -> Option<String> {
    if is_blob(raw) {
        None
    } else {
        non_blank(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_blob_is_flattened() {
        let raw = r#"{"@type":"Restaurant","address":{"addressRegion":"東京都","addressLocality":"品川区","streetAddress":"西五反田1-2-3"}}"#;
        assert_eq!(clean_address(raw).as_deref(), Some("東京都品川区西五反田1-2-3"));
    }

    #[test]
    fn address_blob_without_parts_is_dropped() {
        assert_eq!(clean_address(r#"{"address":{}}"#), None);
        assert_eq!(clean_address(r#"{"name":"x"}"#), None);
        assert_eq!(clean_address("{not json"), None);
    }

    #[test]
    fn plain_address_kept_unless_oversized() {
        assert_eq!(clean_address(" 東京都渋谷区 ").as_deref(), Some("東京都渋谷区"));
        let longest = "a".repeat(199);
        assert_eq!(clean_address(&longest).as_deref(), Some(longest.as_str()));
        assert_eq!(clean_address(&"a".repeat(200)), None);
        assert_eq!(clean_address(&"a".repeat(201)), None);
    }

    #[test]
    fn price_blob_yields_label() {
        let raw = r#"{"priceRange":"￥6,000～￥7,999","name":"Sushi"}"#;
        assert_eq!(clean_price_range(raw).as_deref(), Some("￥6,000～￥7,999"));
        assert_eq!(clean_price_range(r#"{"name":"Sushi"}"#), None);
    }

    #[test]
    fn plain_price_kept_unless_oversized() {
        assert_eq!(clean_price_range("～￥999").as_deref(), Some("～￥999"));
        assert_eq!(clean_price_range(&"￥".repeat(100)), None);
    }

    #[test]
    fn hours_blob_is_cleared() {
        assert_eq!(clean_hours(r#"{"openingHours":"Mo-Fr"}"#), None);
        assert_eq!(clean_hours("11:00 - 22:00").as_deref(), Some("11:00 - 22:00"));
    }

    #[test]
    fn clean_restaurant_counts_rewrites() {
        let r = Restaurant {
            name: " Sushi Taro ".into(),
            address: Some(r#"{"address":{"streetAddress":"西五反田1"}}"#.into()),
            station: Some("   ".into()),
            price_range: Some("￥6,000～￥7,999".into()),
            ..Default::default()
        };
        let (r, touched) = clean_restaurant(r);
        assert_eq!(r.name, "Sushi Taro");
        assert_eq!(r.address.as_deref(), Some("西五反田1"));
        assert_eq!(r.station, None);
        assert_eq!(r.price_range.as_deref(), Some("￥6,000～￥7,999"));
        assert_eq!(touched, 2);
    }
}
