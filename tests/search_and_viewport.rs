use std::io::Write;

use hyakumeiten_map::data::error::DataError;
use hyakumeiten_map::data::filter::{filter, filter_all, FilterCriteria, MAX_RESULTS};
use hyakumeiten_map::data::loader::load_file;
use hyakumeiten_map::data::model::Restaurant;
use hyakumeiten_map::data::viewport::{select_in_bounds, Bounds};

fn restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            name: "Sushi Taro".into(),
            station: Some("Gotanda".into()),
            rating: Some(4.2),
            price_range: Some("￥6,000～￥7,999".into()),
            ..Default::default()
        },
        Restaurant {
            name: "Ramen Ichi".into(),
            station: Some("Shibuya".into()),
            rating: Some(3.5),
            ..Default::default()
        },
    ]
}

/// A few hundred varied records, some missing ratings or positions.
fn generated(n: usize) -> Vec<Restaurant> {
    (0..n)
        .map(|i| Restaurant {
            name: format!("{} {i}", if i % 3 == 0 { "Sushi" } else { "Soba" }),
            station: Some(["Gotanda", "Shibuya", "Ebisu"][i % 3].into()),
            rating: (i % 5 != 0).then(|| 3.0 + (i % 17) as f64 / 10.0),
            latitude: (i % 4 != 0).then(|| 35.0 + (i % 10) as f64 / 10.0),
            longitude: (i % 4 != 0).then(|| 139.0 + (i % 7) as f64 / 10.0),
            ..Default::default()
        })
        .collect()
}

fn names(rs: &[&Restaurant]) -> Vec<String> {
    rs.iter().map(|r| r.name.clone()).collect()
}

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

#[test]
fn min_rating_example() {
    let rs = restaurants();
    let c = FilterCriteria {
        min_rating: Some(4.0),
        ..Default::default()
    };
    assert_eq!(names(&filter(&rs, &c)), vec!["Sushi Taro"]);
}

#[test]
fn region_example() {
    let rs = restaurants();
    let c = FilterCriteria {
        region: Some("gotanda".into()),
        ..Default::default()
    };
    assert_eq!(names(&filter(&rs, &c)), vec!["Sushi Taro"]);
}

#[test]
fn empty_criteria_is_prefix_of_input() {
    for n in [0, 1, 99, 100, 101, 350] {
        let rs = generated(n);
        let out = filter(&rs, &FilterCriteria::default());
        assert_eq!(out.len(), n.min(MAX_RESULTS));
        for (got, want) in out.iter().zip(&rs) {
            assert_eq!(*got, want);
        }
    }
}

#[test]
fn results_never_exceed_cap() {
    let rs = generated(1100);
    let criteria = [
        FilterCriteria::default(),
        FilterCriteria {
            query: Some("soba".into()),
            ..Default::default()
        },
        FilterCriteria {
            min_rating: Some(3.2),
            ..Default::default()
        },
    ];
    for c in &criteria {
        assert!(filter(&rs, c).len() <= MAX_RESULTS, "{c:?}");
    }
}

#[test]
fn min_rating_is_respected_and_monotonic() {
    let rs = generated(400);
    let mut previous = usize::MAX;
    for step in 0..=20 {
        let m = 3.0 + step as f64 * 0.1;
        let c = FilterCriteria {
            min_rating: Some(m),
            ..Default::default()
        };
        let all = filter_all(&rs, &c);
        assert!(all.iter().all(|r| r.rating.is_some_and(|v| v >= m)));
        let excluded_ok = rs
            .iter()
            .filter(|r| !all.iter().any(|a| std::ptr::eq(*a, *r)))
            .all(|r| r.rating.map_or(true, |v| v < m));
        assert!(excluded_ok, "min_rating {m}");
        assert!(all.len() <= previous);
        previous = all.len();
    }
}

#[test]
fn query_case_does_not_matter() {
    let rs = generated(300);
    let upper = FilterCriteria {
        query: Some("SUSHI".into()),
        ..Default::default()
    };
    let lower = FilterCriteria {
        query: Some("sushi".into()),
        ..Default::default()
    };
    let a = filter(&rs, &upper);
    assert!(!a.is_empty());
    assert_eq!(a, filter(&rs, &lower));
}

#[test]
fn region_skips_address_matches() {
    let r = Restaurant {
        name: "Soba Ichi".into(),
        address: Some("Higashi-Gotanda 2-1".into()),
        station: Some("Osaki".into()),
        ..Default::default()
    };
    let c = FilterCriteria {
        region: Some("Gotanda".into()),
        ..Default::default()
    };
    assert!(filter(&[r], &c).is_empty());
}

// ---------------------------------------------------------------------------
// Viewport selector
// ---------------------------------------------------------------------------

#[test]
fn bounds_example() {
    let rs = vec![
        Restaurant {
            name: "Placed".into(),
            latitude: Some(35.5),
            longitude: Some(139.5),
            ..Default::default()
        },
        Restaurant {
            name: "Unplaced".into(),
            ..Default::default()
        },
    ];
    let b = Bounds {
        south: 35.0,
        north: 36.0,
        west: 139.0,
        east: 140.0,
    };
    assert_eq!(names(&select_in_bounds(&rs, &b)), vec!["Placed"]);
}

#[test]
fn unplaced_restaurants_are_never_selected() {
    let rs = generated(200);
    let everything = Bounds::new(-90.0, -180.0, 90.0, 180.0);
    let inside = select_in_bounds(&rs, &everything);
    assert!(inside.iter().all(|r| r.coordinates().is_some()));
    assert_eq!(
        inside.len(),
        rs.iter().filter(|r| r.coordinates().is_some()).count()
    );
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

#[test]
fn json_file_loads_cleans_and_summarises() {
    let file = write_temp(
        ".json",
        r#"[
            {"name": "Sushi Taro", "station": "Gotanda", "rating": 4.2, "categories": "寿司",
             "price_range": "{\"priceRange\": \"￥6,000～￥7,999\"}",
             "lat": 35.626, "lng": 139.723},
            {"name": "Ramen Ichi", "station": "Shibuya", "rating": 3.5, "categories": "ラーメン"}
        ]"#,
    );
    let ds = load_file(file.path()).expect("load json");
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.restaurants[0].price_range.as_deref(), Some("￥6,000～￥7,999"));
    assert_eq!(ds.stats.restaurants_with_coords, 1);
    assert_eq!(ds.stats.total_categories, 2);
    assert_eq!(ds.stats.avg_rating, Some(3.85));

    let c = FilterCriteria {
        price_range: Some("￥6,000".into()),
        ..Default::default()
    };
    assert_eq!(names(&filter(&ds.restaurants, &c)), vec!["Sushi Taro"]);
}

#[test]
fn csv_file_loads() {
    let file = write_temp(
        ".csv",
        "name,station,rating,latitude,longitude\n\
         Sushi Taro,Gotanda,4.2,35.626,139.723\n\
         Ramen Ichi,Shibuya,,,\n",
    );
    let ds = load_file(file.path()).expect("load csv");
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.restaurants[0].coordinates(), Some((35.626, 139.723)));
    assert_eq!(ds.restaurants[1].rating, None);
    assert_eq!(ds.restaurants[1].coordinates(), None);
}

#[test]
fn unknown_extension_is_rejected() {
    let file = write_temp(".xml", "<restaurants/>");
    let err = load_file(file.path()).expect_err("xml is not supported");
    assert!(matches!(
        err.downcast_ref::<DataError>(),
        Some(DataError::UnsupportedExtension(ext)) if ext == "xml"
    ));
}
