use super::model::Restaurant;

/// Upper bound on the result list returned by [`filter`].
pub const MAX_RESULTS: usize = 100;

// ---------------------------------------------------------------------------
// FilterCriteria – the five optional search inputs
// ---------------------------------------------------------------------------

/// Search criteria. Every criterion is optional; present criteria are ANDed.
///
/// * `query`       – case-insensitive substring of `name`, `address` or `station`
/// * `category`    – case-insensitive substring of `categories`
/// * `region`      – case-insensitive substring of `station` only, never `address`
/// * `min_rating`  – `rating >= min_rating`
/// * `price_range` – substring of `price_range`, case-sensitive
///
/// A restaurant missing the field a present criterion inspects does not match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub min_rating: Option<f64>,
    pub price_range: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw form input. Blank fields are absent, and so
    /// is a rating that does not parse as a finite number.
    pub fn from_form(
        query: &str,
        category: &str,
        region: &str,
        min_rating: &str,
        price_range: &str,
    ) -> Self {
        FilterCriteria {
            query: Some(query.to_string()),
            category: Some(category.to_string()),
            region: Some(region.to_string()),
            min_rating: min_rating.trim().parse().ok(),
            price_range: Some(price_range.to_string()),
        }
        .normalized()
    }

    /// Trim text criteria and drop blank ones and non-finite ratings.
    pub fn normalized(self) -> Self {
        fn text(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        FilterCriteria {
            query: text(self.query),
            category: text(self.category),
            region: text(self.region),
            min_rating: self.min_rating.filter(|m| m.is_finite()),
            price_range: text(self.price_range),
        }
    }

    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.clone().normalized() == FilterCriteria::default()
    }
}

// ---------------------------------------------------------------------------
// Matcher – criteria prepared for repeated evaluation
// ---------------------------------------------------------------------------

/// Criteria normalised once, with the case-insensitive needles lowercased.
#[derive(Debug, Clone)]
pub struct Matcher {
    query: Option<String>,
    category: Option<String>,
    region: Option<String>,
    min_rating: Option<f64>,
    price_range: Option<String>,
}

impl Matcher {
    pub fn new(criteria: &FilterCriteria) -> Self {
        let c = criteria.clone().normalized();
        Matcher {
            query: c.query.map(|s| s.to_lowercase()),
            category: c.category.map(|s| s.to_lowercase()),
            region: c.region.map(|s| s.to_lowercase()),
            min_rating: c.min_rating,
            price_range: c.price_range,
        }
    }

    /// The full predicate for one restaurant.
    pub fn matches(&self, r: &Restaurant) -> bool {
        if let Some(q) = &self.query {
            let hit = contains_ci(Some(&r.name), q)
                || contains_ci(r.address.as_deref(), q)
                || contains_ci(r.station.as_deref(), q);
            if !hit {
                return false;
            }
        }
        if let Some(cat) = &self.category {
            if !contains_ci(r.categories.as_deref(), cat) {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if !contains_ci(r.station.as_deref(), region) {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            match r.rating {
                Some(rating) if rating >= min => {}
                _ => return false,
            }
        }
        if let Some(price) = &self.price_range {
            if !r.price_range.as_deref().is_some_and(|p| p.contains(price.as_str())) {
                return false;
            }
        }
        true
    }
}

/// Case-insensitive containment; `needle` must already be lowercase.
fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

// ---------------------------------------------------------------------------
// Filter operations
// ---------------------------------------------------------------------------

/// Whether a single restaurant satisfies `criteria`.
pub fn matches(r: &Restaurant, criteria: &FilterCriteria) -> bool {
    Matcher::new(criteria).matches(r)
}

/// Indices of restaurants passing `criteria`, in input order, at most `limit`.
pub fn filtered_indices(
    restaurants: &[Restaurant],
    criteria: &FilterCriteria,
    limit: usize,
) -> Vec<usize> {
    let matcher = Matcher::new(criteria);
    restaurants
        .iter()
        .enumerate()
        .filter(|(_, r)| matcher.matches(r))
        .map(|(i, _)| i)
        .take(limit)
        .collect()
}

/// Every restaurant passing `criteria`, in input order, without a cap.
pub fn filter_all<'a>(
    restaurants: &'a [Restaurant],
    criteria: &FilterCriteria,
) -> Vec<&'a Restaurant> {
    let matcher = Matcher::new(criteria);
    restaurants.iter().filter(|r| matcher.matches(r)).collect()
}

/// The first [`MAX_RESULTS`] restaurants passing `criteria`, in input order.
pub fn filter<'a>(
    restaurants: &'a [Restaurant],
    criteria: &FilterCriteria,
) -> Vec<&'a Restaurant> {
    filtered_indices(restaurants, criteria, MAX_RESULTS)
        .into_iter()
        .map(|i| &restaurants[i])
        .collect()
}
