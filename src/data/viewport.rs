use std::fmt;
use std::str::FromStr;

use super::error::DataError;
use super::model::Restaurant;

// ---------------------------------------------------------------------------
// Bounds – the visible map rectangle
// ---------------------------------------------------------------------------

/// A latitude/longitude rectangle. Edges are inclusive.
///
/// Inverted bounds (`south > north` or `west > east`) contain nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Bounds {
            south,
            west,
            north,
            east,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.south <= lat && lat <= self.north && self.west <= lng && lng <= self.east
    }

    /// Restaurants without coordinates are never inside.
    pub fn contains_restaurant(&self, r: &Restaurant) -> bool {
        r.coordinates()
            .is_some_and(|(lat, lng)| self.contains(lat, lng))
    }

    /// Plot corners as `[x, y]` = `[lng, lat]`.
    pub fn from_plot(min: [f64; 2], max: [f64; 2]) -> Self {
        Bounds::new(min[1], min[0], max[1], max[0])
    }

    /// `(lat, lng)` of the centre.
    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    /// Smallest rectangle holding every placed restaurant.
    pub fn around(restaurants: &[Restaurant]) -> Option<Bounds> {
        restaurants
            .iter()
            .filter_map(Restaurant::coordinates)
            .fold(None, |acc: Option<Bounds>, (lat, lng)| {
                Some(match acc {
                    None => Bounds::new(lat, lng, lat, lng),
                    Some(b) => Bounds::new(
                        b.south.min(lat),
                        b.west.min(lng),
                        b.north.max(lat),
                        b.east.max(lng),
                    ),
                })
            })
    }

    /// Grow each edge by `ratio` of the rectangle's extent.
    pub fn padded(&self, ratio: f64) -> Bounds {
        let dlat = (self.north - self.south) * ratio;
        let dlng = (self.east - self.west) * ratio;
        Bounds::new(
            self.south - dlat,
            self.west - dlng,
            self.north + dlat,
            self.east + dlng,
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.5},{:.5},{:.5},{:.5}",
            self.south, self.west, self.north, self.east
        )
    }
}

/// Parses `south,west,north,east`.
impl FromStr for Bounds {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| DataError::InvalidBounds(s.to_string()))?;

        match parts.as_slice() {
            &[south, west, north, east] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Bounds::new(south, west, north, east))
            }
            _ => Err(DataError::InvalidBounds(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport selection
// ---------------------------------------------------------------------------

/// Restaurants placed inside `bounds`, in input order. No cap.
pub fn select_in_bounds<'a>(
    restaurants: &'a [Restaurant],
    bounds: &Bounds,
) -> Vec<&'a Restaurant> {
    restaurants
        .iter()
        .filter(|r| bounds.contains_restaurant(r))
        .collect()
}
