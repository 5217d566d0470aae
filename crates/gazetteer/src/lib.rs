//! Static registry of known places.
//!
//! Names are matched case-insensitively with internal whitespace collapsed, so
//! `"new   YORK"` and `"New York"` name the same place. Iteration order is
//! insertion order and is part of the contract: it breaks ties in
//! [`Gazetteer::nearest`] and decides which name wins when a text mentions
//! several places.

mod builtin;

use std::collections::HashMap;

use foundation::lnglat::LngLat;
use serde::{Deserialize, Serialize};

use crate::builtin::BUILTIN_PLACES;

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Canonical casing, as it should be shown to the user.
    pub name: String,
    pub coords: LngLat,
}

impl Place {
    pub fn new(name: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            coords: LngLat::new(lng, lat),
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coords.lng
    }

    pub fn latitude(&self) -> f64 {
        self.coords.lat
    }
}

/// On-disk shape of a gazetteer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub lng: f64,
    pub lat: f64,
}

impl From<PlaceRecord> for Place {
    fn from(r: PlaceRecord) -> Self {
        Place::new(r.name, r.lng, r.lat)
    }
}

impl From<&Place> for PlaceRecord {
    fn from(p: &Place) -> Self {
        PlaceRecord {
            name: p.name.clone(),
            lng: p.coords.lng,
            lat: p.coords.lat,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GazetteerError {
    EmptyName { index: usize },
    DuplicateName(String),
    CoordinateOutOfRange { name: String, lng: f64, lat: f64 },
    Corrupt(String),
}

impl std::fmt::Display for GazetteerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GazetteerError::EmptyName { index } => write!(f, "place #{index} has an empty name"),
            GazetteerError::DuplicateName(name) => write!(f, "duplicate place name: {name}"),
            GazetteerError::CoordinateOutOfRange { name, lng, lat } => {
                write!(f, "coordinates out of range for {name}: ({lng}, {lat})")
            }
            GazetteerError::Corrupt(msg) => write!(f, "gazetteer data corrupt: {msg}"),
        }
    }
}

impl std::error::Error for GazetteerError {}

/// Lowercases and collapses runs of whitespace to single spaces.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<Place>,
    by_name: HashMap<String, usize>,
}

impl Gazetteer {
    /// Builds a gazetteer, validating names and coordinates.
    pub fn new(places: impl IntoIterator<Item = Place>) -> Result<Self, GazetteerError> {
        let mut out = Self::default();
        for (index, place) in places.into_iter().enumerate() {
            let key = normalize_name(&place.name);
            if key.is_empty() {
                return Err(GazetteerError::EmptyName { index });
            }
            if !place.coords.is_valid() {
                return Err(GazetteerError::CoordinateOutOfRange {
                    name: place.name,
                    lng: place.coords.lng,
                    lat: place.coords.lat,
                });
            }
            if out.by_name.contains_key(&key) {
                return Err(GazetteerError::DuplicateName(place.name));
            }
            out.by_name.insert(key, out.places.len());
            out.places.push(place);
        }
        Ok(out)
    }

    /// The cities that ship with the globe.
    pub fn builtin() -> Self {
        let mut out = Self::default();
        for &(name, lng, lat) in BUILTIN_PLACES {
            out.by_name.insert(normalize_name(name), out.places.len());
            out.places.push(Place::new(name, lng, lat));
        }
        out
    }

    /// Loads a gazetteer from a JSON array of `{ name, lng, lat }` records.
    pub fn from_json(json: &str) -> Result<Self, GazetteerError> {
        let records: Vec<PlaceRecord> =
            serde_json::from_str(json).map_err(|e| GazetteerError::Corrupt(e.to_string()))?;
        Self::new(records.into_iter().map(Place::from))
    }

    pub fn to_json(&self) -> Result<String, GazetteerError> {
        let records: Vec<PlaceRecord> = self.places.iter().map(PlaceRecord::from).collect();
        serde_json::to_string_pretty(&records).map_err(|e| GazetteerError::Corrupt(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    /// Exact canonical-name lookup (case-insensitive, whitespace-normalized).
    pub fn lookup(&self, name: &str) -> Option<&Place> {
        self.by_name
            .get(&normalize_name(name))
            .map(|&idx| &self.places[idx])
    }

    /// Closest place to `(lng, lat)` in degree space, if strictly closer than `max_distance`.
    ///
    /// Ties keep the earlier-inserted place.
    pub fn nearest(&self, lng: f64, lat: f64, max_distance: f64) -> Option<&Place> {
        let query = LngLat::new(lng, lat);
        let mut best: Option<&Place> = None;
        let mut best_distance = max_distance;
        for place in &self.places {
            let d = query.degree_distance(place.coords);
            if d < best_distance {
                best_distance = d;
                best = Some(place);
            }
        }
        best
    }
}
