/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng) && (-90.0..=90.0).contains(&self.lat)
    }

    /// Euclidean distance in degree space.
    ///
    /// Not geodesic: good enough for "close to a marker" tests, nothing more.
    pub fn degree_distance(self, other: LngLat) -> f64 {
        let dlng = self.lng - other.lng;
        let dlat = self.lat - other.lat;
        (dlng * dlng + dlat * dlat).sqrt()
    }

    /// Same position with longitude wrapped into `[-180, 180)`.
    pub fn wrapped(self) -> LngLat {
        LngLat::new(wrap_lng(self.lng), self.lat)
    }
}

pub fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}
