use foundation::easing::Easing;
use foundation::lnglat::{LngLat, wrap_lng};
use foundation::time::{Time, TimeSpan};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnimationKind {
    /// Camera flight to a city.
    FlyTo,
    /// Camera flight back to the overview.
    Reset,
    /// One eased auto-rotation step.
    Spin,
}

/// A camera transition between two `(center, zoom)` poses over a fixed time span.
///
/// Longitude always travels the short way around the globe, so a flight from
/// Auckland to Los Angeles crosses the antimeridian instead of the whole map.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub from_center: LngLat,
    pub from_zoom: f64,
    pub to_center: LngLat,
    pub to_zoom: f64,
    pub span: TimeSpan,
    pub easing: Easing,
    delta_lng: f64,
}

impl Animation {
    pub fn new(
        kind: AnimationKind,
        from: (LngLat, f64),
        to: (LngLat, f64),
        start: Time,
        duration_s: f64,
        easing: Easing,
    ) -> Self {
        let (from_center, from_zoom) = from;
        let (to_center, to_zoom) = to;
        Self {
            kind,
            from_center,
            from_zoom,
            to_center,
            to_zoom,
            span: TimeSpan::starting_at(start, duration_s),
            easing,
            delta_lng: shortest_lng_delta(from_center.lng, to_center.lng),
        }
    }

    pub fn is_complete(&self, t: Time) -> bool {
        self.span.is_complete(t)
    }

    /// Camera pose at `t`. At or after the end this is exactly the target pose.
    pub fn sample(&self, t: Time) -> (LngLat, f64) {
        if self.is_complete(t) {
            return (self.to_center, self.to_zoom);
        }
        let e = self.easing.apply(self.span.progress(t));
        let lng = wrap_lng(self.from_center.lng + self.delta_lng * e);
        let lat = self.from_center.lat + (self.to_center.lat - self.from_center.lat) * e;
        let zoom = self.from_zoom + (self.to_zoom - self.from_zoom) * e;
        (LngLat::new(lng, lat), zoom)
    }
}

fn shortest_lng_delta(from: f64, to: f64) -> f64 {
    wrap_lng(to - from)
}

#[cfg(test)]
mod tests {
    use super::{Animation, AnimationKind};
    use foundation::easing::Easing;
    use foundation::lnglat::LngLat;
    use foundation::time::Time;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn paris_flight() -> Animation {
        Animation::new(
            AnimationKind::FlyTo,
            (LngLat::new(30.0, 15.0), 1.0),
            (LngLat::new(2.3522, 48.8566), 12.0),
            Time(10.0),
            2.5,
            Easing::EaseInOutQuad,
        )
    }

    #[test]
    fn starts_at_origin_and_ends_exactly_on_target() {
        let a = paris_flight();
        let (c0, z0) = a.sample(Time(10.0));
        assert_close(c0.lng, 30.0, 1e-9);
        assert_close(c0.lat, 15.0, 1e-9);
        assert_close(z0, 1.0, 1e-9);

        assert_eq!(a.sample(Time(12.5)), (LngLat::new(2.3522, 48.8566), 12.0));
        assert_eq!(a.sample(Time(99.0)), (LngLat::new(2.3522, 48.8566), 12.0));
        assert!(a.is_complete(Time(12.5)));
    }

    #[test]
    fn ease_in_out_is_halfway_at_midpoint() {
        let a = paris_flight();
        let (_, zoom) = a.sample(Time(11.25));
        assert_close(zoom, 6.5, 1e-9);
        // First quarter of the time covers an eighth of the way.
        let (_, zoom) = a.sample(Time(10.625));
        assert_close(zoom, 1.0 + 11.0 * 0.125, 1e-9);
    }

    #[test]
    fn crosses_the_antimeridian_the_short_way() {
        let a = Animation::new(
            AnimationKind::FlyTo,
            (LngLat::new(174.7633, -36.8485), 12.0),
            (LngLat::new(-118.2437, 34.0522), 12.0),
            Time::ZERO,
            2.0,
            Easing::Linear,
        );
        let (mid, _) = a.sample(Time(1.0));
        // Short way is +67 degrees east through 180, not -293 west.
        assert!(mid.lng > 174.7633 || mid.lng < -118.2437, "{mid:?}");
    }

    #[test]
    fn linear_spin_step_moves_at_constant_rate() {
        let a = Animation::new(
            AnimationKind::Spin,
            (LngLat::new(30.0, 15.0), 1.0),
            (LngLat::new(28.5, 15.0), 1.0),
            Time::ZERO,
            1.0,
            Easing::Linear,
        );
        assert_close(a.sample(Time(0.25)).0.lng, 29.625, 1e-9);
        assert_close(a.sample(Time(0.5)).0.lng, 29.25, 1e-9);
    }
}
