use foundation::easing::Easing;
use foundation::lnglat::LngLat;

/// One full revolution every four minutes.
pub const SECONDS_PER_REVOLUTION: f64 = 240.0;
/// Rotation slows linearly between these two zoom levels and stops at the second.
pub const SLOW_SPIN_ZOOM: f64 = 3.0;
pub const MAX_SPIN_ZOOM: f64 = 5.0;
/// Rotation timer period; each step is eased over the same window.
pub const SPIN_INTERVAL_S: f64 = 1.0;

pub const FLY_TO_ZOOM: f64 = 12.0;
pub const FLY_TO_DURATION_S: f64 = 2.5;

pub const OVERVIEW_CENTER: LngLat = LngLat { lng: 30.0, lat: 15.0 };
pub const OVERVIEW_ZOOM: f64 = 1.0;
pub const RESET_DURATION_S: f64 = 3.0;

/// Delay between the end of a drag/touch and rotation resuming.
pub const INTERACTION_DEBOUNCE_S: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NavigationConfig {
    pub seconds_per_revolution: f64,
    pub slow_spin_zoom: f64,
    pub max_spin_zoom: f64,
    pub spin_interval_s: f64,
    pub fly_to_zoom: f64,
    pub fly_to_duration_s: f64,
    pub fly_to_easing: Easing,
    pub overview_center: LngLat,
    pub overview_zoom: f64,
    pub reset_duration_s: f64,
    pub reset_easing: Easing,
    pub interaction_debounce_s: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            seconds_per_revolution: SECONDS_PER_REVOLUTION,
            slow_spin_zoom: SLOW_SPIN_ZOOM,
            max_spin_zoom: MAX_SPIN_ZOOM,
            spin_interval_s: SPIN_INTERVAL_S,
            fly_to_zoom: FLY_TO_ZOOM,
            fly_to_duration_s: FLY_TO_DURATION_S,
            fly_to_easing: Easing::EaseInOutQuad,
            overview_center: OVERVIEW_CENTER,
            overview_zoom: OVERVIEW_ZOOM,
            reset_duration_s: RESET_DURATION_S,
            reset_easing: Easing::Linear,
            interaction_debounce_s: INTERACTION_DEBOUNCE_S,
        }
    }
}

impl NavigationConfig {
    /// Degrees of longitude per second at `zoom`.
    ///
    /// Full speed up to `slow_spin_zoom`, then linear falloff to zero at `max_spin_zoom`.
    pub fn spin_speed(&self, zoom: f64) -> f64 {
        if zoom >= self.max_spin_zoom || self.seconds_per_revolution <= 0.0 {
            return 0.0;
        }
        let speed = 360.0 / self.seconds_per_revolution;
        if zoom > self.slow_spin_zoom {
            let span = self.max_spin_zoom - self.slow_spin_zoom;
            if span <= 0.0 {
                return 0.0;
            }
            return speed * (self.max_spin_zoom - zoom) / span;
        }
        speed
    }

    /// Longitude covered by one rotation step at `zoom`.
    pub fn spin_step_degrees(&self, zoom: f64) -> f64 {
        self.spin_speed(zoom) * self.spin_interval_s
    }
}

#[cfg(test)]
mod tests {
    use super::NavigationConfig;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn full_speed_below_slow_zoom() {
        let cfg = NavigationConfig::default();
        assert_close(cfg.spin_speed(1.0), 1.5, 1e-12);
        assert_close(cfg.spin_speed(3.0), 1.5, 1e-12);
    }

    #[test]
    fn speed_falls_off_linearly_to_zero() {
        let cfg = NavigationConfig::default();
        assert_close(cfg.spin_speed(4.0), 0.75, 1e-12);
        assert_close(cfg.spin_speed(4.5), 0.375, 1e-12);
        assert_eq!(cfg.spin_speed(5.0), 0.0);
        assert_eq!(cfg.spin_speed(12.0), 0.0);
    }

    #[test]
    fn step_covers_one_interval() {
        let cfg = NavigationConfig {
            spin_interval_s: 2.0,
            ..NavigationConfig::default()
        };
        assert_close(cfg.spin_step_degrees(1.0), 3.0, 1e-12);
    }

    #[test]
    fn reset_takes_longer_than_a_fly_to() {
        let cfg = NavigationConfig::default();
        assert!(cfg.reset_duration_s > cfg.fly_to_duration_s);
    }
}
