/// Easing curves for camera transitions.
///
/// Every curve maps `t` in `[0, 1]` to `[0, 1]` with `f(0) == 0` and `f(1) == 1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic: accelerates through the first half, decelerates through the second.
    EaseInOutQuad,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn endpoints_are_fixed() {
        for e in [Easing::Linear, Easing::EaseInOutQuad] {
            assert_close(e.apply(0.0), 0.0, 1e-12);
            assert_close(e.apply(1.0), 1.0, 1e-12);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_around_midpoint() {
        let e = Easing::EaseInOutQuad;
        assert_close(e.apply(0.5), 0.5, 1e-12);
        assert_close(e.apply(0.25), 0.125, 1e-12);
        assert_close(e.apply(0.75), 0.875, 1e-12);
        assert_close(e.apply(0.2) + e.apply(0.8), 1.0, 1e-12);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseInOutQuad.apply(2.0), 1.0);
    }
}
