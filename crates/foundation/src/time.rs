/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn after(self, seconds: f64) -> Time {
        Time(self.0 + seconds)
    }

    /// Seconds elapsed since `earlier`, never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn starting_at(start: Time, duration_s: f64) -> Self {
        Self {
            start,
            end: start.after(duration_s.max(0.0)),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Linear progress of `t` through the span, clamped to `[0, 1]`.
    ///
    /// Zero-length spans are complete as soon as they start.
    pub fn progress(&self, t: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        (t.since(self.start) / d).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, t: Time) -> bool {
        t >= self.end
    }
}
