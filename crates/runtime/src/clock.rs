use foundation::time::Time;

/// Deterministic tick metadata.
///
/// Everything time-dependent in the engine is driven by frames rather than the
/// wall clock, so a session can be replayed by feeding the same frames again.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt_s: f64,
    /// Engine time at this frame.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64, time: Time) -> Self {
        Self { index, dt_s, time }
    }
}

/// Fixed-step frame source.
///
/// The host's render loop (or a test) calls [`FrameClock::advance`] once per
/// frame; the clock never reads real time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Time,
    step_s: f64,
    next_index: u64,
}

impl FrameClock {
    pub fn new(origin: Time, step_s: f64) -> Self {
        Self {
            origin,
            step_s: step_s.max(0.0),
            next_index: 0,
        }
    }

    /// Sixty frames per second starting at `Time::ZERO`.
    pub fn sixty_hz() -> Self {
        Self::new(Time::ZERO, 1.0 / 60.0)
    }

    /// Time the next frame will carry.
    pub fn now(&self) -> Time {
        self.origin.after(self.next_index as f64 * self.step_s)
    }

    pub fn advance(&mut self) -> Frame {
        let index = self.next_index;
        let frame = Frame::new(
            index,
            if index == 0 { 0.0 } else { self.step_s },
            self.origin.after(index as f64 * self.step_s),
        );
        self.next_index += 1;
        frame
    }

    /// Advances until at least `seconds` have elapsed, returning every frame produced.
    pub fn run_for(&mut self, seconds: f64) -> Vec<Frame> {
        let until = self.now().after(seconds);
        let mut frames = Vec::new();
        while self.now() <= until {
            frames.push(self.advance());
            if self.step_s == 0.0 {
                break;
            }
        }
        frames
    }
}
