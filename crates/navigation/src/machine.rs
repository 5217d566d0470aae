use foundation::easing::Easing;
use foundation::lnglat::LngLat;
use foundation::time::Time;
use runtime::timers::TimerQueue;

use crate::animation::{Animation, AnimationKind};
use crate::config::{NavigationConfig, SPIN_INTERVAL_S};

/// Camera state observed by the renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NavigationState {
    pub camera_center: LngLat,
    pub zoom: f64,
    pub is_user_interacting: bool,
    pub is_animating: bool,
    pub spin_enabled: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NavPhase {
    IdleSpinning,
    Paused,
    Animating,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NavEvent {
    /// Time moved forward; progress animations and fire due timers.
    Tick,
    InteractionStart,
    InteractionEnd,
    FlyTo { target: LngLat },
    ResetView,
    ToggleSpin,
}

/// What a single step did, for logging and tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum NavChange {
    FlightStarted {
        kind: AnimationKind,
        target: LngLat,
    },
    /// A newer flight replaced one still in the air.
    FlightSuperseded { kind: AnimationKind },
    FlightCompleted { kind: AnimationKind },
    /// The user grabbed the globe mid-flight.
    FlightCancelled { kind: AnimationKind },
    SpinStepped { degrees: f64 },
    SpinHalted,
    InteractionResumed,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum NavTimer {
    SpinTick,
    ResumeAfterInteraction,
}

/// The globe camera state machine.
///
/// Phases are derived, never stored:
/// - `Animating` while a fly-to or reset is in flight.
/// - `IdleSpinning` when spin is enabled and the user is not interacting.
/// - `Paused` otherwise.
///
/// The rotation timer keeps firing in every phase; each firing re-checks the
/// phase and only moves the camera when idle.
#[derive(Debug, Clone)]
pub struct NavigationMachine {
    config: NavigationConfig,
    state: NavigationState,
    flight: Option<Animation>,
    spin: Option<Animation>,
    timers: TimerQueue<NavTimer>,
    now: Time,
}

impl NavigationMachine {
    /// A machine mounted at `mounted_at`, showing the overview with rotation on.
    pub fn new(config: NavigationConfig, mounted_at: Time) -> Self {
        let mut timers = TimerQueue::new();
        timers.schedule(mounted_at.after(config.spin_interval_s), NavTimer::SpinTick);
        Self {
            state: NavigationState {
                camera_center: config.overview_center,
                zoom: config.overview_zoom,
                is_user_interacting: false,
                is_animating: false,
                spin_enabled: true,
            },
            config,
            flight: None,
            spin: None,
            timers,
            now: mounted_at,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn phase(&self) -> NavPhase {
        if self.flight.is_some() {
            NavPhase::Animating
        } else if self.state.spin_enabled && !self.state.is_user_interacting {
            NavPhase::IdleSpinning
        } else {
            NavPhase::Paused
        }
    }

    /// The fly-to or reset currently in flight.
    pub fn flight(&self) -> Option<&Animation> {
        self.flight.as_ref()
    }

    /// Where the camera is headed, if a flight is in progress.
    pub fn target(&self) -> Option<LngLat> {
        self.flight.map(|f| f.to_center)
    }

    /// Pure transition: `(machine, at, event) -> machine'`.
    pub fn transition(mut self, at: Time, event: NavEvent) -> Self {
        self.step(at, event);
        self
    }

    /// Applies `event` at `at`, returning what changed.
    ///
    /// Time never runs backwards: an `at` earlier than the last step is clamped.
    pub fn step(&mut self, at: Time, event: NavEvent) -> Vec<NavChange> {
        let mut changes = Vec::new();
        if at > self.now {
            self.now = at;
        }
        let now = self.now;

        self.advance_animations(now, &mut changes);
        self.fire_timers(now, &mut changes);

        match event {
            NavEvent::Tick => {}
            NavEvent::InteractionStart => self.begin_interaction(&mut changes),
            NavEvent::InteractionEnd => self.end_interaction(now),
            NavEvent::FlyTo { target } => {
                let cfg = self.config;
                self.start_flight(
                    AnimationKind::FlyTo,
                    target,
                    cfg.fly_to_zoom,
                    cfg.fly_to_duration_s,
                    cfg.fly_to_easing,
                    &mut changes,
                );
            }
            NavEvent::ResetView => {
                let cfg = self.config;
                self.start_flight(
                    AnimationKind::Reset,
                    cfg.overview_center,
                    cfg.overview_zoom,
                    cfg.reset_duration_s,
                    cfg.reset_easing,
                    &mut changes,
                );
            }
            NavEvent::ToggleSpin => {
                self.state.spin_enabled = !self.state.spin_enabled;
                if !self.state.spin_enabled && self.spin.take().is_some() {
                    changes.push(NavChange::SpinHalted);
                }
            }
        }

        changes
    }

    fn advance_animations(&mut self, now: Time, changes: &mut Vec<NavChange>) {
        if let Some(flight) = self.flight {
            let (center, zoom) = flight.sample(now);
            self.state.camera_center = center;
            self.state.zoom = zoom;
            if flight.is_complete(now) {
                self.flight = None;
                self.state.is_animating = false;
                changes.push(NavChange::FlightCompleted { kind: flight.kind });
            }
            return;
        }

        if let Some(spin) = self.spin {
            let (center, zoom) = spin.sample(now);
            self.state.camera_center = center;
            self.state.zoom = zoom;
            if spin.is_complete(now) {
                self.spin = None;
            }
        }
    }

    fn fire_timers(&mut self, now: Time, changes: &mut Vec<NavChange>) {
        for (due, timer) in self.timers.pop_due(now) {
            match timer {
                NavTimer::SpinTick => {
                    // Catch up without stacking steps after a long gap.
                    let mut next = due.after(self.config.spin_interval_s);
                    while next <= now && self.config.spin_interval_s > 0.0 {
                        next = next.after(self.config.spin_interval_s);
                    }
                    if next <= now {
                        next = now.after(SPIN_INTERVAL_S);
                    }
                    self.timers.schedule(next, NavTimer::SpinTick);
                    self.spin_step(now, changes);
                }
                NavTimer::ResumeAfterInteraction => {
                    if self.state.is_user_interacting {
                        self.state.is_user_interacting = false;
                        changes.push(NavChange::InteractionResumed);
                    }
                }
            }
        }
    }

    /// Starts one eased rotation step at `start`, the moment the tick is observed.
    fn spin_step(&mut self, start: Time, changes: &mut Vec<NavChange>) {
        if self.phase() != NavPhase::IdleSpinning {
            return;
        }
        let degrees = self.config.spin_step_degrees(self.state.zoom);
        if degrees <= 0.0 {
            return;
        }
        let from = self.state.camera_center;
        let to = LngLat::new(from.lng - degrees, from.lat).wrapped();
        self.spin = Some(Animation::new(
            AnimationKind::Spin,
            (from, self.state.zoom),
            (to, self.state.zoom),
            start,
            self.config.spin_interval_s,
            Easing::Linear,
        ));
        changes.push(NavChange::SpinStepped { degrees });
    }

    fn begin_interaction(&mut self, changes: &mut Vec<NavChange>) {
        self.timers
            .cancel_where(|t| *t == NavTimer::ResumeAfterInteraction);
        self.state.is_user_interacting = true;
        if self.spin.take().is_some() {
            changes.push(NavChange::SpinHalted);
        }
        if let Some(flight) = self.flight.take() {
            // The camera stays wherever the flight had reached.
            self.state.is_animating = false;
            changes.push(NavChange::FlightCancelled { kind: flight.kind });
        }
    }

    fn end_interaction(&mut self, now: Time) {
        if !self.state.is_user_interacting {
            return;
        }
        self.timers
            .cancel_where(|t| *t == NavTimer::ResumeAfterInteraction);
        self.timers.schedule(
            now.after(self.config.interaction_debounce_s),
            NavTimer::ResumeAfterInteraction,
        );
    }

    fn start_flight(
        &mut self,
        kind: AnimationKind,
        target: LngLat,
        zoom: f64,
        duration_s: f64,
        easing: Easing,
        changes: &mut Vec<NavChange>,
    ) {
        if let Some(previous) = self.flight.take() {
            changes.push(NavChange::FlightSuperseded {
                kind: previous.kind,
            });
        }
        self.spin = None;
        self.flight = Some(Animation::new(
            kind,
            (self.state.camera_center, self.state.zoom),
            (target, zoom),
            self.now,
            duration_s,
            easing,
        ));
        self.state.is_animating = true;
        changes.push(NavChange::FlightStarted { kind, target });
    }
}
