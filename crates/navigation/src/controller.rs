use std::sync::Arc;

use foundation::time::Time;
use gazetteer::{Gazetteer, Place};
use runtime::clock::Frame;
use tracing::{debug, warn};

use crate::config::NavigationConfig;
use crate::machine::{NavChange, NavEvent, NavPhase, NavigationMachine, NavigationState};

/// Owns the camera state machine for one globe view.
///
/// Commands (`fly_to`, `reset_view`, ...) apply at the time of the most recent
/// frame; the host calls [`NavigationController::tick`] once per rendered frame.
#[derive(Debug, Clone)]
pub struct NavigationController {
    gazetteer: Arc<Gazetteer>,
    machine: NavigationMachine,
}

impl NavigationController {
    pub fn new(gazetteer: Arc<Gazetteer>, config: NavigationConfig, mounted_at: Time) -> Self {
        Self {
            gazetteer,
            machine: NavigationMachine::new(config, mounted_at),
        }
    }

    pub fn state(&self) -> &NavigationState {
        self.machine.state()
    }

    pub fn phase(&self) -> NavPhase {
        self.machine.phase()
    }

    pub fn machine(&self) -> &NavigationMachine {
        &self.machine
    }

    pub fn tick(&mut self, frame: Frame) -> Vec<NavChange> {
        self.apply(frame.time, NavEvent::Tick)
    }

    pub fn interaction_start(&mut self) -> Vec<NavChange> {
        self.apply_now(NavEvent::InteractionStart)
    }

    pub fn interaction_end(&mut self) -> Vec<NavChange> {
        self.apply_now(NavEvent::InteractionEnd)
    }

    /// Flies to a place taken from the gazetteer.
    pub fn fly_to(&mut self, place: &Place) -> Vec<NavChange> {
        self.apply_now(NavEvent::FlyTo {
            target: place.coords,
        })
    }

    /// Flies to the named place. Unknown names are logged and ignored.
    pub fn fly_to_place(&mut self, name: &str) -> bool {
        let Some(place) = self.gazetteer.lookup(name) else {
            warn!(name, "fly-to ignored: place not in gazetteer");
            return false;
        };
        let target = place.coords;
        self.apply_now(NavEvent::FlyTo { target });
        true
    }

    pub fn reset_view(&mut self) -> Vec<NavChange> {
        self.apply_now(NavEvent::ResetView)
    }

    /// Flips auto-rotation, returning the new setting.
    pub fn toggle_spin(&mut self) -> bool {
        self.apply_now(NavEvent::ToggleSpin);
        self.machine.state().spin_enabled
    }

    fn apply_now(&mut self, event: NavEvent) -> Vec<NavChange> {
        let now = self.machine.now();
        self.apply(now, event)
    }

    fn apply(&mut self, at: Time, event: NavEvent) -> Vec<NavChange> {
        let changes = self.machine.step(at, event);
        for change in &changes {
            log_change(change);
        }
        changes
    }
}

fn log_change(change: &NavChange) {
    match change {
        NavChange::FlightStarted { kind, target } => {
            debug!(?kind, lng = target.lng, lat = target.lat, "camera flight started");
        }
        NavChange::FlightSuperseded { kind } => {
            debug!(?kind, "camera flight superseded");
        }
        NavChange::FlightCompleted { kind } => debug!(?kind, "camera flight completed"),
        NavChange::FlightCancelled { kind } => {
            debug!(?kind, "camera flight cancelled by user interaction");
        }
        NavChange::SpinStepped { .. } | NavChange::SpinHalted => {}
        NavChange::InteractionResumed => debug!("interaction ended, rotation may resume"),
    }
}
