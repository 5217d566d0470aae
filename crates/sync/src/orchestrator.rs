use std::sync::Arc;

use foundation::time::Time;
use gazetteer::{Gazetteer, Place};
use mentions::{MentionDetector, MentionError, SelectionEvent};
use navigation::{NavChange, NavPhase, NavigationConfig, NavigationController, NavigationState};
use runtime::clock::Frame;
use runtime::event_bus::{Event, EventBus};
use tracing::{debug, info, warn};

use crate::chat::{ChatCollaborator, ChatError, ChatMessage, ChatReply, ChatRequest};
use crate::notice::{
    CLICK_MISS_NOTICE, Notice, NoticeKind, REPLY_FAILED_NOTICE, SyncEvent, city_selected_notice,
    unsupported_mention_notice,
};

/// Max degree distance between a click and a city marker for the click to select it.
pub const CLICK_MAX_DISTANCE: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SyncConfig {
    pub click_max_distance: f64,
    pub navigation: NavigationConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            click_max_distance: CLICK_MAX_DISTANCE,
            navigation: NavigationConfig::default(),
        }
    }
}

/// What the assistant is currently scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    pub active_city: Option<String>,
}

/// Keeps the globe camera and the chat conversation pointing at the same place.
///
/// Owns the [`NavigationController`], the [`ConversationContext`] and the
/// transcript. Every user action and assistant reply goes through here; the
/// renderer reads state back and drains [`SyncEvent`]s once per frame.
#[derive(Debug, Clone)]
pub struct SyncOrchestrator {
    config: SyncConfig,
    gazetteer: Arc<Gazetteer>,
    detector: MentionDetector,
    navigation: NavigationController,
    context: ConversationContext,
    transcript: Vec<ChatMessage>,
    events: EventBus<SyncEvent>,
    /// Requests handed out by `on_user_message` with no result fed back yet.
    pending_replies: usize,
    chat_active: bool,
}

impl SyncOrchestrator {
    pub fn new(
        gazetteer: Arc<Gazetteer>,
        config: SyncConfig,
        mounted_at: Time,
    ) -> Result<Self, MentionError> {
        let detector = MentionDetector::new(gazetteer.clone())?;
        let navigation =
            NavigationController::new(gazetteer.clone(), config.navigation, mounted_at);
        Ok(Self {
            config,
            gazetteer,
            detector,
            navigation,
            context: ConversationContext::default(),
            transcript: Vec::new(),
            events: EventBus::new(),
            pending_replies: 0,
            chat_active: false,
        })
    }

    /// Orchestrator over the built-in city table with default tunables.
    pub fn builtin(mounted_at: Time) -> Result<Self, MentionError> {
        Self::new(
            Arc::new(Gazetteer::builtin()),
            SyncConfig::default(),
            mounted_at,
        )
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn active_city(&self) -> Option<&str> {
        self.context.active_city.as_deref()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn camera(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn phase(&self) -> NavPhase {
        self.navigation.phase()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// True while at least one request is still waiting for its reply.
    pub fn awaiting_reply(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn chat_active(&self) -> bool {
        self.chat_active
    }

    pub fn events(&self) -> &EventBus<SyncEvent> {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<Event<SyncEvent>> {
        self.events.drain()
    }

    /// Selects the known city nearest the click, if one is close enough.
    pub fn on_globe_click(&mut self, lng: f64, lat: f64) -> Option<Place> {
        let Some(place) = self
            .gazetteer
            .nearest(lng, lat, self.config.click_max_distance)
            .cloned()
        else {
            info!(lng, lat, "globe click did not resolve to a supported city");
            self.post_notice(NoticeKind::UnresolvableLocation, CLICK_MISS_NOTICE.to_string());
            return None;
        };
        self.select(&place);
        Some(place)
    }

    /// Selects a city by name, e.g. from a suggestion list.
    pub fn on_city_selected(&mut self, name: &str) -> bool {
        let Some(place) = self.gazetteer.lookup(name).cloned() else {
            warn!(name, "selected city is not in the gazetteer");
            return false;
        };
        self.select(&place);
        true
    }

    /// Follows a place the assistant mentioned.
    pub fn on_assistant_reply(&mut self, text: &str) -> Option<SelectionEvent> {
        let detected = self.detector.detect(text)?;
        match &detected {
            SelectionEvent::Recognized(place) => self.select(place),
            SelectionEvent::Unrecognized(phrase) => {
                info!(phrase = phrase.as_str(), "mentioned place is not supported");
                self.post_notice(
                    NoticeKind::UnresolvableLocation,
                    unsupported_mention_notice(phrase),
                );
            }
        }
        Some(detected)
    }

    /// Back to the overview with no city in focus.
    pub fn reset_all(&mut self) {
        let changes = self.navigation.reset_view();
        self.publish_superseded(&changes);
        self.events.emit(SyncEvent::ViewReset);
        self.set_active_city(None);
    }

    /// Records a user message and returns the request to send, or `None` for blank input.
    ///
    /// A place named in the message is followed immediately, before any reply arrives.
    pub fn on_user_message(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if !self.chat_active {
            self.chat_active = true;
            self.events.emit(SyncEvent::ChatOpened);
        }
        self.transcript.push(ChatMessage::user(text));
        let messages = self.transcript.clone();

        if let Some(SelectionEvent::Recognized(place)) = self.detector.detect(text) {
            self.select(&place);
        }

        self.set_pending_replies(self.pending_replies + 1);
        Some(ChatRequest {
            messages,
            selected_city: self.context.active_city.clone(),
        })
    }

    /// Feeds back the collaborator's answer to one outstanding request.
    pub fn on_reply_result(
        &mut self,
        result: Result<ChatReply, ChatError>,
    ) -> Option<SelectionEvent> {
        self.set_pending_replies(self.pending_replies.saturating_sub(1));
        match result {
            Ok(reply) => {
                self.transcript.push(ChatMessage::assistant(reply.content.clone()));
                self.on_assistant_reply(&reply.content)
            }
            Err(err) => {
                warn!(error = %err, "chat reply failed");
                self.post_notice(NoticeKind::MalformedReply, REPLY_FAILED_NOTICE.to_string());
                None
            }
        }
    }

    /// Sends `text` through `collaborator` and applies the reply.
    ///
    /// The orchestrator stays mutably borrowed until the reply arrives, so no
    /// clicks or frames can be delivered meanwhile. Hosts that must keep the
    /// globe responsive during a reply call [`Self::on_user_message`], send the
    /// request themselves and pass the outcome to [`Self::on_reply_result`].
    pub async fn exchange(
        &mut self,
        text: &str,
        collaborator: &dyn ChatCollaborator,
    ) -> Option<SelectionEvent> {
        let request = self.on_user_message(text)?;
        let result = collaborator.send(&request).await;
        self.on_reply_result(result)
    }

    pub fn toggle_spin(&mut self) -> bool {
        self.navigation.toggle_spin()
    }

    pub fn interaction_start(&mut self) {
        self.navigation.interaction_start();
    }

    pub fn interaction_end(&mut self) {
        self.navigation.interaction_end();
    }

    pub fn tick(&mut self, frame: Frame) -> Vec<NavChange> {
        self.navigation.tick(frame)
    }

    fn select(&mut self, place: &Place) {
        if !self.chat_active {
            self.chat_active = true;
            self.events.emit(SyncEvent::ChatOpened);
        }
        let changes = self.navigation.fly_to(place);
        self.publish_superseded(&changes);
        self.events.emit(SyncEvent::FlyToStarted {
            place: place.name.clone(),
            target: place.coords,
        });
        self.set_active_city(Some(place.name.clone()));
    }

    fn publish_superseded(&mut self, changes: &[NavChange]) {
        if changes
            .iter()
            .any(|c| matches!(c, NavChange::FlightSuperseded { .. }))
        {
            self.events.emit(SyncEvent::AnimationSuperseded);
        }
    }

    fn set_active_city(&mut self, city: Option<String>) {
        if self.context.active_city == city {
            return;
        }
        debug!(?city, "active city changed");
        self.context.active_city = city.clone();
        self.events.emit(SyncEvent::ActiveCityChanged { city: city.clone() });
        if let Some(city) = city {
            self.post_notice(NoticeKind::CitySelected, city_selected_notice(&city));
        }
    }

    fn set_pending_replies(&mut self, pending: usize) {
        let was_awaiting = self.awaiting_reply();
        self.pending_replies = pending;
        let awaiting = self.awaiting_reply();
        if was_awaiting != awaiting {
            self.events.emit(SyncEvent::AwaitingReply(awaiting));
        }
    }

    /// Publishes a notice; it joins the transcript once a conversation exists.
    fn post_notice(&mut self, kind: NoticeKind, text: String) {
        if !self.transcript.is_empty() {
            self.transcript.push(ChatMessage::assistant(text.clone()));
        }
        self.events.emit(SyncEvent::Notice(Notice { kind, text }));
    }
}
