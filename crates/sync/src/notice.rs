use foundation::lnglat::LngLat;

pub const CLICK_MISS_NOTICE: &str = "City not supported yet. Stay tuned! 🌍";

pub const REPLY_FAILED_NOTICE: &str = "Sorry, I encountered an error. Please try again or make sure your OpenAI API key is configured.";

pub fn unsupported_mention_notice(phrase: &str) -> String {
    format!("{phrase} is not supported yet. Stay tuned! 🌍")
}

pub fn city_selected_notice(city: &str) -> String {
    format!("🌍 Now chatting about {city}! Ask me anything about this amazing city.")
}

/// Why a notice was shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    /// A click or mention did not resolve to a known place.
    UnresolvableLocation,
    /// The chat collaborator failed or returned nothing usable.
    MalformedReply,
    CitySelected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Everything the orchestrator publishes for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Notice(Notice),
    ActiveCityChanged { city: Option<String> },
    FlyToStarted { place: String, target: LngLat },
    /// A flight was still in the air when a new one started.
    AnimationSuperseded,
    ViewReset,
    AwaitingReply(bool),
    ChatOpened,
}
