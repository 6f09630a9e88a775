// @generated by cargo-eventgen from `gateway_events` (events.rs). Do not edit.

/// Catch-all event name matching every event.
pub const EVENT_ALL: &str = "all";
/// Event name for `GuildCreate`.
pub const EVENT_GUILD_CREATE: &str = "guild_create";
/// Event name for `MessageCreate`.
pub const EVENT_MESSAGE_CREATE: &str = "message_create";
/// Event name for `MessageDelete`.
pub const EVENT_MESSAGE_DELETE: &str = "message_delete";
/// Event name for `Ready`.
pub const EVENT_READY: &str = "ready";
/// Event name for `TypingStart`.
pub const EVENT_TYPING_START: &str = "typing_start";
/// Event name for `VoiceServerUpdate`.
pub const EVENT_VOICE_SERVER_UPDATE: &str = "voice_server_update";

/// Names of every concrete event, ordered by type name.
pub const ALL_EVENTS: &[&str] = &[
    EVENT_GUILD_CREATE,
    EVENT_MESSAGE_CREATE,
    EVENT_MESSAGE_DELETE,
    EVENT_READY,
    EVENT_TYPING_START,
    EVENT_VOICE_SERVER_UPDATE,
];

/// Type-erased event payload produced by the factory.
pub type EventPayload = ::std::boxed::Box<dyn ::std::any::Any + ::core::marker::Send>;

/// Concrete event kinds, one per declared event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// `GuildCreate` event.
    GuildCreate,
    /// `MessageCreate` event.
    MessageCreate,
    /// `MessageDelete` event.
    MessageDelete,
    /// `Ready` event.
    Ready,
    /// `TypingStart` event.
    TypingStart,
    /// `VoiceServerUpdate` event.
    VoiceServerUpdate,
}

impl EventKind {
    /// Every event kind, in registry order.
    pub const ALL: &'static [Self] = &[
        Self::GuildCreate,
        Self::MessageCreate,
        Self::MessageDelete,
        Self::Ready,
        Self::TypingStart,
        Self::VoiceServerUpdate,
    ];

    /// Returns the event name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GuildCreate => EVENT_GUILD_CREATE,
            Self::MessageCreate => EVENT_MESSAGE_CREATE,
            Self::MessageDelete => EVENT_MESSAGE_DELETE,
            Self::Ready => EVENT_READY,
            Self::TypingStart => EVENT_TYPING_START,
            Self::VoiceServerUpdate => EVENT_VOICE_SERVER_UPDATE,
        }
    }

    /// Looks up the kind registered under `name`.
    #[must_use]
    pub fn from_name(name: &str) -> ::core::option::Option<Self> {
        match name {
            EVENT_GUILD_CREATE => ::core::option::Option::Some(Self::GuildCreate),
            EVENT_MESSAGE_CREATE => ::core::option::Option::Some(Self::MessageCreate),
            EVENT_MESSAGE_DELETE => ::core::option::Option::Some(Self::MessageDelete),
            EVENT_READY => ::core::option::Option::Some(Self::Ready),
            EVENT_TYPING_START => ::core::option::Option::Some(Self::TypingStart),
            EVENT_VOICE_SERVER_UPDATE => ::core::option::Option::Some(Self::VoiceServerUpdate),
            _ => ::core::option::Option::None,
        }
    }

    /// Builds a fresh, default-initialised payload for this kind.
    #[must_use]
    pub fn new_event(self) -> EventPayload {
        match self {
            Self::GuildCreate => ::std::boxed::Box::new(
                <::gateway_events::events::GuildCreate as ::core::default::Default>::default(),
            ),
            Self::MessageCreate => ::std::boxed::Box::new(
                <::gateway_events::events::MessageCreate as ::core::default::Default>::default(),
            ),
            Self::MessageDelete => ::std::boxed::Box::new(
                <::gateway_events::events::MessageDelete as ::core::default::Default>::default(),
            ),
            Self::Ready => ::std::boxed::Box::new(
                <::gateway_events::events::Ready as ::core::default::Default>::default(),
            ),
            Self::TypingStart => ::std::boxed::Box::new(
                <::gateway_events::events::TypingStart as ::core::default::Default>::default(),
            ),
            Self::VoiceServerUpdate => ::std::boxed::Box::new(
                <::gateway_events::events::VoiceServerUpdate as ::core::default::Default>::default(),
            ),
        }
    }
}

/// Builds a fresh payload for the event registered under `name`.
#[must_use]
pub fn new_event(name: &str) -> ::core::option::Option<EventPayload> {
    EventKind::from_name(name).map(EventKind::new_event)
}

/// Typed accessors over a type-erased event payload.
pub trait EventPayloadExt {
    /// Returns the type-erased payload.
    fn payload(&self) -> &(dyn ::std::any::Any + ::core::marker::Send);

    /// Returns the payload as `GuildCreate` when it holds one.
    fn guild_create(&self) -> ::core::option::Option<&::gateway_events::events::GuildCreate> {
        self.payload().downcast_ref()
    }

    /// Returns the payload as `MessageCreate` when it holds one.
    fn message_create(&self) -> ::core::option::Option<&::gateway_events::events::MessageCreate> {
        self.payload().downcast_ref()
    }

    /// Returns the payload as `MessageDelete` when it holds one.
    fn message_delete(&self) -> ::core::option::Option<&::gateway_events::events::MessageDelete> {
        self.payload().downcast_ref()
    }

    /// Returns the payload as `Ready` when it holds one.
    fn ready(&self) -> ::core::option::Option<&::gateway_events::events::Ready> {
        self.payload().downcast_ref()
    }

    /// Returns the payload as `TypingStart` when it holds one.
    fn typing_start(&self) -> ::core::option::Option<&::gateway_events::events::TypingStart> {
        self.payload().downcast_ref()
    }

    /// Returns the payload as `VoiceServerUpdate` when it holds one.
    fn voice_server_update(&self) -> ::core::option::Option<&::gateway_events::events::VoiceServerUpdate> {
        self.payload().downcast_ref()
    }
}

impl EventPayloadExt for EventPayload {
    fn payload(&self) -> &(dyn ::std::any::Any + ::core::marker::Send) {
        &**self
    }
}
