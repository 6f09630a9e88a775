//! Consumer of the registry generated from `gateway_events`.
//!
//! `src/all_events.rs` is committed output of `cargo eventgen`; the
//! `cargo-eventgen` golden tests keep it in step with the generator.

#[rustfmt::skip]
mod all_events;

pub use all_events::*;

/// Describes a payload by the event it holds, if any.
#[must_use]
pub fn describe(payload: &EventPayload) -> String {
    if let Some(message) = payload.message_create() {
        return format!("message in {}: {}", message.channel_id, message.content);
    }
    if let Some(ready) = payload.ready() {
        return format!("ready (v{})", ready.version);
    }
    let held = (**payload).type_id();
    EventKind::ALL
        .iter()
        .find(|kind| kind.new_event().as_ref().type_id() == held)
        .map_or_else(|| "unknown payload".to_owned(), |kind| kind.name().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_events::events::{MessageCreate, Ready};
    use rstest::rstest;

    #[rstest]
    fn registry_lists_every_concrete_event_in_order() {
        assert_eq!(
            ALL_EVENTS,
            [
                "guild_create",
                "message_create",
                "message_delete",
                "ready",
                "typing_start",
                "voice_server_update",
            ]
        );
        assert_eq!(EVENT_ALL, "all");
        assert!(!ALL_EVENTS.contains(&EVENT_ALL));
    }

    #[rstest]
    fn kinds_round_trip_through_names() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(EventKind::from_name(EVENT_ALL), None);
        assert_eq!(EventKind::from_name("event"), None);
    }

    #[rstest]
    #[case::known("message_create", true)]
    #[case::catch_all("all", false)]
    #[case::marker("event", false)]
    #[case::unknown("heartbeat", false)]
    fn factory_builds_known_events_only(#[case] name: &str, #[case] known: bool) {
        assert_eq!(new_event(name).is_some(), known);
    }

    #[rstest]
    fn factory_payloads_are_fresh_defaults() {
        let payload = new_event(EVENT_MESSAGE_CREATE).expect("known event");
        let message = payload.message_create().expect("message payload");
        assert_eq!(message.channel_id, 0);
        assert!(message.content.is_empty());
        assert!(payload.ready().is_none());
    }

    #[rstest]
    fn accessors_match_only_the_held_type() {
        let payload: EventPayload = Box::new(MessageCreate {
            channel_id: 7,
            content: "hello".to_owned(),
        });
        assert_eq!(describe(&payload), "message in 7: hello");

        let ready: EventPayload = Box::new(Ready {
            version: 10,
            session_id: "abc".to_owned(),
        });
        assert_eq!(describe(&ready), "ready (v10)");
        assert!(ready.message_create().is_none());

        let typing = EventKind::TypingStart.new_event();
        assert_eq!(describe(&typing), "typing_start");
    }
}
