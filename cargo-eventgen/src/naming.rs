//! Naming-convention conversion for event identifiers.

use heck::{ToShoutySnakeCase, ToSnakeCase};

/// Converts a declared type name into its `snake_case` event name.
///
/// Uppercase runs stay together unless the next character is lowercase, so
/// `HTTPServerUpdate` becomes `http_server_update`. Already snake-cased input
/// is returned unchanged.
///
/// A digit run that follows a letter is its own word, so `Event2Update`
/// becomes `event_2_update`.
#[must_use]
pub fn proper_name(name: &str) -> String {
    split_digit_runs(name).to_snake_case()
}

/// Returns the constant identifier for an event, e.g. `EVENT_MESSAGE_CREATE`.
#[must_use]
pub fn constant_name(name: &str) -> String {
    format!("EVENT_{}", split_digit_runs(name).to_shouty_snake_case())
}

/// Inserts `_` on both sides of every ASCII digit run that follows a letter.
fn split_digit_runs(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    let mut in_lettered_digits = false;
    for ch in name.chars() {
        let after_letter = previous.is_some_and(|prev| prev.is_ascii_alphabetic());
        let after_digit = previous.is_some_and(|prev| prev.is_ascii_digit());
        if ch.is_ascii_digit() {
            if after_letter {
                out.push('_');
                in_lettered_digits = true;
            }
        } else {
            if ch.is_ascii_alphabetic() && after_digit && in_lettered_digits {
                out.push('_');
            }
            in_lettered_digits = false;
        }
        out.push(ch);
        previous = Some(ch);
    }
    out
}
