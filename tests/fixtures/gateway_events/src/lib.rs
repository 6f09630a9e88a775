//! Gateway event payloads used to exercise `cargo-eventgen`.
