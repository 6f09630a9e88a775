//! `rstest-bdd` behavioural tests for `cargo-eventgen`.
//!
//! Fixtures hold the module tree and the last pipeline result, steps drive
//! the library pipeline, and scenarios bind the feature files to both.

mod fixtures;
mod steps;
