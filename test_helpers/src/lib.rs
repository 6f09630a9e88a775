//! Test helpers shared across crates.
//!
//! This crate provides throwaway module trees for resolver and loader tests,
//! plus text normalisation for behavioural step parameters.

pub mod module;
pub mod text;
