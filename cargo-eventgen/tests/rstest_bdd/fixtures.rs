//! Shared fixtures for the behavioural scenarios.

use cargo_eventgen::error::EventgenError;
use cargo_eventgen::{GenerateOptions, Generated};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::module::BuiltModule;

/// Result of the most recent pipeline run.
pub type RunResult = Result<Generated, EventgenError>;

/// Scenario state shared between generation steps.
#[derive(Debug, Default, ScenarioState)]
pub struct GenerateContext {
    /// Module tree the registry is generated from.
    pub module: Slot<BuiltModule>,
    /// Outcome of the last `generate` or `check` step.
    pub result: Slot<RunResult>,
}

impl GenerateContext {
    /// Pipeline options targeting `all_events.rs` in the package directory.
    pub fn options(&self) -> Option<GenerateOptions> {
        self.module.with_ref(|module| {
            GenerateOptions::new(module.src_dir().as_str(), module.path("all_events.rs"))
        })
    }
}

/// Creates an empty generation context.
#[fixture]
pub fn generate_context() -> GenerateContext {
    GenerateContext::default()
}
