//! Step definitions for registry generation scenarios.

use anyhow::{Context, Result, anyhow, ensure};
use cargo_eventgen::output::WriteOutcome;
use cargo_eventgen::resolve::DirectoryResolver;
use cargo_eventgen::{GenerateOptions, OutputMode, generate_with};
use rstest_bdd_macros::{given, then, when};
use test_helpers::module::TempModule;
use test_helpers::text::{declare_structs, normalize_scalar, split_names};

use super::fixtures::{GenerateContext, RunResult};

fn options(generate_context: &GenerateContext) -> Result<GenerateOptions> {
    generate_context
        .options()
        .ok_or_else(|| anyhow!("no module has been created"))
}

fn run(generate_context: &GenerateContext, mode: OutputMode) -> Result<()> {
    let mut options = options(generate_context)?;
    options.mode = mode;
    let result = generate_with(&DirectoryResolver::new(), &options);
    generate_context.result.set(result);
    Ok(())
}

fn with_result<T>(
    generate_context: &GenerateContext,
    inspect: impl FnOnce(&RunResult) -> T,
) -> Result<T> {
    generate_context
        .result
        .with_ref(inspect)
        .ok_or_else(|| anyhow!("the pipeline has not run"))
}

#[given("a gateway module declaring {names}")]
fn module_declaring(generate_context: &GenerateContext, names: String) -> Result<()> {
    let module = TempModule::new("gateway")
        .file("lib.rs", "pub mod events;\n")
        .file("events.rs", declare_structs(split_names(&names).as_slice()))
        .build()?;
    generate_context.module.set(module);
    Ok(())
}

#[given("a gateway module without a declarations file")]
fn module_without_declarations(generate_context: &GenerateContext) -> Result<()> {
    let module = TempModule::new("gateway")
        .file("lib.rs", declare_structs(&["Event", "Ready"]))
        .build()?;
    generate_context.module.set(module);
    Ok(())
}

#[given("the registry has been generated")]
fn registry_generated(generate_context: &GenerateContext) -> Result<()> {
    let options = options(generate_context)?;
    generate_with(&DirectoryResolver::new(), &options).context("initial generation")?;
    Ok(())
}

#[when("the module also declares {name}")]
fn module_also_declares(generate_context: &GenerateContext, name: String) -> Result<()> {
    let addition = declare_structs(&[normalize_scalar(&name)]);
    generate_context
        .module
        .with_ref(|module| -> Result<()> {
            let path = module.src_dir().join("events.rs");
            let mut source = std::fs::read_to_string(&path)?;
            source.push_str(&addition);
            std::fs::write(&path, source)?;
            Ok(())
        })
        .ok_or_else(|| anyhow!("no module has been created"))?
}

#[when("I generate the registry")]
fn generate_registry(generate_context: &GenerateContext) -> Result<()> {
    run(generate_context, OutputMode::Write)
}

#[when("I check the registry")]
fn check_registry(generate_context: &GenerateContext) -> Result<()> {
    run(generate_context, OutputMode::Check)
}

#[then("generation succeeds with {count:usize} events")]
fn generation_succeeds(generate_context: &GenerateContext, count: usize) -> Result<()> {
    let events = with_result(generate_context, |result| {
        result.as_ref().map(|generated| generated.events).map_err(ToString::to_string)
    })?
    .map_err(|err| anyhow!("generation failed: {err}"))?;
    ensure!(events == count, "expected {count} events, got {events}");
    Ok(())
}

#[then("the registry lists {names}")]
fn registry_lists(generate_context: &GenerateContext, names: String) -> Result<()> {
    let options = options(generate_context)?;
    let source = std::fs::read_to_string(&options.output)?;
    let listed: Vec<String> = source
        .lines()
        .filter(|line| line.starts_with("pub const EVENT_") && !line.starts_with("pub const EVENT_ALL:"))
        .filter_map(|line| line.split('"').nth(1).map(str::to_owned))
        .collect();
    let expected = split_names(&names);
    ensure!(listed == expected, "expected {expected:?}, got {listed:?}");
    Ok(())
}

#[then("the registry file was left unchanged")]
fn registry_unchanged(generate_context: &GenerateContext) -> Result<()> {
    let outcome = with_result(generate_context, |result| {
        result.as_ref().map(|generated| generated.outcome).ok()
    })?;
    ensure!(
        outcome == Some(WriteOutcome::Unchanged),
        "expected an unchanged registry, got {outcome:?}"
    );
    Ok(())
}

#[then("generation fails at the {stage} stage")]
fn generation_fails(generate_context: &GenerateContext, stage: String) -> Result<()> {
    let expected = normalize_scalar(&stage);
    let actual = with_result(generate_context, |result| {
        result.as_ref().err().map(|err| err.stage().as_str())
    })?
    .ok_or_else(|| anyhow!("generation unexpectedly succeeded"))?;
    ensure!(actual == expected, "expected the {expected} stage, got {actual}");
    Ok(())
}

#[then("no registry file is written")]
fn no_registry_written(generate_context: &GenerateContext) -> Result<()> {
    let options = options(generate_context)?;
    ensure!(!options.output.exists(), "{} should not exist", options.output);
    Ok(())
}
