//! Basic usage example for field-registry.
//!
//! Demonstrates:
//! - Registering field types and wrappers
//! - Looking wrappers up by the field types they tag
//! - The overwrite warning, logged through `tracing`
//!
//! Run with: `RUST_LOG=debug cargo run --example basic_usage`

use field_registry::{DefinitionRegistry, TypeDefinition, WrapperOptions, TRANSCLUDE_TAG};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> field_registry::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== field-registry: Basic Usage ===\n");

    let mut registry = DefinitionRegistry::new();

    // -------------------------------------------------------------------------
    // 1. Field types
    // -------------------------------------------------------------------------
    println!("1. Registering field types...");

    registry.set_type(vec![
        TypeDefinition::new("input").with_template("<input ng-model=\"model[options.key]\">"),
        TypeDefinition::new("checkbox").with_template_url("checkbox.html"),
    ])?;
    registry.set_type(json!({
        "name": "email",
        "extends": "input",
        "defaultOptions": { "templateOptions": { "type": "email" } }
    }))?;

    for def in registry.types() {
        println!("   type: {}", def.name().unwrap_or_default());
    }

    // -------------------------------------------------------------------------
    // 2. Wrappers
    // -------------------------------------------------------------------------
    println!("\n2. Registering wrappers...");

    let label = format!("<label>{{{{to.label}}}}</label>{TRANSCLUDE_TAG}");
    let errors = format!("{TRANSCLUDE_TAG}<div class=\"errors\"></div>");
    registry.set_wrapper(
        vec![
            WrapperOptions::template(label).for_types(["input", "checkbox"]),
            WrapperOptions::template(errors).named("errors").for_types("input"),
        ],
        None,
    )?;

    for wrapper in registry.get_wrapper_by_type("input") {
        println!("   input is wrapped by: {}", wrapper.name);
    }

    // -------------------------------------------------------------------------
    // 3. Overwriting
    // -------------------------------------------------------------------------
    println!("\n3. Overwriting 'checkbox' (watch the log for a warning)...");

    registry.set_type(TypeDefinition::new("checkbox").with_template("<input type=\"checkbox\">"))?;

    // -------------------------------------------------------------------------
    // 4. Removal
    // -------------------------------------------------------------------------
    println!("\n4. Removing wrappers for 'checkbox'...");

    let removed = registry.remove_wrappers_for_type("checkbox");
    println!("   removed: {:?}", removed.iter().map(|w| &w.name).collect::<Vec<_>>());
    println!("   left:    {:?}", registry.wrappers().map(|w| &w.name).collect::<Vec<_>>());

    Ok(())
}
