/*! Single entry point for lowering an export bundle to JavaScript.
 *
 * Load a bundle, validate it, lower it and print it. Each stage is also reachable on its own
 * through the re-exported crates.
 */

pub use jsexport_core as core;
pub use jsexport_emit as emit;
pub use jsexport_lower as lower;

pub use jsexport_core::{
    persist::{bundle_from_str, load_bundle, save_bundle},
    validate_bundle, CoreError, ExportBundle, ExportedDeclaration, ExportedModule, HashingNamer,
    NamingConfig, SourceTable, Stmt,
};
pub use jsexport_emit::{EmitterConfig, JsEmitter};
pub use jsexport_lower::{lower_module_export, ExportMode, LoweringConfig, LoweringError};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Everything one run of the pipeline needs besides the bundle itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Identifier of the module object declarations attach to in
    /// namespace-attach mode.
    pub internal_module_name: String,
    pub lowering: LoweringConfig,
    pub naming: NamingConfig,
    pub emitter: EmitterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            internal_module_name: "_".to_string(),
            lowering: LoweringConfig::default(),
            naming: NamingConfig::default(),
            emitter: EmitterConfig::default(),
        }
    }
}

/// Validates and lowers `bundle` without printing.
pub fn lower_bundle(bundle: &ExportBundle, config: &PipelineConfig) -> Result<Vec<Stmt>> {
    let issues = validate_bundle(bundle);
    if !issues.is_empty() {
        return Err(CoreError::Validation(issues).into());
    }

    let namer = HashingNamer::new(&bundle.sources, config.naming.clone());
    let statements = lower_module_export(
        &bundle.module,
        &config.internal_module_name,
        &namer,
        &bundle.sources,
        config.lowering.clone(),
    )?;
    Ok(statements)
}

pub fn lower_bundle_to_js(bundle: &ExportBundle, config: &PipelineConfig) -> Result<String> {
    let statements = lower_bundle(bundle, config)?;
    JsEmitter::new(config.emitter.clone()).render(&statements)
}
