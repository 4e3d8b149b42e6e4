use crate::declaration::ExportedModule;
use crate::source::SourceTable;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An export tree together with the slice of the source model it refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub module: ExportedModule,
    #[serde(default)]
    pub sources: SourceTable,
}

impl ExportBundle {
    pub fn new(module: ExportedModule, sources: SourceTable) -> Self {
        Self { module, sources }
    }
}

pub fn bundle_from_str(json: &str) -> Result<ExportBundle> {
    Ok(serde_json::from_str(json)?)
}

pub fn bundle_to_string(bundle: &ExportBundle) -> Result<String> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

pub fn save_bundle(bundle: &ExportBundle, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, bundle_to_string(bundle)?)?;
    Ok(())
}

pub fn load_bundle(path: impl AsRef<Path>) -> Result<ExportBundle> {
    let json = fs::read_to_string(path)?;
    bundle_from_str(&json)
}
