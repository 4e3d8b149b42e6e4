use jsexport_core::BindingKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExportMode {
    /// Assign into a caller-supplied namespace object.
    #[default]
    NamespaceAttach,
    /// Emit native named exports (`export { local as Name };`).
    ModuleExport,
}

impl ExportMode {
    pub fn is_module_export(&self) -> bool {
        matches!(self, ExportMode::ModuleExport)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoweringConfig {
    pub mode: ExportMode,
    /// Wrap class and object blocks in `// export: ...` / `// end export`.
    pub export_comments: bool,
    /// Keyword for synthesized locals (namespace segments, bound constructors).
    pub binding_kind: BindingKind,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self {
            mode: ExportMode::NamespaceAttach,
            export_comments: false,
            binding_kind: BindingKind::Let,
        }
    }
}

impl LoweringConfig {
    pub fn module_export() -> Self {
        Self {
            mode: ExportMode::ModuleExport,
            ..Self::default()
        }
    }

    pub fn with_export_comments(mut self, enabled: bool) -> Self {
        self.export_comments = enabled;
        self
    }
}
