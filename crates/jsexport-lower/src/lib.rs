/*! Lower an exported-declaration tree to JavaScript statements.
 *
 * Classes become constructor bindings plus prototype definitions, namespaces become nested objects
 * created on demand, singleton objects become getter-backed properties, and inner classes become
 * prototype getters that hand out constructors bound to the enclosing instance. The output is the
 * smallest set of statements that keeps inheritance, overriding and dynamic dispatch intact.
 */

pub mod config;
pub mod declarations;
pub mod errors;
mod inner_class;
pub mod member_policy;
pub mod namespace;

pub use config::{ExportMode, LoweringConfig};
pub use declarations::ExportLowering;
pub use errors::{LoweringError, Result};
pub use member_policy::{AccessorEmission, MemberPolicy, PropertyDecision, SkipReason};
pub use namespace::{resolve_namespace_path, NamespaceCache, ResolvedNamespace};

use jsexport_core::{Expr, ExportedDeclaration, ExportedModule, Namer, SourceModel, Stmt};

/// Lowers a whole module with a fresh namespace cache.
pub fn lower_module_export(
    module: &ExportedModule,
    internal_module_name: &str,
    namer: &dyn Namer,
    model: &dyn SourceModel,
    config: LoweringConfig,
) -> Result<Vec<Stmt>> {
    ExportLowering::new(namer, model, config).generate_module_export(module, internal_module_name)
}

/// Lowers root declarations against an explicit attach point (`None` for
/// module-export mode) with a fresh namespace cache.
pub fn lower_declarations(
    declarations: &[ExportedDeclaration],
    namespace: Option<&Expr>,
    namer: &dyn Namer,
    model: &dyn SourceModel,
    config: LoweringConfig,
) -> Result<Vec<Stmt>> {
    ExportLowering::new(namer, model, config).lower(declarations, namespace)
}
