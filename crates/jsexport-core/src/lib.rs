/*! Core types for lowering a module's public surface to JavaScript.
 *
 * Upstream analysis decides what a compiled module exposes; this crate holds that answer in a form
 * the lowering stage can walk: the exported-declaration tree, read-only handles back into the source
 * model, the naming authority that turns handles into identifiers, and the small JavaScript AST the
 * lowering stage builds its output from.
 */

pub mod declaration;
pub mod js;
pub mod naming;
pub mod persist;
pub mod source;
pub mod validate;

pub use declaration::{
    ClassLike, ClassMember, ErrorDeclaration, ExportedClass, ExportedConstructSignature,
    ExportedConstructor, ExportedDeclaration, ExportedFunction, ExportedModule,
    ExportedNamespace, ExportedObject, ExportedParameter, ExportedProperty, TreeStats,
};
pub use js::{BindingKind, Expr, FunctionExpr, Stmt};
pub use naming::{HashingNamer, Namer, NamingConfig, NamingScheme};
pub use persist::ExportBundle;
pub use source::{
    AccessorInfo, ClassInfo, DeclId, FunctionInfo, Modality, PropertyInfo, SourceDeclaration,
    SourceKind, SourceModel, SourceTable, Visibility,
};
pub use validate::{validate_bundle, ValidationIssue};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed bundle: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Bundle failed validation with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests;
