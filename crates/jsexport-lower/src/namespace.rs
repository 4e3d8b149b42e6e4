use crate::errors::{LoweringError, Result};
use jsexport_core::{BindingKind, Expr, Namer, Stmt};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Namespace segment objects created so far, keyed by cumulative dotted
/// prefix (`a`, `a.b`). Lives for exactly one top-level lowering call.
#[derive(Debug, Default, Clone)]
pub struct NamespaceCache {
    refs: HashMap<String, String>,
    issued: HashSet<String>,
}

impl NamespaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `candidate`, or the first free `candidate_N` if a different
    /// prefix already holds it.
    fn claim(&mut self, candidate: String) -> String {
        let mut id = candidate.clone();
        let mut counter = 1;
        while self.issued.contains(&id) {
            id = format!("{}_{}", candidate, counter);
            counter += 1;
        }
        self.issued.insert(id.clone());
        id
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.refs.get(prefix).map(String::as_str)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.refs.contains_key(prefix)
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNamespace {
    /// Innermost segment, ready to attach declarations to.
    pub handle: Expr,
    /// Declarations for segments that were not cached yet, outermost first.
    pub statements: Vec<Stmt>,
}

/// Walks `path` segment by segment from `current`, creating each missing
/// segment with `let $id = parent.seg || (parent.seg = {});` so that a
/// namespace reopened elsewhere keeps whatever is already attached to it.
pub fn resolve_namespace_path(
    path: &str,
    current: &Expr,
    cache: &mut NamespaceCache,
    namer: &dyn Namer,
    binding_kind: BindingKind,
) -> Result<ResolvedNamespace> {
    if path.is_empty() || path.split('.').any(str::is_empty) {
        return Err(LoweringError::EmptyNamespacePath {
            path: path.to_string(),
        });
    }

    let mut statements = Vec::new();
    let mut handle = current.clone();
    let mut prefix = String::new();

    for segment in path.split('.') {
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(segment);

        let id = match cache.refs.get(&prefix) {
            Some(id) => {
                trace!(prefix = %prefix, id = %id, "namespace cache hit");
                id.clone()
            }
            None => {
                let id = cache.claim(namer.namespace_name(&prefix));
                trace!(prefix = %prefix, id = %id, "creating namespace segment");
                let slot = Expr::element_access(segment, handle.clone());
                statements.push(Stmt::var(
                    binding_kind,
                    id.clone(),
                    Expr::or(slot.clone(), Expr::assign(slot, Expr::empty_object())),
                ));
                cache.refs.insert(prefix.clone(), id.clone());
                id
            }
        };

        handle = Expr::ident(id);
    }

    Ok(ResolvedNamespace { handle, statements })
}
