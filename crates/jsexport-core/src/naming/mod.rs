/*! Identifier assignment for exported declarations.
 *
 * Every source declaration that reaches the output needs a target identifier, and two different
 * declarations must never share one. Lowering only asks; the `Namer` answers.
 */

pub mod hashing_namer;

pub use hashing_namer::HashingNamer;

use crate::source::DeclId;
use serde::{Deserialize, Serialize};

pub trait Namer {
    /// Binding identifier of a class, top-level function, object getter or
    /// secondary constructor.
    fn static_name(&self, decl: DeclId) -> String;

    /// Identifier of a compiled member function or accessor on a prototype.
    fn member_name(&self, decl: DeclId) -> String;

    /// JS-visible property identifier.
    fn property_name(&self, decl: DeclId) -> String;

    /// Identifier for the object holding a namespace segment, keyed by the
    /// cumulative dotted prefix (`a`, `a.b`, ...). Each segment is escaped
    /// with [`escape_segment`] and prefixed with `$`, so distinct prefixes
    /// never share an identifier.
    fn namespace_name(&self, prefix: &str) -> String {
        prefix
            .split('.')
            .map(|segment| format!("${}", escape_segment(segment)))
            .collect()
    }
}

/// Reversible identifier encoding of one namespace segment. Alphanumerics
/// pass through, `_` doubles, anything else becomes `_u<hex>_`. The result
/// never contains `$`, which stays free as the segment separator.
pub fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_alphanumeric() {
            escaped.push(c);
        } else if c == '_' {
            escaped.push_str("__");
        } else {
            escaped.push_str(&format!("_u{:x}_", c as u32));
        }
    }
    escaped
}

/// Declared name as a binding identifier. `$` is reserved for namespace
/// objects, so it is replaced like any other non-identifier character.
pub(crate) fn sanitize(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    sanitized
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NamingScheme {
    #[default]
    Plain,
    Mangled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamingConfig {
    pub scheme: NamingScheme,
    pub hash_salt: Option<String>,
}

impl NamingConfig {
    pub fn mangled() -> Self {
        Self {
            scheme: NamingScheme::Mangled,
            hash_salt: None,
        }
    }
}
