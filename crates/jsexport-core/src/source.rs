/*! Read-only view of the upstream semantic model.
 *
 * The export tree only carries handles back to the declarations it was built from. Whatever the
 * lowering stage needs to know about those declarations (modality, visibility, what they override)
 * is answered here, and nothing in this crate ever writes through a handle.
 */

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
}

impl Modality {
    pub fn is_final(&self) -> bool {
        matches!(self, Modality::Final)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassInfo {
    pub is_interface: bool,
    pub is_enum_entry: bool,
    pub is_inner: bool,
    /// JS-visible name of the companion object, if the class has one.
    pub companion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionInfo {
    /// Declaration whose compiled body implements this function when it is
    /// an inherited member. `None` means the function implements itself.
    pub real_override_target: Option<DeclId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorInfo {
    /// Accessors this one overrides, nearest first.
    pub overridden: Vec<DeclId>,
    pub modality: Modality,
    pub visibility: Visibility,
    pub is_exported: bool,
    pub is_external: bool,
    pub has_extension_receiver: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyInfo {
    pub getter: Option<DeclId>,
    pub setter: Option<DeclId>,
    pub is_fake_override: bool,
    /// Enum entries re-declare some inherited properties; those must be
    /// emitted again even though they are fake overrides.
    pub is_enum_fake_override: bool,
    pub js_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Class(ClassInfo),
    Function(FunctionInfo),
    Accessor(AccessorInfo),
    Property(PropertyInfo),
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Class(_) => "class",
            SourceKind::Function(_) => "function",
            SourceKind::Accessor(_) => "accessor",
            SourceKind::Property(_) => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDeclaration {
    pub name: String,
    pub kind: SourceKind,
}

pub trait SourceModel {
    fn declaration(&self, id: DeclId) -> Option<&SourceDeclaration>;

    fn name(&self, id: DeclId) -> Option<&str> {
        self.declaration(id).map(|decl| decl.name.as_str())
    }

    fn class(&self, id: DeclId) -> Option<&ClassInfo> {
        match &self.declaration(id)?.kind {
            SourceKind::Class(info) => Some(info),
            _ => None,
        }
    }

    fn function(&self, id: DeclId) -> Option<&FunctionInfo> {
        match &self.declaration(id)?.kind {
            SourceKind::Function(info) => Some(info),
            _ => None,
        }
    }

    fn accessor(&self, id: DeclId) -> Option<&AccessorInfo> {
        match &self.declaration(id)?.kind {
            SourceKind::Accessor(info) => Some(info),
            _ => None,
        }
    }

    fn property(&self, id: DeclId) -> Option<&PropertyInfo> {
        match &self.declaration(id)?.kind {
            SourceKind::Property(info) => Some(info),
            _ => None,
        }
    }

    /// Whether the nearest accessor overridden by `id` is itself exported.
    /// An accessor that overrides nothing does not override an exported one.
    fn overrides_exported(&self, id: DeclId) -> bool {
        self.accessor(id)
            .and_then(|info| info.overridden.first())
            .and_then(|nearest| self.accessor(*nearest))
            .map(|nearest| nearest.is_exported)
            .unwrap_or(false)
    }

    /// Whether `id` is external or transitively overrides an external accessor.
    /// Each accessor is visited at most once, so a cyclic graph terminates.
    fn overrides_external(&self, id: DeclId) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![id];

        while let Some(current) = pending.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(info) = self.accessor(current) else {
                continue;
            };
            if info.is_external {
                return true;
            }
            pending.extend(info.overridden.iter().copied());
        }

        false
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceTable {
    pub declarations: IndexMap<DeclId, SourceDeclaration>,
}

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One past the most recently inserted id. Falls back to the lowest free
    /// id when that overflows or is taken, as in a table loaded out of order.
    fn next_id(&self) -> DeclId {
        let after_last = match self.declarations.last() {
            Some((last, _)) => last.0.checked_add(1),
            None => Some(0),
        };
        match after_last {
            Some(next) if !self.declarations.contains_key(&DeclId(next)) => DeclId(next),
            _ => self.lowest_free_id(),
        }
    }

    fn lowest_free_id(&self) -> DeclId {
        (0..=u32::MAX)
            .map(DeclId)
            .find(|id| !self.declarations.contains_key(id))
            // Only a table holding every possible id has no free slot.
            .unwrap_or(DeclId(u32::MAX))
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: SourceKind) -> DeclId {
        let id = self.next_id();
        self.declarations.insert(
            id,
            SourceDeclaration {
                name: name.into(),
                kind,
            },
        );
        id
    }

    pub fn add_class(&mut self, name: impl Into<String>, info: ClassInfo) -> DeclId {
        self.insert(name, SourceKind::Class(info))
    }

    pub fn add_function(&mut self, name: impl Into<String>, info: FunctionInfo) -> DeclId {
        self.insert(name, SourceKind::Function(info))
    }

    pub fn add_accessor(&mut self, name: impl Into<String>, info: AccessorInfo) -> DeclId {
        self.insert(name, SourceKind::Accessor(info))
    }

    pub fn add_property(&mut self, name: impl Into<String>, info: PropertyInfo) -> DeclId {
        self.insert(name, SourceKind::Property(info))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl SourceModel for SourceTable {
    fn declaration(&self, id: DeclId) -> Option<&SourceDeclaration> {
        self.declarations.get(&id)
    }
}
