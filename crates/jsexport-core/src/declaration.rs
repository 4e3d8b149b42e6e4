/*! The exported-declaration tree.
 *
 * One tree per module export: namespaces, functions, properties, singleton objects and classes,
 * exactly as upstream analysis decided to expose them. The tree is built once, handed to lowering
 * once, and never mutated on the way.
 */

use crate::source::DeclId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedModule {
    pub name: String,
    pub declarations: Vec<ExportedDeclaration>,
}

impl ExportedModule {
    pub fn new(name: impl Into<String>, declarations: Vec<ExportedDeclaration>) -> Self {
        Self {
            name: name.into(),
            declarations,
        }
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for declaration in &self.declarations {
            stats.record(declaration, 1);
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ExportedDeclaration {
    Namespace(ExportedNamespace),
    Function(ExportedFunction),
    Constructor(ExportedConstructor),
    ConstructSignature(ExportedConstructSignature),
    Property(ExportedProperty),
    Object(ExportedObject),
    Class(ExportedClass),
    Error(ErrorDeclaration),
}

impl ExportedDeclaration {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExportedDeclaration::Namespace(_) => "namespace",
            ExportedDeclaration::Function(_) => "function",
            ExportedDeclaration::Constructor(_) => "constructor",
            ExportedDeclaration::ConstructSignature(_) => "construct signature",
            ExportedDeclaration::Property(_) => "property",
            ExportedDeclaration::Object(_) => "object",
            ExportedDeclaration::Class(_) => "class",
            ExportedDeclaration::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedNamespace {
    /// Dotted path, e.g. `foo.bar`.
    pub name: String,
    pub declarations: Vec<ExportedDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedFunction {
    pub name: String,
    pub ir: DeclId,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedParameter {
    pub name: String,
    #[serde(default)]
    pub has_default: bool,
}

/// Signature-only; constructors have no runtime emission of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedConstructor {
    #[serde(default)]
    pub parameters: Vec<ExportedParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedConstructSignature {
    #[serde(default)]
    pub parameters: Vec<ExportedParameter>,
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedProperty {
    pub name: String,
    /// Source property; member properties without one are never emitted.
    pub ir: Option<DeclId>,
    #[serde(default)]
    pub is_static: bool,
    pub getter: Option<DeclId>,
    pub setter: Option<DeclId>,
    /// Singleton object paired with this property (companion-like value).
    pub exported_object: Option<Box<ExportedObject>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedObject {
    pub name: String,
    pub ir: DeclId,
    /// Accessor returning the singleton instance.
    pub getter: DeclId,
    #[serde(default)]
    pub members: Vec<ClassMember>,
    #[serde(default)]
    pub nested_classes: Vec<ExportedClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedClass {
    pub name: String,
    pub ir: DeclId,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub members: Vec<ClassMember>,
    #[serde(default)]
    pub nested_classes: Vec<ExportedClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDeclaration {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassMember {
    Function(ExportedFunction),
    Property(ExportedProperty),
    Object(ExportedObject),
}

/// Shared shape of classes and singleton objects.
pub trait ClassLike {
    fn name(&self) -> &str;
    fn ir(&self) -> DeclId;
    fn members(&self) -> &[ClassMember];
    fn nested_classes(&self) -> &[ExportedClass];

    fn is_interface(&self) -> bool {
        false
    }
}

impl ClassLike for ExportedClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interface(&self) -> bool {
        self.is_interface
    }

    fn ir(&self) -> DeclId {
        self.ir
    }

    fn members(&self) -> &[ClassMember] {
        &self.members
    }

    fn nested_classes(&self) -> &[ExportedClass] {
        &self.nested_classes
    }
}

impl ClassLike for ExportedObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn ir(&self) -> DeclId {
        self.ir
    }

    fn members(&self) -> &[ClassMember] {
        &self.members
    }

    fn nested_classes(&self) -> &[ExportedClass] {
        &self.nested_classes
    }
}

impl ExportedFunction {
    pub fn new(name: impl Into<String>, ir: DeclId) -> Self {
        Self {
            name: name.into(),
            ir,
            is_static: false,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

impl ExportedProperty {
    pub fn new(name: impl Into<String>, ir: Option<DeclId>) -> Self {
        Self {
            name: name.into(),
            ir,
            is_static: false,
            getter: None,
            setter: None,
            exported_object: None,
        }
    }

    pub fn with_accessors(mut self, getter: Option<DeclId>, setter: Option<DeclId>) -> Self {
        self.getter = getter;
        self.setter = setter;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_object(mut self, object: ExportedObject) -> Self {
        self.exported_object = Some(Box::new(object));
        self
    }
}

impl ExportedClass {
    pub fn new(name: impl Into<String>, ir: DeclId) -> Self {
        Self {
            name: name.into(),
            ir,
            is_interface: false,
            members: Vec::new(),
            nested_classes: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>, ir: DeclId) -> Self {
        Self {
            is_interface: true,
            ..Self::new(name, ir)
        }
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_nested(mut self, nested: ExportedClass) -> Self {
        self.nested_classes.push(nested);
        self
    }
}

impl ExportedObject {
    pub fn new(name: impl Into<String>, ir: DeclId, getter: DeclId) -> Self {
        Self {
            name: name.into(),
            ir,
            getter,
            members: Vec::new(),
            nested_classes: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_nested(mut self, nested: ExportedClass) -> Self {
        self.nested_classes.push(nested);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub namespaces: usize,
    pub functions: usize,
    pub constructors: usize,
    pub properties: usize,
    pub objects: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub errors: usize,
    pub max_depth: usize,
}

impl TreeStats {
    /// Every declaration in the tree, member declarations included.
    pub fn total(&self) -> usize {
        self.namespaces
            + self.functions
            + self.constructors
            + self.properties
            + self.objects
            + self.classes
            + self.interfaces
            + self.errors
    }

    fn record(&mut self, declaration: &ExportedDeclaration, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        match declaration {
            ExportedDeclaration::Namespace(namespace) => {
                self.namespaces += 1;
                for nested in &namespace.declarations {
                    self.record(nested, depth + 1);
                }
            }
            ExportedDeclaration::Function(_) => self.functions += 1,
            ExportedDeclaration::Constructor(_) | ExportedDeclaration::ConstructSignature(_) => {
                self.constructors += 1
            }
            ExportedDeclaration::Property(property) => self.record_property(property, depth),
            ExportedDeclaration::Object(object) => self.record_object(object, depth),
            ExportedDeclaration::Class(class) => self.record_class(class, depth),
            ExportedDeclaration::Error(_) => self.errors += 1,
        }
    }

    fn record_property(&mut self, property: &ExportedProperty, depth: usize) {
        self.properties += 1;
        if let Some(object) = &property.exported_object {
            self.record_object(object, depth + 1);
        }
    }

    fn record_object(&mut self, object: &ExportedObject, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        self.objects += 1;
        self.record_class_like(object, depth);
    }

    fn record_class(&mut self, class: &ExportedClass, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
        if class.is_interface {
            self.interfaces += 1;
        } else {
            self.classes += 1;
        }
        self.record_class_like(class, depth);
    }

    fn record_class_like(&mut self, owner: &impl ClassLike, depth: usize) {
        for member in owner.members() {
            match member {
                ClassMember::Function(_) => self.functions += 1,
                ClassMember::Property(property) => self.record_property(property, depth + 1),
                ClassMember::Object(object) => self.record_object(object, depth + 1),
            }
        }
        for nested in owner.nested_classes() {
            self.record_class(nested, depth + 1);
        }
    }
}
