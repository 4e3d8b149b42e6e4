use crate::declaration::{
    ClassLike, ClassMember, ExportedClass, ExportedDeclaration, ExportedObject, ExportedProperty,
};
use crate::persist::ExportBundle;
use crate::source::{DeclId, SourceKind, SourceModel, SourceTable};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationIssue {
    EmptyNamespacePath,
    EmptyNamespaceSegment { path: String },
    MissingSource { owner: String, id: DeclId },
    WrongSourceKind {
        owner: String,
        id: DeclId,
        expected: &'static str,
        actual: &'static str,
    },
    InterfaceMismatch { class: String },
    /// Following `overridden` from this accessor leads back to it.
    OverrideCycle { accessor: DeclId },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyNamespacePath => write!(f, "namespace with an empty path"),
            ValidationIssue::EmptyNamespaceSegment { path } => {
                write!(f, "namespace '{}' has an empty segment", path)
            }
            ValidationIssue::MissingSource { owner, id } => {
                write!(f, "'{}' refers to {} which is not in the source table", owner, id)
            }
            ValidationIssue::WrongSourceKind {
                owner,
                id,
                expected,
                actual,
            } => write!(
                f,
                "'{}' expects {} to be a {}, found a {}",
                owner, id, expected, actual
            ),
            ValidationIssue::InterfaceMismatch { class } => write!(
                f,
                "class '{}' is exported as a class but its source is an interface",
                class
            ),
            ValidationIssue::OverrideCycle { accessor } => {
                write!(f, "accessor {} overrides itself through a cycle", accessor)
            }
        }
    }
}

struct Validator<'a> {
    sources: &'a SourceTable,
    issues: Vec<ValidationIssue>,
}

/// Collects every structural problem in the bundle instead of stopping at the first.
pub fn validate_bundle(bundle: &ExportBundle) -> Vec<ValidationIssue> {
    let mut validator = Validator {
        sources: &bundle.sources,
        issues: Vec::new(),
    };
    for declaration in &bundle.module.declarations {
        validator.declaration(declaration);
    }
    validator.source_links();
    validator.override_cycles();
    validator.issues
}

#[derive(Clone, Copy)]
enum Visit {
    Open,
    Done,
}

impl Validator<'_> {
    fn expect(&mut self, owner: &str, id: DeclId, expected: &'static str) {
        match self.sources.declaration(id) {
            None => self.issues.push(ValidationIssue::MissingSource {
                owner: owner.to_string(),
                id,
            }),
            Some(decl) if decl.kind.label() != expected => {
                self.issues.push(ValidationIssue::WrongSourceKind {
                    owner: owner.to_string(),
                    id,
                    expected,
                    actual: decl.kind.label(),
                })
            }
            Some(_) => {}
        }
    }

    fn declaration(&mut self, declaration: &ExportedDeclaration) {
        match declaration {
            ExportedDeclaration::Namespace(namespace) => {
                if namespace.name.is_empty() {
                    self.issues.push(ValidationIssue::EmptyNamespacePath);
                } else if namespace.name.split('.').any(str::is_empty) {
                    self.issues.push(ValidationIssue::EmptyNamespaceSegment {
                        path: namespace.name.clone(),
                    });
                }
                for nested in &namespace.declarations {
                    self.declaration(nested);
                }
            }
            ExportedDeclaration::Function(function) => {
                self.expect(&function.name, function.ir, "function")
            }
            ExportedDeclaration::Property(property) => self.property(property),
            ExportedDeclaration::Object(object) => self.object(object),
            ExportedDeclaration::Class(class) => self.class(class),
            ExportedDeclaration::Constructor(_)
            | ExportedDeclaration::ConstructSignature(_)
            | ExportedDeclaration::Error(_) => {}
        }
    }

    fn property(&mut self, property: &ExportedProperty) {
        if let Some(ir) = property.ir {
            self.expect(&property.name, ir, "property");
        }
        for accessor in [property.getter, property.setter].into_iter().flatten() {
            self.expect(&property.name, accessor, "accessor");
        }
        if let Some(object) = &property.exported_object {
            self.object(object);
        }
    }

    fn object(&mut self, object: &ExportedObject) {
        self.expect(&object.name, object.ir, "class");
        self.expect(&object.name, object.getter, "function");
        self.class_like(object);
    }

    fn class(&mut self, class: &ExportedClass) {
        self.expect(&class.name, class.ir, "class");
        if !class.is_interface
            && self
                .sources
                .class(class.ir)
                .map(|info| info.is_interface)
                .unwrap_or(false)
        {
            self.issues.push(ValidationIssue::InterfaceMismatch {
                class: class.name.clone(),
            });
        }
        self.class_like(class);
    }

    fn class_like(&mut self, owner: &impl ClassLike) {
        for member in owner.members() {
            match member {
                ClassMember::Function(function) => {
                    self.expect(&function.name, function.ir, "function")
                }
                ClassMember::Property(property) => self.property(property),
                ClassMember::Object(object) => self.object(object),
            }
        }
        for nested in owner.nested_classes() {
            self.class(nested);
        }
    }

    /// Links inside the source table itself: property accessors and
    /// overridden ids must name accessors.
    fn source_links(&mut self) {
        let sources = self.sources;
        for declaration in sources.declarations.values() {
            match &declaration.kind {
                SourceKind::Property(info) => {
                    for accessor in [info.getter, info.setter].into_iter().flatten() {
                        self.expect(&declaration.name, accessor, "accessor");
                    }
                }
                SourceKind::Accessor(info) => {
                    for overridden in &info.overridden {
                        self.expect(&declaration.name, *overridden, "accessor");
                    }
                }
                SourceKind::Class(_) | SourceKind::Function(_) => {}
            }
        }
    }

    /// Depth-first walk over `overridden`, reporting each back edge.
    fn override_cycles(&mut self) {
        let sources = self.sources;
        let mut state: HashMap<DeclId, Visit> = HashMap::new();

        for (&start, declaration) in &sources.declarations {
            if !matches!(declaration.kind, SourceKind::Accessor(_)) || state.contains_key(&start) {
                continue;
            }
            state.insert(start, Visit::Open);
            let mut stack = vec![(start, 0usize)];

            while let Some(frame) = stack.last_mut() {
                let (current, index) = *frame;
                let overridden = sources
                    .accessor(current)
                    .map(|info| info.overridden.as_slice())
                    .unwrap_or(&[]);

                let Some(&target) = overridden.get(index) else {
                    state.insert(current, Visit::Done);
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                if sources.accessor(target).is_none() {
                    continue;
                }
                match state.get(&target) {
                    Some(Visit::Open) => self
                        .issues
                        .push(ValidationIssue::OverrideCycle { accessor: target }),
                    Some(Visit::Done) => {}
                    None => {
                        state.insert(target, Visit::Open);
                        stack.push((target, 0));
                    }
                }
            }
        }
    }
}
