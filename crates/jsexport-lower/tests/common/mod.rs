#![allow(dead_code)]

use jsexport_core::{
    AccessorInfo, ClassInfo, DeclId, ExportedClass, ExportedProperty, FunctionInfo, Modality,
    PropertyInfo, SourceTable, Stmt, Visibility,
};

pub fn accessor(modality: Modality) -> AccessorInfo {
    AccessorInfo {
        modality,
        visibility: Visibility::Public,
        is_exported: true,
        ..Default::default()
    }
}

/// Builds the source table and export tree side by side.
#[derive(Default)]
pub struct Fixture {
    pub sources: SourceTable,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&mut self, name: &str) -> ExportedClass {
        let id = self.sources.add_class(name, ClassInfo::default());
        ExportedClass::new(name, id)
    }

    pub fn class_with(&mut self, name: &str, info: ClassInfo) -> ExportedClass {
        let id = self.sources.add_class(name, info);
        ExportedClass::new(name, id)
    }

    pub fn function(&mut self, name: &str) -> DeclId {
        self.sources.add_function(name, FunctionInfo::default())
    }

    /// Read-only property `name` whose getter is `get_<name>`.
    pub fn property(&mut self, name: &str, getter: AccessorInfo) -> ExportedProperty {
        self.property_with(name, getter, |_| {})
    }

    pub fn property_with(
        &mut self,
        name: &str,
        getter: AccessorInfo,
        tweak: impl FnOnce(&mut PropertyInfo),
    ) -> ExportedProperty {
        let getter = self.sources.add_accessor(format!("get_{}", name), getter);
        let mut info = PropertyInfo {
            getter: Some(getter),
            ..Default::default()
        };
        tweak(&mut info);
        let id = self.sources.add_property(name, info);
        ExportedProperty::new(name, Some(id)).with_accessors(Some(getter), None)
    }

    pub fn getter_of(&self, property: &ExportedProperty) -> DeclId {
        property.getter.unwrap()
    }
}

pub fn descriptors(statements: &[Stmt]) -> Vec<&Stmt> {
    statements
        .iter()
        .filter(|statement| statement.is_define_property())
        .collect()
}

pub fn declared_names(statements: &[Stmt]) -> Vec<&str> {
    statements
        .iter()
        .filter_map(|statement| match statement {
            Stmt::VarDecl { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect()
}
