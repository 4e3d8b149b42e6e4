use crate::config::{ExportMode, LoweringConfig};
use crate::errors::{LoweringError, Result};
use crate::member_policy::MemberPolicy;
use crate::namespace::{resolve_namespace_path, NamespaceCache};
use jsexport_core::{
    ClassInfo, ClassLike, ClassMember, DeclId, Expr, ExportedClass, ExportedDeclaration,
    ExportedFunction, ExportedModule, ExportedNamespace, ExportedObject, ExportedProperty, Namer,
    SourceModel, Stmt,
};
use tracing::debug;

/// Lowers one export tree. Create one per top-level export so that the
/// namespace cache never leaks between modules.
pub struct ExportLowering<'a> {
    pub(crate) namer: &'a dyn Namer,
    pub(crate) model: &'a dyn SourceModel,
    pub(crate) config: LoweringConfig,
    namespaces: NamespaceCache,
}

impl<'a> ExportLowering<'a> {
    pub fn new(namer: &'a dyn Namer, model: &'a dyn SourceModel, config: LoweringConfig) -> Self {
        Self {
            namer,
            model,
            config,
            namespaces: NamespaceCache::new(),
        }
    }

    pub fn namespace_cache(&self) -> &NamespaceCache {
        &self.namespaces
    }

    pub fn config(&self) -> &LoweringConfig {
        &self.config
    }

    pub(crate) fn policy(&self) -> MemberPolicy<'a> {
        MemberPolicy::new(self.namer, self.model)
    }

    /// Attach mode hangs everything off `internal_module_name`; module-export
    /// mode emits named exports instead.
    pub fn generate_module_export(
        &mut self,
        module: &ExportedModule,
        internal_module_name: &str,
    ) -> Result<Vec<Stmt>> {
        let namespace = match self.config.mode {
            ExportMode::NamespaceAttach => Some(Expr::ident(internal_module_name)),
            ExportMode::ModuleExport => None,
        };
        self.lower(&module.declarations, namespace.as_ref())
    }

    pub fn lower(
        &mut self,
        declarations: &[ExportedDeclaration],
        namespace: Option<&Expr>,
    ) -> Result<Vec<Stmt>> {
        let mode = self.config.mode;
        let mut statements = Vec::new();
        for declaration in declarations {
            statements.extend(self.generate_declaration_export(declaration, namespace, mode)?);
        }
        Ok(statements)
    }

    pub fn generate_declaration_export(
        &mut self,
        declaration: &ExportedDeclaration,
        namespace: Option<&Expr>,
        mode: ExportMode,
    ) -> Result<Vec<Stmt>> {
        match declaration {
            ExportedDeclaration::Namespace(ns) => self.generate_namespace(ns, namespace, mode),
            ExportedDeclaration::Function(function) => {
                Ok(self.generate_function(function, namespace, mode))
            }
            ExportedDeclaration::Constructor(_) | ExportedDeclaration::ConstructSignature(_) => {
                Ok(Vec::new())
            }
            ExportedDeclaration::Property(property) => self.generate_property(property, namespace),
            ExportedDeclaration::Error(_) => Ok(Vec::new()),
            ExportedDeclaration::Object(object) => self.generate_object(object, namespace),
            ExportedDeclaration::Class(class) => self.generate_class(class, namespace, mode),
        }
    }

    fn require_namespace<'n>(
        namespace: Option<&'n Expr>,
        kind: &'static str,
        name: &str,
    ) -> Result<&'n Expr> {
        namespace.ok_or_else(|| LoweringError::MissingAttachPoint {
            kind,
            name: name.to_string(),
        })
    }

    pub(crate) fn class_info(&self, id: DeclId) -> Result<&'a ClassInfo> {
        self.model.class(id).ok_or(LoweringError::UnknownSource {
            id,
            expected: "class",
        })
    }

    fn generate_namespace(
        &mut self,
        namespace_decl: &ExportedNamespace,
        namespace: Option<&Expr>,
        mode: ExportMode,
    ) -> Result<Vec<Stmt>> {
        let current = Self::require_namespace(namespace, "namespace", &namespace_decl.name)?;
        let resolved = resolve_namespace_path(
            &namespace_decl.name,
            current,
            &mut self.namespaces,
            self.namer,
            self.config.binding_kind,
        )?;

        let mut statements = resolved.statements;
        for nested in &namespace_decl.declarations {
            statements.extend(self.generate_declaration_export(
                nested,
                Some(&resolved.handle),
                mode,
            )?);
        }
        Ok(statements)
    }

    fn generate_function(
        &self,
        function: &ExportedFunction,
        namespace: Option<&Expr>,
        mode: ExportMode,
    ) -> Vec<Stmt> {
        let name = self.namer.static_name(function.ir);
        if mode.is_module_export() {
            return vec![Stmt::export(name, function.name.clone())];
        }
        match namespace {
            Some(namespace) => vec![Expr::assign(
                Expr::element_access(&function.name, namespace.clone()),
                Expr::ident(name),
            )
            .make_stmt()],
            None => Vec::new(),
        }
    }

    fn generate_property(
        &mut self,
        property: &ExportedProperty,
        namespace: Option<&Expr>,
    ) -> Result<Vec<Stmt>> {
        let namespace = Self::require_namespace(namespace, "property", &property.name)?;

        let mut statements = match &property.exported_object {
            Some(object) => self.generate_object(object, Some(namespace))?,
            None => Vec::new(),
        };

        let getter = property
            .getter
            .map(|id| Expr::ident(self.namer.static_name(id)));
        let setter = property
            .setter
            .map(|id| Expr::ident(self.namer.static_name(id)));
        statements.push(
            Expr::define_property(namespace.clone(), property.name.clone(), getter, setter)
                .make_stmt(),
        );
        Ok(statements)
    }

    fn generate_object(
        &mut self,
        object: &ExportedObject,
        namespace: Option<&Expr>,
    ) -> Result<Vec<Stmt>> {
        let namespace = Self::require_namespace(namespace, "object", &object.name)?;
        let object_ref = Expr::element_access(&object.name, namespace.clone());
        let getter = Expr::ident(self.namer.static_name(object.getter));

        let mut statements = vec![Expr::define_property(
            namespace.clone(),
            object.name.clone(),
            Some(getter),
            None,
        )
        .make_stmt()];
        statements.extend(self.generate_members_declarations(object)?);
        statements.extend(self.generate_static_declarations(object, &object_ref)?);

        Ok(self.wrap_with_export_comment(statements, &format!("'{}' object", object.name)))
    }

    fn generate_class(
        &mut self,
        class: &ExportedClass,
        namespace: Option<&Expr>,
        mode: ExportMode,
    ) -> Result<Vec<Stmt>> {
        let info = self.class_info(class.ir)?;
        if class.is_interface || info.is_interface {
            debug!(class = %class.name, "interfaces have no runtime representation");
            return Ok(Vec::new());
        }

        let name = self.namer.static_name(class.ir);
        let class_ref = Expr::ident(name.clone());

        let binding = if mode.is_module_export() {
            Some(Stmt::export(name, class.name.clone()))
        } else {
            namespace.map(|namespace| {
                Expr::assign(
                    Expr::element_access(&class.name, namespace.clone()),
                    class_ref.clone(),
                )
                .make_stmt()
            })
        };

        let mut statements: Vec<Stmt> = binding.into_iter().collect();
        statements.extend(self.generate_members_declarations(class)?);
        statements.extend(self.generate_static_declarations(class, &class_ref)?);

        for nested in &class.nested_classes {
            if self.class_info(nested.ir)?.is_inner {
                statements.push(self.generate_inner_class_assignment(nested, class)?);
            }
        }

        Ok(self.wrap_with_export_comment(statements, &format!("'{}' class", class.name)))
    }

    /// Static side of a class-like: secondary constructors (unless the owner
    /// is inner, whose binder rebinds them instead), non-inner nested objects,
    /// static properties, then every nested class.
    fn generate_static_declarations(
        &mut self,
        owner: &dyn ClassLike,
        static_ref: &Expr,
    ) -> Result<Vec<Stmt>> {
        let owner_is_inner = self.class_info(owner.ir())?.is_inner;
        let mut statements = Vec::new();

        if !owner_is_inner {
            for member in owner.members() {
                if let ClassMember::Function(function) = member {
                    if function.is_static {
                        statements.extend(self.generate_function(
                            function,
                            Some(static_ref),
                            ExportMode::NamespaceAttach,
                        ));
                    }
                }
            }
        }

        for member in owner.members() {
            match member {
                ClassMember::Object(object) if !self.class_info(object.ir)?.is_inner => {
                    statements.extend(self.generate_object(object, Some(static_ref))?);
                }
                ClassMember::Property(property) if property.is_static => {
                    statements.extend(self.generate_property(property, Some(static_ref))?);
                }
                _ => {}
            }
        }

        for nested in owner.nested_classes() {
            statements.extend(self.generate_class(
                nested,
                Some(static_ref),
                ExportMode::NamespaceAttach,
            )?);
        }

        Ok(statements)
    }

    /// Prototype side: instance functions and member properties.
    fn generate_members_declarations(&self, owner: &dyn ClassLike) -> Result<Vec<Stmt>> {
        let policy = self.policy();
        let mut statements = Vec::new();
        for member in owner.members() {
            match member {
                ClassMember::Property(property) if !property.is_static => {
                    if let Some(statement) = policy.property_statement(property, owner)? {
                        statements.push(statement);
                    }
                }
                ClassMember::Function(function) if !function.is_static => {
                    statements.push(policy.function_statement(function, owner)?);
                }
                _ => {}
            }
        }
        Ok(statements)
    }

    fn wrap_with_export_comment(&self, statements: Vec<Stmt>, header: &str) -> Vec<Stmt> {
        if !self.config.export_comments {
            return statements;
        }
        let mut wrapped = Vec::with_capacity(statements.len() + 2);
        wrapped.push(Stmt::comment(format!("export: {}", header)));
        wrapped.extend(statements);
        wrapped.push(Stmt::comment("end export"));
        wrapped
    }
}
