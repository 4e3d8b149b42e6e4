/*! JavaScript statements and expressions produced by lowering.
 *
 * Only the constructs the export lowering actually needs: member access, assignment, the
 * `Object.defineProperty` descriptor idiom, function expressions, `bind`, variable declarations,
 * named re-exports and comments. Lowering builds trees of these; the emit crate prints them.
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    This,
    Null,
    StringLit(String),
    /// `object.property`
    Member {
        object: Box<Expr>,
        property: String,
    },
    /// `object['key']`
    Index {
        object: Box<Expr>,
        key: String,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    /// Object literal with ordered `key: value` pairs.
    Object(Vec<(String, Expr)>),
    Function(FunctionExpr),
    /// `Object.defineProperty(target, 'name', { configurable: true, get, set })`
    DefineProperty {
        target: Box<Expr>,
        name: String,
        getter: Option<Box<Expr>>,
        setter: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionExpr {
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
    /// Human-readable label, e.g. `getter forwarder`. Never printed as code.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BindingKind {
    Var,
    #[default]
    Let,
    Const,
}

impl BindingKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            BindingKind::Var => "var",
            BindingKind::Let => "let",
            BindingKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(Expr),
    VarDecl {
        kind: BindingKind,
        name: String,
        init: Option<Expr>,
    },
    Return(Option<Expr>),
    /// `export { local as alias };`
    Export { local: String, alias: String },
    /// `// text`
    Comment(String),
}

pub fn is_identifier(name: &str) -> bool {
    is_identifier_name(name) && !is_reserved_word(name)
}

/// Identifier syntax without the reserved-word check. Export names and
/// property keys accept `default`, `class` and friends.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "export"
            | "extends"
            | "false"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "import"
            | "in"
            | "instanceof"
            | "new"
            | "null"
            | "return"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
            | "let"
            | "static"
            | "enum"
            | "await"
    )
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::StringLit(value.into())
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// `object.name` when `name` is a valid identifier, `object['name']` otherwise.
    pub fn element_access(name: &str, object: Expr) -> Self {
        if is_identifier(name) {
            Expr::member(object, name)
        } else {
            Expr::Index {
                object: Box::new(object),
                key: name.to_string(),
            }
        }
    }

    pub fn prototype_of(class_ref: Expr) -> Self {
        Expr::member(class_ref, "prototype")
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(callee: Expr, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `self.bind(null, this)`
    pub fn bind_to_this(self) -> Self {
        Expr::call(Expr::member(self, "bind"), vec![Expr::Null, Expr::This])
    }

    pub fn empty_object() -> Self {
        Expr::Object(Vec::new())
    }

    pub fn function(
        parameters: Vec<String>,
        body: Vec<Stmt>,
        description: impl Into<String>,
    ) -> Self {
        Expr::Function(FunctionExpr {
            parameters,
            body,
            description: Some(description.into()),
        })
    }

    pub fn define_property(
        target: Expr,
        name: impl Into<String>,
        getter: Option<Expr>,
        setter: Option<Expr>,
    ) -> Self {
        Expr::DefineProperty {
            target: Box::new(target),
            name: name.into(),
            getter: getter.map(Box::new),
            setter: setter.map(Box::new),
        }
    }

    pub fn make_stmt(self) -> Stmt {
        Stmt::Expr(self)
    }

    pub fn as_function(&self) -> Option<&FunctionExpr> {
        match self {
            Expr::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl Stmt {
    pub fn var(kind: BindingKind, name: impl Into<String>, init: Expr) -> Self {
        Stmt::VarDecl {
            kind,
            name: name.into(),
            init: Some(init),
        }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    pub fn export(local: impl Into<String>, alias: impl Into<String>) -> Self {
        Stmt::Export {
            local: local.into(),
            alias: alias.into(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment(text.into())
    }

    pub fn as_define_property(&self) -> Option<(&Expr, &str, Option<&Expr>, Option<&Expr>)> {
        match self {
            Stmt::Expr(Expr::DefineProperty {
                target,
                name,
                getter,
                setter,
            }) => Some((target, name, getter.as_deref(), setter.as_deref())),
            _ => None,
        }
    }

    pub fn is_define_property(&self) -> bool {
        self.as_define_property().is_some()
    }
}
