use crate::js::{is_identifier, BindingKind, Expr, Stmt};

#[test]
fn test_identifier_detection() {
    assert!(is_identifier("foo"));
    assert!(is_identifier("$ns_1"));
    assert!(!is_identifier("1abc"));
    assert!(!is_identifier("with-dash"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("class"));
}

#[test]
fn test_element_access_picks_dotted_or_bracketed() {
    let dotted = Expr::element_access("bar", Expr::ident("foo"));
    assert_eq!(dotted, Expr::member(Expr::ident("foo"), "bar"));

    let bracketed = Expr::element_access("my-prop", Expr::ident("foo"));
    assert!(matches!(bracketed, Expr::Index { ref key, .. } if key == "my-prop"));
}

#[test]
fn test_bind_to_this_shape() {
    let bound = Expr::ident("Inner").bind_to_this();
    match bound {
        Expr::Call { callee, arguments } => {
            assert_eq!(*callee, Expr::member(Expr::ident("Inner"), "bind"));
            assert_eq!(arguments, vec![Expr::Null, Expr::This]);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_define_property_accessors() {
    let stmt = Expr::define_property(
        Expr::prototype_of(Expr::ident("Foo")),
        "x",
        Some(Expr::ident("getX")),
        None,
    )
    .make_stmt();

    let (target, name, getter, setter) = stmt.as_define_property().unwrap();
    assert_eq!(*target, Expr::member(Expr::ident("Foo"), "prototype"));
    assert_eq!(name, "x");
    assert_eq!(getter, Some(&Expr::ident("getX")));
    assert!(setter.is_none());
    assert!(!Stmt::comment("x").is_define_property());
}

#[test]
fn test_binding_keywords() {
    assert_eq!(BindingKind::Var.keyword(), "var");
    assert_eq!(BindingKind::default().keyword(), "let");
    assert_eq!(BindingKind::Const.keyword(), "const");
}
