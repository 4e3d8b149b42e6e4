mod common;

use common::{accessor, declared_names, Fixture};
use jsexport_core::{
    ClassMember, ErrorDeclaration, Expr, ExportedConstructor, ExportedDeclaration,
    ExportedFunction, ExportedModule, ExportedNamespace, ExportedObject, ExportedProperty,
    HashingNamer, Modality, Stmt,
};
use jsexport_lower::{
    lower_declarations, lower_module_export, ExportLowering, LoweringConfig, LoweringError,
};
use pretty_assertions::assert_eq;

fn namespace(name: &str, declarations: Vec<ExportedDeclaration>) -> ExportedDeclaration {
    ExportedDeclaration::Namespace(ExportedNamespace {
        name: name.to_string(),
        declarations,
    })
}

fn function(name: &str, id: jsexport_core::DeclId) -> ExportedDeclaration {
    ExportedDeclaration::Function(ExportedFunction::new(name, id))
}

#[test]
fn test_namespace_segments_are_created_once_in_any_order() {
    let mut fx = Fixture::new();
    let f = fx.function("f");
    let g = fx.function("g");
    let h = fx.function("h");
    let namer = HashingNamer::plain(&fx.sources);

    let forward = vec![
        namespace("a.b", vec![function("f", f)]),
        namespace("a.c", vec![function("g", g)]),
        namespace("a", vec![function("h", h)]),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    for declarations in [forward, backward] {
        let statements = lower_declarations(
            &declarations,
            Some(&Expr::ident("_")),
            &namer,
            &fx.sources,
            LoweringConfig::default(),
        )
        .unwrap();

        let mut names = declared_names(&statements);
        names.sort_unstable();
        assert_eq!(names, vec!["$a", "$a$b", "$a$c"]);
    }
}

#[test]
fn test_namespace_members_attach_to_resolved_segment() {
    let mut fx = Fixture::new();
    let f = fx.function("lib_f");
    let namer = HashingNamer::plain(&fx.sources);

    let statements = lower_declarations(
        &[namespace("lib", vec![function("f", f)])],
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();

    let slot = Expr::member(Expr::ident("_"), "lib");
    assert_eq!(
        statements,
        vec![
            Stmt::var(
                jsexport_core::BindingKind::Let,
                "$lib",
                Expr::or(slot.clone(), Expr::assign(slot, Expr::empty_object())),
            ),
            Expr::assign(
                Expr::member(Expr::ident("$lib"), "f"),
                Expr::ident("lib_f")
            )
            .make_stmt(),
        ]
    );
}

#[test]
fn test_lookalike_namespaces_do_not_share_an_object() {
    let mut fx = Fixture::new();
    let ids: Vec<_> = (0..4).map(|i| fx.function(&format!("f{}", i))).collect();
    let namer = HashingNamer::plain(&fx.sources);
    let tree: Vec<_> = ["my-lib", "my_lib", "a.b", "a$b"]
        .into_iter()
        .zip(&ids)
        .map(|(path, id)| namespace(path, vec![function("f", *id)]))
        .collect();

    let statements = lower_declarations(
        &tree,
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();

    let names = declared_names(&statements);
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(names.len(), 5);
    assert_eq!(unique.len(), names.len(), "duplicate bindings in {:?}", names);
}

#[test]
fn test_same_named_classes_in_different_namespaces_keep_both_bindings() {
    let mut fx = Fixture::new();
    let first = fx.class("Foo");
    let second = fx.class("Foo");
    let namer = HashingNamer::plain(&fx.sources);

    let statements = lower_declarations(
        &[
            namespace("x", vec![ExportedDeclaration::Class(first)]),
            namespace("y", vec![ExportedDeclaration::Class(second)]),
        ],
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();

    let attachments: Vec<&Stmt> = statements
        .iter()
        .filter(|statement| matches!(statement, Stmt::Expr(Expr::Assign { .. })))
        .collect();
    assert_eq!(
        attachments,
        vec![
            &Expr::assign(Expr::member(Expr::ident("$x"), "Foo"), Expr::ident("Foo")).make_stmt(),
            &Expr::assign(Expr::member(Expr::ident("$y"), "Foo"), Expr::ident("Foo_1"))
                .make_stmt(),
        ]
    );
}

#[test]
fn test_cache_is_scoped_to_one_lowering() {
    let mut fx = Fixture::new();
    let f = fx.function("f");
    let namer = HashingNamer::plain(&fx.sources);
    let tree = vec![namespace("a", vec![function("f", f)])];
    let root = Expr::ident("_");

    let mut first = ExportLowering::new(&namer, &fx.sources, LoweringConfig::default());
    let once = first.lower(&tree, Some(&root)).unwrap();
    let twice = first.lower(&tree, Some(&root)).unwrap();
    assert_eq!(declared_names(&once), vec!["$a"]);
    assert!(declared_names(&twice).is_empty());
    assert_eq!(first.namespace_cache().get("a"), Some("$a"));

    let mut fresh = ExportLowering::new(&namer, &fx.sources, LoweringConfig::default());
    assert_eq!(
        declared_names(&fresh.lower(&tree, Some(&root)).unwrap()),
        vec!["$a"]
    );
}

#[test]
fn test_module_mode_differs_only_in_outer_bindings() {
    let mut fx = Fixture::new();
    let greet = fx.function("greet");
    let run = fx.function("run");
    let x = fx.property("x", accessor(Modality::Final));
    let point = fx
        .class("Point")
        .with_member(ClassMember::Property(x))
        .with_member(ClassMember::Function(ExportedFunction::new("run", run)));
    let module = ExportedModule::new(
        "geometry",
        vec![
            function("greet", greet),
            ExportedDeclaration::Class(point),
        ],
    );
    let namer = HashingNamer::plain(&fx.sources);

    let attach =
        lower_module_export(&module, "_", &namer, &fx.sources, LoweringConfig::default()).unwrap();
    let exported = lower_module_export(
        &module,
        "_",
        &namer,
        &fx.sources,
        LoweringConfig::module_export(),
    )
    .unwrap();

    assert_eq!(attach.len(), exported.len());
    assert_eq!(
        attach[..2].to_vec(),
        vec![
            Expr::assign(Expr::member(Expr::ident("_"), "greet"), Expr::ident("greet")).make_stmt(),
            Expr::assign(Expr::member(Expr::ident("_"), "Point"), Expr::ident("Point")).make_stmt(),
        ]
    );
    assert_eq!(
        exported[..2].to_vec(),
        vec![Stmt::export("greet", "greet"), Stmt::export("Point", "Point")]
    );
    assert_eq!(attach[2..].to_vec(), exported[2..].to_vec());
}

#[test]
fn test_error_declarations_and_constructors_emit_nothing() {
    let fx = Fixture::new();
    let namer = HashingNamer::plain(&fx.sources);

    let statements = lower_declarations(
        &[
            ExportedDeclaration::Error(ErrorDeclaration {
                message: "unsupported type".to_string(),
            }),
            ExportedDeclaration::Constructor(ExportedConstructor::default()),
        ],
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();

    assert!(statements.is_empty());
}

#[test]
fn test_attach_only_declarations_need_a_namespace() {
    let mut fx = Fixture::new();
    let getter = fx.function("get_answer");
    let namer = HashingNamer::plain(&fx.sources);
    let property = ExportedProperty::new("answer", None).with_accessors(Some(getter), None);

    let err = lower_declarations(
        &[ExportedDeclaration::Property(property)],
        None,
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        LoweringError::MissingAttachPoint {
            kind: "property",
            name: "answer".to_string(),
        }
    );

    let module = ExportedModule::new("m", vec![namespace("util", Vec::new())]);
    let err = lower_module_export(
        &module,
        "_",
        &namer,
        &fx.sources,
        LoweringConfig::module_export(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        LoweringError::MissingAttachPoint {
            kind: "namespace",
            ..
        }
    ));
}

#[test]
fn test_malformed_namespace_path_is_rejected() {
    let fx = Fixture::new();
    let namer = HashingNamer::plain(&fx.sources);

    let err = lower_declarations(
        &[namespace("a..b", Vec::new())],
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        LoweringError::EmptyNamespacePath {
            path: "a..b".to_string()
        }
    );
}

#[test]
fn test_paired_object_is_defined_before_its_property() {
    let mut fx = Fixture::new();
    let object_class = fx.class("Settings");
    let instance = fx.function("Settings_getInstance");
    let getter = fx.function("get_settings");
    let namer = HashingNamer::plain(&fx.sources);

    let property = ExportedProperty::new("settings", None)
        .with_accessors(Some(getter), None)
        .with_object(ExportedObject::new("Settings", object_class.ir, instance));

    let statements = lower_declarations(
        &[ExportedDeclaration::Property(property)],
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();

    assert_eq!(
        statements,
        vec![
            Expr::define_property(
                Expr::ident("_"),
                "Settings",
                Some(Expr::ident("Settings_getInstance")),
                None
            )
            .make_stmt(),
            Expr::define_property(
                Expr::ident("_"),
                "settings",
                Some(Expr::ident("get_settings")),
                None
            )
            .make_stmt(),
        ]
    );
}

#[test]
fn test_object_members_then_statics() {
    let mut fx = Fixture::new();
    let config = fx.class("Config");
    let instance = fx.function("Config_getInstance");
    let reload = fx.function("reload");
    let version_getter = fx.function("Config_get_VERSION");
    let namer = HashingNamer::plain(&fx.sources);

    let object = ExportedObject::new("Config", config.ir, instance)
        .with_member(ClassMember::Function(ExportedFunction::new("reload", reload)))
        .with_member(ClassMember::Property(
            ExportedProperty::new("VERSION", None)
                .with_accessors(Some(version_getter), None)
                .with_static(true),
        ));

    let statements = lower_declarations(
        &[ExportedDeclaration::Object(object)],
        Some(&Expr::ident("_")),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();

    let prototype = Expr::prototype_of(Expr::ident("Config"));
    assert_eq!(
        statements,
        vec![
            Expr::define_property(
                Expr::ident("_"),
                "Config",
                Some(Expr::ident("Config_getInstance")),
                None
            )
            .make_stmt(),
            Expr::assign(
                Expr::member(prototype.clone(), "reload"),
                Expr::member(prototype, "reload")
            )
            .make_stmt(),
            Expr::define_property(
                Expr::member(Expr::ident("_"), "Config"),
                "VERSION",
                Some(Expr::ident("Config_get_VERSION")),
                None
            )
            .make_stmt(),
        ]
    );
}

#[test]
fn test_export_comments_wrap_blocks_when_enabled() {
    let mut fx = Fixture::new();
    let point = fx.class("Point");
    let namer = HashingNamer::plain(&fx.sources);
    let tree = vec![ExportedDeclaration::Class(point)];
    let root = Expr::ident("_");

    let plain = lower_declarations(
        &tree,
        Some(&root),
        &namer,
        &fx.sources,
        LoweringConfig::default(),
    )
    .unwrap();
    assert!(plain.iter().all(|s| !matches!(s, Stmt::Comment(_))));

    let commented = lower_declarations(
        &tree,
        Some(&root),
        &namer,
        &fx.sources,
        LoweringConfig::default().with_export_comments(true),
    )
    .unwrap();
    assert_eq!(commented.len(), plain.len() + 2);
    assert_eq!(commented[0], Stmt::comment("export: 'Point' class"));
    assert_eq!(commented[commented.len() - 1], Stmt::comment("end export"));
}
