use crate::declaration::{
    ClassMember, ErrorDeclaration, ExportedClass, ExportedDeclaration, ExportedFunction,
    ExportedModule, ExportedNamespace, ExportedObject, ExportedProperty,
};
use crate::source::DeclId;

fn sample_module() -> ExportedModule {
    let class = ExportedClass::new("Outer", DeclId(0))
        .with_member(ClassMember::Function(ExportedFunction::new("run", DeclId(1))))
        .with_member(ClassMember::Property(ExportedProperty::new(
            "size",
            Some(DeclId(2)),
        )))
        .with_nested(ExportedClass::new("Inner", DeclId(3)));

    ExportedModule::new(
        "lib",
        vec![
            ExportedDeclaration::Namespace(ExportedNamespace {
                name: "a.b".to_string(),
                declarations: vec![
                    ExportedDeclaration::Class(class),
                    ExportedDeclaration::Class(ExportedClass::interface("I", DeclId(4))),
                ],
            }),
            ExportedDeclaration::Object(ExportedObject::new("Obj", DeclId(5), DeclId(6))),
            ExportedDeclaration::Error(ErrorDeclaration {
                message: "unsupported".to_string(),
            }),
        ],
    )
}

#[test]
fn test_tree_stats_counts_every_variant() {
    let stats = sample_module().stats();

    assert_eq!(stats.namespaces, 1);
    assert_eq!(stats.classes, 2);
    assert_eq!(stats.interfaces, 1);
    assert_eq!(stats.functions, 1);
    assert_eq!(stats.properties, 1);
    assert_eq!(stats.objects, 1);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.total(), 8);
}

#[test]
fn test_declarations_serialize_with_kind_tag() {
    let decl = ExportedDeclaration::Function(ExportedFunction::new("main", DeclId(7)));
    let json = serde_json::to_value(&decl).unwrap();

    assert_eq!(json["kind"], "Function");
    assert_eq!(json["name"], "main");
    assert_eq!(json["ir"], 7);
}

#[test]
fn test_class_defaults_when_deserializing() {
    let json = r#"{ "kind": "Class", "name": "Foo", "ir": 3 }"#;
    let decl: ExportedDeclaration = serde_json::from_str(json).unwrap();

    match decl {
        ExportedDeclaration::Class(class) => {
            assert!(!class.is_interface);
            assert!(class.members.is_empty());
            assert!(class.nested_classes.is_empty());
        }
        other => panic!("expected class, got {:?}", other),
    }
}

#[test]
fn test_kind_names() {
    let module = sample_module();
    let kinds: Vec<_> = module.declarations.iter().map(|d| d.kind_name()).collect();
    assert_eq!(kinds, vec!["namespace", "object", "error"]);
}
