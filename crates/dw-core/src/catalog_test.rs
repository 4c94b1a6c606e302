use super::*;
use serde_json::json;

fn sample() -> Catalog {
    Catalog::from_objects(vec![
        CatalogObject::new("db", "s", "in1", ObjectKind::Table, "create table db.s.in1 (id int)")
            .with_columns(vec![Column {
                name: "id".into(),
                datatype: "int".into(),
            }]),
        CatalogObject::new("db", "s", "in2", ObjectKind::Table, "create table db.s.in2 (id int)"),
        CatalogObject::new(
            "db",
            "s",
            "v_join",
            ObjectKind::View,
            "create view db.s.v_join as select * from s.in1 join in2 on in1.id = in2.id",
        ),
        CatalogObject::new(
            "db",
            "s",
            "load_out",
            ObjectKind::Procedure,
            "create procedure db.s.load_out() as $$ begin insert into db.s.in2 select * from in1; end $$",
        )
        .with_columns(vec![]),
        CatalogObject::new("db", "s", "broken", ObjectKind::View, UNFETCHABLE_DDL),
    ])
    .unwrap()
}

#[test]
fn test_qualified_name() {
    let object = CatalogObject::new("db", "s", "t", ObjectKind::Table, "");
    assert_eq!(object.qualified_name(), "db.s.t");
}

#[test]
fn test_duplicate_object_is_fatal() {
    let err = Catalog::from_objects(vec![
        CatalogObject::new("db", "s", "t", ObjectKind::Table, ""),
        CatalogObject::new("db", "s", "t", ObjectKind::View, ""),
    ])
    .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateObject { name } if name == "db.s.t"));
}

#[test]
fn test_paths_keep_catalog_order() {
    assert_eq!(
        sample().paths(),
        vec!["db.s.in1", "db.s.in2", "db.s.v_join", "db.s.load_out", "db.s.broken"]
    );
}

#[test]
fn test_enrich_view_parents() {
    let mut catalog = sample();
    catalog.enrich(&NormalizeOptions::default());

    let view = catalog.get("db.s.v_join").unwrap();
    assert_eq!(
        view.parents,
        vec![
            Reference::new("in2", "db.s.in2"),
            Reference::new("s.in1", "db.s.in1"),
        ]
    );
    assert!(view.children.is_none());
    assert!(view.ddl_text.starts_with("create view db.s.v_join as select"));
}

#[test]
fn test_enrich_keeps_source_ddl() {
    let ddl = "-- daily rollup\ncreate view db.s.v as\n  select *\n  from db.s.t";
    let mut catalog = Catalog::from_objects(vec![
        CatalogObject::new("db", "s", "t", ObjectKind::Table, "create table db.s.t (id int)"),
        CatalogObject::new("db", "s", "v", ObjectKind::View, ddl),
    ])
    .unwrap();
    catalog.enrich(&NormalizeOptions::default());

    let view = catalog.get("db.s.v").unwrap();
    assert_eq!(view.ddl_text, ddl);
    assert_eq!(view.parents, vec![Reference::new("db.s.t", "db.s.t")]);
}

#[test]
fn test_enrich_ambiguous_name_ignores_catalog_order() {
    let objects = vec![
        CatalogObject::new("db", "y", "t", ObjectKind::Table, ""),
        CatalogObject::new("db", "x", "t", ObjectKind::Table, ""),
        CatalogObject::new("db", "s", "v", ObjectKind::View, "create view db.s.v as select * from t"),
    ];
    let mut reversed = objects.clone();
    reversed.reverse();

    for objects in [objects, reversed] {
        let mut catalog = Catalog::from_objects(objects).unwrap();
        catalog.enrich(&NormalizeOptions::default());
        assert_eq!(
            catalog.get("db.s.v").unwrap().parents,
            vec![Reference::new("t", "db.x.t")]
        );
    }
}

#[test]
fn test_sorted_paths() {
    assert_eq!(
        sample().sorted_paths(),
        vec!["db.s.broken", "db.s.in1", "db.s.in2", "db.s.load_out", "db.s.v_join"]
    );
}

#[test]
fn test_enrich_procedure_children() {
    let mut catalog = sample();
    catalog.enrich(&NormalizeOptions::default());

    let proc = catalog.get("db.s.load_out").unwrap();
    assert_eq!(proc.parents, vec![Reference::new("in1", "db.s.in1")]);
    assert_eq!(
        proc.children,
        Some(vec![Reference::new("db.s.in2", "db.s.in2")])
    );
    assert!(proc.columns.is_none());
}

#[test]
fn test_enrich_unfetchable_ddl() {
    let mut catalog = sample();
    catalog.enrich(&NormalizeOptions::default());

    let broken = catalog.get("db.s.broken").unwrap();
    assert!(broken.parents.is_empty());
    assert!(broken.is_unfetchable());
}

#[test]
fn test_enrich_keeps_table_columns() {
    let mut catalog = sample();
    catalog.enrich(&NormalizeOptions::default());
    assert_eq!(catalog.get("db.s.in1").unwrap().columns.as_ref().unwrap().len(), 1);
}

#[test]
fn test_lineage_output_shape() {
    let mut catalog = sample();
    catalog.enrich(&NormalizeOptions::default());

    let value = serde_json::to_value(catalog.lineage()).unwrap();
    assert_eq!(
        value["db.s.load_out"],
        json!({
            "parents": [{"name": "in1", "path": "db.s.in1"}],
            "children": [{"name": "db.s.in2", "path": "db.s.in2"}]
        })
    );
    assert_eq!(value["db.s.in1"], json!({"parents": []}));
}

#[test]
fn test_json_round_trip_keeps_order_and_lineage() {
    let mut catalog = sample();
    catalog.enrich(&NormalizeOptions::default());

    let json = catalog.to_json_string().unwrap();
    let reloaded = Catalog::from_json_str(&json).unwrap();
    assert_eq!(reloaded, catalog);
}

#[test]
fn test_from_json_accepts_procedure_alias_and_missing_fields() {
    let json = r#"{
        "db.s.p": {"name": "p", "schema": "s", "database": "db", "type": "STORED PROCEDURE"},
        "db.s.t": {"name": "t", "schema": "s", "database": "db", "type": "TABLE",
                   "ddl": "create table t (a int)", "columns": [{"name": "a", "datatype": "int"}]}
    }"#;
    let catalog = Catalog::from_json_str(json).unwrap();

    let p = catalog.get("db.s.p").unwrap();
    assert_eq!(p.kind, ObjectKind::Procedure);
    assert!(p.is_unfetchable());
    assert!(p.parents.is_empty());

    assert_eq!(catalog.get("db.s.t").unwrap().columns.as_ref().unwrap()[0].datatype, "int");
}

#[test]
fn test_from_json_rejects_unknown_kind() {
    let json = r#"{"db.s.x": {"name": "x", "schema": "s", "database": "db", "type": "SEQUENCE"}}"#;
    assert!(matches!(
        Catalog::from_json_str(json).unwrap_err(),
        CoreError::Json(_)
    ));
}

#[test]
fn test_load_json_missing_file() {
    let err = Catalog::load_json(Path::new("/nonexistent/objects.json")).unwrap_err();
    assert!(matches!(err, CoreError::IoWithPath { .. }));
}

#[test]
fn test_extract_lineage_without_children() {
    let paths = ["db.s.a", "db.s.b"];
    let lineage = extract_lineage("INSERT INTO b SELECT * FROM a", "db", &paths, false);
    assert_eq!(lineage.parents, vec![Reference::new("a", "db.s.a")]);
    assert!(lineage.children.is_none());

    let lineage = extract_lineage("INSERT INTO b SELECT * FROM a", "db", &paths, true);
    assert_eq!(lineage.children, Some(vec![Reference::new("b", "db.s.b")]));
}

#[test]
fn test_extract_lineage_ambiguous_name_takes_first() {
    let paths = ["db.x.t", "db.y.t"];
    let lineage = extract_lineage("SELECT * FROM t", "db", &paths, false);
    assert_eq!(lineage.parents, vec![Reference::new("t", "db.x.t")]);
}
