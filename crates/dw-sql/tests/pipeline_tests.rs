//! End-to-end tests over a parsed statement and its source text

use dw_sql::{
    extract_children, extract_parents, normalize, parse_document, split_statements,
    FeatureKind, NormalizeOptions, Reference,
};
use std::fs;

const PATHS: &[&str] = &["db.s.in1", "db.s.in2", "db.s.out"];

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn test_parsed_statement_features() {
    let lineage = parse_document(&fixture("insert_select.json")).unwrap();
    assert_eq!(lineage.len(), 1);

    let features = &lineage[0].features;
    let texts: Vec<&str> = features.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "insert", "into", "db.s.out", "select", "o.id", ",", "case", "from", "db.s.in1",
            "join", "db.s.in2", "on", "o.cid", "=", "c.id",
        ]
    );

    let case = &features[6];
    assert_eq!(case.kind, FeatureKind::Identifier);
    assert_eq!(case.alias, "size");
    assert_eq!(
        case.transformation_text,
        "case when o.amount > 100 then 'big' else 'small' end"
    );
    assert_eq!(case.transformation_refs, vec!["o.amount"]);

    assert_eq!(features[8].alias, "o");
    assert_eq!(features[10].alias, "c");
    assert!(features.iter().all(|f| f.kind != FeatureKind::Dot));
}

#[test]
fn test_source_text_references() {
    let script = fixture("insert_select.sql");
    let statements = split_statements(&script);
    assert_eq!(statements.len(), 1);

    let text = normalize(&statements[0], &NormalizeOptions::default());
    assert!(text.starts_with("INSERT INTO db.s.out SELECT o.id , CASE WHEN"));

    assert_eq!(
        extract_children(&text, "db", PATHS),
        vec![Reference::new("db.s.out", "db.s.out")]
    );
    assert_eq!(
        extract_parents(&text, "db", PATHS),
        vec![
            Reference::new("db.s.in1", "db.s.in1"),
            Reference::new("db.s.in2", "db.s.in2"),
        ]
    );
}

#[test]
fn test_normalized_text_is_stable_across_runs() {
    let script = fixture("insert_select.sql");
    let options = NormalizeOptions::default();
    let first = normalize(&script, &options);
    assert_eq!(normalize(&first, &options), first);
}
