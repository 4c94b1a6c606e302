use super::*;

fn kw(text: &str) -> Feature {
    Feature::new(FeatureKind::Keyword, text, 1)
}

fn ident(text: &str) -> Feature {
    Feature::new(FeatureKind::Identifier, text, 1)
}

#[test]
fn test_implicit_alias() {
    let out = resolve_aliases(vec![kw("FROM"), ident("db.s.orders"), ident("o")]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].text, "db.s.orders");
    assert_eq!(out[1].alias, "o");
}

#[test]
fn test_explicit_as_alias() {
    let out = resolve_aliases(vec![ident("amount"), kw("as"), ident("total"), kw("FROM")]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].alias, "total");
    assert!(out[1].text_is("from"));
}

#[test]
fn test_as_without_identifier_kept() {
    let out = resolve_aliases(vec![ident("x"), kw("AS"), kw("SELECT")]);
    assert_eq!(out.len(), 3);
    assert!(out[0].alias.is_empty());
}

#[test]
fn test_consumed_alias_does_not_chain() {
    let out = resolve_aliases(vec![ident("a"), ident("b"), ident("c")]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].alias, "b");
    assert_eq!(out[1].text, "c");
    assert!(out[1].alias.is_empty());
}

#[test]
fn test_transformation_takes_alias() {
    let mut case = ident("CASE");
    case.transformation_text = "CASE WHEN a THEN b END".into();
    let out = resolve_aliases(vec![case, kw("AS"), ident("flag")]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].alias, "flag");
    assert!(out[0].is_transformation());
}

#[test]
fn test_no_identifiers_is_identity() {
    let features = vec![kw("SELECT"), kw("FROM")];
    assert_eq!(resolve_aliases(features.clone()), features);
}
