use super::*;

fn ident(text: &str, depth: usize) -> Feature {
    Feature::new(FeatureKind::Identifier, text, depth)
}

fn dot(depth: usize) -> Feature {
    Feature::new(FeatureKind::Dot, ".", depth)
}

fn keyword(text: &str) -> Feature {
    Feature::new(FeatureKind::Keyword, text, 0)
}

fn texts(features: &[Feature]) -> Vec<&str> {
    features.iter().map(|f| f.text.as_str()).collect()
}

#[test]
fn test_two_part_name_fused() {
    let features = compress_identifiers(vec![ident("s", 3), dot(3), ident("t", 3)]);
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].text, "s.t");
    assert_eq!(features[0].path, "s.t");
    assert_eq!(features[0].alias, "s.t");
    assert_eq!(features[0].depth(), 3);
}

#[test]
fn test_three_part_name_fused() {
    let features = compress_identifiers(vec![
        keyword("FROM"),
        ident("db", 4),
        dot(4),
        ident("s", 4),
        dot(4),
        ident("t", 4),
    ]);
    assert_eq!(texts(&features), vec!["FROM", "db.s.t"]);
}

#[test]
fn test_fusion_ignores_nesting_depth() {
    // Parsers may nest the trailing part deeper than the head
    let features = compress_identifiers(vec![
        ident("db", 2),
        dot(3),
        ident("s", 4),
        dot(5),
        ident("t", 6),
    ]);
    assert_eq!(texts(&features), vec!["db.s.t"]);
    assert_eq!(features[0].depth(), 2);
}

#[test]
fn test_trailing_dot_left_alone() {
    let features = compress_identifiers(vec![ident("s", 0), dot(0), keyword("FROM")]);
    assert_eq!(texts(&features), vec!["s", ".", "FROM"]);
}

#[test]
fn test_separate_names_stay_separate() {
    let features = compress_identifiers(vec![
        ident("a", 1),
        dot(1),
        ident("x", 1),
        keyword("AS"),
        ident("b", 1),
        dot(1),
        ident("y", 1),
    ]);
    assert_eq!(texts(&features), vec!["a.x", "AS", "b.y"]);
}

#[test]
fn test_compression_is_idempotent() {
    let input = vec![
        ident("db", 1),
        dot(1),
        ident("s", 1),
        dot(1),
        ident("t", 1),
        keyword("JOIN"),
        ident("u", 1),
    ];
    let once = compress_identifiers(input);
    let twice = compress_identifiers(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_empty_sequence() {
    assert!(compress_identifiers(Vec::new()).is_empty());
}
