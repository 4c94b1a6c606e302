use super::*;

fn upper(sql: &str) -> String {
    normalize(sql, &NormalizeOptions::default())
}

#[test]
fn test_keywords_upper_cased() {
    assert_eq!(upper("select a,b from t"), "SELECT a , b FROM t");
}

#[test]
fn test_keywords_lower_cased() {
    let options = NormalizeOptions::with_case(KeywordCase::Lower);
    assert_eq!(normalize("SELECT A FROM T", &options), "select A from T");
}

#[test]
fn test_comments_removed() {
    let sql = "select a -- trailing words\nfrom /* block\n comment */ t";
    assert_eq!(upper(sql), "SELECT a FROM t");
}

#[test]
fn test_block_comments_are_not_greedy() {
    let sql = "select /* one */ a from /* two */ t";
    assert_eq!(upper(sql), "SELECT a FROM t");
}

#[test]
fn test_dotted_identifiers_despaced() {
    assert_eq!(upper("select x from db . sch . tbl"), "SELECT x FROM db.sch.tbl");
}

#[test]
fn test_qualified_parts_keep_their_case() {
    assert_eq!(
        upper("select s.table from s.view"),
        "SELECT s.table FROM s.view"
    );
}

#[test]
fn test_brackets_spaced() {
    assert_eq!(upper("select count(x) from t"), "SELECT count ( x ) FROM t");
}

#[test]
fn test_operators_respaced() {
    assert_eq!(
        upper("where a=b and c||d and e :: int and f>=g"),
        "WHERE a = b AND c || d AND e::int AND f>=g"
    );
}

#[test]
fn test_quoted_text_untouched() {
    assert_eq!(
        upper("select 'from -- here' as x"),
        "SELECT 'from -- here' AS x"
    );
}

#[test]
fn test_whitespace_collapsed_and_trimmed() {
    assert_eq!(upper("\n\t select\n\n  a   from\tt  \n"), "SELECT a FROM t");
}

#[test]
fn test_unfetchable_sentinel_normalizes_to_empty() {
    assert_eq!(upper("-- UNABLE TO FETCH"), "");
}

#[test]
fn test_normalize_is_idempotent() {
    let sql = "insert into db.s.out select a,b||c, d::int from db . s . in1 where x=1";
    let once = upper(sql);
    assert_eq!(upper(&once), once);
}

#[test]
fn test_is_keyword_case_insensitive() {
    assert!(is_keyword("select"));
    assert!(is_keyword("Materialized"));
    assert!(!is_keyword("orders"));
}
