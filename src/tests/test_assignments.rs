use crate::assignments::{parse_assignments, NeedAssignment};
use crate::error::PrepError;

#[test]
fn test_parse_record() {
    let record = NeedAssignment::parse(1, "foo, bar : n1").unwrap().unwrap();
    assert_eq!(record.need_id, "n1");
    assert_eq!(record.categories, vec!["foo", "bar"]);
    assert_eq!(record.line, 1);
}

#[test]
fn test_trims_whitespace() {
    let record = NeedAssignment::parse(3, "  Home & Garden ,\tTools:   n 7  ")
        .unwrap()
        .unwrap();
    assert_eq!(record.need_id, "n 7");
    assert_eq!(record.categories, vec!["Home & Garden", "Tools"]);
}

#[test]
fn test_splits_on_first_colon_only() {
    let record = NeedAssignment::parse(1, "foo: urn:need:42").unwrap().unwrap();
    assert_eq!(record.need_id, "urn:need:42");
    assert_eq!(record.categories, vec!["foo"]);
}

#[test]
fn test_empty_tokens_are_dropped() {
    let record = NeedAssignment::parse(1, "foo, , bar,: n1").unwrap().unwrap();
    assert_eq!(record.categories, vec!["foo", "bar"]);

    let record = NeedAssignment::parse(2, ": n2").unwrap().unwrap();
    assert!(record.categories.is_empty());
}

#[test]
fn test_blank_lines_skipped() {
    let records = parse_assignments("foo: n1\n\n   \nbar: n2\n").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].line, 1);
    assert_eq!(records[1].line, 4);
    assert_eq!(records[1].need_id, "n2");
}

#[test]
fn test_missing_colon_is_malformed() {
    let err = parse_assignments("foo: n1\nbar n2").unwrap_err();
    match err {
        PrepError::MalformedRecord { line, content } => {
            assert_eq!(line, 2);
            assert_eq!(content, "bar n2");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_crlf_input() {
    let records = parse_assignments("foo: n1\r\nbar: n2\r\n").unwrap();
    assert_eq!(records[0].need_id, "n1");
    assert_eq!(records[1].need_id, "n2");
}
