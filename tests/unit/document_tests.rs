use xml_archive_report::document::parse_document;
use xml_archive_report::error::{DocumentError, Field};

use crate::common::test_helpers::document;

fn objects_xml(count: usize) -> String {
    (0..count)
        .map(|i| format!(r#"<object name="o{}"/>"#, i))
        .collect()
}

fn with_vars(vars: &str, objects: usize) -> String {
    format!(
        "<root>{}<objects>{}</objects></root>",
        vars,
        objects_xml(objects)
    )
}

const ID: &str = r#"<var name="id" value="X"/>"#;
const LEVEL: &str = r#"<var name="level" value="5"/>"#;

#[test]
fn test_schema_violations_have_specific_kinds() {
    let cases = vec![
        (
            with_vars(LEVEL, 1),
            DocumentError::MissingField { field: Field::Id },
        ),
        (
            with_vars(&format!("{ID}{ID}{LEVEL}"), 1),
            DocumentError::DuplicateField {
                field: Field::Id,
                count: 2,
            },
        ),
        (
            with_vars(ID, 1),
            DocumentError::MissingField {
                field: Field::Level,
            },
        ),
        (
            with_vars(&format!("{ID}{LEVEL}{LEVEL}"), 1),
            DocumentError::DuplicateField {
                field: Field::Level,
                count: 2,
            },
        ),
        (with_vars(&format!("{ID}{LEVEL}"), 0), DocumentError::NoObjects),
        (
            with_vars(&format!("{ID}{LEVEL}"), 11),
            DocumentError::TooManyObjects { count: 11 },
        ),
    ];

    for (xml, expected) in cases {
        assert_eq!(parse_document(&xml).unwrap_err(), expected, "for {}", xml);
    }
}

#[test]
fn test_ten_objects_is_the_limit() {
    let parsed = parse_document(&with_vars(&format!("{ID}{LEVEL}"), 10)).unwrap();
    assert_eq!(parsed.objects.len(), 10);
}

#[test]
fn test_vars_in_any_order() {
    let parsed = parse_document(&with_vars(&format!("{LEVEL}{ID}"), 2)).unwrap();

    assert_eq!(parsed.record.id, "X");
    assert_eq!(parsed.record.level, "5");
    let names: Vec<&str> = parsed.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["o0", "o1"]);
}

#[test]
fn test_malformed_document() {
    for text in ["", "<root>", "not xml at all", "<root><var></root>"] {
        assert!(
            matches!(
                parse_document(text),
                Err(DocumentError::MalformedXml { .. })
            ),
            "for {:?}",
            text
        );
    }
}

#[test]
fn test_level_is_kept_as_text() {
    let parsed = parse_document(&document("abc", "007", &["x"])).unwrap();
    assert_eq!(parsed.record.level, "007");
}

#[test]
fn test_objects_carry_owner_id() {
    let parsed = parse_document(&document("owner", "1", &["a", "b", "c"])).unwrap();
    assert!(parsed.objects.iter().all(|o| o.owner_id == "owner"));
}
