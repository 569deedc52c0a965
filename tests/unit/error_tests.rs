use std::path::PathBuf;

use xml_archive_report::error::{
    ConfigError, DocumentError, Error, Field, GeneratorError, ParserError,
};

#[test]
fn test_messages() {
    assert_eq!(
        DocumentError::MissingField { field: Field::Id }.to_string(),
        "XML document has no var element of type id"
    );
    assert_eq!(
        DocumentError::NoObjects.to_string(),
        "XML document has no elements of type object"
    );
    assert_eq!(
        ParserError::ArchiveCorrupt {
            path: PathBuf::from("x.zip"),
            reason: "bad".to_string(),
        }
        .to_string(),
        "ZIP file x.zip is corrupted: bad"
    );
    assert_eq!(
        GeneratorError::EmptyObjects.to_string(),
        "Document must have at least one object"
    );
}

#[test]
fn test_document_errors_are_not_archive_corruption() {
    let error = ParserError::Document {
        archive: PathBuf::from("a.zip"),
        entry: "0.xml".to_string(),
        source: DocumentError::TooManyObjects { count: 12 },
    };

    assert!(!error.is_archive_corrupt());
    assert_eq!(
        error.document_error(),
        Some(&DocumentError::TooManyObjects { count: 12 })
    );
    assert!(error.to_string().contains("0.xml"));
    assert!(error.to_string().contains("a.zip"));
}

#[test]
fn test_top_level_conversions() {
    let error: Error = GeneratorError::EmptyObjects.into();
    assert!(matches!(error, Error::Generator(GeneratorError::EmptyObjects)));

    let error: Error = ParserError::NoArchivesFound {
        folder: PathBuf::from("/tmp/none"),
    }
    .into();
    assert_eq!(error.to_string(), "No zip files found in folder /tmp/none");

    let error: Error = ConfigError::Validation("bad workers".to_string()).into();
    assert!(matches!(error, Error::Config(ConfigError::Validation(_))));

    let error: Error = std::io::Error::other("disk gone").into();
    assert!(error.to_string().starts_with("IO error:"));
}

#[test]
fn test_source_chain_reaches_document_error() {
    use std::error::Error as _;

    let error: Error = ParserError::Document {
        archive: PathBuf::from("a.zip"),
        entry: "3.xml".to_string(),
        source: DocumentError::MissingField {
            field: Field::Level,
        },
    }
    .into();

    let source = error.source().unwrap();
    assert_eq!(
        source.to_string(),
        "XML document has no var element of type level"
    );
}
