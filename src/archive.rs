//! Archive-level parsing: every entry of a ZIP file must be an XML document.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use zip::ZipArchive;

use crate::document::parse_document;
use crate::error::{DocumentError, ParserError};
use crate::model::RecordTables;

const XML_SUFFIX: &str = ".xml";

/// Whether an archive entry name denotes an XML document
pub fn is_xml_entry(name: &str) -> bool {
    name.len() > XML_SUFFIX.len()
        && name
            .get(name.len() - XML_SUFFIX.len()..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(XML_SUFFIX))
}

/// Parse every document in the archive at `path`.
///
/// Container problems (unreadable ZIP, non-XML entry) fail with
/// [`ParserError::ArchiveCorrupt`]; schema violations inside a document fail
/// with [`ParserError::Document`]. Either way no partial result is returned.
/// An archive without entries yields empty tables.
pub fn parse_archive(path: &Path) -> Result<RecordTables, ParserError> {
    let corrupt = |reason: String| ParserError::ArchiveCorrupt {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| corrupt(format!("cannot open archive: {}", e)))?;
    let mut archive = ZipArchive::new(file).map_err(|e| corrupt(e.to_string()))?;

    let mut tables = RecordTables::new();
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| corrupt(format!("cannot read entry #{}: {}", index, e)))?;
        let name = entry.name().to_string();

        if !is_xml_entry(&name) {
            return Err(corrupt(format!("entry {} is not an XML document", name)));
        }

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| corrupt(format!("cannot read entry {}: {}", name, e)))?;

        let document = std::str::from_utf8(&bytes)
            .map_err(|e| DocumentError::MalformedXml {
                details: format!("not valid UTF-8: {}", e),
            })
            .and_then(parse_document)
            .map_err(|source| ParserError::Document {
                archive: path.to_path_buf(),
                entry: name,
                source,
            })?;
        tables.push_document(document);
    }

    debug!(
        "Parsed {} documents ({} objects) from {}",
        tables.vars.len(),
        tables.objects.len(),
        path.display()
    );
    Ok(tables)
}
