//! Record model shared by the renderer, the parsers and the report writer.

use serde::Serialize;

/// Maximum number of object elements a document may carry
pub const MAX_OBJECTS: usize = 10;

/// One parsed document's variables; a row of the vars table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    /// Carried through as text, never re-validated as a number
    pub level: String,
}

/// A named object owned by a record; a row of the objects table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubObject {
    #[serde(rename = "id")]
    pub owner_id: String,
    #[serde(rename = "object_name")]
    pub name: String,
}

/// Everything extracted from a single XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub record: Record,
    pub objects: Vec<SubObject>,
}

impl ParsedDocument {
    pub fn new(id: String, level: String, names: Vec<String>) -> Self {
        let objects = names
            .into_iter()
            .map(|name| SubObject {
                owner_id: id.clone(),
                name,
            })
            .collect();
        Self {
            record: Record { id, level },
            objects,
        }
    }
}

/// Flattened vars and objects rows, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTables {
    pub vars: Vec<Record>,
    pub objects: Vec<SubObject>,
}

impl RecordTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_document(&mut self, document: ParsedDocument) {
        self.vars.push(document.record);
        self.objects.extend(document.objects);
    }

    pub fn append(&mut self, mut other: RecordTables) {
        self.vars.append(&mut other.vars);
        self.objects.append(&mut other.objects);
    }

    /// Concatenate per-archive tables in the order given
    pub fn merge(parts: impl IntoIterator<Item = RecordTables>) -> Self {
        parts.into_iter().fold(Self::new(), |mut acc, part| {
            acc.append(part);
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.objects.is_empty()
    }
}
