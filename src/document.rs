//! Schema-enforcing parser for a single XML document.
//!
//! Accepted shape:
//!
//! ```text
//! <root>
//!   <var name="id" value="…"/>
//!   <var name="level" value="…"/>
//!   <objects>
//!     <object name="…"/>   (1 to 10 occurrences)
//!   </objects>
//! </root>
//! ```
//!
//! Variable elements are matched by their `name` attribute, not by position.
//! Checks run in a fixed order (well-formedness, id, level, objects) so an
//! ambiguous document always reports the same violation.

use roxmltree::{Document, Node};

use crate::error::{DocumentError, Field};
use crate::model::{MAX_OBJECTS, ParsedDocument};

const ROOT: &str = "root";
const VAR: &str = "var";
const OBJECTS: &str = "objects";
const OBJECT: &str = "object";

/// Parse and validate one document
pub fn parse_document(text: &str) -> Result<ParsedDocument, DocumentError> {
    let tree = Document::parse(text).map_err(|e| DocumentError::MalformedXml {
        details: e.to_string(),
    })?;

    let root = tree.root_element();
    let children: Vec<Node<'_, '_>> = if root.has_tag_name(ROOT) {
        root.children().filter(Node::is_element).collect()
    } else {
        Vec::new()
    };

    // Both vars must exist once before either value attribute is read
    let id_var = single_var(&children, Field::Id)?;
    let level_var = single_var(&children, Field::Level)?;
    let id = required_attribute(id_var, VAR, "value")?;
    let level = required_attribute(level_var, VAR, "value")?;

    let objects: Vec<Node<'_, '_>> = children
        .iter()
        .filter(|n| n.has_tag_name(OBJECTS))
        .flat_map(|container| container.children().filter(|n| n.has_tag_name(OBJECT)))
        .collect();

    if objects.is_empty() {
        return Err(DocumentError::NoObjects);
    }
    if objects.len() > MAX_OBJECTS {
        return Err(DocumentError::TooManyObjects {
            count: objects.len(),
        });
    }

    let names = objects
        .into_iter()
        .map(|object| required_attribute(object, OBJECT, "name").map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedDocument::new(id.to_owned(), level.to_owned(), names))
}

/// Find the one `var` element whose `name` attribute equals `field`
fn single_var<'a, 'input>(
    children: &[Node<'a, 'input>],
    field: Field,
) -> Result<Node<'a, 'input>, DocumentError> {
    let mut matches = children
        .iter()
        .filter(|n| n.has_tag_name(VAR) && n.attribute("name") == Some(field.as_str()));

    let first = matches.next().ok_or(DocumentError::MissingField { field })?;
    let extra = matches.count();
    if extra > 0 {
        return Err(DocumentError::DuplicateField {
            field,
            count: extra + 1,
        });
    }
    Ok(*first)
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, DocumentError> {
    node.attribute(attribute)
        .ok_or(DocumentError::MissingAttribute { element, attribute })
}
