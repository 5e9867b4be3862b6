/*!
 * Loading and encoding of JSON tree descriptions
 *
 * The serialized form is a top-level object whose `"files"` key holds the
 * root entries. A folder entry is an object with its own `"files"` object and
 * a file entry is a string. Decoding happens once, up front, so the
 * materializer only ever sees [`DescriptionNode`] values.
 */

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, TreeForgeError};
use crate::types::{DescriptionDocument, DescriptionNode, TreeDescription};

/// Key holding the nested entries of a folder and of the top-level document
pub const FILES_KEY: &str = "files";

/// Default bound on folder nesting
pub const DEFAULT_MAX_NESTING: usize = 64;

/// Read and decode a description file
pub fn load_description(path: &Path, max_nesting: usize) -> Result<TreeDescription> {
    let content = fs::read_to_string(path).map_err(|source| TreeForgeError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    parse_description(&content, max_nesting)
}

/// Decode a description from JSON text
pub fn parse_description(content: &str, max_nesting: usize) -> Result<TreeDescription> {
    let document: Value = serde_json::from_str(content)
        .map_err(|e| crate::error!(MalformedInput, "invalid JSON: {}", e))?;

    let files = document
        .as_object()
        .and_then(|object| object.get(FILES_KEY))
        .ok_or_else(|| {
            crate::error!(
                MalformedInput,
                "top-level value must be an object with a \"{}\" key",
                FILES_KEY
            )
        })?;

    decode_entries(files, "", 1, max_nesting)
}

/// Encode a description as pretty-printed JSON
pub fn to_json_string(description: &TreeDescription) -> Result<String> {
    let document = DescriptionDocument { files: description };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn decode_entries(
    value: &Value,
    location: &str,
    depth: usize,
    max_nesting: usize,
) -> Result<TreeDescription> {
    crate::ensure!(
        depth <= max_nesting,
        MalformedInput,
        "'{}' nests deeper than {} levels",
        display_location(location),
        max_nesting
    );

    let Some(entries) = value.as_object() else {
        crate::bail!(
            MalformedInput,
            "\"{}\" of '{}' must be an object, found {}",
            FILES_KEY,
            display_location(location),
            kind_of(value)
        );
    };

    entries
        .iter()
        .map(|(name, entry)| -> Result<(String, DescriptionNode)> {
            validate_name(name, location)?;
            let child_location = if location.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", location, name)
            };
            let node = decode_node(entry, &child_location, depth, max_nesting)?;
            Ok((name.clone(), node))
        })
        .collect()
}

fn decode_node(
    value: &Value,
    location: &str,
    depth: usize,
    max_nesting: usize,
) -> Result<DescriptionNode> {
    match value {
        Value::String(content) => Ok(DescriptionNode::File(content.clone())),
        Value::Object(object) if object.contains_key(FILES_KEY) => {
            let children = decode_entries(&object[FILES_KEY], location, depth + 1, max_nesting)?;
            Ok(DescriptionNode::Folder { children })
        }
        other => crate::bail!(
            MalformedInput,
            "entry '{}' is neither a folder nor a file (found {})",
            location,
            describe_shape(other)
        ),
    }
}

/// Entry names must stay a single path component below their parent
fn validate_name(name: &str, location: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');

    crate::ensure!(
        !invalid,
        MalformedInput,
        "invalid entry name {:?} in '{}'",
        name,
        display_location(location)
    );
    Ok(())
}

fn display_location(location: &str) -> &str {
    if location.is_empty() {
        "<root>"
    } else {
        location
    }
}

fn describe_shape(value: &Value) -> String {
    match value {
        Value::Object(_) => format!("an object without a \"{}\" key", FILES_KEY),
        other => kind_of(other).to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
