//! Whole-file document output.
//!
//! Documents are rendered in memory first and written in one call, so a
//! failed render never leaves a partial destination file behind.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::error::{MakerError, MakerResult};
use super::xml_tree::{self, XmlNode};

/// Parse an XML file into its root element.
pub fn read_xml(path: &Path) -> MakerResult<XmlNode> {
    let content = fs::read_to_string(path)?;
    xml_tree::parse_str(&content).map_err(|e| match e {
        MakerError::XmlParse(msg) => MakerError::XmlParse(format!("'{}': {}", path.display(), msg)),
        MakerError::MalformedDocument(msg) => {
            MakerError::MalformedDocument(format!("'{}': {}", path.display(), msg))
        }
        other => other,
    })
}

/// JSON with four-space indentation.
pub fn json_string<T: Serialize>(value: &T) -> MakerResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut out = String::from_utf8(buf).map_err(|e| MakerError::Serialization(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Create the parent folder when needed and warn when `path` will be
/// overwritten.
pub fn prepare_destination(path: &Path) -> MakerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            log::info!("Creating subfolder '{}'.", parent.display());
            fs::create_dir_all(parent).map_err(|e| destination_error(path, e))?;
        }
    }
    if path.exists() {
        log::warn!("Destination file '{}' exists. Overwriting.", path.display());
    }
    Ok(())
}

fn destination_error(path: &Path, e: impl std::fmt::Display) -> MakerError {
    MakerError::DestinationWrite { path: path.display().to_string(), message: e.to_string() }
}

fn write_text(path: &Path, content: &str) -> MakerResult<()> {
    prepare_destination(path)?;
    fs::write(path, content).map_err(|e| destination_error(path, e))?;
    log::info!("Writing file '{}' complete.", path.display());
    Ok(())
}

pub fn write_xml(tree: &XmlNode, path: &Path) -> MakerResult<()> {
    let xml = xml_tree::to_xml_string(tree)?;
    write_text(path, &xml)
}

pub fn write_json<T: Serialize>(value: &T, path: &Path) -> MakerResult<()> {
    let json = json_string(value)?;
    write_text(path, &json)
}
