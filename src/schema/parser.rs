// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field tables and the section state machine.
//!
//! The parser is deliberately lenient: message definition blobs recorded in
//! the wild are not guaranteed well-formed, so malformed lines are skipped
//! rather than rejected, and the whole parse always succeeds.
//!
//! Two known deviations from a strict message-definition grammar:
//! - lines starting with `byte` are skipped entirely instead of being
//!   treated as a primitive field (rosgraph_msgs/Log carries one),
//! - constant declarations (`uint8 INT8 = 1`) are captured as ordinary
//!   fields named after the constant.

use std::collections::HashMap;

use crate::schema::section::{sections, Section};

/// A single field declaration: name plus the raw type string as written,
/// including any trailing array marker (`uint8[]`, `float32[9]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Raw type string
    pub ty: String,
}

/// Ordered field table for one message type.
///
/// Declaration order is preserved. Inserting a duplicate name overwrites the
/// earlier entry's type in place, keeping its original position; ROS
/// definitions do not legally repeat field names, so this only matters for
/// malformed input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: Vec<FieldDecl>,
}

impl FieldTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, overwriting in place on duplicate names.
    pub fn insert(&mut self, name: &str, ty: &str) {
        if let Some(existing) = self.entries.iter_mut().find(|d| d.name == name) {
            existing.ty = ty.to_string();
        } else {
            self.entries.push(FieldDecl {
                name: name.to_string(),
                ty: ty.to_string(),
            });
        }
    }

    /// Look up a field's type by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.ty.as_str())
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDecl> {
        self.entries.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = &'a FieldDecl;
    type IntoIter = std::slice::Iter<'a, FieldDecl>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parsed nested schemas of one definition blob.
///
/// `tables` maps short type names to field tables; `lookup` maps short names
/// back to the qualified `namespace/ShortName` form. When two namespaces
/// declare the same short name, the later section wins in both maps.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    tables: HashMap<String, FieldTable>,
    lookup: HashMap<String, String>,
}

impl SchemaSet {
    /// Field table for a short type name.
    pub fn table(&self, short_name: &str) -> Option<&FieldTable> {
        self.tables.get(short_name)
    }

    /// Qualified name for a short type name.
    pub fn qualified(&self, short_name: &str) -> Option<&str> {
        self.lookup.get(short_name).map(String::as_str)
    }

    /// Number of indexed schemas.
    pub fn schema_count(&self) -> usize {
        self.tables.len()
    }

    /// Whether no sections were indexed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Short type name of a qualified name: the last `/`-separated segment.
///
/// Handles both `std_msgs/Header` and the ROS2 `std_msgs/msg/Header` form;
/// a name without `/` is returned unchanged.
pub fn short_name(qualified: &str) -> &str {
    qualified.rsplit('/').next().unwrap_or(qualified)
}

/// Feed one line into a field table, skipping everything that is not a
/// field declaration.
fn accept_field_line(table: &mut FieldTable, line: &str) {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return;
    }
    // rosgraph_msgs/Log declares `byte level`; byte is not a canonical type
    if trimmed.starts_with("byte") {
        return;
    }

    let mut parts = trimmed.split_whitespace();
    let (ty, name) = match (parts.next(), parts.next()) {
        (Some(ty), Some(name)) => (ty, name),
        _ => return,
    };
    table.insert(name, ty);
}

/// Parse the root message's fields: everything before the first separator.
pub fn parse_root_fields(text: &str) -> FieldTable {
    let mut table = FieldTable::new();
    let all = sections(text);
    if let Some(root) = all.first() {
        for line in root.body_lines() {
            accept_field_line(&mut table, line);
        }
    }
    table
}

/// Parse every `MSG:`-headed section into a [`SchemaSet`].
///
/// The root section is not indexed; use [`parse_root_fields`] for it.
pub fn parse_schema_sections(text: &str) -> SchemaSet {
    let mut set = SchemaSet::default();
    for section in sections(text) {
        accept_section(&mut set, &section);
    }
    set
}

/// State-machine step: index one section if it declares a nested type.
fn accept_section(set: &mut SchemaSet, section: &Section<'_>) {
    let Some(qualified) = section.header() else {
        return;
    };

    let mut table = FieldTable::new();
    for line in section.body_lines() {
        accept_field_line(&mut table, line);
    }

    let short = short_name(qualified);
    set.lookup.insert(short.to_string(), qualified.to_string());
    set.tables.insert(short.to_string(), table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::section::SCHEMA_SEPARATOR;

    #[test]
    fn test_field_table_preserves_order() {
        let mut table = FieldTable::new();
        table.insert("b", "uint32");
        table.insert("a", "string");
        let names: Vec<&str> = table.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_field_table_duplicate_overwrites_in_place() {
        let mut table = FieldTable::new();
        table.insert("x", "uint8");
        table.insert("y", "string");
        table.insert("x", "float64");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("x"), Some("float64"));
        let names: Vec<&str> = table.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_root_fields() {
        let table = parse_root_fields("# comment\nuint32 seq\n\nstring frame_id");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("seq"), Some("uint32"));
        assert_eq!(table.get("frame_id"), Some("string"));
    }

    #[test]
    fn test_root_fields_stop_at_separator() {
        let text = format!("uint32 a\n{SCHEMA_SEPARATOR}\nMSG: p/T\nuint32 b");
        let table = parse_root_fields(&text);
        assert_eq!(table.len(), 1);
        assert!(table.get("b").is_none());
    }

    #[test]
    fn test_byte_lines_skipped() {
        let table = parse_root_fields("byte level\nstring msg");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("msg"), Some("string"));
    }

    #[test]
    fn test_short_lines_skipped() {
        let table = parse_root_fields("loneword\nint8 ok");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ok"), Some("int8"));
    }

    #[test]
    fn test_constants_captured_as_fields() {
        let table = parse_root_fields("uint8 INT8    = 1\nuint8 datatype");
        assert_eq!(table.get("INT8"), Some("uint8"));
        assert_eq!(table.get("datatype"), Some("uint8"));
    }

    #[test]
    fn test_sections_indexed_by_short_name() {
        let text = format!(
            "uint32 a\n{SCHEMA_SEPARATOR}\nMSG: std_msgs/Header\nuint32 seq\ntime stamp\nstring frame_id"
        );
        let set = parse_schema_sections(&text);
        assert_eq!(set.schema_count(), 1);
        let header = set.table("Header").unwrap();
        assert_eq!(header.get("stamp"), Some("time"));
        assert_eq!(set.qualified("Header"), Some("std_msgs/Header"));
    }

    #[test]
    fn test_root_section_not_indexed() {
        let set = parse_schema_sections("uint32 a\nstring b");
        assert!(set.is_empty());
    }

    #[test]
    fn test_short_name_collision_last_wins() {
        let text = format!(
            "int8 r\n{SCHEMA_SEPARATOR}\nMSG: pkg_a/Point\nfloat64 x\n{SCHEMA_SEPARATOR}\nMSG: pkg_b/Point\nfloat32 x"
        );
        let set = parse_schema_sections(&text);
        assert_eq!(set.schema_count(), 1);
        assert_eq!(set.qualified("Point"), Some("pkg_b/Point"));
        assert_eq!(set.table("Point").unwrap().get("x"), Some("float32"));
    }

    #[test]
    fn test_short_name_segments() {
        assert_eq!(short_name("std_msgs/Header"), "Header");
        assert_eq!(short_name("std_msgs/msg/Header"), "Header");
        assert_eq!(short_name("Header"), "Header");
    }
}
