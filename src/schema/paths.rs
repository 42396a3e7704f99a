// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field-path flattening.
//!
//! Expands a root message's fields into an ordered list of dotted field
//! paths with resolved types, recursing depth-first through nested message
//! types. `time` and `duration` composites gain synthetic `.secs`/`.nsecs`
//! sub-paths; primitive arrays gain a `.[*]` element marker. A final pass
//! rewrites nested-type leaves to their qualified `namespace/ShortName`
//! form, `[]`-suffixed for arrays.
//!
//! Unresolvable type references are left as written; the flattener never
//! fails.

use serde::Serialize;

use crate::schema::parser::{parse_root_fields, parse_schema_sections, SchemaSet};

/// Primitive types the external metadata layer accepts, with their
/// categorical kind. `bool` maps to `Number`; `byte` and `char` are not
/// canonical types.
const CANONICAL_TYPES: &[(&str, FieldKind)] = &[
    ("bool", FieldKind::Number),
    ("int8", FieldKind::Number),
    ("uint8", FieldKind::Number),
    ("int16", FieldKind::Number),
    ("uint16", FieldKind::Number),
    ("int32", FieldKind::Number),
    ("uint32", FieldKind::Number),
    ("int64", FieldKind::Number),
    ("uint64", FieldKind::Number),
    ("float32", FieldKind::Number),
    ("float64", FieldKind::Number),
    ("string", FieldKind::String),
    ("time", FieldKind::Number),
    ("duration", FieldKind::Number),
];

/// Categorical kind of a resolved field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Numeric scalar (including bool, time, duration)
    Number,
    /// Text scalar
    String,
    /// Nested message type
    Object,
    /// Array of any element type
    Array,
}

impl FieldKind {
    /// Kind of a raw or resolved type string.
    pub fn of(ty: &str) -> FieldKind {
        if ty.contains('[') {
            return FieldKind::Array;
        }
        canonical_kind(base_type(ty)).unwrap_or(FieldKind::Object)
    }

    /// Lowercase name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
        }
    }
}

/// One flattened field: dotted path plus resolved type string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPath {
    /// Dotted path from the root message, e.g. `header.stamp.secs`
    pub path: String,
    /// Resolved type: primitive, qualified type name, or either with `[]`
    pub ty: String,
}

impl FieldPath {
    fn new(path: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ty: ty.into(),
        }
    }

    /// Categorical kind of this path's type.
    pub fn kind(&self) -> FieldKind {
        FieldKind::of(&self.ty)
    }
}

/// Type string with any array suffix stripped.
pub fn base_type(ty: &str) -> &str {
    ty.split('[').next().unwrap_or(ty)
}

fn canonical_kind(base: &str) -> Option<FieldKind> {
    CANONICAL_TYPES
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, kind)| *kind)
}

/// Whether a base type is in the canonical primitive table.
pub fn is_canonical(base: &str) -> bool {
    canonical_kind(base).is_some()
}

/// Recursively expand one field into `out`.
///
/// The field itself is always appended first; expansion order is depth-first
/// pre-order, following declaration order within each nested schema.
pub fn expand_field(path: &str, ty: &str, schemas: &SchemaSet, out: &mut Vec<FieldPath>) {
    out.push(FieldPath::new(path, ty));

    let base = base_type(ty);
    match base {
        "time" => {
            out.push(FieldPath::new(format!("{path}.secs"), "uint32"));
            out.push(FieldPath::new(format!("{path}.nsecs"), "uint32"));
        }
        "duration" => {
            out.push(FieldPath::new(format!("{path}.secs"), "int32"));
            out.push(FieldPath::new(format!("{path}.nsecs"), "int32"));
        }
        _ if is_canonical(base) => {
            if ty.contains('[') {
                out.push(FieldPath::new(format!("{path}.[*]"), base));
            }
        }
        _ => {
            if let Some(table) = schemas.table(base) {
                for decl in table {
                    expand_field(&format!("{path}.{}", decl.name), &decl.ty, schemas, out);
                }
            }
            // unknown type: keep the single leaf with the raw type string
        }
    }
}

/// Flatten a whole definition blob into ordered field paths.
///
/// Combines the root field parse, the section parse, recursive expansion,
/// and the qualified-name rewrite of nested-type leaves.
pub fn message_paths(definition: &str) -> Vec<FieldPath> {
    let root = parse_root_fields(definition);
    let schemas = parse_schema_sections(definition);

    let mut out = Vec::new();
    for decl in &root {
        expand_field(&decl.name, &decl.ty, &schemas, &mut out);
    }

    for entry in &mut out {
        let base = base_type(&entry.ty);
        if let Some(qualified) = schemas.qualified(base) {
            entry.ty = if entry.ty.contains('[') {
                format!("{qualified}[]")
            } else {
                qualified.to_string()
            };
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_field_is_single_leaf() {
        let paths = message_paths("uint32 height");
        assert_eq!(paths, vec![FieldPath::new("height", "uint32")]);
    }

    #[test]
    fn test_primitive_array_gets_element_marker() {
        let paths = message_paths("uint8[] data");
        assert_eq!(
            paths,
            vec![
                FieldPath::new("data", "uint8[]"),
                FieldPath::new("data.[*]", "uint8"),
            ]
        );
    }

    #[test]
    fn test_time_expands_to_unsigned_secs_nsecs() {
        let paths = message_paths("time stamp");
        assert_eq!(
            paths,
            vec![
                FieldPath::new("stamp", "time"),
                FieldPath::new("stamp.secs", "uint32"),
                FieldPath::new("stamp.nsecs", "uint32"),
            ]
        );
    }

    #[test]
    fn test_duration_expands_to_signed_secs_nsecs() {
        let paths = message_paths("duration elapsed");
        assert_eq!(
            paths,
            vec![
                FieldPath::new("elapsed", "duration"),
                FieldPath::new("elapsed.secs", "int32"),
                FieldPath::new("elapsed.nsecs", "int32"),
            ]
        );
    }

    #[test]
    fn test_unknown_type_left_unresolved() {
        let paths = message_paths("foreign_msgs/Mystery thing");
        assert_eq!(paths, vec![FieldPath::new("thing", "foreign_msgs/Mystery")]);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let paths = message_paths("uint32 width\nuint32 height\nbool is_dense");
        let names: Vec<&str> = paths.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(names, vec!["width", "height", "is_dense"]);
    }

    #[test]
    fn test_field_kind_of() {
        assert_eq!(FieldKind::of("uint32"), FieldKind::Number);
        assert_eq!(FieldKind::of("bool"), FieldKind::Number);
        assert_eq!(FieldKind::of("time"), FieldKind::Number);
        assert_eq!(FieldKind::of("string"), FieldKind::String);
        assert_eq!(FieldKind::of("uint8[]"), FieldKind::Array);
        assert_eq!(FieldKind::of("float32[9]"), FieldKind::Array);
        assert_eq!(FieldKind::of("std_msgs/Header"), FieldKind::Object);
        assert_eq!(
            FieldKind::of("sensor_msgs/PointField[]"),
            FieldKind::Array
        );
    }

    #[test]
    fn test_base_type() {
        assert_eq!(base_type("uint8[]"), "uint8");
        assert_eq!(base_type("float32[9]"), "float32");
        assert_eq!(base_type("string"), "string");
    }
}
