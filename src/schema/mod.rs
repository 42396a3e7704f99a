// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS message-definition parsing and field-path flattening.
//!
//! MCAP schemas for ROS data carry the full transitive message definition as
//! text: the root message's fields, then one `MSG:`-headed section per
//! referenced type, separated by 80-character `=` lines. This module turns
//! that blob into field tables ([`parser`]) and flattens a root schema into
//! dotted field paths ([`paths`]).

pub mod parser;
pub mod paths;
pub mod section;

pub use parser::{parse_root_fields, parse_schema_sections, FieldDecl, FieldTable, SchemaSet};
pub use paths::{expand_field, message_paths, FieldKind, FieldPath};
pub use section::{is_separator, sections, Section, SCHEMA_SEPARATOR};
