// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Section tokenizer for concatenated ROS message definitions.
//!
//! MCAP stores one definition blob per schema: the root message's fields
//! first, then one section per transitively referenced type, each introduced
//! by a `MSG: <namespace>/<ShortName>` header and separated by a fixed
//! 80-character `=` line.
//!
//! The tokenizer only splits the blob into sections; field-line handling
//! lives in [`crate::schema::parser`].

/// The separator line between definition sections, as emitted by ROS tooling.
pub const SCHEMA_SEPARATOR: &str =
    "================================================================================";

/// Check whether a line is a section separator.
///
/// Leading/trailing whitespace is tolerated; the content must be exactly the
/// 80-character `=` run.
pub fn is_separator(line: &str) -> bool {
    line.trim() == SCHEMA_SEPARATOR
}

/// One section of a definition blob: the lines between two separators.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Section<'a> {
    /// First line with any content, trimmed.
    pub fn first_content_line(&self) -> Option<&'a str> {
        self.lines
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
    }

    /// The qualified type name from a `MSG:` header line, if this section has one.
    pub fn header(&self) -> Option<&'a str> {
        let first = self.first_content_line()?;
        let name = first.strip_prefix("MSG:")?.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Lines following the header, or every line when there is no header.
    pub fn body_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        let skip = if self.header().is_some() {
            // everything up to and including the header line
            let mut n = 0;
            for line in &self.lines {
                n += 1;
                if !line.trim().is_empty() {
                    break;
                }
            }
            n
        } else {
            0
        };
        self.lines.iter().skip(skip).copied()
    }

    /// Whether the section holds no content lines at all.
    pub fn is_empty(&self) -> bool {
        self.first_content_line().is_none()
    }
}

/// Split a definition blob into sections on separator lines.
///
/// Every section is returned, including empty ones produced by repeated
/// separators; callers decide what to skip. The first section is always the
/// root message (possibly empty when the blob opens with a separator).
pub fn sections(text: &str) -> Vec<Section<'_>> {
    let mut result = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if is_separator(line) {
            result.push(Section { lines: current });
            current = Vec::new();
        } else {
            current.push(line);
        }
    }
    result.push(Section { lines: current });

    result
}
