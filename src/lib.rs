// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robosplit
//!
//! Per-topic splitting and schema indexing for MCAP robotics logs.
//!
//! This library covers the data-shaping step of a ROS ingestion pipeline:
//! - **Schema parsing** in [`schema`](crate::schema) - the concatenated
//!   `.msg`-style definition text MCAP stores per schema, parsed into
//!   per-type field tables
//! - **Field-path flattening** in [`schema::paths`](crate::schema::paths) -
//!   ordered dotted paths with resolved types, ready for field-level
//!   metadata registration
//! - **Per-topic splitting** in [`split`](crate::split) - streaming
//!   rewrite of one log into per-topic logs with deduplicated
//!   schema/channel registration and one-shot static-transform replay
//! - **Topic scanning** in [`io`](crate::io) - per-topic counts, time
//!   bounds, and schema checksums
//!
//! The MCAP container itself is read and written through the `mcap` crate;
//! this library owns none of the wire format beyond a header probe.
//!
//! ## Example: Flattening a schema
//!
//! ```rust
//! use robosplit::schema::message_paths;
//!
//! let paths = message_paths("std_msgs/Header header\nuint8[] data");
//! assert_eq!(paths[0].path, "header");
//! assert_eq!(paths.last().unwrap().path, "data.[*]");
//! ```
//!
//! ## Example: Splitting a log
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use robosplit::split::split_all_topics;
//!
//! let outputs = split_all_topics(Path::new("file.mcap"), Path::new("topics/"))?;
//! for out in outputs {
//!     println!("{} -> {}", out.topic, out.path.display());
//! }
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{Result, SplitError};

// Message-definition parsing and field-path flattening
pub mod schema;

pub use schema::{message_paths, FieldKind, FieldPath, FieldTable, SchemaSet};

// Per-topic splitting
pub mod split;

pub use split::{
    sanitize_topic, split_all_topics, split_topic, SplitOutput, TopicWriter, STATIC_TF_TOPIC,
};

// Log inspection
pub mod io;

pub use io::{scan_topics, TopicInfo};
