// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-topic MCAP splitting.
//!
//! - [`writer`] - deduplicating per-output writer with static-transform replay
//! - [`splitter`] - whole-file and single-topic split drivers
//! - [`probe`] - source header profile probe

pub mod probe;
pub mod splitter;
pub mod writer;

pub use probe::read_profile;
pub use splitter::{sanitize_topic, split_all_topics, split_topic, SplitOutput};
pub use writer::{TopicWriter, STATIC_TF_TOPIC};
