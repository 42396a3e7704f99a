// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Topic summary scan.
//!
//! Collects the per-topic facts the surrounding ingestion driver registers
//! with the platform: schema identity (name plus a checksum over the raw
//! definition bytes), message count, and per-channel time bounds. Channel
//! and schema metadata come from the summary index; time bounds need one
//! pass over the message stream since the summary only carries file-level
//! bounds.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use serde::Serialize;

use crate::core::{Result, SplitError};

/// Per-topic facts from one MCAP log.
#[derive(Debug, Clone, Serialize)]
pub struct TopicInfo {
    /// Topic name as recorded
    pub topic: String,
    /// Schema name, empty for schema-less channels
    pub schema_name: String,
    /// CRC32 over the raw schema definition bytes, hex-encoded; empty for
    /// schema-less channels
    pub schema_checksum: String,
    /// Message encoding (e.g. "cdr", "ros1")
    pub message_encoding: String,
    /// Messages recorded on this channel
    pub message_count: u64,
    /// Earliest log time on this channel, if any message exists
    pub start_time: Option<u64>,
    /// Latest log time on this channel, if any message exists
    pub end_time: Option<u64>,
}

/// CRC32 checksum of schema definition bytes, hex-encoded.
pub fn schema_checksum(data: &[u8]) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hex::encode(hasher.finalize().to_be_bytes())
}

/// A topic's schema definition text, for field-path flattening.
#[derive(Debug, Clone, Serialize)]
pub struct TopicSchema {
    /// Topic name as recorded
    pub topic: String,
    /// Schema name
    pub schema_name: String,
    /// Raw definition text (lossily decoded for non-UTF-8 blobs)
    pub definition: String,
}

/// Collect each topic's schema definition text, ordered by topic name.
///
/// Schema-less channels are omitted.
pub fn scan_schemas<P: AsRef<Path>>(path: P) -> Result<Vec<TopicSchema>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| SplitError::io("open input", format!("{}: {e}", path.display())))?;
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|e| SplitError::io("map input", format!("{}: {e}", path.display())))?;

    let summary = mcap::Summary::read(&mmap)?
        .ok_or_else(|| SplitError::missing_summary(path.display().to_string()))?;

    let mut schemas: Vec<TopicSchema> = summary
        .channels
        .values()
        .filter_map(|channel| {
            channel.schema.as_ref().map(|schema| TopicSchema {
                topic: channel.topic.clone(),
                schema_name: schema.name.clone(),
                definition: String::from_utf8_lossy(&schema.data).into_owned(),
            })
        })
        .collect();

    schemas.sort_by(|a, b| a.topic.cmp(&b.topic));
    Ok(schemas)
}

#[derive(Default, Clone, Copy)]
struct ChannelBounds {
    count: u64,
    start: u64,
    end: u64,
}

/// Scan a log's topics, ordered by topic name.
///
/// Requires a summary index; counts prefer the summary statistics and fall
/// back to the stream scan.
pub fn scan_topics<P: AsRef<Path>>(path: P) -> Result<Vec<TopicInfo>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| SplitError::io("open input", format!("{}: {e}", path.display())))?;
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|e| SplitError::io("map input", format!("{}: {e}", path.display())))?;

    let summary = mcap::Summary::read(&mmap)?
        .ok_or_else(|| SplitError::missing_summary(path.display().to_string()))?;

    let mut bounds: HashMap<u16, ChannelBounds> = HashMap::new();
    for message in mcap::MessageStream::new(&mmap)? {
        let message = message?;
        let entry = bounds.entry(message.channel.id).or_insert(ChannelBounds {
            count: 0,
            start: u64::MAX,
            end: 0,
        });
        entry.count += 1;
        entry.start = entry.start.min(message.log_time);
        entry.end = entry.end.max(message.log_time);
    }

    let stats = summary.stats.as_ref();
    let mut topics: Vec<TopicInfo> = summary
        .channels
        .values()
        .map(|channel| {
            let scanned = bounds.get(&channel.id).copied();
            let message_count = stats
                .and_then(|s| s.channel_message_counts.get(&channel.id).copied())
                .or(scanned.map(|b| b.count))
                .unwrap_or(0);
            let (schema_name, checksum) = match &channel.schema {
                Some(schema) => (schema.name.clone(), schema_checksum(&schema.data)),
                None => (String::new(), String::new()),
            };
            TopicInfo {
                topic: channel.topic.clone(),
                schema_name,
                schema_checksum: checksum,
                message_encoding: channel.message_encoding.clone(),
                message_count,
                start_time: scanned.map(|b| b.start),
                end_time: scanned.map(|b| b.end),
            }
        })
        .collect();

    topics.sort_by(|a, b| a.topic.cmp(&b.topic));
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_checksum_is_stable() {
        let a = schema_checksum(b"uint32 seq\n");
        let b = schema_checksum(b"uint32 seq\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
    }

    #[test]
    fn test_schema_checksum_differs_on_content() {
        assert_ne!(schema_checksum(b"uint32 seq"), schema_checksum(b"int32 seq"));
    }

    #[test]
    fn test_scan_topics_missing_file_errors() {
        let err = scan_topics("/nonexistent/robosplit/input.mcap").unwrap_err();
        assert!(matches!(err, SplitError::Io { .. }));
    }
}
