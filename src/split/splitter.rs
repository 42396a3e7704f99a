// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-topic split drivers.
//!
//! Both modes stream the source log once and route messages to
//! [`TopicWriter`]s, preserving source iteration order per destination.
//! Whole-file mode builds one writer per topic listed in the summary index;
//! a streamed message on a topic without a writer means the index and the
//! stream disagree, which is fatal. Single-topic mode filters the stream and
//! succeeds even when nothing matches.
//!
//! Every opened writer is finished on all exit paths, including errors, so
//! no destination log is left without its end magic.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use memmap2::Mmap;
use tracing::{info, warn};

use crate::core::{Result, SplitError};
use crate::split::probe::read_profile;
use crate::split::writer::{TopicWriter, STATIC_TF_TOPIC};

/// Result of one split-off output log.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// Source topic routed into this output
    pub topic: String,
    /// Destination path
    pub path: PathBuf,
    /// Ordinary messages written
    pub messages_written: u64,
    /// Static-transform payloads replayed at the start of the stream
    pub static_replayed: u64,
}

/// Filesystem-safe name for a topic: `/` becomes `_`, the leading `_` is
/// dropped.
pub fn sanitize_topic(topic: &str) -> String {
    let name = topic.replace('/', "_");
    name.strip_prefix('_').unwrap_or(&name).to_string()
}

fn map_input(path: &Path) -> Result<Mmap> {
    let file = File::open(path)
        .map_err(|e| SplitError::io("open input", format!("{}: {e}", path.display())))?;
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|e| SplitError::io("map input", format!("{}: {e}", path.display())))?;
    Ok(mmap)
}

/// Collect the `/tf_static` channel and its payloads, in stream order.
fn collect_static_tf(data: &[u8]) -> Result<Option<(Arc<mcap::Channel<'_>>, Vec<Vec<u8>>)>> {
    let mut found: Option<(Arc<mcap::Channel<'_>>, Vec<Vec<u8>>)> = None;
    for message in mcap::MessageStream::new(data)? {
        let message = message?;
        if message.channel.topic == STATIC_TF_TOPIC {
            found
                .get_or_insert_with(|| (message.channel.clone(), Vec::new()))
                .1
                .push(message.data.to_vec());
        }
    }
    Ok(found)
}

/// Split a log into one output per topic in its summary index.
///
/// Output files land in `out_dir`, named by the sanitized topic with an
/// `.mcap` extension. Requires a summary index. Returns one [`SplitOutput`]
/// per topic, ordered by topic name.
pub fn split_all_topics(input: &Path, out_dir: &Path) -> Result<Vec<SplitOutput>> {
    let mmap = map_input(input)?;
    let summary = mcap::Summary::read(&mmap)?
        .ok_or_else(|| SplitError::missing_summary(input.display().to_string()))?;
    let profile = read_profile(input, &mmap)?;

    std::fs::create_dir_all(out_dir)
        .map_err(|e| SplitError::io("create output dir", format!("{}: {e}", out_dir.display())))?;

    let mut channels: Vec<_> = summary.channels.values().cloned().collect();
    channels.sort_by_key(|c| c.id);

    let has_static = channels.iter().any(|c| c.topic == STATIC_TF_TOPIC);

    let mut writers: HashMap<String, TopicWriter> = HashMap::new();
    let run = (|| -> Result<()> {
        let static_capture = if has_static {
            collect_static_tf(&mmap)?
        } else {
            None
        };

        for channel in &channels {
            if writers.contains_key(&channel.topic) {
                continue;
            }
            let out_path = out_dir.join(format!("{}.mcap", sanitize_topic(&channel.topic)));
            let mut writer = TopicWriter::create(&out_path, &profile)?;
            if channel.topic != STATIC_TF_TOPIC {
                if let Some((ref tf_channel, ref payloads)) = static_capture {
                    writer.set_static_tf(tf_channel, payloads.clone())?;
                }
            }
            writers.insert(channel.topic.clone(), writer);
        }

        for message in mcap::MessageStream::new(&mmap)? {
            let message = message?;
            let writer = writers
                .get_mut(&message.channel.topic)
                .ok_or_else(|| SplitError::summary_mismatch(&message.channel.topic))?;
            writer.write_message(&message)?;
        }
        Ok(())
    })();

    let mut finish_err: Option<SplitError> = None;
    let mut outputs = Vec::with_capacity(writers.len());
    for (topic, mut writer) in writers.drain() {
        if let Err(e) = writer.finish() {
            finish_err.get_or_insert(e);
        }
        outputs.push(SplitOutput {
            topic,
            path: writer.path().to_path_buf(),
            messages_written: writer.messages_written(),
            static_replayed: writer.static_replayed(),
        });
    }

    run?;
    if let Some(e) = finish_err {
        return Err(e);
    }

    outputs.sort_by(|a, b| a.topic.cmp(&b.topic));
    info!(
        context = "split",
        input = %input.display(),
        outputs = outputs.len(),
        "Split log into per-topic files"
    );
    Ok(outputs)
}

/// Split out a single topic into `out_dir`.
///
/// The output log is created unconditionally; a topic with zero matching
/// messages yields a valid, message-less log rather than an error.
pub fn split_topic(input: &Path, out_dir: &Path, topic: &str) -> Result<SplitOutput> {
    let mmap = map_input(input)?;
    let profile = read_profile(input, &mmap)?;

    std::fs::create_dir_all(out_dir)
        .map_err(|e| SplitError::io("create output dir", format!("{}: {e}", out_dir.display())))?;

    let out_path = out_dir.join(format!("{}.mcap", sanitize_topic(topic)));
    let mut writer = TopicWriter::create(&out_path, &profile)?;

    let run = (|| -> Result<()> {
        if topic != STATIC_TF_TOPIC {
            if let Some((tf_channel, payloads)) = collect_static_tf(&mmap)? {
                writer.set_static_tf(&tf_channel, payloads)?;
            }
        }

        for message in mcap::MessageStream::new(&mmap)? {
            let message = message?;
            if message.channel.topic != topic {
                continue;
            }
            writer.write_message(&message)?;
        }
        Ok(())
    })();

    let finish_result = writer.finish();
    run?;
    finish_result?;

    if writer.messages_written() == 0 {
        warn!(
            context = "split",
            input = %input.display(),
            topic,
            "Requested topic yielded no messages"
        );
    }

    Ok(SplitOutput {
        topic: topic.to_string(),
        path: out_path,
        messages_written: writer.messages_written(),
        static_replayed: writer.static_replayed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_topic_strips_leading_slash() {
        assert_eq!(sanitize_topic("/rosout"), "rosout");
        assert_eq!(
            sanitize_topic("/alphasense/cam0/image_raw"),
            "alphasense_cam0_image_raw"
        );
        assert_eq!(sanitize_topic("/hesai/pandar"), "hesai_pandar");
    }

    #[test]
    fn test_sanitize_topic_without_leading_slash() {
        assert_eq!(sanitize_topic("odom"), "odom");
        assert_eq!(sanitize_topic("ns/odom"), "ns_odom");
    }
}
