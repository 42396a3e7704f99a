// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-topic MCAP output writer.
//!
//! A [`TopicWriter`] owns one destination log. Schemas and channels from the
//! source log are registered at most once per writer; the mapping from
//! source ids to output ids is held in owned lookup tables, never shared
//! across writers.
//!
//! Static-transform handling: `/tf_static` data is logically latched (valid
//! for the whole recording), so an armed writer replays the captured
//! payloads exactly once, immediately before its first ordinary message,
//! and drops any `/tf_static` messages arriving through the normal stream.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{Result, SplitError};

/// The well-known latched transform topic.
pub const STATIC_TF_TOPIC: &str = "/tf_static";

/// Captured static-transform data awaiting its one-shot replay.
struct StaticTfBuffer {
    /// Output channel id the payloads belong to
    channel_id: u16,
    /// Raw message payloads, in capture order
    payloads: Vec<Vec<u8>>,
}

/// Writer for one split-off MCAP log.
pub struct TopicWriter {
    writer: mcap::Writer<BufWriter<File>>,
    path: PathBuf,
    /// source schema id -> output schema id
    schema_ids: HashMap<u16, u16>,
    /// source channel id -> output channel id
    channel_ids: HashMap<u16, u16>,
    static_tf: Option<StaticTfBuffer>,
    armed: bool,
    messages_written: u64,
    static_replayed: u64,
}

impl TopicWriter {
    /// Open a fresh output log at `path` with the source log's profile.
    ///
    /// The MCAP start marker and header record are emitted immediately.
    pub fn create<P: AsRef<Path>>(path: P, profile: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| {
            SplitError::io("create output", format!("{}: {e}", path.display()))
        })?;
        let writer = mcap::WriteOptions::new()
            .profile(profile)
            .create(BufWriter::new(file))
            .map_err(|e| SplitError::mcap("open writer", e.to_string()))?;

        debug!(context = "topic_writer", path = %path.display(), profile, "Opened split output");

        Ok(Self {
            writer,
            path,
            schema_ids: HashMap::new(),
            channel_ids: HashMap::new(),
            static_tf: None,
            armed: false,
            messages_written: 0,
            static_replayed: 0,
        })
    }

    /// Destination path of this writer.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ordinary messages appended so far (replayed static data not included).
    pub fn messages_written(&self) -> u64 {
        self.messages_written
    }

    /// Static-transform payloads replayed through the one-shot buffer.
    pub fn static_replayed(&self) -> u64 {
        self.static_replayed
    }

    /// Register a source schema, returning the output schema id.
    ///
    /// Registering the same source schema id again returns the cached id
    /// without touching the output log.
    pub fn register_schema(&mut self, schema: &mcap::Schema<'_>) -> Result<u16> {
        if let Some(&id) = self.schema_ids.get(&schema.id) {
            return Ok(id);
        }
        let id = self
            .writer
            .add_schema(&schema.name, &schema.encoding, &schema.data)
            .map_err(|e| SplitError::mcap("register schema", e.to_string()))?;
        self.schema_ids.insert(schema.id, id);
        Ok(id)
    }

    /// Register a source channel, returning the output channel id.
    ///
    /// Resolves the channel's schema through [`Self::register_schema`]
    /// first; a schema-less channel registers with schema id 0.
    pub fn register_channel(&mut self, channel: &mcap::Channel<'_>) -> Result<u16> {
        if let Some(&id) = self.channel_ids.get(&channel.id) {
            return Ok(id);
        }
        let schema_id = match &channel.schema {
            Some(schema) => self.register_schema(schema)?,
            None => 0,
        };
        let id = self
            .writer
            .add_channel(
                schema_id,
                &channel.topic,
                &channel.message_encoding,
                &channel.metadata,
            )
            .map_err(|e| SplitError::mcap("register channel", e.to_string()))?;
        self.channel_ids.insert(channel.id, id);
        Ok(id)
    }

    /// Arm this writer with captured static-transform data.
    ///
    /// The channel is registered now; the payloads are replayed verbatim
    /// immediately before the first ordinary message.
    pub fn set_static_tf(
        &mut self,
        channel: &mcap::Channel<'_>,
        payloads: Vec<Vec<u8>>,
    ) -> Result<()> {
        let channel_id = self.register_channel(channel)?;
        self.static_tf = Some(StaticTfBuffer {
            channel_id,
            payloads,
        });
        self.armed = true;
        Ok(())
    }

    /// Append one message from the source stream.
    ///
    /// An armed writer drops `/tf_static` messages: their data travels
    /// through the one-shot buffer instead. A pending buffer is flushed
    /// before the first ordinary message, stamped with that message's
    /// timestamps and sequence, then permanently cleared.
    pub fn write_message(&mut self, message: &mcap::Message<'_>) -> Result<()> {
        if self.armed && message.channel.topic == STATIC_TF_TOPIC {
            return Ok(());
        }

        if let Some(buffer) = self.static_tf.take() {
            for payload in &buffer.payloads {
                let header = mcap::records::MessageHeader {
                    channel_id: buffer.channel_id,
                    sequence: message.sequence,
                    log_time: message.log_time,
                    publish_time: message.publish_time,
                };
                self.writer
                    .write_to_known_channel(&header, payload)
                    .map_err(|e| SplitError::mcap("replay static tf", e.to_string()))?;
                self.static_replayed += 1;
            }
        }

        let channel_id = self.register_channel(&message.channel)?;
        let header = mcap::records::MessageHeader {
            channel_id,
            sequence: message.sequence,
            log_time: message.log_time,
            publish_time: message.publish_time,
        };
        self.writer
            .write_to_known_channel(&header, &message.data)
            .map_err(|e| SplitError::mcap("write message", e.to_string()))?;
        self.messages_written += 1;
        Ok(())
    }

    /// Finalize the output log: write the summary section and end magic.
    ///
    /// Must be called exactly once, after the last `write_message`.
    pub fn finish(&mut self) -> Result<()> {
        self.writer
            .finish()
            .map_err(|e| SplitError::mcap("finish writer", e.to_string()))?;
        debug!(
            context = "topic_writer",
            path = %self.path.display(),
            messages = self.messages_written,
            static_replayed = self.static_replayed,
            "Finished split output"
        );
        Ok(())
    }
}
