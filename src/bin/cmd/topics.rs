// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Topics command - list per-topic counts, time bounds, and schemas.

use std::path::PathBuf;

use clap::Args;

use crate::common::{format_duration, format_timestamp, Result};
use robosplit::io::scan_topics;

/// List topics with message counts, time bounds, and schema checksums.
#[derive(Args, Clone, Debug)]
pub struct TopicsCmd {
    /// Input MCAP file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl TopicsCmd {
    pub fn run(self) -> Result<()> {
        let topics = scan_topics(&self.input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&topics)?);
            return Ok(());
        }

        println!("=== Topics in {} ===", self.input.display());
        println!();
        for info in &topics {
            println!("Topic: {}", info.topic);
            println!("  Schema: {} ({})", info.schema_name, info.schema_checksum);
            println!("  Encoding: {}", info.message_encoding);
            println!("  Messages: {}", info.message_count);
            if let (Some(start), Some(end)) = (info.start_time, info.end_time) {
                println!("  Start: {}", format_timestamp(start));
                println!("  End: {}", format_timestamp(end));
                println!("  Duration: {}", format_duration(end.saturating_sub(start)));
            }
            println!();
        }
        println!("{} topic(s)", topics.len());

        Ok(())
    }
}
