// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Paths command - flatten topic schemas into dotted field paths.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::common::Result;
use robosplit::io::scan_schemas;
use robosplit::schema::message_paths;

/// Flatten each topic's schema into dotted field paths with resolved types.
#[derive(Args, Clone, Debug)]
pub struct PathsCmd {
    /// Input MCAP file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Only this topic (default: every topic with a schema)
    #[arg(short, long)]
    topic: Option<String>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl PathsCmd {
    pub fn run(self) -> Result<()> {
        let mut schemas = scan_schemas(&self.input)?;
        if let Some(ref topic) = self.topic {
            schemas.retain(|s| &s.topic == topic);
            if schemas.is_empty() {
                return Err(anyhow::anyhow!(
                    "No schema-bearing topic '{}' in {}. Use the topics command to list topics.",
                    topic,
                    self.input.display()
                ));
            }
        }

        if self.json {
            let value: Vec<_> = schemas
                .iter()
                .map(|schema| {
                    let paths: Vec<_> = message_paths(&schema.definition)
                        .iter()
                        .map(|p| {
                            json!({
                                "path": p.path,
                                "type": p.ty,
                                "kind": p.kind().as_str(),
                            })
                        })
                        .collect();
                    json!({
                        "topic": schema.topic,
                        "schema": schema.schema_name,
                        "paths": paths,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        for schema in &schemas {
            println!("=== {} ({}) ===", schema.topic, schema.schema_name);
            for p in message_paths(&schema.definition) {
                println!("  {:<44} {:<36} {}", p.path, p.ty, p.kind().as_str());
            }
            println!();
        }

        Ok(())
    }
}
