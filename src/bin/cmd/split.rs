// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Split command - write per-topic MCAP files.

use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;

use crate::common::{ProgressBar, Result};
use robosplit::split::{split_all_topics, split_topic, SplitOutput};

/// Split MCAP logs into per-topic files.
#[derive(Args, Clone, Debug)]
pub struct SplitCmd {
    /// Input MCAP file, or a directory walked recursively for .mcap files
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Base directory for outputs (default: next to each input file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Topics to split out, comma-separated (default: every topic in the
    /// summary index)
    #[arg(short, long)]
    topics: Option<String>,
}

impl SplitCmd {
    pub fn run(self) -> Result<()> {
        let files = collect_inputs(&self.input)?;
        if files.is_empty() {
            return Err(anyhow::anyhow!(
                "No .mcap files found under {}",
                self.input.display()
            ));
        }

        let topic_filter: Option<Vec<String>> = self
            .topics
            .as_ref()
            .map(|t| t.split(',').map(|s| s.trim().to_string()).collect());

        println!("Splitting {} file(s)", files.len());

        let progress = ProgressBar::new(files.len() as u64, "Splitting");
        let output_dir = self.output_dir.as_deref();

        let results: Result<Vec<Vec<SplitOutput>>> = files
            .par_iter()
            .map(|file| {
                let outputs = split_file(file, output_dir, topic_filter.as_deref())?;
                progress.inc();
                Ok(outputs)
            })
            .collect();
        let results = results?;
        progress.finish_with_message(format!("{} file(s)", files.len()));

        for (file, outputs) in files.iter().zip(&results) {
            println!();
            println!("=== {} ===", file.display());
            for out in outputs {
                println!(
                    "  {} -> {} ({} messages{})",
                    out.topic,
                    out.path.display(),
                    out.messages_written,
                    if out.static_replayed > 0 {
                        format!(", {} static tf replayed", out.static_replayed)
                    } else {
                        String::new()
                    }
                );
            }
        }

        Ok(())
    }
}

/// Split one file, whole or filtered to the requested topics.
fn split_file(
    file: &Path,
    output_dir: Option<&Path>,
    topics: Option<&[String]>,
) -> Result<Vec<SplitOutput>> {
    let out_dir = output_dir_for(file, output_dir)?;

    let outputs = match topics {
        Some(topics) => {
            let mut outputs = Vec::with_capacity(topics.len());
            for topic in topics {
                outputs.push(split_topic(file, &out_dir, topic)?);
            }
            outputs
        }
        None => split_all_topics(file, &out_dir)?,
    };
    Ok(outputs)
}

/// Destination directory for one input file: `<stem>_topics` under the base
/// directory, or beside the input when no base is given.
fn output_dir_for(file: &Path, base: Option<&Path>) -> Result<PathBuf> {
    let stem = file
        .file_stem()
        .ok_or_else(|| anyhow::anyhow!("Input has no file name: {}", file.display()))?
        .to_string_lossy();
    let parent = match base {
        Some(base) => base.to_path_buf(),
        None => file.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
    };
    Ok(parent.join(format!("{stem}_topics")))
}

/// Collect input files: a single file as-is, a directory walked recursively
/// for `.mcap` files, sorted for stable processing order.
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(anyhow::anyhow!("Input not found: {}", input.display()));
    }

    let mut files = Vec::new();
    walk_mcap_files(input, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk_mcap_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_mcap_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "mcap") {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_for_defaults_beside_input() {
        let dir = output_dir_for(Path::new("/data/run1.mcap"), None).unwrap();
        assert_eq!(dir, PathBuf::from("/data/run1_topics"));
    }

    #[test]
    fn test_output_dir_for_uses_base() {
        let dir = output_dir_for(Path::new("/data/run1.mcap"), Some(Path::new("/out"))).unwrap();
        assert_eq!(dir, PathBuf::from("/out/run1_topics"));
    }
}
