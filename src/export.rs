// WHY: file outputs of a run; a block listing beside the source and a JSON stats file

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

use crate::classifier::StructuredBlock;
use crate::corrector::CorrectionReport;
use crate::pipeline::{PipelineOutput, PipelineTimings};

/// `<stem>_blocks.tsv` beside the source file
pub fn generate_blocks_path(source_path: &Path) -> PathBuf {
    let mut blocks_path = source_path.to_path_buf();
    let file_stem = blocks_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    blocks_path.set_file_name(format!("{file_stem}_blocks.tsv"));
    blocks_path
}

/// One TSV row: order, block type, text, line number
/// Tabs inside the text would break the columns, so they become spaces
pub fn format_block_line(block: &StructuredBlock) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        block.order,
        block.block_type,
        block.text.replace('\t', " "),
        block.line_number
    )
}

/// All rows, each terminated by a newline
pub fn format_blocks(blocks: &[StructuredBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&format_block_line(block));
        out.push('\n');
    }
    out
}

/// Write the block listing beside `source_path` and return where it went
pub async fn write_blocks_file(source_path: &Path, blocks: &[StructuredBlock]) -> Result<PathBuf> {
    let blocks_path = generate_blocks_path(source_path);
    let file = File::create(&blocks_path)
        .await
        .with_context(|| format!("Failed to create {}", blocks_path.display()))?;

    let mut writer = BufWriter::new(file);
    for block in blocks {
        writer.write_all(format_block_line(block).as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;

    info!("Wrote {} blocks to {}", blocks.len(), blocks_path.display());
    Ok(blocks_path)
}

/// Summary of one run, written as JSON with --stats-out
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub source: String,
    pub total_lines: usize,
    pub blocks: usize,
    pub scenes: usize,
    pub characters: usize,
    pub dialogue_lines: usize,
    pub action_lines: usize,
    pub corrections: CorrectionReport,
    pub read_ms: u64,
    pub timings: PipelineTimings,
    pub total_ms: u64,
}

impl RunStats {
    pub fn from_output(source: &str, output: &PipelineOutput, read_ms: u64, total_ms: u64) -> Self {
        Self {
            source: source.to_string(),
            total_lines: output.script.total_lines,
            blocks: output.blocks.len(),
            scenes: output.script.scenes.len(),
            characters: output.script.characters.len(),
            dialogue_lines: output.script.dialogue_lines.len(),
            action_lines: output.script.action_line_count(),
            corrections: output.report.clone(),
            read_ms,
            timings: output.timings.clone(),
            total_ms,
        }
    }
}

pub async fn write_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write stats to {}", path.display()))?;
    info!("Wrote run stats to {}", path.display());
    Ok(())
}
