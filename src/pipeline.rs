// WHY: single entry point running reconstruction, correction and structuring with per-stage timing

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::classifier::{ClassificationRules, StructuredBlock};
use crate::corrector::{CorrectionReport, Corrector};
use crate::reconstructor::Reconstructor;
use crate::structurer::{structure_script, Script};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub rules: ClassificationRules,
    /// Run the post-processing corrector (default: true)
    pub apply_corrections: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rules: ClassificationRules::default(),
            apply_corrections: true,
        }
    }
}

/// Wall time per stage in microseconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineTimings {
    pub reconstruct_us: u64,
    pub correct_us: u64,
    pub structure_us: u64,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub blocks: Vec<StructuredBlock>,
    pub report: CorrectionReport,
    pub script: Script,
    pub timings: PipelineTimings,
}

pub struct ScreenplayPipeline {
    reconstructor: Reconstructor,
    corrector: Corrector,
    config: PipelineConfig,
}

impl ScreenplayPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            reconstructor: Reconstructor::new(config.rules.clone())?,
            corrector: Corrector::new(config.rules.clone()),
            config,
        })
    }

    pub fn with_default_config() -> Result<Self> {
        Self::new(PipelineConfig::default())
    }

    pub fn reconstructor(&self) -> &Reconstructor {
        &self.reconstructor
    }

    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    /// Raw text → blocks → corrected blocks → script
    pub fn process(&self, text: &str) -> PipelineOutput {
        let mut timings = PipelineTimings::default();

        let start = Instant::now();
        let blocks = self.reconstructor.reconstruct(text);
        timings.reconstruct_us = start.elapsed().as_micros() as u64;

        let start = Instant::now();
        let (blocks, report) = if self.config.apply_corrections {
            self.corrector.correct(blocks)
        } else {
            (blocks, CorrectionReport::default())
        };
        timings.correct_us = start.elapsed().as_micros() as u64;

        let start = Instant::now();
        let script = structure_script(text, &blocks);
        timings.structure_us = start.elapsed().as_micros() as u64;

        info!(
            "Pipeline complete: {} blocks, {} scenes in {}us",
            blocks.len(),
            script.scenes.len(),
            timings.reconstruct_us + timings.correct_us + timings.structure_us
        );

        PipelineOutput {
            blocks,
            report,
            script,
            timings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::BlockType;

    #[test]
    fn test_corrections_toggle() {
        let text = "• سارة: أهلاً بك";

        let corrected = ScreenplayPipeline::with_default_config().unwrap().process(text);
        assert_eq!(corrected.blocks.len(), 2);
        assert_eq!(corrected.report.splits, 1);
        assert_eq!(corrected.script.character("سارة").unwrap().dialogue_count, 1);

        let raw = ScreenplayPipeline::new(PipelineConfig {
            apply_corrections: false,
            ..Default::default()
        })
        .unwrap()
        .process(text);
        assert_eq!(raw.blocks.len(), 1);
        assert_eq!(raw.blocks[0].block_type, BlockType::Action);
        assert_eq!(raw.report, CorrectionReport::default());
        assert!(raw.script.characters.is_empty());
    }
}
