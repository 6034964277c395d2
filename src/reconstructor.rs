// WHY: drives the classifier over a whole buffer, one block per input line, context threaded by value

use anyhow::Result;
use tracing::{debug, info};

use crate::classifier::{
    normalization::strip_leading_dash, BlockPart, BlockType, ClassificationContext, ClassificationRules,
    Classifier, NormalizedLine, StructuredBlock,
};

/// Turns raw screenplay text into ordered structured blocks
pub struct Reconstructor {
    classifier: Classifier,
}

impl Reconstructor {
    pub fn new(rules: ClassificationRules) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(rules)?,
        })
    }

    pub fn with_default_rules() -> Result<Self> {
        Self::new(ClassificationRules::default())
    }

    /// Classify every line of `text` ("\n" or "\r\n" separated) in order
    pub fn reconstruct(&self, text: &str) -> Vec<StructuredBlock> {
        debug!("Starting reconstruction on {} bytes", text.len());

        let mut blocks = Vec::new();
        let mut ctx = ClassificationContext::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = NormalizedLine::new(raw, idx + 1);
            let classification = self.classifier.classify(&line, &ctx);

            #[cfg(feature = "debug-states")]
            debug!(
                line = line.line_number,
                from = ?ctx.last_format,
                to = %classification.block_type,
                reason = ?classification.reason,
                speaker = ?ctx.current_character_name,
                "state transition"
            );

            let mut block = match classification.block_type {
                // Blank lines keep their slot as an empty action placeholder
                BlockType::Blank => StructuredBlock::new(BlockType::Action, "", line.line_number),
                BlockType::Action => {
                    StructuredBlock::new(BlockType::Action, strip_leading_dash(raw), line.line_number)
                }
                other => StructuredBlock::new(other, raw.trim(), line.line_number),
            };

            if let Some(info) = classification.scene_header.as_ref() {
                if let Some(descriptor) = info.descriptor.as_ref() {
                    block = block.with_parts(vec![
                        BlockPart {
                            block_type: BlockType::SceneHeaderNumber,
                            text: info.head.clone(),
                        },
                        BlockPart {
                            block_type: BlockType::SceneHeaderDescriptor,
                            text: descriptor.clone(),
                        },
                    ]);
                }
            }

            block.order = blocks.len();
            blocks.push(block);
            ctx = ctx.advance(classification.block_type, &line.normalized);
        }

        info!("Reconstructed {} blocks", blocks.len());
        blocks
    }
}
