// WHY: second pass over reconstructed blocks fixing two recurring misclassifications
// 1. "• name: speech" pasted as action   2. stage direction that landed inside dialogue

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::{
    lexicon::BULLETS, normalization::strip_leading_dash, normalize_line, renumber, BlockType,
    ClassificationRules, Lexicon, StructuredBlock,
};

/// Counts of rewrites applied by one correction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionReport {
    pub splits: usize,
    pub demotions: usize,
}

impl CorrectionReport {
    pub fn total(&self) -> usize {
        self.splits + self.demotions
    }
}

/// Result of checking one block against the rewrite rules
enum Rewrite {
    /// Bullet compound: the cue and, when non-empty, the speech that followed the colon
    Split {
        cue: StructuredBlock,
        dialogue: Option<StructuredBlock>,
    },
    /// Dialogue demoted to action
    Demote(StructuredBlock),
    Keep(StructuredBlock),
}

pub struct Corrector {
    rules: ClassificationRules,
    lexicon: &'static Lexicon,
}

impl Corrector {
    pub fn new(rules: ClassificationRules) -> Self {
        Self {
            rules,
            lexicon: Lexicon::shared(),
        }
    }

    /// Rewrite blocks until each one is a fixpoint of both rules, then renumber
    /// Running the pass again on its own output changes nothing
    pub fn correct(&self, blocks: Vec<StructuredBlock>) -> (Vec<StructuredBlock>, CorrectionReport) {
        let mut report = CorrectionReport::default();
        let mut out = Vec::with_capacity(blocks.len());

        for block in blocks {
            // Stack keeps spliced blocks in document order; each rewrite shortens text or leaves dialogue
            let mut pending = vec![block];
            while let Some(current) = pending.pop() {
                match self.rewrite(current) {
                    Rewrite::Split { cue, dialogue } => {
                        debug!(line = cue.line_number, cue = %cue.text, "split bullet compound");
                        report.splits += 1;
                        out.push(cue);
                        if let Some(dialogue) = dialogue {
                            pending.push(dialogue);
                        }
                    }
                    Rewrite::Demote(action) => {
                        debug!(line = action.line_number, "demoted action-shaped dialogue");
                        report.demotions += 1;
                        pending.push(action);
                    }
                    Rewrite::Keep(block) => out.push(block),
                }
            }
        }

        renumber(&mut out);
        info!(
            "Correction pass: {} splits, {} demotions, {} blocks",
            report.splits,
            report.demotions,
            out.len()
        );
        (out, report)
    }

    fn rewrite(&self, block: StructuredBlock) -> Rewrite {
        match block.block_type {
            BlockType::Action => match self.split_bullet_compound(&block.text) {
                Some((name, remainder)) => {
                    let cue = StructuredBlock::new(BlockType::CharacterCue, format!("{name}:"), block.line_number);
                    let dialogue = (!remainder.is_empty())
                        .then(|| StructuredBlock::new(BlockType::Dialogue, remainder, block.line_number));
                    Rewrite::Split { cue, dialogue }
                }
                None => Rewrite::Keep(block),
            },
            BlockType::Dialogue if self.is_action_shaped(&block.text) => Rewrite::Demote(StructuredBlock::new(
                BlockType::Action,
                strip_leading_dash(&block.text),
                block.line_number,
            )),
            _ => Rewrite::Keep(block),
        }
    }

    /// `<bullet><name>:<remainder>` with a short non-empty name
    fn split_bullet_compound<'a>(&self, text: &'a str) -> Option<(&'a str, &'a str)> {
        let body = text.trim_start().strip_prefix(BULLETS)?;
        let (name, remainder) = body.split_once(':')?;
        let name = name.trim();
        if name.is_empty() || name.split_whitespace().count() > self.rules.max_cue_words {
            return None;
        }
        Some((name, remainder.trim()))
    }

    /// Leading dash, leading opener, or an action verb embedded mid-line
    fn is_action_shaped(&self, text: &str) -> bool {
        let normalized = normalize_line(text);
        normalized.starts_with('-')
            || self.lexicon.starts_with_narrative_opener(&normalized)
            || self.lexicon.has_embedded_action_verb(&normalized)
    }
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new(ClassificationRules::default())
    }
}
